//! Security-directorate operations.

use crate::model::catalog::{ActionDef, Domain, RiskTier, TargetKind};
use crate::model::effects::{EffectBundle, Fate, RegimeFlag};

pub fn security_actions() -> Vec<ActionDef> {
    vec![
        ActionDef {
            id: "surveillance_detail",
            name: "Assign Surveillance Detail",
            domain: Domain::Security,
            min_rank: 1,
            required_track: Some(Domain::Security),
            target: TargetKind::Official,
            base_chance: 70,
            risk: RiskTier::Minimal,
            execution_turns: 0,
            cooldown_turns: 2,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                intimidation: 1,
                target_fear: 5,
                ..Default::default()
            },
            on_failure: EffectBundle {
                target_disposition: -5,
                ..Default::default()
            },
        },
        ActionDef {
            id: "recruit_informant",
            name: "Recruit Informant",
            domain: Domain::Security,
            min_rank: 2,
            required_track: Some(Domain::Security),
            target: TargetKind::Official,
            base_chance: 55,
            risk: RiskTier::Low,
            execution_turns: 0,
            cooldown_turns: 3,
            resource_cost: 5,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                intimidation: 2,
                target_fear: 10,
                ..Default::default()
            },
            on_failure: EffectBundle {
                target_disposition: -10,
                ..Default::default()
            },
        },
        ActionDef {
            id: "arrest_official",
            name: "Order Arrest",
            domain: Domain::Security,
            min_rank: 3,
            required_track: Some(Domain::Security),
            target: TargetKind::Official,
            base_chance: 60,
            risk: RiskTier::Moderate,
            execution_turns: 0,
            cooldown_turns: 4,
            resource_cost: 0,
            max_target_rank: Some(6),
            approval_rank: Some(4),
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                stability: -2,
                intimidation: 5,
                target_fear: 20,
                starts_detention: true,
                ..Default::default()
            },
            on_failure: EffectBundle {
                party_standing: -5,
                target_disposition: -15,
                ..Default::default()
            },
        },
        ActionDef {
            id: "stage_show_trial",
            name: "Stage Show Trial",
            domain: Domain::Security,
            min_rank: 4,
            required_track: Some(Domain::Security),
            target: TargetKind::Official,
            base_chance: 55,
            risk: RiskTier::High,
            execution_turns: 0,
            cooldown_turns: 6,
            resource_cost: 0,
            max_target_rank: Some(7),
            approval_rank: Some(5),
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                intimidation: 5,
                starts_trial: true,
                ..Default::default()
            },
            on_failure: EffectBundle {
                party_standing: -5,
                international_standing: -5,
                ..Default::default()
            },
        },
        ActionDef {
            id: "mass_arrests",
            name: "Order Mass Arrests",
            domain: Domain::Security,
            min_rank: 5,
            required_track: Some(Domain::Security),
            target: TargetKind::None,
            base_chance: 65,
            risk: RiskTier::High,
            execution_turns: 2,
            cooldown_turns: 8,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                stability: -5,
                intimidation: 10,
                set_flags: vec![RegimeFlag::PurgeUnderway],
                ..Default::default()
            },
            on_failure: EffectBundle {
                stability: -8,
                international_standing: -5,
                ..Default::default()
            },
        },
        ActionDef {
            id: "border_crackdown",
            name: "Seal the Borders",
            domain: Domain::Security,
            min_rank: 4,
            required_track: Some(Domain::Security),
            target: TargetKind::None,
            base_chance: 70,
            risk: RiskTier::Moderate,
            execution_turns: 3,
            cooldown_turns: 10,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                stability: 3,
                international_standing: -3,
                set_flags: vec![RegimeFlag::BorderSealed],
                ..Default::default()
            },
            on_failure: EffectBundle {
                stability: -3,
                ..Default::default()
            },
        },
        ActionDef {
            id: "dismiss_subordinate",
            name: "Dismiss Subordinate",
            domain: Domain::Security,
            min_rank: 4,
            required_track: Some(Domain::Security),
            target: TargetKind::Official,
            base_chance: 75,
            risk: RiskTier::Low,
            execution_turns: 0,
            cooldown_turns: 5,
            resource_cost: 0,
            max_target_rank: Some(3),
            approval_rank: Some(2),
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                intimidation: 2,
                target_fate: Some(Fate::Dismissed),
                ..Default::default()
            },
            on_failure: EffectBundle {
                party_standing: -3,
                target_disposition: -10,
                ..Default::default()
            },
        },
    ]
}
