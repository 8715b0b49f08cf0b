//! State-ministry actions, including the slot-capped multi-turn projects.

use crate::model::catalog::{ActionDef, Domain, RiskTier, TargetKind};
use crate::model::effects::{EffectBundle, Fate};

pub fn ministry_actions() -> Vec<ActionDef> {
    vec![
        ActionDef {
            id: "requisition_funds",
            name: "Requisition Funds",
            domain: Domain::Ministry,
            min_rank: 2,
            required_track: Some(Domain::Ministry),
            target: TargetKind::None,
            base_chance: 60,
            risk: RiskTier::Low,
            execution_turns: 0,
            cooldown_turns: 4,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                stability: -1,
                treasury: 8,
                ..Default::default()
            },
            on_failure: EffectBundle {
                party_standing: -3,
                ..Default::default()
            },
        },
        ActionDef {
            id: "grain_exports",
            name: "Expand Grain Exports",
            domain: Domain::Ministry,
            min_rank: 2,
            required_track: Some(Domain::Ministry),
            target: TargetKind::Country,
            base_chance: 65,
            risk: RiskTier::Low,
            execution_turns: 2,
            cooldown_turns: 5,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                stability: -3,
                treasury: 12,
                ..Default::default()
            },
            on_failure: EffectBundle {
                treasury: -4,
                ..Default::default()
            },
        },
        ActionDef {
            id: "industrial_project",
            name: "Launch Industrial Project",
            domain: Domain::Ministry,
            min_rank: 3,
            required_track: Some(Domain::Ministry),
            target: TargetKind::None,
            base_chance: 55,
            risk: RiskTier::Moderate,
            execution_turns: 4,
            cooldown_turns: 6,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: true,
            allows_stacking: true,
            on_success: EffectBundle {
                stability: 5,
                treasury: 15,
                ..Default::default()
            },
            on_failure: EffectBundle {
                treasury: -10,
                ..Default::default()
            },
        },
        ActionDef {
            id: "collectivize_district",
            name: "Collectivize District",
            domain: Domain::Ministry,
            min_rank: 4,
            required_track: Some(Domain::Ministry),
            target: TargetKind::Organization,
            base_chance: 50,
            risk: RiskTier::High,
            execution_turns: 3,
            cooldown_turns: 8,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: true,
            allows_stacking: false,
            on_success: EffectBundle {
                stability: -5,
                treasury: 10,
                ..Default::default()
            },
            on_failure: EffectBundle {
                stability: -10,
                ..Default::default()
            },
        },
        ActionDef {
            id: "purge_ministry",
            name: "Purge the Ministry",
            domain: Domain::Ministry,
            min_rank: 5,
            required_track: Some(Domain::Ministry),
            target: TargetKind::Official,
            base_chance: 55,
            risk: RiskTier::High,
            execution_turns: 0,
            cooldown_turns: 10,
            resource_cost: 0,
            max_target_rank: Some(6),
            approval_rank: Some(4),
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                party_standing: 5,
                intimidation: 3,
                target_fate: Some(Fate::Dismissed),
                ..Default::default()
            },
            on_failure: EffectBundle {
                party_standing: -8,
                ..Default::default()
            },
        },
    ]
}
