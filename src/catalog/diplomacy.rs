//! Foreign-ministry actions.

use crate::model::catalog::{ActionDef, Domain, RiskTier, TargetKind};
use crate::model::effects::{EffectBundle, RegimeFlag};

pub fn diplomacy_actions() -> Vec<ActionDef> {
    vec![
        ActionDef {
            id: "cultural_exchange",
            name: "Sponsor Cultural Exchange",
            domain: Domain::Diplomacy,
            min_rank: 1,
            required_track: Some(Domain::Diplomacy),
            target: TargetKind::Country,
            base_chance: 70,
            risk: RiskTier::Minimal,
            execution_turns: 0,
            cooldown_turns: 4,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                international_standing: 3,
                ..Default::default()
            },
            on_failure: EffectBundle {
                international_standing: -1,
                ..Default::default()
            },
        },
        ActionDef {
            id: "denounce_rival",
            name: "Denounce Rival",
            domain: Domain::Diplomacy,
            min_rank: 2,
            required_track: Some(Domain::Diplomacy),
            target: TargetKind::Official,
            base_chance: 50,
            risk: RiskTier::Moderate,
            execution_turns: 0,
            cooldown_turns: 3,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: Some(6),
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                party_standing: 5,
                target_disposition: -10,
                ..Default::default()
            },
            // Single signed penalty; the denounced party resents the
            // attempt whether or not it lands.
            on_failure: EffectBundle {
                party_standing: -5,
                target_disposition: -10,
                ..Default::default()
            },
        },
        ActionDef {
            id: "trade_agreement",
            name: "Negotiate Trade Agreement",
            domain: Domain::Diplomacy,
            min_rank: 2,
            required_track: Some(Domain::Diplomacy),
            target: TargetKind::Country,
            base_chance: 60,
            risk: RiskTier::Low,
            execution_turns: 2,
            cooldown_turns: 5,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                treasury: 10,
                international_standing: 5,
                ..Default::default()
            },
            on_failure: EffectBundle {
                international_standing: -2,
                ..Default::default()
            },
        },
        ActionDef {
            id: "host_summit",
            name: "Host Party Summit",
            domain: Domain::Diplomacy,
            min_rank: 4,
            required_track: Some(Domain::Diplomacy),
            target: TargetKind::None,
            base_chance: 55,
            risk: RiskTier::Moderate,
            execution_turns: 0,
            cooldown_turns: 6,
            resource_cost: 10,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                party_standing: 3,
                international_standing: 6,
                ..Default::default()
            },
            on_failure: EffectBundle {
                treasury: -5,
                international_standing: -3,
                ..Default::default()
            },
        },
        ActionDef {
            id: "negotiate_ceasefire",
            name: "Negotiate Ceasefire",
            domain: Domain::Diplomacy,
            min_rank: 5,
            required_track: Some(Domain::Diplomacy),
            target: TargetKind::Country,
            base_chance: 45,
            risk: RiskTier::High,
            execution_turns: 2,
            cooldown_turns: 8,
            resource_cost: 0,
            max_target_rank: None,
            approval_rank: None,
            is_project: false,
            allows_stacking: false,
            on_success: EffectBundle {
                stability: 5,
                international_standing: 8,
                clear_flags: vec![RegimeFlag::AtWar],
                ..Default::default()
            },
            on_failure: EffectBundle {
                international_standing: -5,
                ..Default::default()
            },
        },
    ]
}
