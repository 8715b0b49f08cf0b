//! Static action tables for the three domains.
//!
//! Each domain module builds its table once; [`Catalog::standard`] merges
//! them. Tables are data only — all decision logic lives in `engine`.

mod diplomacy;
mod ministry;
mod security;

use bevy_ecs::resource::Resource;

use crate::model::{ActionDef, Domain};

pub use diplomacy::diplomacy_actions;
pub use ministry::ministry_actions;
pub use security::security_actions;

/// Concurrent ministry project slots.
pub const PROJECT_SLOT_CAP: usize = 2;

/// Immutable lookup table over all known actions.
#[derive(Resource, Debug, Clone)]
pub struct Catalog {
    actions: Vec<ActionDef>,
}

impl Catalog {
    /// The standard game catalog: security + diplomacy + ministry.
    pub fn standard() -> Self {
        let mut actions = security_actions();
        actions.extend(diplomacy_actions());
        actions.extend(ministry_actions());
        Self::from_actions(actions)
    }

    /// Build a catalog from explicit definitions (used by tests).
    pub fn from_actions(actions: Vec<ActionDef>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<_> = actions.iter().map(|a| a.id).collect();
                ids.sort_unstable();
                let before = ids.len();
                ids.dedup();
                ids.len() == before
            },
            "duplicate action id in catalog"
        );
        Self { actions }
    }

    pub fn get(&self, action_id: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.id == action_id)
    }

    pub fn domain(&self, domain: Domain) -> impl Iterator<Item = &ActionDef> {
        self.actions.iter().filter(move |a| a.domain == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDef> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_all_domains() {
        let catalog = Catalog::standard();
        for domain in [Domain::Security, Domain::Diplomacy, Domain::Ministry] {
            assert!(catalog.domain(domain).count() >= 4, "{domain:?} too thin");
        }
    }

    #[test]
    fn catalog_data_is_sane() {
        for def in Catalog::standard().iter() {
            assert!((0..=100).contains(&def.base_chance), "{}", def.id);
            assert!((1..=10).contains(&def.min_rank), "{}", def.id);
            if let (Some(max), Some(approval)) = (def.max_target_rank, def.approval_rank) {
                assert!(approval <= max, "{}: approval above hard ceiling", def.id);
            }
            if def.is_project {
                assert!(def.is_multi_turn(), "{}: projects are multi-turn", def.id);
            }
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::standard();
        assert!(catalog.get("arrest_official").is_some());
        assert!(catalog.get("no_such_action").is_none());
    }
}
