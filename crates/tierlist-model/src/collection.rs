//! The complete working state of the editor.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::InvariantViolation;
use crate::ids::{PlacementId, TierId};
use crate::tier::{Placement, Tier};

/// An ordered sequence of tiers, each owning its placements.
///
/// Values are treated as immutable snapshots by the editor: every mutation
/// produces a new collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierCollection {
    pub tiers: Vec<Tier>,
}

impl From<Vec<Tier>> for TierCollection {
    fn from(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }
}

impl TierCollection {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tier> {
        self.tiers.iter()
    }

    pub fn tier(&self, id: &TierId) -> Option<&Tier> {
        self.tiers.iter().find(|t| &t.id == id)
    }

    pub fn tier_index(&self, id: &TierId) -> Option<usize> {
        self.tiers.iter().position(|t| &t.id == id)
    }

    /// Tier that currently owns the placement.
    pub fn owner_of(&self, placement: &PlacementId) -> Option<&Tier> {
        self.tiers
            .iter()
            .find(|t| t.placements.iter().any(|p| &p.id == placement))
    }

    /// `(tier index, placement index)` of a placement.
    pub fn locate(&self, placement: &PlacementId) -> Option<(usize, usize)> {
        self.tiers.iter().enumerate().find_map(|(tier_idx, tier)| {
            tier.placement_index(placement)
                .map(|placement_idx| (tier_idx, placement_idx))
        })
    }

    pub fn placement(&self, id: &PlacementId) -> Option<&Placement> {
        self.locate(id)
            .map(|(tier_idx, placement_idx)| &self.tiers[tier_idx].placements[placement_idx])
    }

    pub fn placement_count(&self) -> usize {
        self.tiers.iter().map(|t| t.placements.len()).sum()
    }

    /// Operators that already sit in some tier.
    pub fn placed_operator_ids(&self) -> BTreeSet<&str> {
        self.tiers
            .iter()
            .flat_map(|t| t.placements.iter())
            .map(|p| p.operator_id.as_str())
            .collect()
    }

    /// Operators placed more than once, with how often they appear.
    ///
    /// The editor never creates duplicates itself; callers keep placed
    /// operators out of the add list. This is a diagnostic for loaded data.
    pub fn duplicate_operators(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for placement in self.tiers.iter().flat_map(|t| t.placements.iter()) {
            *counts.entry(placement.operator_id.as_str()).or_default() += 1;
        }
        counts.retain(|_, count| *count > 1);
        counts
    }

    /// Verify the ordering invariants.
    ///
    /// `display_order` must be a permutation of `0..N` across tiers and each
    /// tier's `sub_order` values a permutation of `0..M`. Every placement must
    /// name the tier that holds it.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        for tier in &self.tiers {
            if !seen.insert(&tier.id) {
                return Err(InvariantViolation::DuplicateTier(tier.id.clone()));
            }
        }

        let display: Vec<usize> = self.tiers.iter().map(|t| t.display_order).collect();
        if !is_permutation(&display) {
            return Err(InvariantViolation::DisplayOrder {
                found: display,
                expected_len: self.tiers.len(),
            });
        }

        for tier in &self.tiers {
            let sub: Vec<usize> = tier.placements.iter().map(|p| p.sub_order).collect();
            if !is_permutation(&sub) {
                return Err(InvariantViolation::SubOrder {
                    tier: tier.id.clone(),
                    found: sub,
                    expected_len: tier.placements.len(),
                });
            }
            if let Some(stray) = tier.placements.iter().find(|p| p.tier_id != tier.id) {
                return Err(InvariantViolation::Ownership {
                    placement: stray.id.clone(),
                    actual: tier.id.clone(),
                    claimed: stray.tier_id.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TierCollection {
    type Item = &'a Tier;
    type IntoIter = std::slice::Iter<'a, Tier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}

fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    for &value in values {
        match seen.get_mut(value) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
