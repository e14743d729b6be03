use thiserror::Error;

use crate::ids::{PlacementId, TierId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,
    #[error("tier {0} has an empty name")]
    EmptyTierName(String),
    #[error("invalid rarity: {0}")]
    InvalidRarity(String),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// A broken ordering invariant in a [`crate::TierCollection`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("tier display orders {found:?} are not a permutation of 0..{expected_len}")]
    DisplayOrder {
        found: Vec<usize>,
        expected_len: usize,
    },
    #[error("placements in tier {tier} have sub orders {found:?}, expected 0..{expected_len}")]
    SubOrder {
        tier: TierId,
        found: Vec<usize>,
        expected_len: usize,
    },
    #[error("placement {placement} sits in tier {actual} but names tier {claimed}")]
    Ownership {
        placement: PlacementId,
        actual: TierId,
        claimed: TierId,
    },
    #[error("duplicate tier id {0}")]
    DuplicateTier(TierId),
}

pub type Result<T> = std::result::Result<T, ModelError>;
