//! Save payload sent to the sync endpoint.
//!
//! A `null` identifier means "create". Rows that exist server-side but are
//! missing from the payload are deleted by the backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub tiers: Vec<TierPayload>,
}

impl SyncPayload {
    pub fn placement_count(&self) -> usize {
        self.tiers.iter().map(|t| t.placements.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPayload {
    pub id: Option<String>,
    pub name: String,
    pub display_order: usize,
    pub color: String,
    pub description: Option<String>,
    pub placements: Vec<PlacementPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPayload {
    pub id: Option<String>,
    pub operator_id: String,
    pub sub_order: usize,
    pub notes: Option<String>,
}
