//! Snapshot shapes returned by the backend when a tier list is loaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full tier list as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierListSnapshot {
    pub tier_list: TierListRecord,
    #[serde(default)]
    pub tiers: Vec<TierRecord>,
}

impl TierListSnapshot {
    pub fn placement_count(&self) -> usize {
        self.tiers.iter().map(|t| t.placements.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierListRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default = "default_tier_list_type")]
    pub tier_list_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_tier_list_type() -> String {
    "official".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRecord {
    pub id: String,
    pub tier_list_id: String,
    pub name: String,
    pub display_order: u32,
    pub color: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub placements: Vec<PlacementRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub id: String,
    pub tier_id: String,
    pub operator_id: String,
    pub sub_order: u32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
