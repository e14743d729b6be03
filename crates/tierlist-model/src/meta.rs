//! Tier list level metadata.

use serde::{Deserialize, Serialize};

use crate::record::TierListRecord;

/// Editable metadata of the tier list itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierListMeta {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub tier_list_type: String,
}

impl From<&TierListRecord> for TierListMeta {
    fn from(record: &TierListRecord) -> Self {
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            is_active: record.is_active,
            tier_list_type: record.tier_list_type.clone(),
        }
    }
}

impl TierListMeta {
    /// Fields that differ from `baseline`, or `None` when nothing changed.
    pub fn diff(&self, baseline: &TierListMeta) -> Option<MetadataUpdate> {
        if self.name == baseline.name
            && self.description == baseline.description
            && self.is_active == baseline.is_active
        {
            return None;
        }
        Some(MetadataUpdate {
            name: self.name.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        })
    }
}

/// Metadata sent to the backend alongside the tier payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}
