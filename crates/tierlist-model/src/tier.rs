//! Tier and placement types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PlacementId, TierId};

/// A named, colored ranking bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub id: TierId,
    pub name: String,
    /// Position among all tiers.
    pub display_order: usize,
    /// Free-form color (hex or named).
    pub color: String,
    pub description: Option<String>,
    /// Placements in `sub_order` order.
    pub placements: Vec<Placement>,
    /// Set when the tier was touched during this session.
    pub modified: bool,
}

impl Tier {
    /// True when the tier has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }

    /// True when the tier was created or touched during this session.
    pub fn is_modified(&self) -> bool {
        self.modified || self.is_new()
    }

    pub fn placement(&self, id: &PlacementId) -> Option<&Placement> {
        self.placements.iter().find(|p| &p.id == id)
    }

    pub fn placement_index(&self, id: &PlacementId) -> Option<usize> {
        self.placements.iter().position(|p| &p.id == id)
    }

    /// Apply a field patch. Returns true when any field changed.
    ///
    /// A blank name is ignored so the tier never ends up unnamed, and an empty
    /// description clears it.
    pub fn apply_patch(&mut self, patch: &TierPatch) -> bool {
        let mut changed = false;
        if let Some(name) = patch.name.as_deref().map(str::trim)
            && !name.is_empty()
            && name != self.name
        {
            self.name = name.to_string();
            changed = true;
        }
        if let Some(color) = &patch.color
            && color != &self.color
        {
            self.color.clone_from(color);
            changed = true;
        }
        if let Some(description) = &patch.description {
            let description = Some(description.clone()).filter(|d| !d.is_empty());
            if description != self.description {
                self.description = description;
                changed = true;
            }
        }
        changed
    }
}

/// The assignment of one operator to one tier at a specific position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub id: PlacementId,
    /// Owning tier.
    pub tier_id: TierId,
    pub operator_id: String,
    /// Position within the owning tier.
    pub sub_order: usize,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable tier fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl TierPatch {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.description.is_none()
    }
}
