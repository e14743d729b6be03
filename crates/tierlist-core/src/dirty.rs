//! Unsaved-change tracking.
//!
//! [`DirtyReport`] is derived from the current collection and the
//! [`Baseline`] recorded at load time; it is recomputed, never stored.
//! [`SaveTracker`] follows an in-flight save.

use tierlist_model::{MetadataUpdate, Tier, TierCollection, TierId, TierListMeta};

/// What was last loaded from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub meta: TierListMeta,
    pub tier_ids: Vec<TierId>,
}

impl Baseline {
    pub fn new(meta: TierListMeta, tiers: &TierCollection) -> Self {
        Self {
            meta,
            tier_ids: tiers.iter().map(|t| t.id.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierStatus {
    New,
    Modified,
    Unchanged,
}

impl TierStatus {
    pub fn of(tier: &Tier) -> Self {
        if tier.is_new() {
            Self::New
        } else if tier.modified {
            Self::Modified
        } else {
            Self::Unchanged
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Modified => "modified",
            Self::Unchanged => "",
        }
    }
}

/// Differences between the working state and the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyReport {
    /// Status of every current tier, in display order.
    pub tiers: Vec<(TierId, TierStatus)>,
    /// Baseline tiers that are gone.
    pub deleted: Vec<TierId>,
    /// Changed tier list metadata, if any.
    pub metadata: Option<MetadataUpdate>,
}

impl DirtyReport {
    pub fn compute(baseline: &Baseline, meta: &TierListMeta, tiers: &TierCollection) -> Self {
        let deleted = baseline
            .tier_ids
            .iter()
            .filter(|id| tiers.tier(id).is_none())
            .cloned()
            .collect();
        Self {
            tiers: tiers
                .iter()
                .map(|t| (t.id.clone(), TierStatus::of(t)))
                .collect(),
            deleted,
            metadata: meta.diff(&baseline.meta),
        }
    }

    pub fn status(&self, tier: &TierId) -> Option<TierStatus> {
        self.tiers
            .iter()
            .find(|(id, _)| id == tier)
            .map(|(_, status)| *status)
    }

    pub fn count(&self, status: TierStatus) -> usize {
        self.tiers.iter().filter(|(_, s)| *s == status).count()
    }

    /// True when a save would change anything.
    pub fn is_dirty(&self) -> bool {
        self.metadata.is_some()
            || !self.deleted.is_empty()
            || self.tiers.iter().any(|(_, s)| *s != TierStatus::Unchanged)
    }
}

/// Tracks the save lifecycle.
#[derive(Debug, Clone, Default)]
pub struct SaveTracker {
    saving: bool,
    failed_attempts: u32,
    last_error: Option<String>,
}

impl SaveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn start_save(&mut self) {
        self.saving = true;
    }

    pub fn save_complete(&mut self) {
        self.saving = false;
        self.failed_attempts = 0;
        self.last_error = None;
    }

    pub fn save_failed(&mut self, reason: String) {
        self.saving = false;
        self.failed_attempts += 1;
        self.last_error = Some(reason);
    }
}
