//! One editing session over one tier list.
//!
//! The session owns the working [`TierCollection`] and threads it through
//! the pure operations in [`crate::ops`], replacing it with each result.

use std::fmt;

use chrono::Utc;
use serde::Serialize;
use tierlist_model::{
    IdMinter, MetadataUpdate, ModelError, OperatorCatalog, OperatorInfo, PlacementId, SyncPayload,
    TierCollection, TierId, TierListMeta, TierListSnapshot, TierPatch,
};
use tracing::{debug, info, info_span, warn};

use crate::candidates::candidate_operators;
use crate::config::EditorConfig;
use crate::dirty::{Baseline, DirtyReport, SaveTracker};
use crate::drag::{DragItem, DragMachine, DragOutcome, DropAction, DropTarget};
use crate::load::collection_from_snapshot;
use crate::ops;
use crate::serialize::build_sync_payload;
use crate::transfer::{InsertAt, move_placement};

/// Everything a save sends to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveRequest {
    pub slug: String,
    pub payload: SyncPayload,
    /// Only present when the tier list metadata changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataUpdate>,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    meta: TierListMeta,
    baseline: Baseline,
    tiers: TierCollection,
    drag: DragMachine,
    ids: IdMinter,
    config: EditorConfig,
    save: SaveTracker,
    in_flight: Option<SaveRequest>,
}

impl EditorSession {
    /// Start a session from a loaded snapshot.
    pub fn load(snapshot: &TierListSnapshot, config: EditorConfig) -> Result<Self, ModelError> {
        let _span = info_span!("load", slug = %snapshot.tier_list.slug).entered();
        let tiers = collection_from_snapshot(snapshot, &config)?;
        let meta = TierListMeta::from(&snapshot.tier_list);
        info!(
            tiers = tiers.len(),
            placements = tiers.placement_count(),
            "loaded tier list"
        );
        Ok(Self {
            baseline: Baseline::new(meta.clone(), &tiers),
            meta,
            tiers,
            drag: DragMachine::new(),
            ids: IdMinter::new(),
            config,
            save: SaveTracker::new(),
            in_flight: None,
        })
    }

    /// Replace the working state with a fresh snapshot.
    ///
    /// Any drag in progress is cancelled. The id minter keeps counting so
    /// placeholders handed out earlier are never reused.
    pub fn reload(&mut self, snapshot: &TierListSnapshot) -> Result<(), ModelError> {
        let tiers = collection_from_snapshot(snapshot, &self.config)?;
        self.meta = TierListMeta::from(&snapshot.tier_list);
        self.baseline = Baseline::new(self.meta.clone(), &tiers);
        self.tiers = tiers;
        self.drag.cancel();
        info!(slug = %self.meta.slug, tiers = self.tiers.len(), "reloaded tier list");
        Ok(())
    }

    pub fn meta(&self) -> &TierListMeta {
        &self.meta
    }

    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    pub fn tiers(&self) -> &TierCollection {
        &self.tiers
    }

    pub fn drag(&self) -> &DragMachine {
        &self.drag
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn save_tracker(&self) -> &SaveTracker {
        &self.save
    }

    pub fn set_name(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            debug!("blank tier list name ignored");
            return;
        }
        self.meta.name = name.to_string();
    }

    pub fn set_description(&mut self, description: Option<&str>) {
        self.meta.description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
    }

    pub fn set_active(&mut self, active: bool) {
        self.meta.is_active = active;
    }

    pub fn add_tier(&mut self) -> TierId {
        let (next, id) = ops::add_tier(&self.tiers, &mut self.ids, &self.config);
        self.tiers = next;
        id
    }

    pub fn update_tier(&mut self, tier: &TierId, patch: &TierPatch) {
        self.tiers = ops::update_tier(&self.tiers, tier, patch);
    }

    pub fn delete_tier(&mut self, tier: &TierId) {
        self.tiers = ops::delete_tier(&self.tiers, tier);
    }

    pub fn move_tier_up(&mut self, tier: &TierId) {
        if let Some(index) = self.tiers.tier_index(tier) {
            self.tiers = ops::move_tier_up(&self.tiers, index);
        }
    }

    pub fn move_tier_down(&mut self, tier: &TierId) {
        if let Some(index) = self.tiers.tier_index(tier) {
            self.tiers = ops::move_tier_down(&self.tiers, index);
        }
    }

    pub fn reorder_tiers(&mut self, from: usize, to: usize) {
        self.tiers = ops::reorder_tiers(&self.tiers, from, to);
    }

    pub fn reorder_placements(&mut self, tier: &TierId, from: usize, to: usize) {
        self.tiers = ops::reorder_placements(&self.tiers, tier, from, to);
    }

    /// Place an operator at the end of a tier.
    ///
    /// An operator appears at most once per tier list, so an operator that is
    /// already placed is refused and `None` returned.
    pub fn add_operator(&mut self, tier: &TierId, operator_id: &str) -> Option<PlacementId> {
        if self.tiers.placed_operator_ids().contains(operator_id) {
            debug!(operator = operator_id, "operator already placed");
            return None;
        }
        let (next, id) = ops::add_placement(&self.tiers, tier, operator_id, &mut self.ids, Utc::now());
        self.tiers = next;
        id
    }

    pub fn remove_placement(&mut self, tier: &TierId, placement: &PlacementId) {
        self.tiers = ops::remove_placement(&self.tiers, tier, placement);
    }

    pub fn set_placement_notes(&mut self, tier: &TierId, placement: &PlacementId, notes: Option<&str>) {
        self.tiers = ops::update_placement_notes(&self.tiers, tier, placement, notes, Utc::now());
    }

    pub fn move_placement(&mut self, placement: &PlacementId, target: &TierId, at: &InsertAt) {
        self.tiers = move_placement(&self.tiers, placement, target, at, &mut self.ids);
    }

    pub fn renumber(&mut self) {
        self.tiers = ops::renumber(&self.tiers);
    }

    pub fn drag_start(&mut self, item: DragItem) {
        self.drag.start(item);
    }

    pub fn drag_over(&mut self, target: Option<&DropTarget>) {
        self.drag.over(&self.tiers, target);
    }

    /// Finish the current drag; returns the action applied, if any.
    pub fn drag_end(&mut self, target: Option<&DropTarget>) -> Option<DropAction> {
        match self.drag.end(&self.tiers, target, &mut self.ids) {
            DragOutcome::Applied { action, tiers } => {
                self.tiers = tiers;
                Some(action)
            }
            DragOutcome::Ignored(_) => None,
        }
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    pub fn dirty_report(&self) -> DirtyReport {
        DirtyReport::compute(&self.baseline, &self.meta, &self.tiers)
    }

    pub fn has_changes(&self) -> bool {
        self.dirty_report().is_dirty()
    }

    pub fn candidates<'a>(&self, catalog: &'a OperatorCatalog, search: &str) -> Vec<&'a OperatorInfo> {
        candidate_operators(catalog, &self.tiers, search)
    }

    /// Snapshot the current state into a save request and mark a save as in
    /// flight. Editing stays possible while the request is outstanding.
    pub fn begin_save(&mut self) -> SaveRequest {
        self.save.start_save();
        let request = SaveRequest {
            slug: self.meta.slug.clone(),
            payload: build_sync_payload(&self.tiers),
            metadata: self.meta.diff(&self.baseline.meta),
        };
        info!(
            slug = %request.slug,
            tiers = request.payload.tiers.len(),
            placements = request.payload.placement_count(),
            metadata = request.metadata.is_some(),
            "save started"
        );
        self.in_flight = Some(request.clone());
        request
    }

    /// True when the working state differs from what the in-flight save
    /// sent. Those edits are lost when the save succeeds.
    pub fn edited_since_save(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|sent| {
            sent.payload != build_sync_payload(&self.tiers)
                || sent.metadata != self.meta.diff(&self.baseline.meta)
        })
    }

    /// Report the outcome of the save started by [`Self::begin_save`].
    ///
    /// On success the state is replaced wholesale by `snapshot`, discarding
    /// edits made while the save was in flight. On failure nothing changes
    /// and the save may be retried.
    pub fn complete_save<E: fmt::Display>(
        &mut self,
        outcome: Result<&TierListSnapshot, E>,
    ) -> Result<(), ModelError> {
        let edited = self.edited_since_save();
        self.in_flight = None;
        match outcome {
            Ok(snapshot) => {
                if edited {
                    warn!(slug = %self.meta.slug, "edits made during save are discarded");
                }
                self.reload(snapshot)?;
                self.save.save_complete();
                info!(slug = %self.meta.slug, "save completed");
            }
            Err(err) => {
                warn!(slug = %self.meta.slug, error = %err, "save failed");
                self.save.save_failed(err.to_string());
            }
        }
        Ok(())
    }
}
