//! Save payload construction.

use tierlist_model::{PlacementPayload, SyncPayload, TierCollection, TierPayload};

use crate::reorder::assign_positions;

/// Build the payload for the sync endpoint.
///
/// Orders are renumbered first since a deleted tier leaves a gap in
/// `display_order`. Session-local tiers and placements, including placements
/// re-minted by a cross-tier move, are sent with a `null` id.
pub fn build_sync_payload(collection: &TierCollection) -> SyncPayload {
    let mut tiers = collection.tiers.clone();
    assign_positions(&mut tiers);
    for tier in &mut tiers {
        assign_positions(&mut tier.placements);
    }

    SyncPayload {
        tiers: tiers
            .into_iter()
            .map(|tier| TierPayload {
                id: tier.id.persisted_id().map(str::to_string),
                name: tier.name,
                display_order: tier.display_order,
                color: tier.color,
                description: tier.description,
                placements: tier
                    .placements
                    .into_iter()
                    .map(|p| PlacementPayload {
                        id: p.id.persisted_id().map(str::to_string),
                        operator_id: p.operator_id,
                        sub_order: p.sub_order,
                        notes: p.notes,
                    })
                    .collect(),
            })
            .collect(),
    }
}
