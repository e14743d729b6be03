//! Building the working collection from a loaded snapshot.

use tierlist_model::{
    ModelError, Placement, PlacementId, Tier, TierCollection, TierId, TierListSnapshot, TierRecord,
};
use tracing::debug;

use crate::config::EditorConfig;

/// Convert a backend snapshot into a working collection.
///
/// Tiers are sorted by `display_order` and placements by `sub_order`, then
/// both are renumbered positionally, so the result always satisfies the
/// ordering invariants. Tiers stored without a color get the configured
/// default for their name.
pub fn collection_from_snapshot(
    snapshot: &TierListSnapshot,
    config: &EditorConfig,
) -> Result<TierCollection, ModelError> {
    let mut records: Vec<_> = snapshot.tiers.iter().collect();
    records.sort_by_key(|t| t.display_order);

    let mut tiers = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        let id = TierId::persisted(&record.id)?;
        let name = record.name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyTierName(record.id.clone()));
        }

        let mut placement_records: Vec<_> = record.placements.iter().collect();
        placement_records.sort_by_key(|p| p.sub_order);
        let mut placements = Vec::with_capacity(placement_records.len());
        for (sub_order, p) in placement_records.into_iter().enumerate() {
            if p.tier_id != record.id {
                debug!(placement = %p.id, claimed = %p.tier_id, tier = %record.id, "placement nested under a different tier");
            }
            placements.push(Placement {
                id: PlacementId::persisted(&p.id)?,
                tier_id: id.clone(),
                operator_id: p.operator_id.clone(),
                sub_order,
                notes: p.notes.clone(),
                created_at: p.created_at,
                updated_at: p.updated_at,
            });
        }

        let color = record
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| config.color_for_name(name))
            .to_string();

        tiers.push(Tier {
            id,
            name: name.to_string(),
            display_order: position,
            color,
            description: record.description.clone(),
            placements,
            modified: false,
        });
    }
    Ok(TierCollection::new(tiers))
}

/// Check a stored snapshot exactly as stored, without normalising it.
///
/// Stored orders are compared as they are, and each placement's own
/// `tier_id` must name the tier it is nested under.
pub fn check_snapshot(snapshot: &TierListSnapshot) -> Result<(), ModelError> {
    raw_collection(snapshot)?.check_invariants()?;
    Ok(())
}

/// The snapshot as a collection, orders and ownership left exactly as
/// stored.
pub fn raw_collection(snapshot: &TierListSnapshot) -> Result<TierCollection, ModelError> {
    let tiers = snapshot
        .tiers
        .iter()
        .map(raw_tier)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TierCollection::new(tiers))
}

fn raw_tier(record: &TierRecord) -> Result<Tier, ModelError> {
    let placements = record
        .placements
        .iter()
        .map(|p| {
            Ok(Placement {
                id: PlacementId::persisted(&p.id)?,
                tier_id: TierId::persisted(&p.tier_id)?,
                operator_id: p.operator_id.clone(),
                sub_order: p.sub_order as usize,
                notes: p.notes.clone(),
                created_at: p.created_at,
                updated_at: p.updated_at,
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;
    Ok(Tier {
        id: TierId::persisted(&record.id)?,
        name: record.name.clone(),
        display_order: record.display_order as usize,
        color: record.color.clone().unwrap_or_default(),
        description: record.description.clone(),
        placements,
        modified: false,
    })
}
