//! Structural mutations of a tier collection.
//!
//! Each function returns a new collection and leaves its input alone. An
//! identifier that no longer exists is a stale UI reference, not an error:
//! the input comes back unchanged.

use chrono::{DateTime, Utc};
use tierlist_model::{IdMinter, Placement, PlacementId, Tier, TierCollection, TierId, TierPatch};
use tracing::debug;

use crate::config::EditorConfig;
use crate::reorder::assign_positions;

pub use crate::reorder::{move_tier_down, move_tier_up, renumber, reorder_placements, reorder_tiers};

/// Append an empty tier at the end.
///
/// The new tier takes `display_order = len` and the palette color at that
/// position.
pub fn add_tier(
    collection: &TierCollection,
    ids: &mut IdMinter,
    config: &EditorConfig,
) -> (TierCollection, TierId) {
    let mut next = collection.clone();
    let position = next.len();
    let id = ids.tier();
    next.tiers.push(Tier {
        id: id.clone(),
        name: config.tier_name().to_string(),
        display_order: position,
        color: config.palette_color(position).to_string(),
        description: None,
        placements: Vec::new(),
        modified: true,
    });
    debug!(tier = %id, position, "added tier");
    (next, id)
}

/// Replace a tier's name, color or description and mark it modified.
pub fn update_tier(collection: &TierCollection, tier_id: &TierId, patch: &TierPatch) -> TierCollection {
    let mut next = collection.clone();
    let Some(tier) = next.tiers.iter_mut().find(|t| &t.id == tier_id) else {
        debug!(tier = %tier_id, "update of unknown tier ignored");
        return next;
    };
    tier.apply_patch(patch);
    tier.modified = true;
    next
}

/// Remove a tier together with its placements.
///
/// Remaining `display_order` values are left as they are; the gap closes on
/// the next reorder, [`renumber`], or save.
pub fn delete_tier(collection: &TierCollection, tier_id: &TierId) -> TierCollection {
    let mut next = collection.clone();
    let before = next.len();
    next.tiers.retain(|t| &t.id != tier_id);
    if next.len() == before {
        debug!(tier = %tier_id, "delete of unknown tier ignored");
    } else {
        debug!(tier = %tier_id, "deleted tier");
    }
    next
}

/// Append a placement for `operator_id` to the end of a tier.
///
/// Returns the new placement id, or `None` when the tier is unknown.
pub fn add_placement(
    collection: &TierCollection,
    tier_id: &TierId,
    operator_id: &str,
    ids: &mut IdMinter,
    now: DateTime<Utc>,
) -> (TierCollection, Option<PlacementId>) {
    let mut next = collection.clone();
    let Some(tier) = next.tiers.iter_mut().find(|t| &t.id == tier_id) else {
        debug!(tier = %tier_id, operator = operator_id, "add to unknown tier ignored");
        return (next, None);
    };
    let id = ids.placement();
    let sub_order = tier.placements.len();
    tier.placements.push(Placement {
        id: id.clone(),
        tier_id: tier_id.clone(),
        operator_id: operator_id.to_string(),
        sub_order,
        notes: None,
        created_at: now,
        updated_at: now,
    });
    tier.modified = true;
    debug!(tier = %tier_id, placement = %id, operator = operator_id, "added placement");
    (next, Some(id))
}

/// Remove a placement; later placements in the tier shift up immediately.
pub fn remove_placement(
    collection: &TierCollection,
    tier_id: &TierId,
    placement_id: &PlacementId,
) -> TierCollection {
    let mut next = collection.clone();
    let Some(tier) = next.tiers.iter_mut().find(|t| &t.id == tier_id) else {
        debug!(tier = %tier_id, "removal from unknown tier ignored");
        return next;
    };
    let Some(index) = tier.placement_index(placement_id) else {
        debug!(tier = %tier_id, placement = %placement_id, "removal of unknown placement ignored");
        return next;
    };
    tier.placements.remove(index);
    assign_positions(&mut tier.placements);
    tier.modified = true;
    debug!(tier = %tier_id, placement = %placement_id, "removed placement");
    next
}

/// Set or clear a placement's note. Blank notes clear it.
pub fn update_placement_notes(
    collection: &TierCollection,
    tier_id: &TierId,
    placement_id: &PlacementId,
    notes: Option<&str>,
    now: DateTime<Utc>,
) -> TierCollection {
    let mut next = collection.clone();
    let Some(tier) = next.tiers.iter_mut().find(|t| &t.id == tier_id) else {
        debug!(tier = %tier_id, "note on unknown tier ignored");
        return next;
    };
    let Some(placement) = tier.placements.iter_mut().find(|p| &p.id == placement_id) else {
        debug!(tier = %tier_id, placement = %placement_id, "note on unknown placement ignored");
        return next;
    };
    placement.notes = notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    placement.updated_at = now;
    tier.modified = true;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> TierCollection {
        TierCollection::default()
    }

    #[test]
    fn add_tier_appends_with_palette_color() {
        let config = EditorConfig::default();
        let mut ids = IdMinter::new();
        let (one, first) = add_tier(&empty(), &mut ids, &config);
        let (two, second) = add_tier(&one, &mut ids, &config);
        assert_eq!(two.len(), 2);
        assert_eq!(two.tiers[1].display_order, 1);
        assert_eq!(two.tiers[0].color, config.palette_color(0));
        assert_eq!(two.tiers[1].color, config.palette_color(1));
        assert!(two.tier(&first).is_some_and(Tier::is_new));
        assert!(two.tier(&second).is_some_and(Tier::is_modified));
        assert!(one.len() == 1, "input untouched");
    }

    #[test]
    fn add_tier_never_uses_blank_name() {
        let config = EditorConfig {
            new_tier_name: " ".to_string(),
            ..EditorConfig::default()
        };
        let mut ids = IdMinter::new();
        let (collection, id) = add_tier(&empty(), &mut ids, &config);
        assert_eq!(collection.tier(&id).unwrap().name, "New Tier");
        assert!(collection.check_invariants().is_ok());
    }

    #[test]
    fn update_unknown_tier_is_noop() {
        let config = EditorConfig::default();
        let mut ids = IdMinter::new();
        let (collection, _) = add_tier(&empty(), &mut ids, &config);
        let unknown = TierId::persisted("gone").unwrap();
        let next = update_tier(&collection, &unknown, &TierPatch::default().name("X"));
        assert_eq!(next, collection);
    }

    #[test]
    fn update_marks_modified() {
        let config = EditorConfig::default();
        let mut ids = IdMinter::new();
        let (collection, id) = add_tier(&empty(), &mut ids, &config);
        let next = update_tier(&collection, &id, &TierPatch::default().name("S").color("red"));
        let tier = next.tier(&id).unwrap();
        assert_eq!(tier.name, "S");
        assert_eq!(tier.color, "red");
        assert!(tier.modified);
    }

    #[test]
    fn add_placement_appends_at_end() {
        let config = EditorConfig::default();
        let mut ids = IdMinter::new();
        let (collection, tier) = add_tier(&empty(), &mut ids, &config);
        let now = Utc::now();
        let (collection, _) = add_placement(&collection, &tier, "op1", &mut ids, now);
        let (collection, second) = add_placement(&collection, &tier, "op2", &mut ids, now);
        let second = second.unwrap();
        let placement = collection.placement(&second).unwrap();
        assert_eq!(placement.sub_order, 1);
        assert_eq!(placement.tier_id, tier);
        assert!(second.is_new());
    }

    #[test]
    fn add_placement_to_unknown_tier_returns_none() {
        let mut ids = IdMinter::new();
        let unknown = TierId::persisted("gone").unwrap();
        let (next, id) = add_placement(&empty(), &unknown, "op1", &mut ids, Utc::now());
        assert!(id.is_none());
        assert!(next.is_empty());
    }

    #[test]
    fn notes_are_trimmed_and_cleared() {
        let config = EditorConfig::default();
        let mut ids = IdMinter::new();
        let (collection, tier) = add_tier(&empty(), &mut ids, &config);
        let (collection, placement) = add_placement(&collection, &tier, "op1", &mut ids, Utc::now());
        let placement = placement.unwrap();
        let noted =
            update_placement_notes(&collection, &tier, &placement, Some("  flex "), Utc::now());
        assert_eq!(noted.placement(&placement).unwrap().notes.as_deref(), Some("flex"));
        let cleared = update_placement_notes(&noted, &tier, &placement, Some(" "), Utc::now());
        assert_eq!(cleared.placement(&placement).unwrap().notes, None);
    }

    #[test]
    fn delete_tier_leaves_gap_until_renumbered() {
        let config = EditorConfig::default();
        let mut ids = IdMinter::new();
        let (c, first) = add_tier(&empty(), &mut ids, &config);
        let (c, _) = add_tier(&c, &mut ids, &config);
        let next = delete_tier(&c, &first);
        assert_eq!(next.tiers[0].display_order, 1);
        assert!(next.check_invariants().is_err());
        assert!(renumber(&next).check_invariants().is_ok());
    }
}
