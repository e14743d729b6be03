//! Moving a placement from one tier to another.

use tierlist_model::{IdMinter, PlacementId, TierCollection, TierId};
use tracing::debug;

use crate::reorder::{assign_positions, reorder_placements};

/// Where a moved placement lands inside the target tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertAt {
    /// Immediately before an existing placement of the target tier.
    Before(PlacementId),
    /// After the last placement.
    End,
}

/// Move a placement into `target` at `at`.
///
/// Both tiers end up with contiguous `sub_order`s and are marked modified.
/// A persisted placement is re-minted as a `Moved` placeholder: its owning
/// tier cannot change server-side, so the backend deletes the old row and
/// creates a new one. Placeholders keep their id.
///
/// When the placement already lives in `target` this is an intra-tier
/// reorder to the position of the `Before` placement (or the end).
pub fn move_placement(
    collection: &TierCollection,
    placement_id: &PlacementId,
    target: &TierId,
    at: &InsertAt,
    ids: &mut IdMinter,
) -> TierCollection {
    let Some((source_idx, from)) = collection.locate(placement_id) else {
        debug!(placement = %placement_id, "move of unknown placement ignored");
        return collection.clone();
    };
    let Some(target_idx) = collection.tier_index(target) else {
        debug!(placement = %placement_id, tier = %target, "move into unknown tier ignored");
        return collection.clone();
    };

    if source_idx == target_idx {
        let placements = &collection.tiers[target_idx].placements;
        let to = match at {
            InsertAt::Before(anchor) => placements.iter().position(|p| &p.id == anchor),
            InsertAt::End => None,
        }
        .unwrap_or(placements.len() - 1);
        return reorder_placements(collection, target, from, to);
    }

    let mut next = collection.clone();

    let source = &mut next.tiers[source_idx];
    let mut placement = source.placements.remove(from);
    assign_positions(&mut source.placements);
    source.modified = true;
    let source_id = source.id.clone();

    if placement.id.persisted_id().is_some() {
        placement.id = ids.moved_placement();
    }
    placement.tier_id = target.clone();
    let moved_id = placement.id.clone();

    let destination = &mut next.tiers[target_idx];
    let index = match at {
        InsertAt::Before(anchor) => destination
            .placement_index(anchor)
            .unwrap_or(destination.placements.len()),
        InsertAt::End => destination.placements.len(),
    };
    destination.placements.insert(index, placement);
    assign_positions(&mut destination.placements);
    destination.modified = true;

    debug!(
        placement = %placement_id,
        new_id = %moved_id,
        from = %source_id,
        to = %target,
        index,
        "moved placement across tiers"
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tierlist_model::{Placement, Tier};

    fn tier(id: &str, display_order: usize, ops: &[&str]) -> Tier {
        let tier_id = TierId::persisted(id).unwrap();
        let now = Utc::now();
        Tier {
            id: tier_id.clone(),
            name: id.to_string(),
            display_order,
            color: "#888888".to_string(),
            description: None,
            placements: ops
                .iter()
                .enumerate()
                .map(|(i, op)| Placement {
                    id: PlacementId::persisted(format!("p-{op}")).unwrap(),
                    tier_id: tier_id.clone(),
                    operator_id: (*op).to_string(),
                    sub_order: i,
                    notes: None,
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
            modified: false,
        }
    }

    fn ops_of(collection: &TierCollection, tier: usize) -> Vec<&str> {
        collection.tiers[tier]
            .placements
            .iter()
            .map(|p| p.operator_id.as_str())
            .collect()
    }

    #[test]
    fn persisted_placement_is_reminted() {
        let collection = TierCollection::new(vec![tier("s", 0, &["op1", "op2"]), tier("a", 1, &["op3"])]);
        let mut ids = IdMinter::new();
        let source = PlacementId::persisted("p-op1").unwrap();
        let target = TierId::persisted("a").unwrap();
        let next = move_placement(&collection, &source, &target, &InsertAt::End, &mut ids);

        assert_eq!(ops_of(&next, 0), vec!["op2"]);
        assert_eq!(ops_of(&next, 1), vec!["op3", "op1"]);
        let moved = &next.tiers[1].placements[1];
        assert!(moved.id.is_moved());
        assert_eq!(moved.tier_id, target);
        assert!(next.tiers[0].modified && next.tiers[1].modified);
        assert!(next.check_invariants().is_ok());
    }

    #[test]
    fn placeholder_keeps_its_id() {
        let mut collection = TierCollection::new(vec![tier("s", 0, &["op1"]), tier("a", 1, &[])]);
        let mut ids = IdMinter::new();
        let local = ids.placement();
        collection.tiers[0].placements[0].id = local.clone();
        let target = TierId::persisted("a").unwrap();
        let next = move_placement(&collection, &local, &target, &InsertAt::End, &mut ids);
        assert_eq!(next.tiers[1].placements[0].id, local);
    }

    #[test]
    fn insert_before_anchor() {
        let collection =
            TierCollection::new(vec![tier("s", 0, &["op1"]), tier("a", 1, &["op2", "op3"])]);
        let mut ids = IdMinter::new();
        let anchor = PlacementId::persisted("p-op3").unwrap();
        let next = move_placement(
            &collection,
            &PlacementId::persisted("p-op1").unwrap(),
            &TierId::persisted("a").unwrap(),
            &InsertAt::Before(anchor),
            &mut ids,
        );
        assert_eq!(ops_of(&next, 1), vec!["op2", "op1", "op3"]);
        assert!(next.check_invariants().is_ok());
    }

    #[test]
    fn untouched_tiers_stay_clean() {
        let collection = TierCollection::new(vec![
            tier("s", 0, &["op1"]),
            tier("a", 1, &[]),
            tier("b", 2, &["op2"]),
        ]);
        let mut ids = IdMinter::new();
        let next = move_placement(
            &collection,
            &PlacementId::persisted("p-op1").unwrap(),
            &TierId::persisted("a").unwrap(),
            &InsertAt::End,
            &mut ids,
        );
        assert!(!next.tiers[2].modified);
    }

    #[test]
    fn same_tier_becomes_reorder() {
        let collection = TierCollection::new(vec![tier("s", 0, &["op1", "op2", "op3"])]);
        let mut ids = IdMinter::new();
        let next = move_placement(
            &collection,
            &PlacementId::persisted("p-op1").unwrap(),
            &TierId::persisted("s").unwrap(),
            &InsertAt::End,
            &mut ids,
        );
        assert_eq!(ops_of(&next, 0), vec!["op2", "op3", "op1"]);
        assert!(!next.tiers[0].placements[2].id.is_moved());
    }

    #[test]
    fn unknown_target_is_noop() {
        let collection = TierCollection::new(vec![tier("s", 0, &["op1"])]);
        let mut ids = IdMinter::new();
        let next = move_placement(
            &collection,
            &PlacementId::persisted("p-op1").unwrap(),
            &TierId::persisted("gone").unwrap(),
            &InsertAt::End,
            &mut ids,
        );
        assert_eq!(next, collection);
    }
}
