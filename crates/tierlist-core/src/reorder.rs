//! Positional reordering.
//!
//! Tiers and a tier's placements are reordered with the same primitive:
//! take the item out at its old index, put it back at the new index, then
//! give every item its positional index as its order. The result is
//! contiguous by construction.

use tierlist_model::{Placement, Tier, TierCollection, TierId};
use tracing::debug;

/// An item whose order field mirrors its position in a sequence.
pub trait Sequenced {
    fn position(&self) -> usize;
    fn set_position(&mut self, position: usize);
}

impl Sequenced for Tier {
    fn position(&self) -> usize {
        self.display_order
    }

    fn set_position(&mut self, position: usize) {
        self.display_order = position;
    }
}

impl Sequenced for Placement {
    fn position(&self) -> usize {
        self.sub_order
    }

    fn set_position(&mut self, position: usize) {
        self.sub_order = position;
    }
}

/// Give every item its positional index. Returns the indices that changed.
pub fn assign_positions<T: Sequenced>(items: &mut [T]) -> Vec<usize> {
    let mut changed = Vec::new();
    for (index, item) in items.iter_mut().enumerate() {
        if item.position() != index {
            item.set_position(index);
            changed.push(index);
        }
    }
    changed
}

/// Move the item at `from` to `to` and renumber.
///
/// Returns `None` without touching `items` when the move is a no-op or an
/// index is out of range; otherwise the indices whose position changed.
pub fn move_item<T: Sequenced>(items: &mut Vec<T>, from: usize, to: usize) -> Option<Vec<usize>> {
    if from == to || from >= items.len() || to >= items.len() {
        return None;
    }
    let item = items.remove(from);
    items.insert(to, item);
    Some(assign_positions(items))
}

/// Move the tier at `from` to `to`.
///
/// Every tier whose `display_order` changed is marked modified.
pub fn reorder_tiers(collection: &TierCollection, from: usize, to: usize) -> TierCollection {
    let mut next = collection.clone();
    let Some(changed) = move_item(&mut next.tiers, from, to) else {
        debug!(from, to, "tier reorder is a no-op");
        return next;
    };
    for index in changed {
        next.tiers[index].modified = true;
    }
    debug!(from, to, "reordered tiers");
    next
}

/// Move one tier a single step up (towards index 0).
pub fn move_tier_up(collection: &TierCollection, index: usize) -> TierCollection {
    if index == 0 {
        return collection.clone();
    }
    reorder_tiers(collection, index, index - 1)
}

/// Move one tier a single step down.
pub fn move_tier_down(collection: &TierCollection, index: usize) -> TierCollection {
    reorder_tiers(collection, index, index + 1)
}

/// Move a placement within its tier from `from` to `to`.
///
/// Only the owning tier is marked modified.
pub fn reorder_placements(
    collection: &TierCollection,
    tier_id: &TierId,
    from: usize,
    to: usize,
) -> TierCollection {
    let mut next = collection.clone();
    let Some(tier) = next.tiers.iter_mut().find(|t| &t.id == tier_id) else {
        debug!(tier = %tier_id, "placement reorder in unknown tier ignored");
        return next;
    };
    if move_item(&mut tier.placements, from, to).is_some() {
        tier.modified = true;
        debug!(tier = %tier_id, from, to, "reordered placements");
    }
    next
}

/// Make every `display_order` and `sub_order` positional.
///
/// Tiers whose `display_order` shifts are marked modified, the same way a
/// reorder marks them.
pub fn renumber(collection: &TierCollection) -> TierCollection {
    let mut next = collection.clone();
    for index in assign_positions(&mut next.tiers) {
        next.tiers[index].modified = true;
    }
    for tier in &mut next.tiers {
        if !assign_positions(&mut tier.placements).is_empty() {
            tier.modified = true;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str, usize);

    impl Sequenced for Item {
        fn position(&self) -> usize {
            self.1
        }

        fn set_position(&mut self, position: usize) {
            self.1 = position;
        }
    }

    #[test]
    fn move_item_renumbers() {
        let mut items = vec![Item("a", 0), Item("b", 1), Item("c", 2)];
        let changed = move_item(&mut items, 2, 0).unwrap();
        assert_eq!(items, vec![Item("c", 0), Item("a", 1), Item("b", 2)]);
        assert_eq!(changed, vec![0, 1, 2]);
    }

    #[test]
    fn move_item_to_same_index_is_noop() {
        let mut items = vec![Item("a", 0), Item("b", 1)];
        assert!(move_item(&mut items, 1, 1).is_none());
        assert!(move_item(&mut items, 0, 5).is_none());
        assert_eq!(items, vec![Item("a", 0), Item("b", 1)]);
    }

    #[test]
    fn assign_positions_closes_gaps() {
        let mut items = vec![Item("a", 0), Item("b", 4), Item("c", 9)];
        assert_eq!(assign_positions(&mut items), vec![1, 2]);
        assert_eq!(items, vec![Item("a", 0), Item("b", 1), Item("c", 2)]);
    }

    #[test]
    fn adjacent_swap_changes_two_positions() {
        let mut items = vec![Item("a", 0), Item("b", 1), Item("c", 2)];
        assert_eq!(move_item(&mut items, 1, 2).unwrap(), vec![1, 2]);
    }
}
