//! Drag and drop state machine.
//!
//! One drag runs at a time. A drag starts on either an operator placement or
//! a whole tier row; the [`DragItem`] variant decides which. While an
//! operator is dragged, every drag-over recomputes the hover tier used to
//! highlight a drop zone. Only [`DragMachine::end`] changes the collection.
//!
//! All transitions run to completion inside one call.

use tierlist_model::{IdMinter, PlacementId, TierCollection, TierId};
use tracing::debug;

use crate::reorder::{reorder_placements, reorder_tiers};
use crate::transfer::{InsertAt, move_placement};

/// What the pointer picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Tier(TierId),
    Placement(PlacementId),
}

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A tier's header row (name, color, controls).
    TierHeader(TierId),
    /// A tier's card area, including its empty space and "add" affordance.
    TierBody(TierId),
    /// An existing placement card.
    Placement(PlacementId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingOperator {
        placement: PlacementId,
        hover_tier: Option<TierId>,
    },
    DraggingTier {
        tier: TierId,
    },
}

/// The mutation a drop resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    ReorderTiers {
        from: usize,
        to: usize,
    },
    ReorderPlacements {
        tier: TierId,
        from: usize,
        to: usize,
    },
    MoveAcrossTiers {
        placement: PlacementId,
        from: TierId,
        to: TierId,
        at: InsertAt,
    },
}

/// Why a drop did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    NotDragging,
    NoTarget,
    SameTarget,
    /// Operators only land on a tier body or another placement.
    OperatorOnHeader,
    /// The dragged item no longer exists.
    StaleSource,
    /// The drop target no longer exists.
    StaleTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored(Ignored),
    Applied {
        action: DropAction,
        tiers: TierCollection,
    },
}

impl DragOutcome {
    pub fn action(&self) -> Option<&DropAction> {
        match self {
            Self::Applied { action, .. } => Some(action),
            Self::Ignored(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Tier to highlight as the drop zone, only while an operator is dragged.
    pub fn hover_tier(&self) -> Option<&TierId> {
        match &self.state {
            DragState::DraggingOperator { hover_tier, .. } => hover_tier.as_ref(),
            DragState::Idle | DragState::DraggingTier { .. } => None,
        }
    }

    pub fn active_item(&self) -> Option<DragItem> {
        match &self.state {
            DragState::Idle => None,
            DragState::DraggingOperator { placement, .. } => {
                Some(DragItem::Placement(placement.clone()))
            }
            DragState::DraggingTier { tier } => Some(DragItem::Tier(tier.clone())),
        }
    }

    /// Begin a drag. Any drag still in progress is abandoned.
    pub fn start(&mut self, item: DragItem) {
        self.state = match item {
            DragItem::Placement(placement) => DragState::DraggingOperator {
                placement,
                hover_tier: None,
            },
            DragItem::Tier(tier) => DragState::DraggingTier { tier },
        };
        debug!(state = ?self.state, "drag started");
    }

    /// Recompute the hover tier for the current pointer target.
    pub fn over(&mut self, tiers: &TierCollection, target: Option<&DropTarget>) {
        if let DragState::DraggingOperator { hover_tier, .. } = &mut self.state {
            *hover_tier = target.and_then(|t| hover_tier_for(tiers, t));
        }
    }

    /// Abandon the current drag without changing anything.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finish the drag over `target`.
    ///
    /// The machine is back to `Idle` before the drop is evaluated, so an
    /// ignored or failed drop never leaves a stale highlight behind.
    pub fn end(
        &mut self,
        tiers: &TierCollection,
        target: Option<&DropTarget>,
        ids: &mut IdMinter,
    ) -> DragOutcome {
        let state = std::mem::take(&mut self.state);
        match resolve_drop(&state, tiers, target) {
            Ok(action) => {
                debug!(?action, "drop applied");
                let tiers = apply_drop(tiers, &action, ids);
                DragOutcome::Applied { action, tiers }
            }
            Err(reason) => {
                debug!(?reason, "drop ignored");
                DragOutcome::Ignored(reason)
            }
        }
    }
}

fn hover_tier_for(tiers: &TierCollection, target: &DropTarget) -> Option<TierId> {
    match target {
        DropTarget::TierBody(id) => tiers.tier(id).map(|t| t.id.clone()),
        DropTarget::Placement(id) => tiers.owner_of(id).map(|t| t.id.clone()),
        DropTarget::TierHeader(_) => None,
    }
}

/// Decide which mutation a drop in `state` over `target` means.
pub fn resolve_drop(
    state: &DragState,
    tiers: &TierCollection,
    target: Option<&DropTarget>,
) -> Result<DropAction, Ignored> {
    match state {
        DragState::Idle => Err(Ignored::NotDragging),
        DragState::DraggingTier { tier } => {
            let target = target.ok_or(Ignored::NoTarget)?;
            resolve_tier_drop(tiers, tier, target)
        }
        DragState::DraggingOperator { placement, .. } => {
            let target = target.ok_or(Ignored::NoTarget)?;
            resolve_operator_drop(tiers, placement, target)
        }
    }
}

fn resolve_tier_drop(
    tiers: &TierCollection,
    dragged: &TierId,
    target: &DropTarget,
) -> Result<DropAction, Ignored> {
    let target_id = match target {
        DropTarget::TierHeader(id) | DropTarget::TierBody(id) => id.clone(),
        DropTarget::Placement(id) => tiers
            .owner_of(id)
            .map(|t| t.id.clone())
            .ok_or(Ignored::StaleTarget)?,
    };
    if &target_id == dragged {
        return Err(Ignored::SameTarget);
    }
    let from = tiers.tier_index(dragged).ok_or(Ignored::StaleSource)?;
    let to = tiers.tier_index(&target_id).ok_or(Ignored::StaleTarget)?;
    Ok(DropAction::ReorderTiers { from, to })
}

fn resolve_operator_drop(
    tiers: &TierCollection,
    dragged: &PlacementId,
    target: &DropTarget,
) -> Result<DropAction, Ignored> {
    let (source_idx, from) = tiers.locate(dragged).ok_or(Ignored::StaleSource)?;
    let source = &tiers.tiers[source_idx];

    let (target_idx, at) = match target {
        DropTarget::TierHeader(_) => return Err(Ignored::OperatorOnHeader),
        DropTarget::TierBody(id) => {
            let idx = tiers.tier_index(id).ok_or(Ignored::StaleTarget)?;
            (idx, InsertAt::End)
        }
        DropTarget::Placement(id) => {
            if id == dragged {
                return Err(Ignored::SameTarget);
            }
            let (idx, _) = tiers.locate(id).ok_or(Ignored::StaleTarget)?;
            (idx, InsertAt::Before(id.clone()))
        }
    };

    if target_idx == source_idx {
        let to = match &at {
            InsertAt::Before(anchor) => source.placement_index(anchor).ok_or(Ignored::StaleTarget)?,
            InsertAt::End => source.placements.len() - 1,
        };
        if to == from {
            return Err(Ignored::SameTarget);
        }
        return Ok(DropAction::ReorderPlacements {
            tier: source.id.clone(),
            from,
            to,
        });
    }

    Ok(DropAction::MoveAcrossTiers {
        placement: dragged.clone(),
        from: source.id.clone(),
        to: tiers.tiers[target_idx].id.clone(),
        at,
    })
}

/// Run the mutation for a resolved drop.
pub fn apply_drop(tiers: &TierCollection, action: &DropAction, ids: &mut IdMinter) -> TierCollection {
    match action {
        DropAction::ReorderTiers { from, to } => reorder_tiers(tiers, *from, *to),
        DropAction::ReorderPlacements { tier, from, to } => {
            reorder_placements(tiers, tier, *from, *to)
        }
        DropAction::MoveAcrossTiers {
            placement, to, at, ..
        } => move_placement(tiers, placement, to, at, ids),
    }
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

    fn tid(id: &str) -> TierId {
        TierId::persisted(id).unwrap()
    }

    fn pid(op: &str) -> PlacementId {
        PlacementId::persisted(format!("p-{op}")).unwrap()
    }

    fn sample() -> TierCollection {
        TierCollection::new(vec![tier("s", 0, &["op1", "op2"]), tier("a", 1, &["op3"])])
    }

    #[test]
    fn hover_follows_operator_drag() {
        let tiers = sample();
        let mut drag = DragMachine::new();
        drag.start(DragItem::Placement(pid("op1")));
        drag.over(&tiers, Some(&DropTarget::Placement(pid("op3"))));
        assert_eq!(drag.hover_tier(), Some(&tid("a")));
        drag.over(&tiers, Some(&DropTarget::TierBody(tid("s"))));
        assert_eq!(drag.hover_tier(), Some(&tid("s")));
        drag.over(&tiers, Some(&DropTarget::TierHeader(tid("a"))));
        assert_eq!(drag.hover_tier(), None);
        drag.over(&tiers, None);
        assert_eq!(drag.hover_tier(), None);
    }

    #[test]
    fn tier_drag_has_no_hover() {
        let tiers = sample();
        let mut drag = DragMachine::new();
        drag.start(DragItem::Tier(tid("s")));
        drag.over(&tiers, Some(&DropTarget::TierBody(tid("a"))));
        assert_eq!(drag.hover_tier(), None);
    }

    #[test]
    fn end_always_returns_to_idle() {
        let tiers = sample();
        let mut ids = IdMinter::new();
        let mut drag = DragMachine::new();
        drag.start(DragItem::Placement(pid("op1")));
        drag.over(&tiers, Some(&DropTarget::TierBody(tid("a"))));
        let outcome = drag.end(&tiers, None, &mut ids);
        assert_eq!(outcome, DragOutcome::Ignored(Ignored::NoTarget));
        assert!(drag.is_idle());
        assert_eq!(drag.hover_tier(), None);
    }

    #[test]
    fn end_while_idle_is_ignored() {
        let mut drag = DragMachine::new();
        let outcome = drag.end(&sample(), Some(&DropTarget::TierBody(tid("a"))), &mut IdMinter::new());
        assert_eq!(outcome, DragOutcome::Ignored(Ignored::NotDragging));
    }

    #[test]
    fn operator_on_header_is_ignored() {
        let tiers = sample();
        let mut drag = DragMachine::new();
        drag.start(DragItem::Placement(pid("op1")));
        let outcome = drag.end(&tiers, Some(&DropTarget::TierHeader(tid("a"))), &mut IdMinter::new());
        assert_eq!(outcome, DragOutcome::Ignored(Ignored::OperatorOnHeader));
    }

    #[test]
    fn tier_onto_itself_is_ignored() {
        let tiers = sample();
        let mut drag = DragMachine::new();
        drag.start(DragItem::Tier(tid("a")));
        let outcome = drag.end(&tiers, Some(&DropTarget::TierHeader(tid("a"))), &mut IdMinter::new());
        assert_eq!(outcome, DragOutcome::Ignored(Ignored::SameTarget));
    }

    #[test]
    fn tier_drop_reorders() {
        let tiers = sample();
        let mut drag = DragMachine::new();
        drag.start(DragItem::Tier(tid("a")));
        let outcome = drag.end(&tiers, Some(&DropTarget::TierHeader(tid("s"))), &mut IdMinter::new());
        assert_eq!(outcome.action(), Some(&DropAction::ReorderTiers { from: 1, to: 0 }));
    }

    #[test]
    fn operator_onto_own_tier_body_appends() {
        let tiers = sample();
        let action = resolve_drop(
            &DragState::DraggingOperator {
                placement: pid("op1"),
                hover_tier: None,
            },
            &tiers,
            Some(&DropTarget::TierBody(tid("s"))),
        );
        assert_eq!(
            action,
            Ok(DropAction::ReorderPlacements {
                tier: tid("s"),
                from: 0,
                to: 1
            })
        );
    }

    #[test]
    fn last_operator_onto_own_body_is_noop() {
        let tiers = sample();
        let action = resolve_drop(
            &DragState::DraggingOperator {
                placement: pid("op2"),
                hover_tier: None,
            },
            &tiers,
            Some(&DropTarget::TierBody(tid("s"))),
        );
        assert_eq!(action, Err(Ignored::SameTarget));
    }

    #[test]
    fn operator_onto_other_placement_moves_before_it() {
        let tiers = sample();
        let action = resolve_drop(
            &DragState::DraggingOperator {
                placement: pid("op1"),
                hover_tier: None,
            },
            &tiers,
            Some(&DropTarget::Placement(pid("op3"))),
        );
        assert_eq!(
            action,
            Ok(DropAction::MoveAcrossTiers {
                placement: pid("op1"),
                from: tid("s"),
                to: tid("a"),
                at: InsertAt::Before(pid("op3")),
            })
        );
    }

    #[test]
    fn stale_source_is_ignored() {
        let tiers = sample();
        let action = resolve_drop(
            &DragState::DraggingOperator {
                placement: pid("gone"),
                hover_tier: None,
            },
            &tiers,
            Some(&DropTarget::TierBody(tid("a"))),
        );
        assert_eq!(action, Err(Ignored::StaleSource));
    }

    #[test]
    fn start_replaces_previous_drag() {
        let tiers = sample();
        let mut drag = DragMachine::new();
        drag.start(DragItem::Placement(pid("op1")));
        drag.over(&tiers, Some(&DropTarget::TierBody(tid("a"))));
        drag.start(DragItem::Tier(tid("s")));
        assert_eq!(drag.active_item(), Some(DragItem::Tier(tid("s"))));
        assert_eq!(drag.hover_tier(), None);
    }
}
