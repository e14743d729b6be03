//! Reconciling a stored tier list with a save payload.
//!
//! The payload is a full picture of the desired state. Tiers and placements
//! with a `null` id are created, ones with an id are updated, and stored rows
//! missing from the payload are deleted. A `null`-id placement whose operator
//! already sits in another kept tier is a cross-tier move of that row.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tierlist_model::{PlacementRecord, SyncPayload, TierListSnapshot, TierRecord};
use tracing::{debug, warn};

use crate::error::{Result, SyncError};

/// A tier that exists already or is created by the same plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierRef {
    Existing(String),
    /// Index of the tier in the payload.
    Created(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCreate {
    pub index: usize,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierUpdate {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementCreate {
    pub tier: TierRef,
    pub operator_id: String,
    pub sub_order: usize,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementMove {
    pub placement_id: String,
    pub tier_id: String,
    pub sub_order: usize,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementUpdate {
    pub placement_id: String,
    pub sub_order: usize,
    pub notes: Option<String>,
}

/// Every change needed to turn the stored state into the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub delete_tiers: Vec<String>,
    pub create_tiers: Vec<TierCreate>,
    pub update_tiers: Vec<TierUpdate>,
    pub move_placements: Vec<PlacementMove>,
    pub create_placements: Vec<PlacementCreate>,
    pub update_placements: Vec<PlacementUpdate>,
    pub delete_placements: Vec<String>,
    /// Final tier order.
    pub order: Vec<TierRef>,
}

impl SyncPlan {
    pub fn build(current: &TierListSnapshot, payload: &SyncPayload) -> Result<Self> {
        let mut plan = Self::default();
        let stored: BTreeSet<&str> = current.tiers.iter().map(|t| t.id.as_str()).collect();

        let mut kept = BTreeSet::new();
        for (index, tier) in payload.tiers.iter().enumerate() {
            match &tier.id {
                None => {
                    plan.create_tiers.push(TierCreate {
                        index,
                        name: tier.name.clone(),
                        color: tier.color.clone(),
                        description: tier.description.clone(),
                    });
                    plan.order.push(TierRef::Created(index));
                }
                Some(id) => {
                    if !stored.contains(id.as_str()) {
                        return Err(SyncError::Rejected(format!("tier {id} does not exist")));
                    }
                    if !kept.insert(id.as_str()) {
                        return Err(SyncError::Rejected(format!("tier {id} appears twice")));
                    }
                    plan.update_tiers.push(TierUpdate {
                        id: id.clone(),
                        name: tier.name.clone(),
                        color: tier.color.clone(),
                        description: tier.description.clone(),
                    });
                    plan.order.push(TierRef::Existing(id.clone()));
                }
            }
        }
        plan.delete_tiers = current
            .tiers
            .iter()
            .filter(|t| !kept.contains(t.id.as_str()))
            .map(|t| t.id.clone())
            .collect();

        // Placements in deleted tiers go with their tier and cannot be moved.
        let mut owner_of: BTreeMap<&str, &str> = BTreeMap::new();
        let mut by_operator: BTreeMap<&str, &str> = BTreeMap::new();
        for tier in current.tiers.iter().filter(|t| kept.contains(t.id.as_str())) {
            for placement in &tier.placements {
                owner_of.insert(&placement.id, &tier.id);
                by_operator.insert(&placement.operator_id, &placement.id);
            }
        }

        let mut handled: BTreeSet<&str> = BTreeSet::new();
        for (index, tier) in payload.tiers.iter().enumerate() {
            let Some(tier_id) = tier.id.as_deref() else {
                for placement in &tier.placements {
                    plan.create_placements.push(PlacementCreate {
                        tier: TierRef::Created(index),
                        operator_id: placement.operator_id.clone(),
                        sub_order: placement.sub_order,
                        notes: placement.notes.clone(),
                    });
                }
                continue;
            };

            for placement in &tier.placements {
                let existing = match placement.id.as_deref() {
                    Some(id) => {
                        if !owner_of.contains_key(id) {
                            return Err(SyncError::Rejected(format!(
                                "placement {id} does not exist in a kept tier"
                            )));
                        }
                        Some(id)
                    }
                    None => by_operator
                        .get(placement.operator_id.as_str())
                        .copied()
                        .filter(|id| !handled.contains(id)),
                };

                let Some(existing) = existing else {
                    plan.create_placements.push(PlacementCreate {
                        tier: TierRef::Existing(tier_id.to_string()),
                        operator_id: placement.operator_id.clone(),
                        sub_order: placement.sub_order,
                        notes: placement.notes.clone(),
                    });
                    continue;
                };

                if !handled.insert(existing) {
                    return Err(SyncError::Rejected(format!(
                        "placement {existing} appears twice"
                    )));
                }
                if owner_of.get(existing) == Some(&tier_id) {
                    plan.update_placements.push(PlacementUpdate {
                        placement_id: existing.to_string(),
                        sub_order: placement.sub_order,
                        notes: placement.notes.clone(),
                    });
                } else {
                    debug!(placement = existing, tier = tier_id, operator = %placement.operator_id, "cross-tier move");
                    plan.move_placements.push(PlacementMove {
                        placement_id: existing.to_string(),
                        tier_id: tier_id.to_string(),
                        sub_order: placement.sub_order,
                        notes: placement.notes.clone(),
                    });
                }
            }
        }

        plan.delete_placements = owner_of
            .keys()
            .filter(|id| !handled.contains(*id))
            .map(|id| (*id).to_string())
            .collect();
        Ok(plan)
    }

    /// Number of row-level changes, excluding the final reorder.
    pub fn change_count(&self) -> usize {
        self.delete_tiers.len()
            + self.create_tiers.len()
            + self.update_tiers.len()
            + self.move_placements.len()
            + self.create_placements.len()
            + self.update_placements.len()
            + self.delete_placements.len()
    }

    /// Apply the plan to `current`, minting ids for created rows.
    ///
    /// Ids are derived from the tier list id, `now` and a running counter,
    /// so applying the same plan at the same instant is deterministic.
    pub fn apply(&self, current: &TierListSnapshot, now: DateTime<Utc>) -> TierListSnapshot {
        let mut next = current.clone();
        let mut minter = RowIdMinter::new(&current.tier_list.id, now);

        next.tiers.retain(|t| !self.delete_tiers.contains(&t.id));

        for update in &self.update_tiers {
            if let Some(tier) = next.tiers.iter_mut().find(|t| t.id == update.id) {
                tier.name.clone_from(&update.name);
                tier.color = Some(update.color.clone());
                tier.description.clone_from(&update.description);
            }
        }

        let mut created: BTreeMap<usize, String> = BTreeMap::new();
        for create in &self.create_tiers {
            let id = minter.mint("tier");
            next.tiers.push(TierRecord {
                id: id.clone(),
                tier_list_id: current.tier_list.id.clone(),
                name: create.name.clone(),
                display_order: order_value(create.index),
                color: Some(create.color.clone()),
                description: create.description.clone(),
                placements: Vec::new(),
            });
            created.insert(create.index, id);
        }

        for moved in &self.move_placements {
            let taken = next.tiers.iter_mut().find_map(|t| {
                let index = t.placements.iter().position(|p| p.id == moved.placement_id)?;
                Some(t.placements.remove(index))
            });
            let Some(mut placement) = taken else {
                warn!(placement = %moved.placement_id, "placement to move is gone");
                continue;
            };
            let Some(target) = next.tiers.iter_mut().find(|t| t.id == moved.tier_id) else {
                warn!(tier = %moved.tier_id, "move target tier is gone");
                continue;
            };
            placement.tier_id.clone_from(&target.id);
            placement.sub_order = order_value(moved.sub_order);
            placement.notes.clone_from(&moved.notes);
            placement.updated_at = now;
            target.placements.push(placement);
        }

        for create in &self.create_placements {
            let tier_id = match &create.tier {
                TierRef::Existing(id) => Some(id.as_str()),
                TierRef::Created(index) => created.get(index).map(String::as_str),
            };
            let Some(tier) = tier_id.and_then(|id| next.tiers.iter_mut().find(|t| t.id == id)) else {
                warn!(operator = %create.operator_id, "tier for new placement is gone");
                continue;
            };
            tier.placements.push(PlacementRecord {
                id: minter.mint("placement"),
                tier_id: tier.id.clone(),
                operator_id: create.operator_id.clone(),
                sub_order: order_value(create.sub_order),
                notes: create.notes.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        for update in &self.update_placements {
            let placement = next
                .tiers
                .iter_mut()
                .flat_map(|t| t.placements.iter_mut())
                .find(|p| p.id == update.placement_id);
            if let Some(placement) = placement {
                placement.sub_order = order_value(update.sub_order);
                placement.notes.clone_from(&update.notes);
                placement.updated_at = now;
            }
        }

        for tier in &mut next.tiers {
            tier.placements
                .retain(|p| !self.delete_placements.contains(&p.id));
        }

        for (position, tier_ref) in self.order.iter().enumerate() {
            let id = match tier_ref {
                TierRef::Existing(id) => Some(id),
                TierRef::Created(index) => created.get(index),
            };
            if let Some(tier) = id.and_then(|id| next.tiers.iter_mut().find(|t| &t.id == id)) {
                tier.display_order = order_value(position);
            }
        }
        next.tiers.sort_by_key(|t| t.display_order);
        for tier in &mut next.tiers {
            tier.placements.sort_by_key(|p| p.sub_order);
        }
        next.tier_list.updated_at = now;
        next
    }
}

fn order_value(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}

/// Mints row ids as the hex of a truncated SHA-256 digest.
struct RowIdMinter {
    seed: String,
    counter: u64,
}

impl RowIdMinter {
    fn new(list_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            seed: format!("{list_id}:{}", now.to_rfc3339()),
            counter: 0,
        }
    }

    fn mint(&mut self, kind: &str) -> String {
        self.counter += 1;
        let mut hasher = Sha256::new();
        hasher.update(self.seed.as_bytes());
        hasher.update(kind.as_bytes());
        hasher.update(self.counter.to_le_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..16])
    }
}
