//! JSON edit scripts.
//!
//! A script is a JSON array of steps, each tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "add_tier", "label": "ex", "name": "EX", "color": "#ff0000" },
//!   { "op": "add_operator", "tier": "@ex", "operator": "char_002_amiya" },
//!   { "op": "drag", "item": { "tier": "@ex" }, "drop": { "header": "t-s" } }
//! ]
//! ```
//!
//! Tier and placement references are either identifiers in their textual
//! form or `@label` for something the script created earlier. A stored
//! identifier wins over a placeholder with the same text (`new-3`), so
//! placeholders are best addressed by label.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tierlist_core::{DragItem, DropAction, DropTarget, EditorSession, InsertAt};
use tierlist_model::{OperatorCatalog, PlacementId, TierId, TierPatch};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    AddTier {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    UpdateTier {
        tier: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    DeleteTier {
        tier: String,
    },
    MoveTierUp {
        tier: String,
    },
    MoveTierDown {
        tier: String,
    },
    ReorderTiers {
        from: usize,
        to: usize,
    },
    ReorderPlacements {
        tier: String,
        from: usize,
        to: usize,
    },
    AddOperator {
        tier: String,
        operator: String,
        #[serde(default)]
        label: Option<String>,
    },
    RemovePlacement {
        tier: String,
        placement: String,
    },
    SetNotes {
        tier: String,
        placement: String,
        #[serde(default)]
        notes: Option<String>,
    },
    MovePlacement {
        placement: String,
        tier: String,
        /// Insert before this placement; the end of the tier when absent.
        #[serde(default)]
        before: Option<String>,
    },
    /// A complete drag gesture: start, hover over each target, drop.
    Drag {
        item: DragRef,
        #[serde(default)]
        over: Vec<TargetRef>,
        #[serde(default)]
        drop: Option<TargetRef>,
    },
    Renumber,
    SetName {
        name: String,
    },
    SetDescription {
        #[serde(default)]
        description: Option<String>,
    },
    SetActive {
        active: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragRef {
    Tier(String),
    Placement(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRef {
    Header(String),
    Body(String),
    Placement(String),
}

/// What a script run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub steps: usize,
    /// Drops that changed the collection, in order.
    pub drops: Vec<DropAction>,
    /// Steps the editor declined, with the reason.
    pub refused: Vec<String>,
}

pub fn parse_script(text: &str) -> Result<Vec<EditStep>> {
    serde_json::from_str(text).context("parse edit script")
}

/// Runs steps against a session, keeping track of `@label` references.
pub struct ScriptRunner<'a> {
    catalog: Option<&'a OperatorCatalog>,
    tiers: BTreeMap<String, TierId>,
    placements: BTreeMap<String, PlacementId>,
}

impl<'a> ScriptRunner<'a> {
    /// With a catalog, operators missing from it are refused.
    pub fn new(catalog: Option<&'a OperatorCatalog>) -> Self {
        Self {
            catalog,
            tiers: BTreeMap::new(),
            placements: BTreeMap::new(),
        }
    }

    pub fn run(&mut self, session: &mut EditorSession, steps: &[EditStep]) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();
        for (index, step) in steps.iter().enumerate() {
            self.apply(session, step, &mut report)
                .with_context(|| format!("step {}", index + 1))?;
            report.steps += 1;
        }
        Ok(report)
    }

    fn apply(&mut self, session: &mut EditorSession, step: &EditStep, report: &mut ScriptReport) -> Result<()> {
        debug!(?step, "script step");
        match step {
            EditStep::AddTier {
                label,
                name,
                color,
                description,
            } => {
                let id = session.add_tier();
                let patch = TierPatch {
                    name: name.clone(),
                    color: color.clone(),
                    description: description.clone(),
                };
                if !patch.is_empty() {
                    session.update_tier(&id, &patch);
                }
                if let Some(label) = label {
                    self.tiers.insert(label.clone(), id);
                }
            }
            EditStep::UpdateTier {
                tier,
                name,
                color,
                description,
            } => {
                let patch = TierPatch {
                    name: name.clone(),
                    color: color.clone(),
                    description: description.clone(),
                };
                let tier = self.tier(session, tier)?;
                session.update_tier(&tier, &patch);
            }
            EditStep::DeleteTier { tier } => {
                let tier = self.tier(session, tier)?;
                session.delete_tier(&tier);
            }
            EditStep::MoveTierUp { tier } => {
                let tier = self.tier(session, tier)?;
                session.move_tier_up(&tier);
            }
            EditStep::MoveTierDown { tier } => {
                let tier = self.tier(session, tier)?;
                session.move_tier_down(&tier);
            }
            EditStep::ReorderTiers { from, to } => session.reorder_tiers(*from, *to),
            EditStep::ReorderPlacements { tier, from, to } => {
                let tier = self.tier(session, tier)?;
                session.reorder_placements(&tier, *from, *to);
            }
            EditStep::AddOperator {
                tier,
                operator,
                label,
            } => {
                if self.catalog.is_some_and(|c| !c.contains(operator)) {
                    warn!(operator = %operator, "operator not in catalog");
                    report.refused.push(format!("{operator} is not in the operator catalog"));
                    return Ok(());
                }
                let tier_id = self.tier(session, tier)?;
                match session.add_operator(&tier_id, operator) {
                    Some(id) => {
                        if let Some(label) = label {
                            self.placements.insert(label.clone(), id);
                        }
                    }
                    None => report
                        .refused
                        .push(format!("{operator} is already placed or {tier} does not exist")),
                }
            }
            EditStep::RemovePlacement { tier, placement } => {
                let tier = self.tier(session, tier)?;
                let placement = self.placement(session, placement)?;
                session.remove_placement(&tier, &placement);
            }
            EditStep::SetNotes {
                tier,
                placement,
                notes,
            } => {
                let tier = self.tier(session, tier)?;
                let placement = self.placement(session, placement)?;
                session.set_placement_notes(&tier, &placement, notes.as_deref());
            }
            EditStep::MovePlacement {
                placement,
                tier,
                before,
            } => {
                let at = match before {
                    Some(anchor) => InsertAt::Before(self.placement(session, anchor)?),
                    None => InsertAt::End,
                };
                let placement = self.placement(session, placement)?;
                let tier = self.tier(session, tier)?;
                session.move_placement(&placement, &tier, &at);
            }
            EditStep::Drag { item, over, drop } => {
                let item = match item {
                    DragRef::Tier(id) => DragItem::Tier(self.tier(session, id)?),
                    DragRef::Placement(id) => DragItem::Placement(self.placement(session, id)?),
                };
                session.drag_start(item);
                for target in over {
                    let target = self.target(session, target)?;
                    session.drag_over(Some(&target));
                }
                let drop = drop.as_ref().map(|t| self.target(session, t)).transpose()?;
                if let Some(action) = session.drag_end(drop.as_ref()) {
                    report.drops.push(action);
                }
            }
            EditStep::Renumber => session.renumber(),
            EditStep::SetName { name } => session.set_name(name),
            EditStep::SetDescription { description } => session.set_description(description.as_deref()),
            EditStep::SetActive { active } => session.set_active(*active),
        }
        Ok(())
    }

    fn tier(&self, session: &EditorSession, reference: &str) -> Result<TierId> {
        match reference.strip_prefix('@') {
            Some(label) => self
                .tiers
                .get(label)
                .cloned()
                .ok_or_else(|| anyhow!("unknown tier label @{label}")),
            None => match session.tiers().iter().find(|t| t.id.persisted_id() == Some(reference)) {
                Some(stored) => Ok(stored.id.clone()),
                None => reference
                    .parse()
                    .with_context(|| format!("invalid tier id {reference:?}")),
            },
        }
    }

    fn placement(&self, session: &EditorSession, reference: &str) -> Result<PlacementId> {
        match reference.strip_prefix('@') {
            Some(label) => self
                .placements
                .get(label)
                .cloned()
                .ok_or_else(|| anyhow!("unknown placement label @{label}")),
            None => match session
                .tiers()
                .iter()
                .flat_map(|t| t.placements.iter())
                .find(|p| p.id.persisted_id() == Some(reference))
            {
                Some(stored) => Ok(stored.id.clone()),
                None => reference
                    .parse()
                    .with_context(|| format!("invalid placement id {reference:?}")),
            },
        }
    }

    fn target(&self, session: &EditorSession, target: &TargetRef) -> Result<DropTarget> {
        Ok(match target {
            TargetRef::Header(id) => DropTarget::TierHeader(self.tier(session, id)?),
            TargetRef::Body(id) => DropTarget::TierBody(self.tier(session, id)?),
            TargetRef::Placement(id) => DropTarget::Placement(self.placement(session, id)?),
        })
    }
}
