//! Ordering model for the tier list editor.
//!
//! A tier list is an ordered sequence of [`Tier`]s, each owning an ordered
//! sequence of [`Placement`]s. Positions are carried explicitly
//! (`display_order` for tiers, `sub_order` for placements) and must stay
//! contiguous; see [`TierCollection::check_invariants`].
//!
//! The wire shapes exchanged with the backend live alongside the in-memory
//! model: [`TierListSnapshot`] is what a load returns, [`SyncPayload`] is what
//! a save sends.

pub mod catalog;
pub mod collection;
pub mod error;
pub mod ids;
pub mod meta;
pub mod payload;
pub mod record;
pub mod tier;

pub use catalog::{OperatorCatalog, OperatorInfo, Rarity};
pub use collection::TierCollection;
pub use error::{InvariantViolation, ModelError, Result};
pub use ids::{IdMinter, PlacementId, RecordKey, TierId};
pub use meta::{MetadataUpdate, TierListMeta};
pub use payload::{PlacementPayload, SyncPayload, TierPayload};
pub use record::{PlacementRecord, TierListRecord, TierListSnapshot, TierRecord};
pub use tier::{Placement, Tier, TierPatch};
