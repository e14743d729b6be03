//! Backend collaborators for the tier list editor.
//!
//! [`TierListBackend`] is the seam the editor saves through;
//! [`save_session`] runs one save cycle against it. [`SyncPlan`] turns a
//! save payload into concrete row changes, and [`FileStore`] applies those
//! plans to JSON snapshots on disk.

pub mod backend;
pub mod error;
pub mod plan;
pub mod store;

pub use backend::{TierListBackend, save_session};
pub use error::{Result, SyncError};
pub use plan::{PlacementCreate, PlacementMove, PlacementUpdate, SyncPlan, TierCreate, TierRef, TierUpdate};
pub use store::FileStore;
