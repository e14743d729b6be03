//! Tier list editing engine.
//!
//! Every operation takes the current [`TierCollection`] by reference and
//! returns a new one; nothing mutates its input. [`EditorSession`] threads
//! that value through the operations, the drag state machine and the save
//! lifecycle.
//!
//! Control flow for an interaction:
//!
//! ```text
//! drag events -> DragMachine -> mutation -> new TierCollection
//!             -> DirtyReport (recomputed) -> [save] -> SyncPayload
//! ```

pub mod candidates;
pub mod config;
pub mod dirty;
pub mod drag;
pub mod load;
pub mod ops;
pub mod reorder;
pub mod serialize;
pub mod session;
pub mod transfer;

pub use candidates::candidate_operators;
pub use config::{
    ConfigError, EditorConfig, default_config_path, load_config, load_default_config, save_config,
};
pub use dirty::{Baseline, DirtyReport, SaveTracker, TierStatus};
pub use drag::{DragItem, DragMachine, DragOutcome, DragState, DropAction, DropTarget, Ignored};
pub use load::{check_snapshot, collection_from_snapshot, raw_collection};
pub use serialize::build_sync_payload;
pub use session::{EditorSession, SaveRequest};
pub use transfer::{InsertAt, move_placement};

pub use tierlist_model::TierCollection;
