//! The backend seam and the save cycle run against it.

use tierlist_core::{EditorSession, SaveRequest};
use tierlist_model::{MetadataUpdate, SyncPayload, TierListSnapshot};
use tracing::{info, info_span};

use crate::error::{Result, SyncError};

/// Storage the editor loads from and saves to.
pub trait TierListBackend {
    fn fetch(&self, slug: &str) -> Result<TierListSnapshot>;

    fn update_metadata(&mut self, slug: &str, update: &MetadataUpdate) -> Result<()>;

    /// Reconcile the stored tier list with `payload`.
    fn sync(&mut self, slug: &str, payload: &SyncPayload) -> Result<()>;
}

/// Save `session` through `backend` and reload it from the stored result.
///
/// On failure the session keeps its edits and records the failure, so the
/// save can simply be retried.
pub fn save_session<B: TierListBackend + ?Sized>(
    session: &mut EditorSession,
    backend: &mut B,
) -> Result<()> {
    let request = session.begin_save();
    let _span = info_span!("save", slug = %request.slug).entered();

    match push(backend, &request) {
        Ok(snapshot) => {
            session.complete_save(Ok::<_, SyncError>(&snapshot))?;
            info!(
                tiers = snapshot.tiers.len(),
                placements = snapshot.placement_count(),
                "tier list saved"
            );
            Ok(())
        }
        Err(err) => {
            session.complete_save(Err(&err))?;
            Err(err)
        }
    }
}

fn push<B: TierListBackend + ?Sized>(backend: &mut B, request: &SaveRequest) -> Result<TierListSnapshot> {
    if let Some(update) = &request.metadata {
        backend.update_metadata(&request.slug, update)?;
    }
    backend.sync(&request.slug, &request.payload)?;
    backend.fetch(&request.slug)
}
