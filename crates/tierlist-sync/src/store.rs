//! A directory of tier lists stored as `<slug>.json` snapshots.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tierlist_model::{MetadataUpdate, SyncPayload, TierListSnapshot};
use tracing::{debug, info};

use crate::backend::TierListBackend;
use crate::error::{Result, SyncError};
use crate::plan::SyncPlan;

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.{EXTENSION}"))
    }

    /// Slugs of all stored tier lists, sorted.
    pub fn slugs(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SyncError::Io {
                    operation: "list",
                    path: self.root.clone(),
                    source: e,
                });
            }
        };
        let mut slugs: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    pub fn load(&self, slug: &str) -> Result<TierListSnapshot> {
        let path = self.path_for(slug);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SyncError::UnknownSlug(slug.to_string()));
            }
            Err(e) => {
                return Err(SyncError::Io {
                    operation: "read",
                    path,
                    source: e,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| SyncError::Json { path, source })
    }

    /// Write a snapshot under its own slug, replacing any previous version.
    pub fn write(&self, snapshot: &TierListSnapshot) -> Result<()> {
        let path = self.path_for(&snapshot.tier_list.slug);
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(|source| SyncError::Json {
            path: path.clone(),
            source,
        })?;

        fs::create_dir_all(&self.root).map_err(|e| SyncError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source: e,
        })?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| SyncError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| SyncError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| SyncError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &path).map_err(|e| SyncError::AtomicWrite {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), "wrote tier list");
        Ok(())
    }

    /// The plan a sync of `payload` would apply, without applying it.
    pub fn plan(&self, slug: &str, payload: &SyncPayload) -> Result<SyncPlan> {
        let current = self.load(slug)?;
        SyncPlan::build(&current, payload)
    }
}

impl TierListBackend for FileStore {
    fn fetch(&self, slug: &str) -> Result<TierListSnapshot> {
        self.load(slug)
    }

    fn update_metadata(&mut self, slug: &str, update: &MetadataUpdate) -> Result<()> {
        let mut snapshot = self.load(slug)?;
        let list = &mut snapshot.tier_list;
        list.name.clone_from(&update.name);
        list.description.clone_from(&update.description);
        list.is_active = update.is_active;
        list.updated_at = Utc::now();
        self.write(&snapshot)?;
        info!(slug, "updated tier list metadata");
        Ok(())
    }

    fn sync(&mut self, slug: &str, payload: &SyncPayload) -> Result<()> {
        let current = self.load(slug)?;
        let plan = SyncPlan::build(&current, payload)?;
        let next = plan.apply(&current, Utc::now());
        self.write(&next)?;
        info!(
            slug,
            changes = plan.change_count(),
            tiers_created = plan.create_tiers.len(),
            tiers_deleted = plan.delete_tiers.len(),
            placements_moved = plan.move_placements.len(),
            placements_created = plan.create_placements.len(),
            placements_deleted = plan.delete_placements.len(),
            "synced tier list"
        );
        Ok(())
    }
}
