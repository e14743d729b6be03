#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

const LOCAL_PREFIX: &str = "new-";
const MOVED_PREFIX: &str = "moved-";

/// Identity of a tier or placement.
///
/// Persisted keys come from the backend. `Local` keys are minted for entities
/// created during the editing session, `Moved` keys for persisted placements
/// that were re-homed into another tier and must be recreated server-side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKey {
    Persisted(String),
    Local(u64),
    Moved(u64),
}

impl RecordKey {
    pub fn persisted(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyIdentifier);
        }
        Ok(Self::Persisted(trimmed.to_string()))
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }

    /// The backend identifier, or `None` for session-local keys.
    pub fn persisted_id(&self) -> Option<&str> {
        match self {
            Self::Persisted(id) => Some(id),
            Self::Local(_) | Self::Moved(_) => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => f.write_str(id),
            Self::Local(n) => write!(f, "{LOCAL_PREFIX}{n}"),
            Self::Moved(n) => write!(f, "{MOVED_PREFIX}{n}"),
        }
    }
}

/// Parses the textual form produced by `Display`.
///
/// Only meant for text boundaries (scripts, command lines); inside the engine
/// keys are always carried as the enum.
impl FromStr for RecordKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(n) = s.strip_prefix(LOCAL_PREFIX).and_then(|n| n.parse().ok()) {
            return Ok(Self::Local(n));
        }
        if let Some(n) = s.strip_prefix(MOVED_PREFIX).and_then(|n| n.parse().ok()) {
            return Ok(Self::Moved(n));
        }
        Self::persisted(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TierId(RecordKey);

impl TierId {
    pub fn persisted(value: impl Into<String>) -> Result<Self, ModelError> {
        RecordKey::persisted(value).map(Self)
    }

    pub fn key(&self) -> &RecordKey {
        &self.0
    }

    /// True when the tier was created in this session and never saved.
    pub fn is_new(&self) -> bool {
        !self.0.is_persisted()
    }

    pub fn persisted_id(&self) -> Option<&str> {
        self.0.persisted_id()
    }
}

impl From<RecordKey> for TierId {
    fn from(key: RecordKey) -> Self {
        Self(key)
    }
}

impl FromStr for TierId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlacementId(RecordKey);

impl PlacementId {
    pub fn persisted(value: impl Into<String>) -> Result<Self, ModelError> {
        RecordKey::persisted(value).map(Self)
    }

    pub fn key(&self) -> &RecordKey {
        &self.0
    }

    pub fn is_new(&self) -> bool {
        !self.0.is_persisted()
    }

    /// True for placements re-minted by a cross-tier move.
    pub fn is_moved(&self) -> bool {
        matches!(self.0, RecordKey::Moved(_))
    }

    pub fn persisted_id(&self) -> Option<&str> {
        self.0.persisted_id()
    }
}

impl From<RecordKey> for PlacementId {
    fn from(key: RecordKey) -> Self {
        Self(key)
    }
}

impl FromStr for PlacementId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mints placeholder identifiers for one editing session.
///
/// Numbers are shared across tiers and placements and never reused, so two
/// placeholders minted by the same minter never collide.
#[derive(Debug, Clone)]
pub struct IdMinter {
    next: u64,
}

impl Default for IdMinter {
    fn default() -> Self {
        Self::new()
    }
}

impl IdMinter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn bump(&mut self) -> u64 {
        let n = self.next;
        self.next += 1;
        n
    }

    pub fn tier(&mut self) -> TierId {
        TierId(RecordKey::Local(self.bump()))
    }

    pub fn placement(&mut self) -> PlacementId {
        PlacementId(RecordKey::Local(self.bump()))
    }

    pub fn moved_placement(&mut self) -> PlacementId {
        PlacementId(RecordKey::Moved(self.bump()))
    }
}
