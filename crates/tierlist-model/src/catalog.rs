//! Read-only operator lookup used to pick and render placements.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Operator star rating, 1 through 6.
///
/// Accepts the game data form (`"TIER_6"`) as well as a bare digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rarity(u8);

impl Rarity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(stars: u8) -> Result<Self, ModelError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(ModelError::InvalidRarity(stars.to_string()))
        }
    }

    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("TIER_")
            .or_else(|| trimmed.strip_prefix("tier_"))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(|stars| Self::new(stars).ok())
            .ok_or_else(|| ModelError::InvalidRarity(value.to_string()))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<String> for Rarity {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rarity> for String {
    fn from(rarity: Rarity) -> Self {
        format!("TIER_{}", rarity.0)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}★", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorInfo {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub portrait: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
}

/// Operators keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorCatalog {
    operators: BTreeMap<String, OperatorInfo>,
}

impl OperatorCatalog {
    pub fn new(operators: impl IntoIterator<Item = OperatorInfo>) -> Self {
        Self {
            operators: operators
                .into_iter()
                .map(|op| (op.id.clone(), op))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&OperatorInfo> {
        self.operators.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.operators.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorInfo> {
        self.operators.values()
    }
}

impl FromIterator<OperatorInfo> for OperatorCatalog {
    fn from_iter<I: IntoIterator<Item = OperatorInfo>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_parses_game_and_digit_forms() {
        assert_eq!(Rarity::parse("TIER_6").unwrap().stars(), 6);
        assert_eq!(Rarity::parse("3").unwrap().stars(), 3);
        assert!(Rarity::parse("TIER_7").is_err());
        assert!(Rarity::parse("legendary").is_err());
    }

    #[test]
    fn catalog_is_keyed_by_id() {
        let catalog: OperatorCatalog = [OperatorInfo {
            id: "char_002_amiya".to_string(),
            name: "Amiya".to_string(),
            rarity: Rarity::new(5).unwrap(),
            portrait: None,
            profession: Some("CASTER".to_string()),
        }]
        .into_iter()
        .collect();
        assert!(catalog.contains("char_002_amiya"));
        assert_eq!(catalog.get("char_002_amiya").map(|o| o.name.as_str()), Some("Amiya"));
    }
}
