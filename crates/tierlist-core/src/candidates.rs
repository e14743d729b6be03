//! Operators that may still be added to the tier list.

use std::cmp::Reverse;

use tierlist_model::{OperatorCatalog, OperatorInfo, TierCollection};

/// Operators not yet placed anywhere, filtered by a case-insensitive name
/// search and sorted by rarity (highest first), then name.
pub fn candidate_operators<'a>(
    catalog: &'a OperatorCatalog,
    collection: &TierCollection,
    search: &str,
) -> Vec<&'a OperatorInfo> {
    let placed = collection.placed_operator_ids();
    let needle = search.trim().to_lowercase();
    let mut candidates: Vec<&OperatorInfo> = catalog
        .iter()
        .filter(|op| !placed.contains(op.id.as_str()))
        .filter(|op| needle.is_empty() || op.name.to_lowercase().contains(&needle))
        .collect();
    candidates.sort_by(|a, b| {
        Reverse(a.rarity)
            .cmp(&Reverse(b.rarity))
            .then_with(|| a.name.cmp(&b.name))
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tierlist_model::{Placement, PlacementId, Rarity, Tier, TierId};

    fn op(id: &str, name: &str, stars: u8) -> OperatorInfo {
        OperatorInfo {
            id: id.to_string(),
            name: name.to_string(),
            rarity: Rarity::new(stars).unwrap(),
            portrait: None,
            profession: None,
        }
    }

    #[test]
    fn placed_operators_are_excluded_and_sorted() {
        let catalog = OperatorCatalog::new([
            op("a", "Amiya", 5),
            op("e", "Exusiai", 6),
            op("f", "Fang", 3),
            op("s", "SilverAsh", 6),
        ]);
        let tier_id = TierId::persisted("t").unwrap();
        let now = Utc::now();
        let collection = TierCollection::new(vec![Tier {
            id: tier_id.clone(),
            name: "S".to_string(),
            display_order: 0,
            color: "#888888".to_string(),
            description: None,
            placements: vec![Placement {
                id: PlacementId::persisted("p").unwrap(),
                tier_id,
                operator_id: "s".to_string(),
                sub_order: 0,
                notes: None,
                created_at: now,
                updated_at: now,
            }],
            modified: false,
        }]);

        let names: Vec<&str> = candidate_operators(&catalog, &collection, "")
            .into_iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(names, vec!["Exusiai", "Amiya", "Fang"]);

        let found = candidate_operators(&catalog, &collection, "AMI");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }
}
