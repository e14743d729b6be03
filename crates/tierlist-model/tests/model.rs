//! Tests for tierlist-model wire shapes.

use tierlist_model::{
    MetadataUpdate, OperatorInfo, PlacementPayload, SyncPayload, TierListMeta, TierListSnapshot,
    TierPayload,
};

const SNAPSHOT_JSON: &str = r##"{
    "tier_list": {
        "id": "list-1",
        "name": "Main",
        "slug": "main",
        "description": null,
        "is_active": true,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z"
    },
    "tiers": [
        {
            "id": "t-s",
            "tier_list_id": "list-1",
            "name": "S",
            "display_order": 0,
            "color": "#ff9f7f",
            "description": null,
            "placements": [
                {
                    "id": "p-1",
                    "tier_id": "t-s",
                    "operator_id": "char_002_amiya",
                    "sub_order": 0,
                    "notes": "flexible",
                    "created_at": "2025-01-01T00:00:00Z",
                    "updated_at": "2025-01-01T00:00:00Z"
                }
            ]
        },
        {
            "id": "t-a",
            "tier_list_id": "list-1",
            "name": "A",
            "display_order": 1,
            "color": null,
            "description": "solid"
        }
    ]
}"##;

#[test]
fn snapshot_deserializes_with_defaults() {
    let snapshot: TierListSnapshot = serde_json::from_str(SNAPSHOT_JSON).expect("parse snapshot");
    assert_eq!(snapshot.tier_list.tier_list_type, "official");
    assert_eq!(snapshot.tiers.len(), 2);
    assert!(snapshot.tiers[1].placements.is_empty());
    assert_eq!(snapshot.placement_count(), 1);
}

#[test]
fn metadata_diff_only_reports_changes() {
    let snapshot: TierListSnapshot = serde_json::from_str(SNAPSHOT_JSON).expect("parse snapshot");
    let baseline = TierListMeta::from(&snapshot.tier_list);
    let mut edited = baseline.clone();
    assert_eq!(edited.diff(&baseline), None);

    edited.is_active = false;
    assert_eq!(
        edited.diff(&baseline),
        Some(MetadataUpdate {
            name: "Main".to_string(),
            description: None,
            is_active: false,
        })
    );
}

#[test]
fn operator_rarity_uses_game_form() {
    let op: OperatorInfo = serde_json::from_str(
        r#"{"id": "char_103_angel", "name": "Exusiai", "rarity": "TIER_6"}"#,
    )
    .expect("parse operator");
    assert_eq!(op.rarity.stars(), 6);
    let json = serde_json::to_value(&op).expect("serialize operator");
    assert_eq!(json["rarity"], "TIER_6");
}

#[test]
fn payload_wire_shape() {
    let payload = SyncPayload {
        tiers: vec![TierPayload {
            id: None,
            name: "S".to_string(),
            display_order: 0,
            color: "#ff7f7f".to_string(),
            description: None,
            placements: vec![PlacementPayload {
                id: Some("p-1".to_string()),
                operator_id: "char_002_amiya".to_string(),
                sub_order: 0,
                notes: None,
            }],
        }],
    };
    insta::assert_json_snapshot!(payload, @r##"
    {
      "tiers": [
        {
          "id": null,
          "name": "S",
          "display_order": 0,
          "color": "#ff7f7f",
          "description": null,
          "placements": [
            {
              "id": "p-1",
              "operator_id": "char_002_amiya",
              "sub_order": 0,
              "notes": null
            }
          ]
        }
      ]
    }
    "##);
}
