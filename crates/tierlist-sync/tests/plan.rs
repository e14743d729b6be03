use chrono::{DateTime, TimeZone, Utc};
use tierlist_model::{
    PlacementPayload, PlacementRecord, SyncPayload, TierListRecord, TierListSnapshot, TierPayload,
    TierRecord,
};
use tierlist_sync::{SyncError, SyncPlan, TierRef};

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

/// Tiers given as `(id, [(placement id, operator id)])`.
fn stored(tiers: &[(&str, &[(&str, &str)])]) -> TierListSnapshot {
    TierListSnapshot {
        tier_list: TierListRecord {
            id: "list".to_string(),
            name: "Official".to_string(),
            slug: "official".to_string(),
            description: None,
            is_active: true,
            tier_list_type: "official".to_string(),
            created_at: at(),
            updated_at: at(),
        },
        tiers: tiers
            .iter()
            .enumerate()
            .map(|(order, (id, placements))| TierRecord {
                id: (*id).to_string(),
                tier_list_id: "list".to_string(),
                name: id.trim_start_matches("t-").to_uppercase(),
                display_order: order as u32,
                color: None,
                description: None,
                placements: placements
                    .iter()
                    .enumerate()
                    .map(|(sub, (pid, op))| PlacementRecord {
                        id: (*pid).to_string(),
                        tier_id: (*id).to_string(),
                        operator_id: (*op).to_string(),
                        sub_order: sub as u32,
                        notes: None,
                        created_at: at(),
                        updated_at: at(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn tier(id: Option<&str>, name: &str, color: &str, placements: &[(Option<&str>, &str)]) -> TierPayload {
    TierPayload {
        id: id.map(str::to_string),
        name: name.to_string(),
        display_order: 0,
        color: color.to_string(),
        description: None,
        placements: placements
            .iter()
            .enumerate()
            .map(|(sub, (pid, op))| PlacementPayload {
                id: pid.map(str::to_string),
                operator_id: (*op).to_string(),
                sub_order: sub,
                notes: None,
            })
            .collect(),
    }
}

fn current() -> TierListSnapshot {
    stored(&[
        ("t-s", &[("p1", "op1"), ("p2", "op2")]),
        ("t-a", &[("p3", "op3")]),
        ("t-b", &[("p4", "op4")]),
    ])
}

fn payload() -> SyncPayload {
    SyncPayload {
        tiers: vec![
            tier(Some("t-a"), "A", "#ffbf7f", &[(Some("p3"), "op3"), (None, "op1")]),
            tier(None, "New", "#7f7fff", &[(None, "op5")]),
            tier(Some("t-s"), "S", "#ff7f7f", &[(Some("p2"), "op2")]),
        ],
    }
}

#[test]
fn plan_for_mixed_edit() {
    let plan = SyncPlan::build(&current(), &payload()).unwrap();
    insta::assert_json_snapshot!(plan, @r##"
    {
      "delete_tiers": [
        "t-b"
      ],
      "create_tiers": [
        {
          "index": 1,
          "name": "New",
          "color": "#7f7fff",
          "description": null
        }
      ],
      "update_tiers": [
        {
          "id": "t-a",
          "name": "A",
          "color": "#ffbf7f",
          "description": null
        },
        {
          "id": "t-s",
          "name": "S",
          "color": "#ff7f7f",
          "description": null
        }
      ],
      "move_placements": [
        {
          "placement_id": "p1",
          "tier_id": "t-a",
          "sub_order": 1,
          "notes": null
        }
      ],
      "create_placements": [
        {
          "tier": {
            "created": 1
          },
          "operator_id": "op5",
          "sub_order": 0,
          "notes": null
        }
      ],
      "update_placements": [
        {
          "placement_id": "p3",
          "sub_order": 0,
          "notes": null
        },
        {
          "placement_id": "p2",
          "sub_order": 0,
          "notes": null
        }
      ],
      "delete_placements": [],
      "order": [
        {
          "existing": "t-a"
        },
        {
          "created": 1
        },
        {
          "existing": "t-s"
        }
      ]
    }
    "##);
}

#[test]
fn applied_plan_matches_payload() {
    let current = current();
    let plan = SyncPlan::build(&current, &payload()).unwrap();
    let later = at() + chrono::Duration::hours(1);
    let next = plan.apply(&current, later);

    let layout: Vec<(&str, Vec<&str>)> = next
        .tiers
        .iter()
        .map(|t| {
            (
                t.name.as_str(),
                t.placements.iter().map(|p| p.operator_id.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        layout,
        vec![("A", vec!["op3", "op1"]), ("New", vec!["op5"]), ("S", vec!["op2"])]
    );
    let orders: Vec<u32> = next.tiers.iter().map(|t| t.display_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    let moved = &next.tiers[0].placements[1];
    assert_eq!(moved.id, "p1");
    assert_eq!(moved.tier_id, "t-a");
    assert_eq!(moved.created_at, at());
    assert_eq!(moved.updated_at, later);

    let created = &next.tiers[1];
    assert_eq!(created.id.len(), 32);
    assert_eq!(created.placements[0].tier_id, created.id);
    assert_eq!(created.color.as_deref(), Some("#7f7fff"));
    assert_eq!(next.tier_list.updated_at, later);
}

#[test]
fn operator_already_in_same_tier_keeps_its_row() {
    let current = stored(&[("t-s", &[("p1", "op1")])]);
    let payload = SyncPayload {
        tiers: vec![tier(Some("t-s"), "S", "#ff7f7f", &[(None, "op1")])],
    };
    let plan = SyncPlan::build(&current, &payload).unwrap();
    assert!(plan.delete_placements.is_empty());
    assert!(plan.create_placements.is_empty());
    assert_eq!(plan.update_placements[0].placement_id, "p1");
}

#[test]
fn operator_from_deleted_tier_is_recreated() {
    let current = stored(&[("t-s", &[("p1", "op1")]), ("t-a", &[])]);
    let payload = SyncPayload {
        tiers: vec![tier(Some("t-a"), "A", "#ffbf7f", &[(None, "op1")])],
    };
    let plan = SyncPlan::build(&current, &payload).unwrap();
    assert_eq!(plan.delete_tiers, vec!["t-s".to_string()]);
    assert!(plan.move_placements.is_empty());
    assert_eq!(plan.create_placements.len(), 1);
    assert_eq!(plan.create_placements[0].tier, TierRef::Existing("t-a".to_string()));
    assert!(plan.delete_placements.is_empty());
}

#[test]
fn removed_placement_is_deleted() {
    let current = stored(&[("t-s", &[("p1", "op1"), ("p2", "op2")])]);
    let payload = SyncPayload {
        tiers: vec![tier(Some("t-s"), "S", "#ff7f7f", &[(Some("p2"), "op2")])],
    };
    let plan = SyncPlan::build(&current, &payload).unwrap();
    assert_eq!(plan.delete_placements, vec!["p1".to_string()]);
}

#[test]
fn unknown_ids_are_rejected() {
    let current = stored(&[("t-s", &[("p1", "op1")])]);
    let unknown_tier = SyncPayload {
        tiers: vec![tier(Some("t-x"), "X", "#888888", &[])],
    };
    assert!(matches!(
        SyncPlan::build(&current, &unknown_tier),
        Err(SyncError::Rejected(_))
    ));

    let unknown_placement = SyncPayload {
        tiers: vec![tier(Some("t-s"), "S", "#888888", &[(Some("p9"), "op9")])],
    };
    assert!(matches!(
        SyncPlan::build(&current, &unknown_placement),
        Err(SyncError::Rejected(_))
    ));
}

#[test]
fn unchanged_payload_plans_only_updates() {
    let current = stored(&[("t-s", &[("p1", "op1")])]);
    let payload = SyncPayload {
        tiers: vec![tier(Some("t-s"), "S", "#ff7f7f", &[(Some("p1"), "op1")])],
    };
    let plan = SyncPlan::build(&current, &payload).unwrap();
    assert_eq!(plan.change_count(), 2);
    assert!(plan.delete_tiers.is_empty() && plan.delete_placements.is_empty());
}
