use footdata_terminal::api::Fixture;
use footdata_terminal::reconcile::merge_live_batch;

fn fixture(id: u32, league_id: u32, status: &str) -> Fixture {
    Fixture {
        id,
        league_id,
        season: Some(2026),
        date_utc: Some("2026-08-06T18:00:00Z".to_string()),
        status: status.to_string(),
        home_team: format!("Home {id}"),
        away_team: format!("Away {id}"),
        goals_home: None,
        goals_away: None,
        updated_at_utc: None,
    }
}

#[test]
fn replaces_in_place_keeping_order() {
    let existing = vec![fixture(1, 39, "NS"), fixture(2, 39, "NS"), fixture(3, 140, "1H")];
    let mut update = fixture(2, 39, "1H");
    update.goals_home = Some(1);
    update.goals_away = Some(0);

    let merged = merge_live_batch(existing, vec![update.clone()]);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[1], update);
    assert_eq!(merged[0].id, 1);
    assert_eq!(merged[2].id, 3);
}

#[test]
fn replacement_is_whole_record_not_field_merge() {
    let mut seen = fixture(7, 39, "1H");
    seen.goals_home = Some(2);
    seen.updated_at_utc = Some("2026-08-06T19:00:00Z".to_string());

    // The incoming record carries no goals; the merged record must not keep
    // the old ones.
    let incoming = fixture(7, 39, "SUSP");
    let merged = merge_live_batch(vec![seen], vec![incoming.clone()]);
    assert_eq!(merged, vec![incoming]);
}

#[test]
fn unseen_live_fixture_is_appended() {
    let merged = merge_live_batch(Vec::new(), vec![fixture(3, 39, "2H")]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, 3);
    assert_eq!(merged[0].status, "2H");
}

#[test]
fn unseen_finished_fixture_is_discarded() {
    let merged = merge_live_batch(Vec::new(), vec![fixture(2, 39, "FT")]);
    assert!(merged.is_empty());

    for code in ["AET", "PEN", "AWD", "WO", "ABD", "CANC"] {
        let merged = merge_live_batch(Vec::new(), vec![fixture(9, 61, code)]);
        assert!(merged.is_empty(), "code {code}");
    }
}

#[test]
fn seen_fixture_finishing_is_still_replaced() {
    // The drop rule only guards unseen ids; a tracked match ending must land.
    let existing = vec![fixture(4, 39, "2H")];
    let merged = merge_live_batch(existing, vec![fixture(4, 39, "FT")]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].status, "FT");
}

#[test]
fn status_transition_scenario() {
    let existing = vec![fixture(1, 39, "NS")];
    let merged = merge_live_batch(existing, vec![fixture(1, 39, "1H")]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].status, "1H");
}

#[test]
fn merge_never_deletes() {
    let existing: Vec<Fixture> = (1..=10).map(|id| fixture(id, 39, "NS")).collect();
    let batch = vec![fixture(3, 39, "1H"), fixture(42, 140, "HT")];

    let merged = merge_live_batch(existing.clone(), batch);

    for old in &existing {
        assert!(merged.iter().any(|f| f.id == old.id), "id {} lost", old.id);
    }
    assert_eq!(merged.len(), 11);
}

#[test]
fn merge_is_idempotent_per_batch() {
    let existing = vec![fixture(1, 39, "NS"), fixture(2, 140, "1H")];
    let batch = vec![
        fixture(1, 39, "1H"),
        fixture(5, 61, "2H"),
        fixture(6, 78, "FT"),
    ];

    let once = merge_live_batch(existing, batch.clone());
    let twice = merge_live_batch(once.clone(), batch);
    assert_eq!(once, twice);
}

#[test]
fn untouched_records_pass_through_unchanged() {
    let existing = vec![fixture(1, 39, "NS"), fixture(2, 39, "FT")];
    let merged = merge_live_batch(existing.clone(), Vec::new());
    assert_eq!(merged, existing);
}
