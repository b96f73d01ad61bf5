use footdata_terminal::api::Fixture;
use footdata_terminal::leagues::TrackedLeagues;
use footdata_terminal::state::{AppState, Delta, apply_delta};
use footdata_terminal::status::{StatusBucket, classify};

fn fixture(id: u32, league_id: u32, status: &str) -> Fixture {
    Fixture {
        id,
        league_id,
        season: None,
        date_utc: None,
        status: status.to_string(),
        home_team: format!("Home {id}"),
        away_team: format!("Away {id}"),
        goals_home: None,
        goals_away: None,
        updated_at_utc: None,
    }
}

fn tracked_only(state: &mut AppState, ids: &[u32]) {
    state.tracked = TrackedLeagues::from_ids(ids.iter().copied());
}

#[test]
fn league_filter_is_a_pure_subset() {
    let mut state = AppState::new();
    state.fixtures = vec![
        fixture(1, 39, "NS"),
        fixture(2, 140, "NS"),
        fixture(3, 39, "1H"),
        fixture(4, 203, "FT"),
    ];
    tracked_only(&mut state, &[39]);

    let filtered = state.filtered_fixtures();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|f| f.league_id == 39));

    // Every tracked-league record from the input survives.
    for f in state.fixtures.iter().filter(|f| f.league_id == 39) {
        assert!(filtered.iter().any(|g| g.id == f.id));
    }
}

#[test]
fn partition_assigns_each_fixture_to_exactly_one_bucket() {
    let mut state = AppState::new();
    state.fixtures = vec![
        fixture(1, 39, "1H"),
        fixture(2, 39, "NS"),
        fixture(3, 39, "FT"),
        fixture(4, 39, "HT"),
        fixture(5, 39, "WEIRD"),
    ];
    tracked_only(&mut state, &[39]);

    let counts = state.bucket_counts();
    assert_eq!(counts.live, 2);
    assert_eq!(counts.upcoming, 2);
    assert_eq!(counts.finished, 1);
    assert_eq!(
        counts.live + counts.upcoming + counts.finished,
        state.filtered_fixtures().len()
    );

    state.set_status_tab(StatusBucket::Live);
    for f in state.tab_fixtures() {
        assert_eq!(classify(&f.status), StatusBucket::Live);
    }
}

#[test]
fn set_fixtures_clears_previous_error() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::FixturesError("boom".to_string()));
    assert!(state.fixtures_loaded);
    assert_eq!(state.fixtures_error.as_deref(), Some("boom"));
    assert!(state.fixtures.is_empty());

    apply_delta(&mut state, Delta::SetFixtures(vec![fixture(1, 39, "NS")]));
    assert!(state.fixtures_error.is_none());
    assert_eq!(state.fixtures.len(), 1);
}

#[test]
fn initial_fetch_failure_leaves_store_empty() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::FixturesError("http 502: bad".to_string()));
    assert!(state.fixtures.is_empty());
    assert!(state.fixtures_error.is_some());
}

#[test]
fn live_batch_merges_through_apply_delta() {
    let mut state = AppState::new();
    tracked_only(&mut state, &[39]);
    apply_delta(
        &mut state,
        Delta::SetFixtures(vec![fixture(1, 39, "NS"), fixture(2, 39, "NS")]),
    );

    let mut update = fixture(1, 39, "1H");
    update.goals_home = Some(1);
    update.goals_away = Some(0);
    apply_delta(
        &mut state,
        Delta::LiveBatch(vec![update, fixture(9, 39, "FT")]),
    );

    assert_eq!(state.fixtures.len(), 2, "new finished fixture must be dropped");
    assert_eq!(state.fixtures[0].status, "1H");
    assert_eq!(state.fixtures[0].goals_home, Some(1));
    assert_eq!(state.fixtures[1].status, "NS");
}

#[test]
fn selection_is_clamped_when_the_tab_shrinks() {
    let mut state = AppState::new();
    tracked_only(&mut state, &[39]);
    state.set_status_tab(StatusBucket::Upcoming);
    apply_delta(
        &mut state,
        Delta::SetFixtures(vec![fixture(1, 39, "NS"), fixture(2, 39, "NS")]),
    );
    state.select_next();
    assert_eq!(state.selected, 1);

    // The second upcoming fixture goes live; the upcoming tab shrinks to one.
    apply_delta(&mut state, Delta::LiveBatch(vec![fixture(2, 39, "1H")]));
    assert_eq!(state.selected, 0);
}

#[test]
fn stale_standings_result_is_ignored() {
    let mut state = AppState::new();
    state.open_standings(39);
    state.open_standings(140);

    apply_delta(
        &mut state,
        Delta::SetStandings {
            league_id: 39,
            season: 2026,
            rows: Vec::new(),
        },
    );
    assert!(state.standings_loading, "late result for league 39 must not land");

    apply_delta(
        &mut state,
        Delta::SetStandings {
            league_id: 140,
            season: 2026,
            rows: Vec::new(),
        },
    );
    assert!(!state.standings_loading);
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new();
    for i in 0..400 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 399"));
}
