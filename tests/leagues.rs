use footdata_terminal::leagues::{KNOWN_LEAGUES, TrackedLeagues, league_label, league_name};
use footdata_terminal::prefs::{MemPrefs, PrefStore};

#[test]
fn toggle_removes_present_and_adds_absent() {
    let store = MemPrefs::default();
    let mut tracked = TrackedLeagues::from_ids([39]);

    tracked.toggle(39, &store);
    assert!(tracked.is_empty());

    tracked.toggle(140, &store);
    assert!(tracked.contains(140));
    assert_eq!(tracked.len(), 1);
}

#[test]
fn toggle_all_from_empty_selects_every_known_league() {
    let store = MemPrefs::default();
    let mut tracked = TrackedLeagues::from_ids([]);

    tracked.toggle_all(&store);
    assert_eq!(tracked.len(), KNOWN_LEAGUES.len());
    for (id, _) in KNOWN_LEAGUES {
        assert!(tracked.contains(*id));
    }
}

#[test]
fn toggle_all_from_full_clears() {
    let store = MemPrefs::default();
    let mut tracked = TrackedLeagues::from_ids(KNOWN_LEAGUES.iter().map(|(id, _)| *id));

    tracked.toggle_all(&store);
    assert!(tracked.is_empty());
}

#[test]
fn toggle_all_from_partial_selects_everything() {
    let store = MemPrefs::default();
    let mut tracked = TrackedLeagues::from_ids([39, 140]);

    tracked.toggle_all(&store);
    assert_eq!(tracked.len(), KNOWN_LEAGUES.len());
}

#[test]
fn every_mutation_is_persisted_synchronously() {
    let store = MemPrefs::default();
    let mut tracked = TrackedLeagues::from_ids([]);

    tracked.toggle(39, &store);
    assert_eq!(TrackedLeagues::load(&store), tracked);

    tracked.toggle(203, &store);
    assert_eq!(TrackedLeagues::load(&store), tracked);

    tracked.toggle_all(&store);
    assert_eq!(TrackedLeagues::load(&store), tracked);
}

#[test]
fn load_falls_back_to_default_on_garbage() {
    let store = MemPrefs::default();
    store.save("tracked_leagues", "not json").expect("save");

    let tracked = TrackedLeagues::load(&store);
    // The default tracks something; garbage must not read as "nothing".
    assert!(!tracked.is_empty());
}

#[test]
fn league_names_resolve_from_the_static_table() {
    assert_eq!(league_name(39), Some("Premier League"));
    assert_eq!(league_name(203), Some("Super Lig"));
    assert_eq!(league_name(9999), None);
    assert_eq!(league_label(9999), "League 9999");
}
