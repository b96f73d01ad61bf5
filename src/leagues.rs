use std::collections::HashSet;
use std::env;

use crate::prefs::PrefStore;

/// Leagues the collector tracks. Names are resolved locally; the API only
/// ever hands back `league_id`.
pub const KNOWN_LEAGUES: &[(u32, &str)] = &[
    (2, "Champions League"),
    (39, "Premier League"),
    (61, "Ligue 1"),
    (78, "Bundesliga"),
    (135, "Serie A"),
    (140, "La Liga"),
    (203, "Super Lig"),
];

const TRACKED_KEY: &str = "tracked_leagues";

pub fn league_name(id: u32) -> Option<&'static str> {
    KNOWN_LEAGUES
        .iter()
        .find(|(league_id, _)| *league_id == id)
        .map(|(_, name)| *name)
}

pub fn league_label(id: u32) -> String {
    match league_name(id) {
        Some(name) => name.to_string(),
        None => format!("League {id}"),
    }
}

/// User-chosen set of league ids controlling which fixtures are shown.
/// Every mutation is written through the store before it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedLeagues {
    ids: HashSet<u32>,
}

impl TrackedLeagues {
    /// The configured default: `APP_TRACKED_LEAGUES` when set, otherwise the
    /// full known-league table.
    pub fn default_set() -> Self {
        let ids = match env::var("APP_TRACKED_LEAGUES") {
            Ok(raw) if !raw.trim().is_empty() => parse_ids(&raw),
            _ => KNOWN_LEAGUES.iter().map(|(id, _)| *id).collect(),
        };
        Self { ids }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Read the persisted selection, falling back to the default when no
    /// prior value exists or it fails to parse.
    pub fn load(store: &dyn PrefStore) -> Self {
        let Some(raw) = store.load(TRACKED_KEY) else {
            return Self::default_set();
        };
        match serde_json::from_str::<Vec<u32>>(&raw) {
            Ok(ids) => Self {
                ids: ids.into_iter().collect(),
            },
            Err(_) => Self::default_set(),
        }
    }

    pub fn toggle(&mut self, id: u32, store: &dyn PrefStore) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
        self.persist(store);
    }

    /// Clear when everything is selected, otherwise select every known league.
    pub fn toggle_all(&mut self, store: &dyn PrefStore) {
        if self.ids.len() == KNOWN_LEAGUES.len() {
            self.ids.clear();
        } else {
            self.ids = KNOWN_LEAGUES.iter().map(|(id, _)| *id).collect();
        }
        self.persist(store);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self, store: &dyn PrefStore) {
        let mut ids: Vec<u32> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        if let Ok(json) = serde_json::to_string(&ids) {
            let _ = store.save(TRACKED_KEY, &json);
        }
    }
}

fn parse_ids(raw: &str) -> HashSet<u32> {
    raw.split([',', ';', ' '])
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .collect()
}
