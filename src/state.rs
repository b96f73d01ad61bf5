use std::collections::VecDeque;

use crate::api::{Fixture, Standing, TeamMetrics};
use crate::leagues::TrackedLeagues;
use crate::prefs::PrefStore;
use crate::reconcile::merge_live_batch;
use crate::status::{StatusBucket, classify};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Fixtures,
    Standings { league_id: u32 },
    TeamMetrics { team_id: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BucketCounts {
    pub live: usize,
    pub upcoming: usize,
    pub finished: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub status_tab: StatusBucket,
    pub selected: usize,
    pub fixtures: Vec<Fixture>,
    pub fixtures_loaded: bool,
    pub fixtures_error: Option<String>,
    pub fixtures_date: String,
    pub tracked: TrackedLeagues,
    pub league_overlay: bool,
    pub league_cursor: usize,
    pub standings: Vec<Standing>,
    pub standings_league: Option<u32>,
    pub standings_season: u32,
    pub standings_loading: bool,
    pub standings_selected: usize,
    pub metrics: Option<TeamMetrics>,
    pub metrics_team_id: Option<u32>,
    pub metrics_team_name: Option<String>,
    pub metrics_loading: bool,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Fixtures,
            status_tab: StatusBucket::Upcoming,
            selected: 0,
            fixtures: Vec::with_capacity(64),
            fixtures_loaded: false,
            fixtures_error: None,
            fixtures_date: crate::api::fixtures_date(),
            tracked: TrackedLeagues::default_set(),
            league_overlay: false,
            league_cursor: 0,
            standings: Vec::new(),
            standings_league: None,
            standings_season: crate::api::season(),
            standings_loading: false,
            standings_selected: 0,
            metrics: None,
            metrics_team_id: None,
            metrics_team_name: None,
            metrics_loading: false,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    /// Fixtures surviving the tracked-league filter, in store order.
    /// Recomputed on every read; never cached.
    pub fn filtered_fixtures(&self) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| self.tracked.contains(f.league_id))
            .collect()
    }

    /// Filtered fixtures belonging to the active status tab.
    pub fn tab_fixtures(&self) -> Vec<&Fixture> {
        self.filtered_fixtures()
            .into_iter()
            .filter(|f| classify(&f.status) == self.status_tab)
            .collect()
    }

    pub fn bucket_counts(&self) -> BucketCounts {
        let mut counts = BucketCounts::default();
        for fixture in self.filtered_fixtures() {
            match classify(&fixture.status) {
                StatusBucket::Live => counts.live += 1,
                StatusBucket::Upcoming => counts.upcoming += 1,
                StatusBucket::Finished => counts.finished += 1,
            }
        }
        counts
    }

    pub fn selected_fixture(&self) -> Option<&Fixture> {
        self.tab_fixtures().into_iter().nth(self.selected)
    }

    pub fn selected_standing(&self) -> Option<&Standing> {
        self.standings.get(self.standings_selected)
    }

    pub fn cycle_status_tab(&mut self) {
        self.status_tab = match self.status_tab {
            StatusBucket::Live => StatusBucket::Upcoming,
            StatusBucket::Upcoming => StatusBucket::Finished,
            StatusBucket::Finished => StatusBucket::Live,
        };
        self.selected = 0;
    }

    pub fn set_status_tab(&mut self, tab: StatusBucket) {
        if self.status_tab != tab {
            self.status_tab = tab;
            self.selected = 0;
        }
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Fixtures if self.league_overlay => {
                let last = crate::leagues::KNOWN_LEAGUES.len().saturating_sub(1);
                if self.league_cursor < last {
                    self.league_cursor += 1;
                }
            }
            Screen::Fixtures => {
                let len = self.tab_fixtures().len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            Screen::Standings { .. } => {
                let len = self.standings.len();
                if len > 0 && self.standings_selected + 1 < len {
                    self.standings_selected += 1;
                }
            }
            Screen::TeamMetrics { .. } => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Fixtures if self.league_overlay => {
                self.league_cursor = self.league_cursor.saturating_sub(1);
            }
            Screen::Fixtures => {
                self.selected = self.selected.saturating_sub(1);
            }
            Screen::Standings { .. } => {
                self.standings_selected = self.standings_selected.saturating_sub(1);
            }
            Screen::TeamMetrics { .. } => {}
        }
    }

    pub fn toggle_league_overlay(&mut self) {
        self.league_overlay = !self.league_overlay;
        if self.league_overlay {
            self.league_cursor = 0;
        }
    }

    pub fn toggle_league_at_cursor(&mut self, store: &dyn PrefStore) {
        let Some((id, name)) = crate::leagues::KNOWN_LEAGUES.get(self.league_cursor).copied()
        else {
            return;
        };
        self.tracked.toggle(id, store);
        let verb = if self.tracked.contains(id) {
            "tracked"
        } else {
            "untracked"
        };
        self.selected = 0;
        self.push_log(format!("[INFO] League {verb}: {name}"));
    }

    pub fn toggle_all_leagues(&mut self, store: &dyn PrefStore) {
        self.tracked.toggle_all(store);
        self.selected = 0;
        self.push_log(format!("[INFO] Tracked leagues: {}", self.tracked.len()));
    }

    pub fn open_standings(&mut self, league_id: u32) {
        if self.standings_league != Some(league_id) {
            self.standings.clear();
            self.standings_selected = 0;
        }
        self.standings_league = Some(league_id);
        self.standings_loading = true;
        self.screen = Screen::Standings { league_id };
    }

    pub fn open_metrics(&mut self, team_id: u32, team_name: &str) {
        if self.metrics_team_id != Some(team_id) {
            self.metrics = None;
        }
        self.metrics_team_id = Some(team_id);
        self.metrics_team_name = Some(team_name.to_string());
        self.metrics_loading = true;
        self.screen = Screen::TeamMetrics { team_id };
    }

    /// Esc/back: metrics returns to its standings table when one is loaded,
    /// everything else lands on the fixtures list.
    pub fn go_back(&mut self) {
        self.screen = match self.screen {
            Screen::TeamMetrics { .. } => match self.standings_league {
                Some(league_id) => Screen::Standings { league_id },
                None => Screen::Fixtures,
            },
            _ => Screen::Fixtures,
        };
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.tab_fixtures().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Messages from the provider thread; drained and applied on the UI thread,
/// one at a time, in arrival order.
#[derive(Debug, Clone)]
pub enum Delta {
    SetFixtures(Vec<Fixture>),
    FixturesError(String),
    LiveBatch(Vec<Fixture>),
    SetStandings {
        league_id: u32,
        season: u32,
        rows: Vec<Standing>,
    },
    StandingsError(String),
    SetTeamMetrics {
        team_id: u32,
        metrics: TeamMetrics,
    },
    MetricsError(String),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    RefreshFixtures,
    FetchStandings {
        league_id: u32,
        season: u32,
    },
    FetchTeamMetrics {
        team_id: u32,
        team_name: String,
    },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetFixtures(fixtures) => {
            state.fixtures = fixtures;
            state.fixtures_loaded = true;
            state.fixtures_error = None;
            state.clamp_selection();
        }
        Delta::FixturesError(message) => {
            state.fixtures_loaded = true;
            state.fixtures_error = Some(message);
        }
        Delta::LiveBatch(batch) => {
            state.fixtures = merge_live_batch(std::mem::take(&mut state.fixtures), batch);
            state.clamp_selection();
        }
        Delta::SetStandings {
            league_id,
            season,
            rows,
        } => {
            // A late result for a league the user already left is stale.
            if state.standings_league == Some(league_id) {
                state.standings = rows;
                state.standings_season = season;
                state.standings_loading = false;
                state.standings_selected = 0;
            }
        }
        Delta::StandingsError(message) => {
            state.standings_loading = false;
            state.push_log(format!("[WARN] Standings: {message}"));
        }
        Delta::SetTeamMetrics { team_id, metrics } => {
            if state.metrics_team_id == Some(team_id) {
                state.metrics = Some(metrics);
                state.metrics_loading = false;
            }
        }
        Delta::MetricsError(message) => {
            state.metrics_loading = false;
            state.push_log(format!("[WARN] Team metrics: {message}"));
        }
        Delta::Log(message) => state.push_log(message),
    }
}
