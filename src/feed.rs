use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::api;
use crate::sse;
use crate::state::{Delta, ProviderCommand};

/// Background provider over the real collector API: seeds the store with the
/// day's fixtures, keeps one SSE subscription open for live scores, then
/// serves on-demand fetches until every command sender is dropped.
pub fn spawn_provider(base: String, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let date = api::fixtures_date();
        let limit = api::fixtures_limit();

        match api::fetch_fixtures(&base, &date, limit) {
            Ok(fixtures) => {
                let _ = tx.send(Delta::Log(format!(
                    "[INFO] Loaded {} fixtures for {date}",
                    fixtures.len()
                )));
                let _ = tx.send(Delta::SetFixtures(fixtures));
            }
            Err(err) => {
                // Surfaced in the UI; the store stays empty and there is no
                // automatic retry. A manual refresh can still recover.
                let _ = tx.send(Delta::FixturesError(format!("{err:#}")));
            }
        }

        {
            let tx = tx.clone();
            let base = base.clone();
            let interval = sse::stream_interval_secs();
            let stream_limit = sse::stream_limit();
            thread::spawn(move || {
                match sse::run_live_stream(&base, interval, stream_limit, &tx) {
                    Ok(()) => {
                        let _ = tx.send(Delta::Log("[INFO] Live stream closed".to_string()));
                    }
                    Err(err) => {
                        let _ = tx.send(Delta::Log(format!("[WARN] Live stream: {err:#}")));
                    }
                }
            });
        }

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::RefreshFixtures => {
                    match api::fetch_fixtures(&base, &date, limit) {
                        Ok(fixtures) => {
                            let _ = tx.send(Delta::Log(format!(
                                "[INFO] Refreshed {} fixtures",
                                fixtures.len()
                            )));
                            let _ = tx.send(Delta::SetFixtures(fixtures));
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!("[WARN] Refresh failed: {err:#}")));
                        }
                    }
                }
                ProviderCommand::FetchStandings { league_id, season } => {
                    match api::fetch_standings(&base, league_id, season) {
                        Ok(rows) => {
                            let _ = tx.send(Delta::SetStandings {
                                league_id,
                                season,
                                rows,
                            });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::StandingsError(format!("{err:#}")));
                        }
                    }
                }
                ProviderCommand::FetchTeamMetrics { team_id, team_name } => {
                    match api::fetch_team_metrics(&base, team_id, api::metrics_last_n()) {
                        Ok(metrics) => {
                            let _ = tx.send(Delta::SetTeamMetrics { team_id, metrics });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::MetricsError(format!("{team_name}: {err:#}")));
                        }
                    }
                }
            }
        }
    });
}
