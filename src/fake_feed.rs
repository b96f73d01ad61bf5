use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use chrono::{Datelike, Utc};
use rand::Rng;

use crate::api::{Fixture, GoalsSummary, MatchStatsAvg, ResultsSummary, Standing, TeamMetrics};
use crate::state::{Delta, ProviderCommand};
use crate::status::{StatusBucket, classify};

/// Simulated provider used when no API base is configured: seeds a plausible
/// match day and replays it through the same deltas the real feed sends, so
/// the whole merge/filter path runs without the remote collaborator.
pub fn spawn_fake_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let mut fixtures = seed_fixtures();
        let mut next_id: u32 = 9000;

        let _ = tx.send(Delta::Log(
            "[INFO] No APP_API_BASE set, using simulated feed".to_string(),
        ));
        let _ = tx.send(Delta::SetFixtures(fixtures.clone()));

        loop {
            thread::sleep(Duration::from_millis(900));

            while let Ok(cmd) = cmd_rx.try_recv() {
                match cmd {
                    ProviderCommand::RefreshFixtures => {
                        let _ = tx.send(Delta::SetFixtures(fixtures.clone()));
                    }
                    ProviderCommand::FetchStandings { league_id, season } => {
                        let _ = tx.send(Delta::SetStandings {
                            league_id,
                            season,
                            rows: seed_standings(league_id),
                        });
                    }
                    ProviderCommand::FetchTeamMetrics { team_id, .. } => {
                        let _ = tx.send(Delta::SetTeamMetrics {
                            team_id,
                            metrics: seed_metrics(&mut rng),
                        });
                    }
                }
            }

            if rng.gen_bool(0.08) {
                // A finished match the store never saw; the merge drops it.
                let finished = Fixture {
                    id: next_id,
                    status: "FT".to_string(),
                    goals_home: Some(rng.gen_range(0..4)),
                    goals_away: Some(rng.gen_range(0..4)),
                    ..template_fixture(39, "Everton", "Fulham")
                };
                next_id += 1;
                if tx.send(Delta::LiveBatch(vec![finished])).is_err() {
                    return;
                }
                continue;
            }

            if rng.gen_bool(0.05) {
                let fresh = Fixture {
                    id: next_id,
                    status: "1H".to_string(),
                    goals_home: Some(0),
                    goals_away: Some(0),
                    ..template_fixture(135, "Torino", "Genoa")
                };
                next_id += 1;
                fixtures.push(fresh.clone());
                if tx.send(Delta::LiveBatch(vec![fresh])).is_err() {
                    return;
                }
                continue;
            }

            let idx = rng.gen_range(0..fixtures.len());
            let fixture = &mut fixtures[idx];
            advance_fixture(fixture, &mut rng, &tx);
            if tx.send(Delta::LiveBatch(vec![fixture.clone()])).is_err() {
                return;
            }
        }
    });
}

fn advance_fixture(fixture: &mut Fixture, rng: &mut impl Rng, tx: &Sender<Delta>) {
    match classify(&fixture.status) {
        StatusBucket::Upcoming => {
            if rng.gen_bool(0.25) {
                fixture.status = "1H".to_string();
                fixture.goals_home = Some(0);
                fixture.goals_away = Some(0);
            }
        }
        StatusBucket::Live => {
            if rng.gen_bool(0.18) {
                fixture.status = match fixture.status.as_str() {
                    "1H" => "HT".to_string(),
                    "HT" => "2H".to_string(),
                    _ => "FT".to_string(),
                };
            } else if rng.gen_bool(0.15) {
                let (team, goals) = if rng.gen_bool(0.5) {
                    (fixture.home_team.clone(), &mut fixture.goals_home)
                } else {
                    (fixture.away_team.clone(), &mut fixture.goals_away)
                };
                *goals = Some(goals.unwrap_or(0).saturating_add(1));
                let _ = tx.send(Delta::Log(format!(
                    "[ALERT] Goal: {team} ({}-{})",
                    fixture.goals_home.unwrap_or(0),
                    fixture.goals_away.unwrap_or(0)
                )));
            }
        }
        StatusBucket::Finished => {}
    }
    fixture.updated_at_utc = Some(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());
}

fn template_fixture(league_id: u32, home: &str, away: &str) -> Fixture {
    Fixture {
        id: 0,
        league_id,
        season: Some(Utc::now().year() as u32),
        date_utc: Some(format!(
            "{}T18:00:00Z",
            Utc::now().date_naive().format("%Y-%m-%d")
        )),
        status: "NS".to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        goals_home: None,
        goals_away: None,
        updated_at_utc: None,
    }
}

fn seed_fixtures() -> Vec<Fixture> {
    let seeds: &[(u32, u32, &str, &str, &str, Option<u8>, Option<u8>)] = &[
        (101, 203, "1H", "Galatasaray", "Fenerbahce", Some(1), Some(0)),
        (102, 203, "NS", "Besiktas", "Trabzonspor", None, None),
        (103, 39, "2H", "Arsenal", "Chelsea", Some(2), Some(2)),
        (104, 39, "NS", "Liverpool", "Man City", None, None),
        (105, 140, "HT", "Real Madrid", "Barcelona", Some(0), Some(1)),
        (106, 78, "FT", "Bayern", "Dortmund", Some(3), Some(1)),
        (107, 135, "NS", "Inter", "Juventus", None, None),
        (108, 61, "FT", "PSG", "Marseille", Some(2), Some(0)),
        (109, 2, "NS", "Atletico", "Porto", None, None),
    ];

    seeds
        .iter()
        .map(|&(id, league_id, status, home, away, gh, ga)| Fixture {
            id,
            status: status.to_string(),
            goals_home: gh,
            goals_away: ga,
            ..template_fixture(league_id, home, away)
        })
        .collect()
}

fn seed_standings(league_id: u32) -> Vec<Standing> {
    let teams: &[&str] = match league_id {
        203 => &["Galatasaray", "Fenerbahce", "Besiktas", "Trabzonspor", "Basaksehir"],
        39 => &["Arsenal", "Liverpool", "Man City", "Chelsea", "Tottenham"],
        140 => &["Real Madrid", "Barcelona", "Atletico", "Sevilla", "Valencia"],
        78 => &["Bayern", "Dortmund", "Leipzig", "Leverkusen", "Frankfurt"],
        135 => &["Inter", "Juventus", "Milan", "Napoli", "Roma"],
        61 => &["PSG", "Marseille", "Monaco", "Lyon", "Lille"],
        _ => &["Atletico", "Porto", "Ajax", "Benfica", "Celtic"],
    };

    teams
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let rank = i as u32 + 1;
            let played = 20;
            let win = 14 - 2 * rank.min(6);
            let draw = 4;
            let loss = played - win - draw;
            Standing {
                rank,
                team_id: league_id * 100 + rank,
                team_name: name.to_string(),
                points: (win * 3 + draw) as i32,
                goals_diff: 20 - 7 * rank as i32,
                played,
                win,
                draw,
                loss,
            }
        })
        .collect()
}

fn seed_metrics(rng: &mut impl Rng) -> TeamMetrics {
    let win = rng.gen_range(6..14);
    let draw = rng.gen_range(2..6);
    let loss = 20 - win - draw;
    TeamMetrics {
        results: ResultsSummary {
            win,
            draw,
            loss,
            win_rate: f64::from(win) / 20.0,
        },
        goals: GoalsSummary {
            scored: rng.gen_range(18..40),
            conceded: rng.gen_range(10..30),
            clean_sheets: rng.gen_range(2..9),
            failed_to_score: rng.gen_range(1..5),
        },
        match_stats_avg: MatchStatsAvg {
            possession: Some(rng.gen_range(40.0..62.0)),
            shots_on_goal: Some(rng.gen_range(3.0..7.5)),
            corners: Some(rng.gen_range(3.5..7.0)),
        },
    }
}
