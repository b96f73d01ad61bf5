use std::env;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::http_client::http_client;

/// One match record as the collector API returns it. Updates on the live
/// stream replace the whole record at the same `id`, never single fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u32,
    pub league_id: u32,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub date_utc: Option<String>,
    pub status: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub goals_home: Option<u8>,
    #[serde(default)]
    pub goals_away: Option<u8>,
    #[serde(default)]
    pub updated_at_utc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMetrics {
    pub results: ResultsSummary,
    pub goals: GoalsSummary,
    pub match_stats_avg: MatchStatsAvg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalsSummary {
    #[serde(rename = "for")]
    pub scored: u32,
    #[serde(rename = "against")]
    pub conceded: u32,
    pub clean_sheets: u32,
    pub failed_to_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatsAvg {
    #[serde(default)]
    pub possession: Option<f64>,
    #[serde(default)]
    pub shots_on_goal: Option<f64>,
    #[serde(default)]
    pub corners: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: u32,
    pub team_id: u32,
    pub team_name: String,
    pub points: i32,
    pub goals_diff: i32,
    pub played: u32,
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

pub fn api_base() -> Option<String> {
    let raw = env::var("APP_API_BASE").ok()?;
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn fixtures_date() -> String {
    if let Ok(raw) = env::var("APP_FIXTURES_DATE") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

pub fn fixtures_limit() -> u32 {
    env::var("APP_FIXTURES_LIMIT")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(200)
        .clamp(1, 500)
}

pub fn season() -> u32 {
    env::var("APP_SEASON")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or_else(|| Utc::now().year() as u32)
}

pub fn metrics_last_n() -> u32 {
    env::var("APP_METRICS_LAST_N")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(20)
        .clamp(1, 50)
}

pub fn fetch_fixtures(base: &str, date: &str, limit: u32) -> Result<Vec<Fixture>> {
    let url = format!("{base}/v1/fixtures?date={date}&limit={limit}");
    let body = fetch_text(&url).context("fixtures request failed")?;
    parse_fixtures_json(&body)
}

pub fn fetch_team_metrics(base: &str, team_id: u32, last_n: u32) -> Result<TeamMetrics> {
    let url = format!("{base}/v1/teams/{team_id}/metrics?last_n={last_n}");
    let body = fetch_text(&url).context("team metrics request failed")?;
    parse_team_metrics_json(&body)
}

pub fn fetch_standings(base: &str, league_id: u32, season: u32) -> Result<Vec<Standing>> {
    let url = format!("{base}/v1/standings/{league_id}/{season}");
    let body = fetch_text(&url).context("standings request failed")?;
    parse_standings_json(&body)
}

fn fetch_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    Ok(body)
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid fixtures json")
}

/// Payload of one live-stream event: same shape as the fixtures list.
pub fn parse_live_batch_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid live batch json")
}

pub fn parse_team_metrics_json(raw: &str) -> Result<TeamMetrics> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty team metrics response"));
    }
    serde_json::from_str(trimmed).context("invalid team metrics json")
}

pub fn parse_standings_json(raw: &str) -> Result<Vec<Standing>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid standings json")
}
