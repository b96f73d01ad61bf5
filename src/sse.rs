use std::io::{BufRead, BufReader};
use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;

use crate::api;
use crate::http_client::stream_client;
use crate::state::Delta;

/// Incremental `text/event-stream` decoder. Feed it one line at a time
/// (without the trailing newline); it returns the joined data payload once a
/// blank line closes an event. Comment lines and non-data fields (`event:`,
/// `id:`, `retry:`) carry nothing we consume and are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    data: Vec<String>,
}

impl SseDecoder {
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            if self.data.is_empty() {
                return None;
            }
            let payload = self.data.join("\n");
            self.data.clear();
            return Some(payload);
        }
        if line.starts_with(':') {
            return None;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            self.data.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
        }
        None
    }
}

/// Blocking body of the live-score subscription thread. Reads the stream line
/// by line, decodes complete events and forwards each batch in arrival order.
/// A payload that fails to parse is logged and skipped; the stream stays open.
/// Returns when the server closes the stream or the receiver is gone; a
/// closed channel means the owning view is down, so nothing is sent after it.
pub fn run_live_stream(
    base: &str,
    interval_secs: u64,
    limit: u32,
    tx: &Sender<Delta>,
) -> Result<()> {
    let client = stream_client()?;
    let url = format!("{base}/v1/sse/live-scores?interval_seconds={interval_secs}&limit={limit}");
    let resp = client
        .get(&url)
        .header(ACCEPT, "text/event-stream")
        .send()
        .context("live stream request failed")?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow::anyhow!("live stream http {status}"));
    }

    let mut reader = BufReader::new(resp);
    let mut decoder = SseDecoder::default();
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader.read_line(&mut line).context("live stream read failed")?;
        if read == 0 {
            return Ok(());
        }
        let Some(payload) = decoder.push_line(line.trim_end_matches('\n')) else {
            continue;
        };
        match api::parse_live_batch_json(&payload) {
            Ok(batch) => {
                if batch.is_empty() {
                    continue;
                }
                if tx.send(Delta::LiveBatch(batch)).is_err() {
                    return Ok(());
                }
            }
            Err(err) => {
                if tx
                    .send(Delta::Log(format!("[WARN] Live payload dropped: {err}")))
                    .is_err()
                {
                    return Ok(());
                }
            }
        }
    }
}

pub fn stream_interval_secs() -> u64 {
    std::env::var("APP_SSE_INTERVAL_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(3)
        .clamp(1, 60)
}

pub fn stream_limit() -> u32 {
    std::env::var("APP_SSE_LIMIT")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(300)
        .clamp(1, 500)
}
