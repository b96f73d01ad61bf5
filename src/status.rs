use serde::{Deserialize, Serialize};

/// In-play codes as the collector API reports them. Exact match only.
pub const LIVE_STATUSES: &[&str] = &["1H", "HT", "2H", "ET", "BT", "P", "LIVE", "SUSP", "INT"];

/// Terminal codes: full-time, decided after extra time or penalties,
/// awarded, walkover, abandoned, cancelled.
pub const FINISHED_STATUSES: &[&str] = &["FT", "AET", "PEN", "AWD", "WO", "ABD", "CANC"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusBucket {
    Live,
    Upcoming,
    Finished,
}

/// Total over any status string; codes outside both sets (including unknown
/// ones the API may grow) fall back to `Upcoming`.
pub fn classify(status: &str) -> StatusBucket {
    if LIVE_STATUSES.contains(&status) {
        StatusBucket::Live
    } else if FINISHED_STATUSES.contains(&status) {
        StatusBucket::Finished
    } else {
        StatusBucket::Upcoming
    }
}

pub fn bucket_label(bucket: StatusBucket) -> &'static str {
    match bucket {
        StatusBucket::Live => "LIVE",
        StatusBucket::Upcoming => "UPCOMING",
        StatusBucket::Finished => "FINISHED",
    }
}
