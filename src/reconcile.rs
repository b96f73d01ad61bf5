use crate::api::Fixture;
use crate::status::{StatusBucket, classify};

/// Merge a live-score batch into the day's fixture collection.
///
/// Each incoming record either overwrites the record with the same `id`
/// (keeping its position) or, when unseen, is appended. An unseen record that
/// is already finished is dropped instead: a match that ended before we ever
/// saw it only belongs in the initial snapshot. Records absent from the batch
/// are left untouched, so the merge never shrinks the collection.
///
/// Re-applying a batch is a no-op: every id is found on the second pass and
/// replaced with an identical record.
pub fn merge_live_batch(existing: Vec<Fixture>, batch: Vec<Fixture>) -> Vec<Fixture> {
    let mut merged = existing;
    for incoming in batch {
        if let Some(slot) = merged.iter_mut().find(|f| f.id == incoming.id) {
            *slot = incoming;
        } else if classify(&incoming.status) != StatusBucket::Finished {
            merged.push(incoming);
        }
    }
    merged
}
