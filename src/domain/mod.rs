use std::collections::BTreeSet;

/// Video ids seen in one poll of a channel feed.
pub type Snapshot = BTreeSet<String>;

/// Videos in `current` that were not in `baseline`.
///
/// Videos that disappeared since `baseline` do not count.
pub fn new_videos(current: &Snapshot, baseline: &Snapshot) -> Snapshot {
    current.difference(baseline).cloned().collect()
}
