use serde::Serialize;

/// One participant on the waitlist, keyed by Farcaster ID.
///
/// `username` and `display_name` are `None` only when a client explicitly
/// sent `null`; omitted fields are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistEntry {
    pub fid: i64,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub verified_account: bool,
    pub verified_channel: bool,
}

/// Aggregate counts reported by `GET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WaitlistStats {
    pub total: i64,
    pub verified: i64,
}

/// Result of an insert-or-update keyed by `fid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub entry: WaitlistEntry,
    pub is_new: bool,
}
