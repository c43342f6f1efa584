//! Test data factories.
//!
//! Use the closure parameter to override specific fields as needed.

use crate::domain::entities::waitlist_entry::WaitlistEntry;

/// Create a test waitlist entry with sensible defaults (unverified).
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = WaitlistEntry {
        fid: 1,
        username: Some("test-user".to_string()),
        display_name: Some("Test User".to_string()),
        verified_account: false,
        verified_channel: false,
    };
    overrides(&mut entry);
    entry
}
