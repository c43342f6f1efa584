//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates a minimal `AppState` backed by in-memory
//! mocks, or by no database at all.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::config::{AppConfig, ErrorDisclosure},
    test_utils::{FailingWaitlistRepo, InMemoryWaitlistRepo},
};

enum TestDatabase {
    InMemory,
    Failing(String),
    Missing,
}

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new()
///     .with_entry(create_test_entry(|e| e.fid = 42))
///     .build_with_repo();
/// ```
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    database: TestDatabase,
    error_disclosure: ErrorDisclosure,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            database: TestDatabase::InMemory,
            error_disclosure: ErrorDisclosure::Expose,
        }
    }

    /// Seed an entry into the in-memory repo.
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Simulate a process started without `DATABASE_URL`.
    pub fn without_database(mut self) -> Self {
        self.database = TestDatabase::Missing;
        self
    }

    /// Every repo operation fails with `AppError::Database(message)`.
    pub fn with_failing_database(mut self, message: &str) -> Self {
        self.database = TestDatabase::Failing(message.to_string());
        self
    }

    pub fn with_error_disclosure(mut self, error_disclosure: ErrorDisclosure) -> Self {
        self.error_disclosure = error_disclosure;
        self
    }

    pub fn build(self) -> AppState {
        let repo: Option<Arc<dyn WaitlistRepo>> = match &self.database {
            TestDatabase::InMemory => Some(Arc::new(InMemoryWaitlistRepo::with_entries(
                self.entries.clone(),
            ))),
            TestDatabase::Failing(message) => Some(Arc::new(FailingWaitlistRepo::new(message))),
            TestDatabase::Missing => None,
        };
        self.assemble(repo)
    }

    /// Build with an in-memory repo and return it for assertions.
    pub fn build_with_repo(self) -> (AppState, Arc<InMemoryWaitlistRepo>) {
        let repo = Arc::new(InMemoryWaitlistRepo::with_entries(self.entries.clone()));
        let app_state = self.assemble(Some(repo.clone() as Arc<dyn WaitlistRepo>));
        (app_state, repo)
    }

    fn assemble(self, repo: Option<Arc<dyn WaitlistRepo>>) -> AppState {
        let config = AppConfig {
            database_url: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            error_disclosure: self.error_disclosure,
        };

        AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(WaitlistUseCases::new(repo)),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
