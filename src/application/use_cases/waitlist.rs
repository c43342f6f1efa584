use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{UpsertOutcome, WaitlistEntry, WaitlistStats},
};

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    async fn stats(&self) -> AppResult<WaitlistStats>;

    /// Inserts `entry`, or overwrites every mutable column of the existing
    /// row with the same `fid`.
    async fn upsert(&self, entry: &WaitlistEntry) -> AppResult<UpsertOutcome>;
}

/// Body of a `POST` join request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub fid: Value,
    #[serde(default = "empty_text")]
    pub username: Option<String>,
    #[serde(default = "empty_text")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub verified_account: Option<bool>,
    #[serde(default)]
    pub verified_channel: Option<bool>,
}

fn empty_text() -> Option<String> {
    Some(String::new())
}

impl JoinRequest {
    /// Parses a raw request body. An empty body reads as `{}`.
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        let body = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}".as_slice()
        } else {
            body
        };

        let value: Value =
            serde_json::from_slice(body).map_err(|e| AppError::MalformedBody(e.to_string()))?;
        if !value.is_object() {
            return Err(AppError::MalformedBody(
                "request body must be a JSON object".into(),
            ));
        }

        serde_json::from_value(value).map_err(|e| AppError::MalformedBody(e.to_string()))
    }

    pub fn into_entry(self) -> AppResult<WaitlistEntry> {
        let fid = parse_fid(&self.fid)?;
        Ok(WaitlistEntry {
            fid,
            username: self.username,
            display_name: self.display_name,
            verified_account: self.verified_account.unwrap_or(false),
            verified_channel: self.verified_channel.unwrap_or(false),
        })
    }
}

/// Reads a fid from its JSON form.
///
/// Falsy values (null, false, 0, "", [], {}) mean "missing". Integral
/// numbers and integer strings are accepted the way Postgres would cast
/// them, so `43.0` is 43 and the non-empty string `"0"` is fid 0.
pub fn parse_fid(raw: &Value) -> AppResult<i64> {
    match raw {
        Value::Null | Value::Bool(false) => Err(AppError::FidRequired),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(0), _) => Err(AppError::FidRequired),
            (Some(fid), _) => Ok(fid),
            (None, Some(f)) if f == 0.0 => Err(AppError::FidRequired),
            (None, Some(f))
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Ok(f as i64)
            }
            _ => Err(invalid_fid(raw)),
        },
        Value::String(s) if s.is_empty() => Err(AppError::FidRequired),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid_fid(raw)),
        Value::Array(items) if items.is_empty() => Err(AppError::FidRequired),
        Value::Object(fields) if fields.is_empty() => Err(AppError::FidRequired),
        _ => Err(invalid_fid(raw)),
    }
}

fn invalid_fid(raw: &Value) -> AppError {
    AppError::MalformedBody(format!("fid must be an integer, got {raw}"))
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Option<Arc<dyn WaitlistRepo>>,
}

impl WaitlistUseCases {
    /// `repo` is `None` when no database was configured at startup; every
    /// datastore operation then fails with `DatabaseNotConfigured`.
    pub fn new(repo: Option<Arc<dyn WaitlistRepo>>) -> Self {
        Self { repo }
    }

    fn repo(&self) -> AppResult<&Arc<dyn WaitlistRepo>> {
        self.repo.as_ref().ok_or(AppError::DatabaseNotConfigured)
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> AppResult<WaitlistStats> {
        let stats = self.repo()?.stats().await?;
        Ok(stats)
    }

    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn join(&self, body: &[u8]) -> AppResult<UpsertOutcome> {
        let repo = self.repo()?;
        let entry = JoinRequest::from_body(body)?.into_entry()?;

        let outcome = repo.upsert(&entry).await?;
        info!(
            fid = outcome.entry.fid,
            is_new = outcome.is_new,
            "Waitlist entry saved"
        );
        Ok(outcome)
    }
}
