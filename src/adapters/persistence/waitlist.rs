use async_trait::async_trait;
use sqlx::{FromRow, PgConnection};

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    domain::entities::waitlist_entry::{UpsertOutcome, WaitlistEntry, WaitlistStats},
    infra::db::{close_connection, open_connection},
    use_cases::waitlist::WaitlistRepo,
};

// Row as stored in the db. `fid` is cast to BIGINT in every select list so
// the column may be declared INTEGER or BIGINT.
#[derive(FromRow, Debug)]
struct DbWaitlistEntry {
    fid: i64,
    username: Option<String>,
    display_name: Option<String>,
    verified_account: Option<bool>,
    verified_channel: Option<bool>,
}

impl From<DbWaitlistEntry> for WaitlistEntry {
    fn from(db: DbWaitlistEntry) -> Self {
        WaitlistEntry {
            fid: db.fid,
            username: db.username,
            display_name: db.display_name,
            verified_account: db.verified_account.unwrap_or(false),
            verified_channel: db.verified_channel.unwrap_or(false),
        }
    }
}

// Both counts come from one statement so they share a snapshot.
async fn count_entries(conn: &mut PgConnection) -> AppResult<WaitlistStats> {
    let (total, verified) = sqlx::query_as::<_, (i64, i64)>(
        r#"SELECT COUNT(*),
                  COUNT(*) FILTER (WHERE verified_account AND verified_channel)
           FROM waitlist"#,
    )
    .fetch_one(&mut *conn)
    .await?;

    Ok(WaitlistStats { total, verified })
}

// Existence check and write are separate statements: two concurrent upserts
// for the same fid can race into a duplicate-key error or a lost update.
async fn upsert_entry(conn: &mut PgConnection, entry: &WaitlistEntry) -> AppResult<UpsertOutcome> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM waitlist WHERE fid = $1)",
    )
    .bind(entry.fid)
    .fetch_one(&mut *conn)
    .await?;

    let query = if exists {
        sqlx::query_as::<_, DbWaitlistEntry>(
            r#"UPDATE waitlist
               SET username = $2, display_name = $3,
                   verified_account = $4, verified_channel = $5
               WHERE fid = $1
               RETURNING fid::BIGINT AS fid, username, display_name, verified_account, verified_channel"#,
        )
    } else {
        sqlx::query_as::<_, DbWaitlistEntry>(
            r#"INSERT INTO waitlist (fid, username, display_name, verified_account, verified_channel)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING fid::BIGINT AS fid, username, display_name, verified_account, verified_channel"#,
        )
    };

    let rec = query
        .bind(entry.fid)
        .bind(entry.username.as_deref())
        .bind(entry.display_name.as_deref())
        .bind(entry.verified_account)
        .bind(entry.verified_channel)
        .fetch_one(&mut *conn)
        .await?;

    Ok(UpsertOutcome {
        entry: rec.into(),
        is_new: !exists,
    })
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn stats(&self) -> AppResult<WaitlistStats> {
        let mut conn = open_connection(&self.database_url).await?;
        let stats = count_entries(&mut conn).await;
        close_connection(conn).await;
        stats
    }

    async fn upsert(&self, entry: &WaitlistEntry) -> AppResult<UpsertOutcome> {
        let mut conn = open_connection(&self.database_url).await?;
        let outcome = upsert_entry(&mut conn, entry).await;
        close_connection(conn).await;
        outcome
    }
}
