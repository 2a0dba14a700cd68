//! Schema bootstrap for the messages table
//!
//! Idempotent: safe to run on every startup.

use sqlx::PgPool;

/// Create the messages table and its listing index if missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running message board migrations...");

    // clock_timestamp() rather than NOW() so rows inserted in one
    // transaction still get distinct, increasing timestamps.
    // The CHECKs must never be stricter than MessageBody / Username, which
    // own the whitespace rules; they only guard against empty strings.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id BIGSERIAL PRIMARY KEY,
            body TEXT NOT NULL CHECK (body <> ''),
            username TEXT NOT NULL CHECK (username <> ''),
            created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at, id)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
