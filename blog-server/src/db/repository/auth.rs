//! Auth account Repository
//!
//! Stores login accounts for the token endpoint. Passwords are argon2 PHC hashes.

use super::RepoResult;
use sqlx::SqlitePool;

/// Stored password hash for a username
pub async fn find_password_hash(pool: &SqlitePool, username: &str) -> RepoResult<Option<String>> {
    let hash = sqlx::query_scalar::<_, String>("SELECT password FROM blog_auth WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(hash)
}

/// Insert the account or replace its password hash
pub async fn upsert(pool: &SqlitePool, username: &str, password_hash: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO blog_auth (username, password) VALUES (?, ?) \
         ON CONFLICT(username) DO UPDATE SET password = excluded.password",
    )
    .bind(username)
    .bind(password_hash)
    .execute(pool)
    .await?;
    Ok(())
}
