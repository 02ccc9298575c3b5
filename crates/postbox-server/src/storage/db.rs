//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use postbox_core::crypto::{hash_password, verify_password};
use postbox_core::ports::CredentialStore;
use postbox_core::{Post, PostboxError, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
        }
    }
}

fn db_error(e: sqlx::Error) -> PostboxError {
    PostboxError::Database(e.to_string())
}

/// Run argon2 work on tokio's blocking pool.
async fn run_hashing<T, F>(f: F) -> postbox_core::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PostboxError::PasswordHash(e.to_string()))
}

impl Database {
    pub async fn new(database_path: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Private in-memory database. A single connection is kept alive for the
    /// lifetime of the pool since every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Users table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Posts table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                owner_id INTEGER NOT NULL REFERENCES users(id),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_owner ON posts(owner_id)")
            .execute(pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for Database {
    async fn create_user(&self, email: &str, password: &str) -> postbox_core::Result<User> {
        let password = password.to_string();
        let password_hash = run_hashing(move || hash_password(&password)).await??;

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES (?1, ?2)
            "#,
        )
        .bind(email)
        .bind(&password_hash)
        .execute(&*self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                PostboxError::DuplicateEmail
            }
            other => db_error(other),
        })?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
        })
    }

    async fn authenticate(&self, email: &str, password: &str) -> postbox_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash FROM users WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let password = password.to_string();
        let stored_hash = row.password_hash.clone();
        let matches = run_hashing(move || verify_password(&password, &stored_hash)).await?;

        Ok(matches.then(|| User::from(row)))
    }

    async fn find_user_by_id(&self, id: i64) -> postbox_core::Result<Option<User>> {
        let row: Option<(i64, String)> = sqlx::query_as(
            r#"
            SELECT id, email FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|(id, email)| User { id, email }))
    }

    async fn create_post(&self, owner_id: i64, text: &str) -> postbox_core::Result<Post> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (text, owner_id)
            VALUES (?1, ?2)
            "#,
        )
        .bind(text)
        .bind(owner_id)
        .execute(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(Post {
            id: result.last_insert_rowid(),
            text: text.to_string(),
            owner_id,
        })
    }

    async fn list_posts(&self, owner_id: i64) -> postbox_core::Result<Vec<Post>> {
        let rows: Vec<(i64, String, i64)> = sqlx::query_as(
            r#"
            SELECT id, text, owner_id FROM posts
            WHERE owner_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, text, owner_id)| Post { id, text, owner_id })
            .collect())
    }

    async fn delete_post(&self, id: i64, owner_id: i64) -> postbox_core::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&*self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
