use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{Identity, User},
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  external_id: String,
  email: String,
  reminder_enabled: bool,
  reminder_time: NaiveTime,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      external_id: row.external_id,
      email: row.email,
      reminder_enabled: row.reminder_enabled,
      reminder_time: row.reminder_time,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn upsert_identity(&self, identity: &Identity) -> Result<User, AuthError> {
    let user = User::new(identity.clone());

    // Concurrent first requests for one subject converge on a single row
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (
                id,
                external_id,
                email,
                reminder_enabled,
                reminder_time,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (external_id) DO UPDATE
            SET
                email = EXCLUDED.email,
                updated_at = CASE
                    WHEN users.email <> EXCLUDED.email THEN EXCLUDED.updated_at
                    ELSE users.updated_at
                END
            RETURNING
                id,
                external_id,
                email,
                reminder_enabled,
                reminder_time,
                created_at,
                updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.external_id)
    .bind(&user.email)
    .bind(user.reminder_enabled)
    .bind(user.reminder_time)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT
                id,
                external_id,
                email,
                reminder_enabled,
                reminder_time,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(Some(row)) => Ok(Some(row.into())),
      Ok(None) => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            UPDATE users
            SET
                email = $2,
                reminder_enabled = $3,
                reminder_time = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING
                id,
                external_id,
                email,
                reminder_enabled,
                reminder_time,
                created_at,
                updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(user.reminder_enabled)
    .bind(user.reminder_time)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::RowNotFound) => Err(AuthError::Repository(RepositoryError::NotFound)),
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::domain::auth::ReminderPreferences;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  pub(crate) async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    // Start a PostgreSQL container; NULLS NOT DISTINCT needs 15+
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    // Build connection string
    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    // Connect to the database
    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    // Run migrations
    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  pub(crate) fn identity(external_id: &str, email: &str) -> Identity {
    Identity {
      external_id: external_id.to_string(),
      email: email.to_string(),
    }
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_upsert_creates_user_with_defaults() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = repo
      .upsert_identity(&identity("user_new", "new@example.com"))
      .await
      .unwrap();

    assert_eq!(user.external_id, "user_new");
    assert_eq!(user.email, "new@example.com");
    assert!(!user.reminder_enabled);
    assert_eq!(user.reminder_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_upsert_is_idempotent_and_refreshes_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let first = repo
      .upsert_identity(&identity("user_same", "old@example.com"))
      .await
      .unwrap();
    let second = repo
      .upsert_identity(&identity("user_same", "new@example.com"))
      .await
      .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.email, "new@example.com");
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_update_preferences_persisted() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let mut user = repo
      .upsert_identity(&identity("user_prefs", "prefs@example.com"))
      .await
      .unwrap();
    let morning = NaiveTime::from_hms_opt(7, 45, 0).unwrap();
    user.update_preferences(ReminderPreferences {
      enabled: Some(true),
      time: Some(morning),
    });

    repo.update(user.clone()).await.unwrap();

    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(found.reminder_enabled);
    assert_eq!(found.reminder_time, morning);
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_update_missing_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let ghost = User::new(identity("user_ghost", "ghost@example.com"));
    let result = repo.update(ghost).await;

    match result.unwrap_err() {
      AuthError::Repository(RepositoryError::NotFound) => {}
      other => panic!("Expected Repository(NotFound) error, got {:?}", other),
    }
  }
}
