use answerpath_core::{models::User, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for managing users
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert a user keyed by email.
    ///
    /// Returns the existing row when the email is already registered; name and
    /// image are only written on first creation, never refreshed afterwards.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "upsert"))]
    pub async fn find_or_create(
        &self,
        email: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<User, AppError> {
        // DO UPDATE with a no-op assignment so RETURNING always yields a row,
        // whether the insert happened or the email already existed.
        let user = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (email, name, image)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, email, name, image, created_at
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(image)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Look up a user by email
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, email, name, image, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
