use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Local user record backing an external Google identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub google_id: String,
    pub is_admin: bool,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_google_id(db: &PgPool, google_id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, google_id, is_admin, created_at
            FROM users
            WHERE google_id = $1
            "#,
        )
        .bind(google_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, google_id, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Looks up the user by subject id, creating the record on first login.
    /// The admin flag is persisted at creation and not recomputed later;
    /// likewise the stored email is not refreshed from a newer assertion.
    pub async fn find_or_create(
        db: &PgPool,
        email: &str,
        google_id: &str,
        is_admin: bool,
    ) -> anyhow::Result<User> {
        if let Some(user) = Self::find_by_google_id(db, google_id).await? {
            return Ok(user);
        }

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, google_id, is_admin)
            VALUES ($1, $2, $3)
            RETURNING id, email, google_id, is_admin, created_at
            "#,
        )
        .bind(email)
        .bind(google_id)
        .bind(is_admin)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            // Lost a concurrent first-login race: the unique index on
            // google_id rejected this insert, the winner's row exists now.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Self::find_by_google_id(db, google_id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("user missing after unique violation"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
