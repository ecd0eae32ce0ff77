use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::UserRow;

/// Insert the user on first login, otherwise return the existing id.
pub async fn upsert_by_email(db: &PgPool, email: &str) -> Result<Uuid> {
    sqlx::query_scalar(
        r#"INSERT INTO users (email)
           VALUES ($1)
           ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
           RETURNING id"#,
    )
    .bind(email)
    .fetch_one(db)
    .await
    .context("upserting user by email")
}

pub async fn fetch(db: &PgPool, id: Uuid) -> Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        "SELECT id, email, first_name, last_name, birth_date, gender, role, created_at
           FROM users
          WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching user")
}

/// Current role string of a user (if the user exists).
pub async fn role_of(db: &PgPool, id: Uuid) -> Result<Option<String>> {
    sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("fetching user role")
}

/// Partial profile update; `None` fields keep their current value.
/// Gender and role strings are validated by the caller.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub role: Option<String>,
}

pub async fn update_profile(db: &PgPool, id: Uuid, update: &ProfileUpdate) -> Result<()> {
    sqlx::query(
        "UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name  = COALESCE($3, last_name),
                birth_date = COALESCE($4, birth_date),
                gender     = COALESCE($5, gender),
                role       = COALESCE($6, role)
          WHERE id = $1",
    )
    .bind(id)
    .bind(update.first_name.as_deref())
    .bind(update.last_name.as_deref())
    .bind(update.birth_date)
    .bind(update.gender.as_deref())
    .bind(update.role.as_deref())
    .execute(db)
    .await
    .context("updating profile")?;
    Ok(())
}

/// Ranked population for one gender: users holding the player role,
/// as (id, display name) pairs.
pub async fn players_by_gender(db: &PgPool, gender: &str) -> Result<Vec<(Uuid, String)>> {
    sqlx::query_as::<_, (Uuid, String)>(
        "SELECT id, TRIM(first_name || ' ' || last_name)
           FROM users
          WHERE role = 'PLAYER' AND gender = $1
          ORDER BY id",
    )
    .bind(gender)
    .fetch_all(db)
    .await
    .context("listing players by gender")
}
