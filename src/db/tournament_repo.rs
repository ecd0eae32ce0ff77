use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::TournamentRow;

const COLUMNS: &str = "id, organizer_id, name, city, money_prize, gender, ranking_tier, \
                       start_date, end_date, created_at";

#[derive(Debug)]
pub struct NewTournament {
    pub name: String,
    pub city: String,
    pub money_prize: i64,
    pub gender: String,
    pub ranking_tier: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub async fn create(db: &PgPool, organizer: Uuid, t: &NewTournament) -> Result<Uuid> {
    sqlx::query_scalar(
        r#"INSERT INTO tournaments
               (organizer_id, name, city, money_prize, gender, ranking_tier, start_date, end_date)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
           RETURNING id"#,
    )
    .bind(organizer)
    .bind(&t.name)
    .bind(&t.city)
    .bind(t.money_prize)
    .bind(&t.gender)
    .bind(&t.ranking_tier)
    .bind(t.start_date)
    .bind(t.end_date)
    .fetch_one(db)
    .await
    .context("creating tournament")
}

pub async fn fetch(db: &PgPool, id: Uuid) -> Result<Option<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        "SELECT {COLUMNS} FROM tournaments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching tournament")
}

/// Owner-scoped fetch; another organizer's tournament reads as absent.
pub async fn fetch_owned(db: &PgPool, id: Uuid, organizer: Uuid) -> Result<Option<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        "SELECT {COLUMNS} FROM tournaments WHERE id = $1 AND organizer_id = $2"
    ))
    .bind(id)
    .bind(organizer)
    .fetch_optional(db)
    .await
    .context("fetching owned tournament")
}

pub async fn list_for_organizer(db: &PgPool, organizer: Uuid) -> Result<Vec<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        "SELECT {COLUMNS} FROM tournaments WHERE organizer_id = $1 ORDER BY created_at DESC"
    ))
    .bind(organizer)
    .fetch_all(db)
    .await
    .context("listing tournaments for organizer")
}

pub async fn list_public(db: &PgPool) -> Result<Vec<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        "SELECT {COLUMNS} FROM tournaments ORDER BY start_date"
    ))
    .fetch_all(db)
    .await
    .context("listing tournaments")
}

/// Partial update; `None` fields keep their current value. Scoped to the
/// owner — returns false when the tournament is missing or foreign.
#[derive(Debug, Default)]
pub struct TournamentPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub money_prize: Option<i64>,
    pub gender: Option<String>,
    pub ranking_tier: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub async fn update_partial(
    db: &PgPool,
    id: Uuid,
    organizer: Uuid,
    patch: &TournamentPatch,
) -> Result<bool> {
    let rows = sqlx::query(
        "UPDATE tournaments
            SET name         = COALESCE($3, name),
                city         = COALESCE($4, city),
                money_prize  = COALESCE($5, money_prize),
                gender       = COALESCE($6, gender),
                ranking_tier = COALESCE($7, ranking_tier),
                start_date   = COALESCE($8, start_date),
                end_date     = COALESCE($9, end_date)
          WHERE id = $1 AND organizer_id = $2",
    )
    .bind(id)
    .bind(organizer)
    .bind(patch.name.as_deref())
    .bind(patch.city.as_deref())
    .bind(patch.money_prize)
    .bind(patch.gender.as_deref())
    .bind(patch.ranking_tier.as_deref())
    .bind(patch.start_date)
    .bind(patch.end_date)
    .execute(db)
    .await
    .context("updating tournament")?
    .rows_affected();
    Ok(rows > 0)
}

pub async fn delete(db: &PgPool, id: Uuid, organizer: Uuid) -> Result<bool> {
    let rows = sqlx::query("DELETE FROM tournaments WHERE id = $1 AND organizer_id = $2")
        .bind(id)
        .bind(organizer)
        .execute(db)
        .await
        .context("deleting tournament")?
        .rows_affected();
    Ok(rows > 0)
}
