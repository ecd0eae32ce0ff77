use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct TournamentRow {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub name: String,
    pub city: String,
    pub money_prize: i64,
    pub gender: String,
    pub ranking_tier: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct ResultEntryRow {
    pub id: Uuid,
    pub player_id: Uuid,
    pub tournament_id: Uuid,
    pub team_id: Uuid,
    pub points_awarded: f64,
    pub placement: i32,
    pub tournament_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct RankingSnapshotRow {
    pub id: Uuid,
    pub snapshot_date: NaiveDate,
    pub gender: String,
    pub standings: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
