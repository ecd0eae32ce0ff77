use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a team from the given players and enroll it in the tournament,
/// transactionally.
pub async fn create_enrolled(db: &PgPool, tournament: Uuid, players: &[Uuid]) -> Result<Uuid> {
    let mut tx = db.begin().await?;

    let team_id: Uuid = sqlx::query_scalar("INSERT INTO teams DEFAULT VALUES RETURNING id")
        .fetch_one(&mut *tx)
        .await
        .context("creating team")?;

    for player in players {
        sqlx::query("INSERT INTO team_members (team_id, player_id) VALUES ($1, $2)")
            .bind(team_id)
            .bind(player)
            .execute(&mut *tx)
            .await
            .context("adding team member")?;
    }

    sqlx::query("INSERT INTO tournament_teams (tournament_id, team_id) VALUES ($1, $2)")
        .bind(tournament)
        .bind(team_id)
        .execute(&mut *tx)
        .await
        .context("enrolling team")?;

    tx.commit().await?;
    Ok(team_id)
}

/// Returns true if the given player belongs to the given team.
pub async fn is_member(db: &PgPool, team: Uuid, player: Uuid) -> Result<bool> {
    sqlx::query_scalar(
        r#"SELECT EXISTS(
               SELECT 1
                 FROM team_members
                WHERE team_id   = $1
                  AND player_id = $2
           )"#,
    )
    .bind(team)
    .bind(player)
    .fetch_one(db)
    .await
    .context("checking team membership")
}

/// Returns true if the team is enrolled in the tournament.
pub async fn is_enrolled(db: &PgPool, tournament: Uuid, team: Uuid) -> Result<bool> {
    sqlx::query_scalar(
        r#"SELECT EXISTS(
               SELECT 1
                 FROM tournament_teams
                WHERE tournament_id = $1
                  AND team_id       = $2
           )"#,
    )
    .bind(tournament)
    .bind(team)
    .fetch_one(db)
    .await
    .context("checking team enrollment")
}

/// Withdraw a team from one tournament. The team row survives; it may
/// still be enrolled elsewhere.
pub async fn unenroll(db: &PgPool, tournament: Uuid, team: Uuid) -> Result<bool> {
    let rows = sqlx::query(
        "DELETE FROM tournament_teams
          WHERE tournament_id = $1 AND team_id = $2",
    )
    .bind(tournament)
    .bind(team)
    .execute(db)
    .await
    .context("withdrawing team")?
    .rows_affected();
    Ok(rows > 0)
}

/// Player ids of a team, in stable order.
pub async fn players_of(db: &PgPool, team: Uuid) -> Result<Vec<Uuid>> {
    sqlx::query_scalar(
        "SELECT player_id FROM team_members WHERE team_id = $1 ORDER BY player_id",
    )
    .bind(team)
    .fetch_all(db)
    .await
    .context("listing team players")
}

/// Enrolled teams of a tournament with their members' display names.
pub async fn roster_of_tournament(
    db: &PgPool,
    tournament: Uuid,
) -> Result<Vec<(Uuid, Uuid, String)>> {
    sqlx::query_as::<_, (Uuid, Uuid, String)>(
        r#"SELECT tm.team_id, tm.player_id, TRIM(u.first_name || ' ' || u.last_name)
             FROM tournament_teams tt
             JOIN team_members tm ON tm.team_id = tt.team_id
             JOIN users u         ON u.id = tm.player_id
            WHERE tt.tournament_id = $1
            ORDER BY tm.team_id, tm.player_id"#,
    )
    .bind(tournament)
    .fetch_all(db)
    .await
    .context("listing tournament roster")
}
