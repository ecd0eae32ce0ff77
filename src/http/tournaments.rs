//! Tournament management: CRUD, team enrollment and point awarding.

use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::TournamentRow;
use crate::db::result_repo::{self, NewResultEntry};
use crate::db::team_repo;
use crate::db::tournament_repo::{self, NewTournament, TournamentPatch};
use crate::db::user_repo;
use crate::http::auth::JwtAuth;
use crate::scoring::points;
use crate::scoring::types::{Gender, RankingTier, UserRole};

// ---------- Requests ----------

#[derive(Deserialize)]
pub struct CreateTournamentReq {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub money_prize: i64,
    pub gender: String,
    pub ranking_tier: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct UpdateTournamentReq {
    pub name: Option<String>,
    pub city: Option<String>,
    pub money_prize: Option<i64>,
    pub gender: Option<String>,
    pub ranking_tier: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreateTeamReq {
    pub players: Vec<Uuid>,
}

#[derive(Deserialize)]
pub struct RemoveTeamReq {
    pub team_id: Uuid,
}

#[derive(Deserialize)]
pub struct TeamResult {
    pub team_id: Uuid,
    pub position: u32,
}

#[derive(Deserialize)]
pub struct AwardPointsReq {
    pub team_results: Vec<TeamResult>,
}

// ---------- Responses ----------

#[derive(Serialize)]
pub struct TournamentDto {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub name: String,
    pub city: String,
    pub money_prize: i64,
    pub gender: String,
    pub ranking_tier: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<TournamentRow> for TournamentDto {
    fn from(row: TournamentRow) -> Self {
        TournamentDto {
            id: row.id,
            organizer_id: row.organizer_id,
            name: row.name,
            city: row.city,
            money_prize: row.money_prize,
            gender: row.gender,
            ranking_tier: row.ranking_tier,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

#[derive(Serialize)]
pub struct TeamPlayerDto {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Serialize)]
pub struct TeamDto {
    pub id: Uuid,
    pub players: Vec<TeamPlayerDto>,
}

#[derive(Serialize)]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: TournamentDto,
    pub teams: Vec<TeamDto>,
}

#[derive(Serialize)]
pub struct ResultEntryDto {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub points_awarded: f64,
    pub placement: i32,
    pub tournament_date: NaiveDate,
}

// ---------- Helpers ----------

async fn role_of(db: &PgPool, user: Uuid) -> Option<UserRole> {
    user_repo::role_of(db, user)
        .await
        .unwrap_or(None)
        .and_then(|r| UserRole::parse(&r))
}

// ---------- Handlers ----------

/// POST /api/tournaments
#[post("/tournaments")]
pub async fn create(
    auth: JwtAuth,
    info: web::Json<CreateTournamentReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match role_of(&db, auth.user_id).await {
        Some(role) if role.can_create_tournament() => {}
        _ => {
            return HttpResponse::Forbidden()
                .json(json!({ "error": "only organizers may create tournaments" }))
        }
    }

    let gender = match Gender::parse(&info.gender) {
        Some(g) => g,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "Invalid gender parameter", "field": "gender" }))
        }
    };
    let tier = match info.ranking_tier.as_deref() {
        None => RankingTier::NoneRank,
        Some(s) => match RankingTier::parse(s) {
            Some(t) => t,
            None => {
                return HttpResponse::BadRequest()
                    .json(json!({ "error": "unknown ranking tier", "field": "ranking_tier" }))
            }
        },
    };

    let new = NewTournament {
        name: info.name.clone(),
        city: info.city.clone(),
        money_prize: info.money_prize,
        gender: gender.as_str().to_string(),
        ranking_tier: tier.as_str().to_string(),
        start_date: info.start_date,
        end_date: info.end_date,
    };

    match tournament_repo::create(&db, auth.user_id, &new).await {
        Ok(id) => HttpResponse::Created().json(json!({ "tournament_id": id })),
        Err(e) => {
            log::error!("tournament create failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/tournaments — the caller's own tournaments, newest first.
#[get("/tournaments")]
pub async fn list_mine(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match tournament_repo::list_for_organizer(&db, auth.user_id).await {
        Ok(rows) => HttpResponse::Ok().json(
            rows.into_iter()
                .map(TournamentDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            log::error!("tournament list failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/tournaments/public — everyone's tournaments by start date.
#[get("/tournaments/public")]
pub async fn list_public(db: web::Data<PgPool>) -> impl Responder {
    match tournament_repo::list_public(&db).await {
        Ok(rows) => HttpResponse::Ok().json(
            rows.into_iter()
                .map(TournamentDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            log::error!("public tournament list failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/tournaments/{id} — owner-scoped detail with the enrolled roster.
#[get("/tournaments/{id}")]
pub async fn detail(path: web::Path<Uuid>, auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    let id = path.into_inner();
    let row = match tournament_repo::fetch_owned(&db, id, auth.user_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return HttpResponse::NotFound().json(json!({ "error": "no such tournament" })),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let roster = team_repo::roster_of_tournament(&db, id).await.unwrap_or_default();
    let mut teams: Vec<TeamDto> = Vec::new();
    for (team_id, player_id, full_name) in roster {
        match teams.last_mut() {
            Some(team) if team.id == team_id => {
                team.players.push(TeamPlayerDto { id: player_id, full_name })
            }
            _ => teams.push(TeamDto {
                id: team_id,
                players: vec![TeamPlayerDto { id: player_id, full_name }],
            }),
        }
    }

    HttpResponse::Ok().json(TournamentDetail {
        tournament: TournamentDto::from(row),
        teams,
    })
}

/// PATCH /api/tournaments/{id}
#[patch("/tournaments/{id}")]
pub async fn update(
    path: web::Path<Uuid>,
    auth: JwtAuth,
    info: web::Json<UpdateTournamentReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if let Some(g) = info.gender.as_deref() {
        if Gender::parse(g).is_none() {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "Invalid gender parameter", "field": "gender" }));
        }
    }
    if let Some(t) = info.ranking_tier.as_deref() {
        if RankingTier::parse(t).is_none() {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "unknown ranking tier", "field": "ranking_tier" }));
        }
    }

    let patch = TournamentPatch {
        name: info.name.clone(),
        city: info.city.clone(),
        money_prize: info.money_prize,
        gender: info.gender.clone(),
        ranking_tier: info.ranking_tier.clone(),
        start_date: info.start_date,
        end_date: info.end_date,
    };

    match tournament_repo::update_partial(&db, path.into_inner(), auth.user_id, &patch).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "updated": true })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "no such tournament" })),
        Err(e) => {
            log::error!("tournament update failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// DELETE /api/tournaments/{id}
#[delete("/tournaments/{id}")]
pub async fn remove(path: web::Path<Uuid>, auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match tournament_repo::delete(&db, path.into_inner(), auth.user_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "no such tournament" })),
        Err(e) => {
            log::error!("tournament delete failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/tournaments/{id}/teams — form a pair and enroll it.
#[post("/tournaments/{id}/teams")]
pub async fn create_team(
    path: web::Path<Uuid>,
    _auth: JwtAuth,
    info: web::Json<CreateTeamReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let id = path.into_inner();

    // Teams are pairs; reject anything else up front.
    if info.players.len() != 2 || info.players[0] == info.players[1] {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "a team needs exactly 2 distinct players", "field": "players" }));
    }

    match tournament_repo::fetch(&db, id).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().json(json!({ "error": "no such tournament" })),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    match team_repo::create_enrolled(&db, id, &info.players).await {
        Ok(team_id) => HttpResponse::Created().json(json!({ "team_id": team_id })),
        Err(e) => {
            log::warn!("team creation failed: {e:?}");
            HttpResponse::BadRequest().json(json!({ "error": "could not create team" }))
        }
    }
}

/// DELETE /api/tournaments/{id}/teams — withdraw a team; members only.
#[delete("/tournaments/{id}/teams")]
pub async fn remove_team(
    path: web::Path<Uuid>,
    auth: JwtAuth,
    info: web::Json<RemoveTeamReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let id = path.into_inner();

    if !team_repo::is_enrolled(&db, id, info.team_id).await.unwrap_or(false) {
        return HttpResponse::NotFound().json(json!({ "error": "team not found in tournament" }));
    }
    // Only members may withdraw their team; anyone else sees not-found.
    if !team_repo::is_member(&db, info.team_id, auth.user_id).await.unwrap_or(false) {
        return HttpResponse::NotFound().json(json!({ "error": "team not found in tournament" }));
    }

    match team_repo::unenroll(&db, id, info.team_id).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "removed": info.team_id })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "team not found in tournament" })),
        Err(e) => {
            log::error!("team withdraw failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/tournaments/{id}/results — award points for final placements.
///
/// The whole batch is validated before any entry is written; a single bad
/// pair rejects the request and leaves the ledger untouched.
#[post("/tournaments/{id}/results")]
pub async fn award_points(
    path: web::Path<Uuid>,
    auth: JwtAuth,
    info: web::Json<AwardPointsReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let id = path.into_inner();

    let tournament = match tournament_repo::fetch(&db, id).await {
        Ok(Some(t)) => t,
        Ok(None) => return HttpResponse::NotFound().json(json!({ "error": "no such tournament" })),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    match role_of(&db, auth.user_id).await {
        Some(role) if role.can_award_points() => {}
        _ => {
            return HttpResponse::Forbidden()
                .json(json!({ "error": "only organizers may award points" }))
        }
    }
    if tournament.organizer_id != auth.user_id {
        return HttpResponse::Forbidden()
            .json(json!({ "error": "only the tournament's organizer may award points" }));
    }

    let tier = match RankingTier::parse(&tournament.ranking_tier) {
        Some(t) => t,
        None => {
            log::error!("tournament {id} carries unknown tier {}", tournament.ranking_tier);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if info.team_results.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "team_results must not be empty", "field": "team_results" }));
    }

    let mut entries: Vec<NewResultEntry> = Vec::new();
    for result in &info.team_results {
        if !team_repo::is_enrolled(&db, id, result.team_id).await.unwrap_or(false) {
            return HttpResponse::BadRequest().json(json!({
                "error": "team not enrolled in tournament",
                "team_id": result.team_id,
            }));
        }

        let total = match points::points_for_position(tier, result.position) {
            Some(p) => p,
            None => {
                return HttpResponse::BadRequest().json(json!({
                    "error": "no points defined for position",
                    "team_id": result.team_id,
                    "position": result.position,
                }))
            }
        };

        let players = team_repo::players_of(&db, result.team_id).await.unwrap_or_default();
        if players.is_empty() {
            return HttpResponse::BadRequest().json(json!({
                "error": "team has no players",
                "team_id": result.team_id,
            }));
        }

        let share = points::player_share(total, players.len());
        for player_id in players {
            entries.push(NewResultEntry {
                player_id,
                tournament_id: id,
                team_id: result.team_id,
                points_awarded: share,
                placement: result.position as i32,
                tournament_date: tournament.end_date,
            });
        }
    }

    match result_repo::insert_batch(&db, &entries).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "created": entries.len() })),
        Err(e) => {
            log::error!("awarding points failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/tournaments/{id}/results — the tournament's slice of the ledger.
#[get("/tournaments/{id}/results")]
pub async fn list_results(
    path: web::Path<Uuid>,
    _auth: JwtAuth,
    db: web::Data<PgPool>,
) -> impl Responder {
    match result_repo::list_for_tournament(&db, path.into_inner()).await {
        Ok(rows) => HttpResponse::Ok().json(
            rows.into_iter()
                .map(|r| ResultEntryDto {
                    player_id: r.player_id,
                    team_id: r.team_id,
                    points_awarded: r.points_awarded,
                    placement: r.placement,
                    tournament_date: r.tournament_date,
                })
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            log::error!("result list failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

// ---------- Mount ----------

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(list_mine)
        .service(list_public)
        .service(create_team)
        .service(remove_team)
        .service(award_points)
        .service(list_results)
        .service(detail)
        .service(update)
        .service(remove);
}
