//! Ranking snapshots: regeneration plus latest/historical reads.

use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::{Duration, NaiveDate, Utc};
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use crate::config::settings;
use crate::db::models::RankingSnapshotRow;
use crate::db::{ranking_repo, result_repo, user_repo};
use crate::http::auth::JwtAuth;
use crate::metrics;
use crate::scoring::standings::{build_leaderboard, PlayerRef};
use crate::scoring::types::Gender;

#[derive(Deserialize)]
pub struct LatestParams {
    pub gender: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub date: Option<NaiveDate>,
    pub gender: Option<String>,
}

#[derive(Serialize)]
pub struct SnapshotDto {
    pub date: NaiveDate,
    pub gender: String,
    pub standings: serde_json::Value,
}

impl From<RankingSnapshotRow> for SnapshotDto {
    fn from(row: RankingSnapshotRow) -> Self {
        SnapshotDto {
            date: row.snapshot_date,
            gender: row.gender,
            standings: row.standings,
        }
    }
}

/// POST /api/rankings/generate
///
/// Rebuilds today's snapshot for both genders. Re-running on the same day
/// replaces the snapshots rather than appending new ones.
#[post("/rankings/generate")]
pub async fn generate(_auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    let today = Utc::now().date_naive();
    let cutoff = today - Duration::days(settings().window_days);

    for gender in Gender::ALL {
        let players: Vec<PlayerRef> = match user_repo::players_by_gender(&db, gender.as_str()).await
        {
            Ok(rows) => rows
                .into_iter()
                .map(|(id, full_name)| PlayerRef { id, full_name })
                .collect(),
            Err(e) => {
                log::error!("loading {} players failed: {e:?}", gender.as_str());
                return HttpResponse::InternalServerError().finish();
            }
        };

        let ledger = match result_repo::ledger_since(&db, gender.as_str(), cutoff).await {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("loading {} ledger failed: {e:?}", gender.as_str());
                return HttpResponse::InternalServerError().finish();
            }
        };

        let board = build_leaderboard(
            &players,
            &ledger,
            today,
            settings().window_days,
            settings().counted_results,
        );
        let standings = match serde_json::to_value(&board) {
            Ok(v) => v,
            Err(_) => return HttpResponse::InternalServerError().finish(),
        };

        if let Err(e) = ranking_repo::upsert_snapshot(&db, today, gender.as_str(), &standings).await
        {
            log::error!("storing {} snapshot failed: {e:?}", gender.as_str());
            return HttpResponse::InternalServerError().finish();
        }
    }

    metrics::RANKING_RUNS.inc();
    HttpResponse::Created().json(json!({ "date": today }))
}

/// GET /api/rankings/latest?gender= — most recent snapshot for one gender.
#[get("/rankings/latest")]
pub async fn latest(
    web::Query(params): web::Query<LatestParams>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> impl Responder {
    let gender = match Gender::parse(&params.gender) {
        Some(g) => g,
        None => {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid gender parameter" }))
        }
    };

    // Snapshot reads are hot and immutable between regenerations; serve
    // from Redis when possible.
    let key = format!("ranking:latest:{}", gender.as_str());
    let mut cache = match redis.get_multiplexed_async_connection().await {
        Ok(conn) => Some(conn),
        Err(_) => None,
    };
    if let Some(conn) = cache.as_mut() {
        if let Ok(Some(hit)) = conn.get::<_, Option<String>>(&key).await {
            return HttpResponse::Ok()
                .content_type("application/json")
                .body(hit);
        }
    }

    let row = match ranking_repo::latest_for_gender(&db, gender.as_str()).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "error": "No rankings found" }))
        }
        Err(e) => {
            log::error!("latest snapshot read failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let dto = SnapshotDto::from(row);
    if let (Some(conn), Ok(body)) = (cache.as_mut(), serde_json::to_string(&dto)) {
        let _: () = conn
            .set_ex(&key, &body, settings().ranking_cache_ttl)
            .await
            .unwrap_or(());
    }

    HttpResponse::Ok().json(dto)
}

/// GET /api/rankings?date=&gender= — historical snapshots.
#[get("/rankings")]
pub async fn list(
    _auth: JwtAuth,
    web::Query(params): web::Query<ListParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if let Some(g) = params.gender.as_deref() {
        if Gender::parse(g).is_none() {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid gender parameter" }));
        }
    }

    match ranking_repo::list(&db, params.date, params.gender.as_deref()).await {
        Ok(rows) => HttpResponse::Ok().json(
            rows.into_iter().map(SnapshotDto::from).collect::<Vec<_>>(),
        ),
        Err(e) => {
            log::error!("snapshot list failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(generate).service(latest).service(list);
}
