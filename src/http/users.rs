//! Profile management for the logged-in account.

use actix_web::{get, patch, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::UserRow;
use crate::db::user_repo::{self, ProfileUpdate};
use crate::http::auth::JwtAuth;
use crate::scoring::types::{Gender, UserRole};

#[derive(Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        UserProfile {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            birth_date: row.birth_date,
            gender: row.gender,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateProfileReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub role: Option<String>,
}

/// GET /api/users/me
#[get("/users/me")]
pub async fn me(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match user_repo::fetch(&db, auth.user_id).await {
        Ok(Some(row)) => HttpResponse::Ok().json(UserProfile::from(row)),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "no such user" })),
        Err(e) => {
            log::error!("profile fetch failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// PATCH /api/users/me
#[patch("/users/me")]
pub async fn update_me(
    auth: JwtAuth,
    info: web::Json<UpdateProfileReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if let Some(g) = info.gender.as_deref() {
        if Gender::parse(g).is_none() {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "Invalid gender parameter", "field": "gender" }));
        }
    }
    if let Some(r) = info.role.as_deref() {
        if UserRole::parse(r).is_none() {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "unknown role", "field": "role" }));
        }
    }

    let update = ProfileUpdate {
        first_name: info.first_name.clone(),
        last_name: info.last_name.clone(),
        birth_date: info.birth_date,
        gender: info.gender.clone(),
        role: info.role.clone(),
    };

    if let Err(e) = user_repo::update_profile(&db, auth.user_id, &update).await {
        log::error!("profile update failed: {e:?}");
        return HttpResponse::InternalServerError().finish();
    }

    match user_repo::fetch(&db, auth.user_id).await {
        Ok(Some(row)) => HttpResponse::Ok().json(UserProfile::from(row)),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "no such user" })),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me).service(update_me);
}
