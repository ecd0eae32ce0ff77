//! JwtAuth extractor tests; no database required.

use actix_web::dev::Payload;
use actix_web::test::TestRequest;
use actix_web::FromRequest;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use matchpoint_server::http::auth::JwtAuth;
use serde::Serialize;
use uuid::Uuid;

const SECRET: &str = "test-secret";

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: usize,
}

fn token_for(user: Uuid) -> String {
    let exp = (Utc::now() + Duration::minutes(5)).timestamp() as usize;
    let claims = TestClaims {
        sub: user.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[actix_rt::test]
async fn bearer_token_resolves_to_user_id() {
    std::env::set_var("JWT_SECRET", SECRET);
    let user = Uuid::new_v4();

    let req = TestRequest::default()
        .insert_header(("Authorization", format!("Bearer {}", token_for(user))))
        .to_http_request();
    let auth = JwtAuth::from_request(&req, &mut Payload::None)
        .await
        .unwrap();

    assert_eq!(auth.user_id, user);
}

#[actix_rt::test]
async fn missing_header_is_rejected() {
    std::env::set_var("JWT_SECRET", SECRET);

    let req = TestRequest::default().to_http_request();
    assert!(JwtAuth::from_request(&req, &mut Payload::None).await.is_err());
}

#[actix_rt::test]
async fn garbage_token_is_rejected() {
    std::env::set_var("JWT_SECRET", SECRET);

    let req = TestRequest::default()
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_http_request();
    assert!(JwtAuth::from_request(&req, &mut Payload::None).await.is_err());
}
