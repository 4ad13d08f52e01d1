pub mod claims;
pub mod extractors;
pub mod guards;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use db::models::user::Role;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::env;

/// JWT signing secret. `Config::init` insists on JWT_SECRET being set for a
/// real deployment; the fallback exists so integration tests can run
/// without an env file.
pub(crate) fn jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| "insecure-test-secret".into())
}

fn jwt_duration_minutes() -> i64 {
    env::var("JWT_DURATION_MINUTES")
        .ok()
        .and_then(|m| m.parse().ok())
        .unwrap_or(60)
}

/// Generates a JWT and its expiry timestamp for a given user.
pub fn generate_jwt(user_id: i64, role: Role) -> (String, String) {
    let expiry = Utc::now() + Duration::minutes(jwt_duration_minutes());

    let claims = Claims {
        sub: user_id,
        role,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .expect("Token encoding failed");

    (token, expiry.to_rfc3339())
}
