use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::SessionUser;

pub const SESSION_COOKIE: &str = "session";
const SESSION_TTL_HOURS: i64 = 24;

// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,           // email
    pub first_name: String,
    pub last_name: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

/// Signs and checks the session cookie value (HS256)
#[derive(Clone)]
pub struct SessionService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Uses the configured secret, or a random one valid for this process only
    pub fn from_optional_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(secret) => Self::new(secret),
            None => {
                log::warn!("⚠️  SESSION_SECRET not set; sessions will not survive a restart");
                let random = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
                Self::new(&random)
            }
        }
    }

    pub fn issue(&self, user: &SessionUser) -> Result<String, String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| format!("Failed to sign session: {}", e))
    }

    pub fn verify(&self, token: &str) -> Result<SessionUser, String> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| SessionUser {
                email: data.claims.sub,
                first_name: data.claims.first_name,
                last_name: data.claims.last_name,
            })
            .map_err(|e| format!("Invalid session: {}", e))
    }
}
