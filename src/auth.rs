//! Bearer tokens and password hashing.

use argon2::Config as ArgonConfig;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please authenticate using a valid token")]
    Missing,

    #[error("Please authenticate using a valid token")]
    Invalid,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("failed to hash password: {0}")]
    Hashing(#[from] argon2::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUser {
    pub id: String,
}

/// Token payload: `{ "user": { "id": ... }, "iat": ... }`. There is no
/// `exp`; a token stays valid until the signing secret changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    pub iat: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// Issues and verifies HS256 bearer tokens. Cheap to clone.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        TokenService {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                validation,
            }),
        }
    }

    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        let claims = Claims {
            user: TokenUser {
                id: user_id.to_string(),
            },
            iat: Utc::now().timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.keys.encoding)?)
    }

    /// Returns the user id embedded in `token`.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)
            .map(|data| data.claims.user.id)
            .map_err(|e| {
                log::debug!("Rejected token: {}", e);
                AuthError::Invalid
            })
    }
}

/// Hashes `password` with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let config = ArgonConfig::default();
    Ok(argon2::hash_encoded(password.as_bytes(), &salt, &config)?)
}

/// Checks `plain` against an encoded argon2 hash. A malformed hash never matches.
pub fn compare_password(plain: &str, stored: &str) -> bool {
    argon2::verify_encoded(stored, plain.as_bytes()).unwrap_or_else(|e| {
        log::error!("Stored password hash could not be verified: {}", e);
        false
    })
}
