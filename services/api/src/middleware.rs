//! Authentication middleware for JWT token validation
//!
//! Tokens are issued by the external identity provider. This service only
//! verifies them and takes the `sub` claim as the owning user of every record
//! it reads or writes.

use axum::{
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{config::JwtSettings, error::ApiError, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Owner ID
    pub sub: Uuid,
    /// Owner e-mail, when the provider includes it
    #[serde(default)]
    pub email: Option<String>,
    /// Issued at time
    #[serde(default)]
    pub iat: Option<u64>,
    /// Expiration time
    pub exp: u64,
}

/// Authenticated business owner
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Verifies bearer tokens against the configured secret
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match &settings.audience {
            Some(audience) => {
                // A token without `aud` must not slip past the audience check
                validation.set_audience(&[audience]);
                validation.set_required_spec_claims(&["exp", "aud"]);
            }
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, ApiError> {
        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Failed to validate token: {}", e);
                ApiError::Unauthorized
            })?;

        Ok(AuthUser {
            id: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let user = state.token_verifier.verify(token)?;
    debug!("Authenticated owner {}", user.id);

    // Handlers pick the owner up through `Extension<AuthUser>`
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};

    pub(crate) const SECRET: &str = "unit-test-secret";

    pub(crate) fn settings() -> JwtSettings {
        JwtSettings {
            secret: SECRET.to_string(),
            audience: None,
        }
    }

    pub(crate) fn issue_token(sub: Uuid, secret: &str, exp_offset: i64) -> String {
        issue_token_for(sub, secret, exp_offset, None)
    }

    fn issue_token_for(sub: Uuid, secret: &str, exp_offset: i64, aud: Option<&str>) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset) as u64;
        let mut claims = serde_json::json!({
            "sub": sub,
            "email": "owner@example.com",
            "exp": exp,
        });
        if let Some(aud) = aud {
            claims["aud"] = serde_json::json!(aud);
        }
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_the_owner() {
        let owner = Uuid::new_v4();
        let verifier = TokenVerifier::new(&settings());

        let user = verifier.verify(&issue_token(owner, SECRET, 3600)).unwrap();
        assert_eq!(user.id, owner);
        assert_eq!(user.email.as_deref(), Some("owner@example.com"));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let verifier = TokenVerifier::new(&settings());
        let token = issue_token(Uuid::new_v4(), "someone-else", 3600);
        assert!(matches!(verifier.verify(&token), Err(ApiError::Unauthorized)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = TokenVerifier::new(&settings());
        let token = issue_token(Uuid::new_v4(), SECRET, -3600);
        assert!(matches!(verifier.verify(&token), Err(ApiError::Unauthorized)));
    }

    #[test]
    fn audience_is_enforced_when_configured() {
        let verifier = TokenVerifier::new(&JwtSettings {
            secret: SECRET.to_string(),
            audience: Some("authenticated".to_string()),
        });
        // issued without an aud claim
        let token = issue_token(Uuid::new_v4(), SECRET, 3600);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn matching_audience_is_accepted_and_other_audiences_are_not() {
        let verifier = TokenVerifier::new(&JwtSettings {
            secret: SECRET.to_string(),
            audience: Some("authenticated".to_string()),
        });
        let owner = Uuid::new_v4();

        let token = issue_token_for(owner, SECRET, 3600, Some("authenticated"));
        assert_eq!(verifier.verify(&token).unwrap().id, owner);

        let token = issue_token_for(owner, SECRET, 3600, Some("anon"));
        assert!(matches!(verifier.verify(&token), Err(ApiError::Unauthorized)));
    }
}
