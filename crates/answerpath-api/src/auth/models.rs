use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Session token claims.
///
/// Tokens are issued by the external identity provider and verified here with
/// the shared session secret. This service never mints tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user's email address
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Caller identity extracted from a verified session token and stored in
/// request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl From<SessionClaims> for CallerIdentity {
    fn from(claims: SessionClaims) -> Self {
        CallerIdentity {
            email: claims.sub,
            name: claims.name,
            image: claims.image,
        }
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Authentication required".to_string(),
                        details: None,
                        error_type: None,
                        code: "UNAUTHORIZED".to_string(),
                        recoverable: false,
                        suggested_action: Some("Sign in and retry with a valid session".to_string()),
                    }),
                )
            })
    }
}
