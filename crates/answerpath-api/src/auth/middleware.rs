use crate::auth::models::{CallerIdentity, SessionClaims};
use crate::error::{ErrorResponse, HttpAppError};
use answerpath_core::AppError;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::sync::Arc;

/// State shared by the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl AuthState {
    pub fn new(session_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(session_secret.as_bytes())),
            validation,
        }
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token verification failed");
                AppError::Unauthorized("Authentication required".to_string())
            })
    }
}

fn unauthorized() -> Response {
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
        .into_response()
}

/// Verify the bearer session token and attach the caller identity to the
/// request. Requests without a valid token are rejected with 401 before any
/// handler runs.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        Some(t) if !t.is_empty() => t,
        _ => return unauthorized(),
    };

    let claims = match auth_state.verify(token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    if claims.sub.trim().is_empty() {
        return unauthorized();
    }

    request
        .extensions_mut()
        .insert(CallerIdentity::from(claims));

    next.run(request).await
}
