use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use tracing::{error, warn};

use crate::api::SendVerificationCodeRequest;
use crate::email::EmailError;
use crate::handlers::envelope;
use crate::server::AppState;

/// POST /api/send-verification-code
pub async fn send_verification_code(
    State(state): State<AppState>,
    body: Result<Json<SendVerificationCodeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return envelope::rejected(rejection),
    };

    match state
        .mailer
        .send_verification_code(&req.email, &req.code)
        .await
    {
        Ok(()) => envelope::success(None),
        Err(EmailError::Unavailable) => {
            warn!(to = %req.email, "verification code requested but email is not configured");
            envelope::internal_error("email service is not configured")
        }
        Err(e) => {
            error!(to = %req.email, error = %e, "failed to send verification code");
            envelope::internal_error("failed to send verification code")
        }
    }
}
