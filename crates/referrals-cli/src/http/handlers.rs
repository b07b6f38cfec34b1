use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use referrals_core::domain::EmailAddress;
use referrals_store::{ReferralStore, Registration};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ApiError;
use super::AppState;
use crate::notify::{thanks_body, welcome_body};

pub const ROOT_MESSAGE: &str = "API de Referrals funcionando correctamente.";
pub const SUCCESS_MESSAGE: &str = "Referido registrado exitosamente.";

#[derive(Debug, Serialize, Deserialize)]
pub struct ReferralRequest {
    pub referrer_email: String,
    pub referee_email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

pub async fn root() -> Json<MessageResponse> {
    MessageResponse::new(ROOT_MESSAGE)
}

pub async fn create_referral<S>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ReferralRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: ReferralStore + Send + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        ApiError::Validation(format!("Solicitud inválida: {}", rejection.body_text()))
    })?;
    let referrer = validated_email("referrer_email", &request.referrer_email)?;
    let referee = validated_email("referee_email", &request.referee_email)?;

    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        service.register(referrer.as_str(), referee.as_str())
    })
    .await
    .map_err(|err| ApiError::Internal(format!("registration task failed: {err}")))?;

    let registration = match outcome {
        Ok(registration) => registration,
        Err(err) => {
            if let Some(rejection) = err.rejection() {
                info!(kind = rejection.kind(), "referral rejected");
            }
            return Err(err.into());
        }
    };

    notify(&state, &registration);
    Ok(MessageResponse::new(SUCCESS_MESSAGE))
}

fn validated_email(field: &str, raw: &str) -> Result<EmailAddress, ApiError> {
    EmailAddress::parse(raw)
        .map_err(|_| ApiError::Validation(format!("{field}: no es una dirección de email válida.")))
}

fn notify<S>(state: &AppState<S>, registration: &Registration) {
    let notices = [
        (
            &registration.normalized_referee,
            welcome_body(&registration.normalized_referee),
        ),
        (
            &registration.normalized_referrer,
            thanks_body(&registration.normalized_referrer),
        ),
    ];
    for (recipient, body) in notices {
        if let Err(err) = state.notifier.send(recipient, &body) {
            warn!(recipient = %recipient, error = %err, "notification failed");
        }
    }
}
