//! HTTP surface of the referral service.
//!
//! ```text
//! GET  /          liveness message
//! POST /referral  register a referrer/referee pair
//! ```

mod error;
mod handlers;

use axum::routing::{get, post};
use axum::Router;
use referrals_store::{ReferralService, ReferralStore};
use std::sync::Arc;

use crate::notify::Notifier;

pub use error::{ApiError, ErrorBody};
pub use handlers::{MessageResponse, ReferralRequest, ROOT_MESSAGE, SUCCESS_MESSAGE};

pub struct AppState<S> {
    pub service: Arc<ReferralService<S>>,
    pub notifier: Arc<dyn Notifier>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

pub fn build_router<S>(service: Arc<ReferralService<S>>, notifier: Arc<dyn Notifier>) -> Router
where
    S: ReferralStore + Send + 'static,
{
    Router::new()
        .route("/", get(handlers::root))
        .route("/referral", post(handlers::create_referral::<S>))
        .with_state(AppState { service, notifier })
}
