// Route exports
pub mod appointments;
pub mod donors;
pub mod health;
pub mod hospitals;

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::error::ApiError;
use crate::models::{Coordinate, UpdateLocationRequest};
use crate::services::{DirectoryStore, GeocodingClient, Identity, Role, SessionAuthenticator};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DirectoryStore>,
    pub geocoder: Arc<GeocodingClient>,
    pub authenticator: Arc<SessionAuthenticator>,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(hospitals::configure)
            .configure(donors::configure)
            .configure(appointments::configure),
    );
}

/// Caller identity resolved from the `Authorization: Bearer` header
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    /// The caller's user id, provided they hold `role`
    pub fn require(&self, role: Role) -> Result<Uuid, ApiError> {
        if self.0.role != role {
            return Err(ApiError::Forbidden(format!(
                "This endpoint requires a {:?} account",
                role
            )));
        }
        Ok(self.0.user_id)
    }

    fn from_http(req: &HttpRequest) -> Result<Self, ApiError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| ApiError::Internal("Application state not configured".to_string()))?;

        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        let token = SessionAuthenticator::bearer_token(header)?;

        Ok(Self(state.authenticator.authenticate(token)?))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http(req))
    }
}

/// Turn a location update into a coordinate, geocoding the address if needed
///
/// Explicit coordinates win over an address when both are given.
pub(crate) async fn resolve_location(
    state: &AppState,
    req: &UpdateLocationRequest,
) -> Result<Coordinate, ApiError> {
    req.validate()?;

    if let Some(coordinate) = Coordinate::from_parts(req.latitude, req.longitude) {
        return Ok(coordinate);
    }

    match req.address.as_deref() {
        Some(address) => Ok(state.geocoder.geocode(address).await?),
        None => Err(ApiError::BadRequest(
            "Provide an address or both latitude and longitude".to_string(),
        )),
    }
}
