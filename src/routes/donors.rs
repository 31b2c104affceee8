use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::nearby_requests;
use crate::error::ApiError;
use crate::models::{NearbyRequestsQuery, NearbyRequestsResponse, UpdateLocationRequest};
use crate::routes::{resolve_location, AppState, AuthenticatedUser};
use crate::services::Role;

/// Configure all donor routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/donors/me", web::get().to(get_profile))
        .route("/donors/me/location", web::put().to(update_location))
        .route("/donors/nearby-requests", web::get().to(list_nearby_requests));
}

async fn get_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Donor)?;
    let donor = state.store.donor_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(donor))
}

async fn update_location(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateLocationRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Donor)?;
    let donor = state.store.donor_for_user(user_id).await?;

    let coordinate = resolve_location(&state, &req).await?;
    state
        .store
        .set_donor_location(donor.id, req.address.as_deref(), coordinate)
        .await?;

    tracing::info!("Donor {} location updated", donor.id);

    let donor = state.store.donor_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(donor))
}

/// Hospitals near the donor asking for the donor's blood type
///
/// GET /api/v1/donors/nearby-requests?maxDistance={miles}
async fn list_nearby_requests(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<NearbyRequestsQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Donor)?;
    query.validate()?;

    let max_distance = state.matching.effective_max_distance(query.max_distance);

    let donor = state.store.donor_for_user(user_id).await?;
    let origin = donor.coordinate().ok_or(ApiError::LocationNotSet("donor"))?;

    let open = state.store.open_requests(donor.blood_type).await?;
    let requests = nearby_requests(origin, open, max_distance as f64);

    tracing::debug!(
        "Donor {} ({}) has {} requests within {} miles",
        donor.id,
        donor.blood_type,
        requests.len(),
        max_distance
    );

    Ok(HttpResponse::Ok().json(NearbyRequestsResponse {
        total_count: requests.len(),
        requests,
        max_distance,
    }))
}
