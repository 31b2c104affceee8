use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{match_donors, BloodTypeFilter};
use crate::error::ApiError;
use crate::models::{
    BloodType, DeletedResponse, DonorCandidate, HospitalOrigin, InventoryResponse,
    NearbyDonorsQuery, NearbyDonorsResponse, UpdateInventoryRequest, UpdateLocationRequest,
    UpdateUrgencyRequest,
};
use crate::routes::{resolve_location, AppState, AuthenticatedUser};
use crate::services::Role;

/// Configure all hospital routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/hospitals/me", web::get().to(get_profile))
        .route("/hospitals/me/location", web::put().to(update_location))
        .route("/hospitals/nearby-donors", web::get().to(nearby_donors))
        .route("/hospitals/me/urgency", web::get().to(list_urgency))
        .route("/hospitals/me/urgency", web::put().to(set_urgency))
        .route("/hospitals/me/urgency/{blood_type}", web::delete().to(delete_urgency))
        .route("/hospitals/me/inventory", web::get().to(list_inventory))
        .route("/hospitals/me/inventory", web::put().to(set_inventory))
        .route("/hospitals/me/inventory/{blood_type}", web::delete().to(delete_inventory));
}

async fn get_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    let hospital = state.store.hospital_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(hospital))
}

/// PUT /api/v1/hospitals/me/location
///
/// Request body:
/// ```json
/// { "address": "string" }
/// ```
/// or
/// ```json
/// { "latitude": 33.749, "longitude": -84.388 }
/// ```
async fn update_location(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateLocationRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    let hospital = state.store.hospital_for_user(user_id).await?;

    let coordinate = resolve_location(&state, &req).await?;
    state
        .store
        .set_hospital_location(hospital.id, req.address.as_deref(), coordinate)
        .await?;

    tracing::info!("Hospital {} location updated", hospital.id);

    let hospital = state.store.hospital_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(hospital))
}

/// Find eligible donors near the calling hospital
///
/// GET /api/v1/hospitals/nearby-donors?bloodType={type|all}&maxDistance={miles}
async fn nearby_donors(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<NearbyDonorsQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    query.validate()?;

    let filter = BloodTypeFilter::from_param(query.blood_type.as_deref())?;
    let max_distance = state.matching.effective_max_distance(query.max_distance);

    let hospital = state.store.hospital_for_user(user_id).await?;
    let origin = hospital.origin().ok_or(ApiError::LocationNotSet("hospital"))?;

    tracing::info!(
        "Finding donors for hospital {}, bloodType: {}, maxDistance: {}",
        origin.id,
        filter,
        max_distance
    );

    let candidates = state.store.eligible_donors(filter.blood_type()).await?;
    let total_candidates = candidates.len();

    let response = nearby_donors_response(origin, candidates, filter, max_distance);

    tracing::info!(
        "Returning {} donors for hospital {} (from {} candidates)",
        response.total_count,
        response.hospital.id,
        total_candidates
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Run the matcher and wrap the result in the response envelope
pub fn nearby_donors_response(
    origin: HospitalOrigin,
    candidates: Vec<DonorCandidate>,
    filter: BloodTypeFilter,
    max_distance: u32,
) -> NearbyDonorsResponse {
    let donors = match_donors(origin.coordinate(), candidates, Some(max_distance as f64), filter);

    NearbyDonorsResponse {
        hospital: origin,
        total_count: donors.len(),
        donors,
        blood_type: filter.to_string(),
        max_distance,
    }
}

async fn list_urgency(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    let hospital = state.store.hospital_for_user(user_id).await?;
    let levels = state.store.urgency_levels(hospital.id).await?;
    Ok(HttpResponse::Ok().json(levels))
}

/// PUT /api/v1/hospitals/me/urgency
///
/// Request body:
/// ```json
/// { "bloodType": "O-", "level": 5 }
/// ```
async fn set_urgency(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateUrgencyRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    req.validate()?;

    let hospital = state.store.hospital_for_user(user_id).await?;
    let level = state
        .store
        .upsert_urgency_level(hospital.id, req.blood_type, req.level)
        .await?;

    Ok(HttpResponse::Ok().json(level))
}

async fn delete_urgency(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    let blood_type: BloodType = path.parse()?;

    let hospital = state.store.hospital_for_user(user_id).await?;
    if !state.store.delete_urgency_level(hospital.id, blood_type).await? {
        return Err(ApiError::NotFound(format!("No urgency level set for {}", blood_type)));
    }

    Ok(HttpResponse::Ok().json(DeletedResponse { deleted: true }))
}

async fn list_inventory(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    let hospital = state.store.hospital_for_user(user_id).await?;
    let items = state.store.inventory(hospital.id).await?;
    Ok(HttpResponse::Ok().json(InventoryResponse::from_items(items)))
}

/// PUT /api/v1/hospitals/me/inventory
///
/// Request body:
/// ```json
/// { "bloodType": "A+", "units": 12 }
/// ```
async fn set_inventory(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateInventoryRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    req.validate()?;

    let hospital = state.store.hospital_for_user(user_id).await?;
    let item = state
        .store
        .upsert_inventory(hospital.id, req.blood_type, req.units)
        .await?;

    tracing::debug!("Inventory of {} at {} set to {}", req.blood_type, hospital.id, req.units);

    Ok(HttpResponse::Ok().json(item))
}

async fn delete_inventory(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Hospital)?;
    let blood_type: BloodType = path.parse()?;

    let hospital = state.store.hospital_for_user(user_id).await?;
    if !state.store.delete_inventory(hospital.id, blood_type).await? {
        return Err(ApiError::NotFound(format!("No inventory recorded for {}", blood_type)));
    }

    Ok(HttpResponse::Ok().json(DeletedResponse { deleted: true }))
}
