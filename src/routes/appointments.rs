use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{CreateAppointmentRequest, DeletedResponse, UpdateAppointmentRequest};
use crate::routes::{AppState, AuthenticatedUser};
use crate::services::Role;

/// Configure all appointment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/appointments", web::get().to(list_appointments))
        .route("/appointments", web::post().to(create_appointment))
        .route("/appointments/{id}", web::patch().to(update_appointment))
        .route("/appointments/{id}", web::delete().to(delete_appointment));
}

/// Profile id of the caller: donor id for donors, hospital id for hospitals
async fn party_id(state: &AppState, user: &AuthenticatedUser) -> Result<Uuid, ApiError> {
    let identity = user.0;
    match identity.role {
        Role::Donor => Ok(state.store.donor_for_user(identity.user_id).await?.id),
        Role::Hospital => Ok(state.store.hospital_for_user(identity.user_id).await?.id),
    }
}

async fn list_appointments(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let id = party_id(&state, &user).await?;
    let appointments = match user.0.role {
        Role::Donor => state.store.appointments_for_donor(id).await?,
        Role::Hospital => state.store.appointments_for_hospital(id).await?,
    };
    Ok(HttpResponse::Ok().json(appointments))
}

/// Book an appointment
///
/// POST /api/v1/appointments
///
/// Request body:
/// ```json
/// {
///   "hospitalId": "uuid",
///   "scheduledAt": "2026-11-02T14:30:00Z",
///   "notes": "string"
/// }
/// ```
async fn create_appointment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateAppointmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Donor)?;
    req.validate()?;

    if req.scheduled_at <= chrono::Utc::now() {
        return Err(ApiError::BadRequest(
            "Appointments must be scheduled in the future".to_string(),
        ));
    }

    let donor = state.store.donor_for_user(user_id).await?;
    if !state.store.hospital_exists(req.hospital_id).await? {
        return Err(ApiError::NotFound(format!("Hospital {} not found", req.hospital_id)));
    }

    let appointment = state
        .store
        .create_appointment(donor.id, req.hospital_id, req.scheduled_at, req.notes.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(appointment))
}

async fn update_appointment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateAppointmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let appointment_id = path.into_inner();
    let id = party_id(&state, &user).await?;

    let appointment = state
        .store
        .update_appointment_status(appointment_id, id, req.status)
        .await?;

    tracing::info!("Appointment {} set to {:?}", appointment.id, appointment.status);

    Ok(HttpResponse::Ok().json(appointment))
}

async fn delete_appointment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.require(Role::Donor)?;
    let appointment_id = path.into_inner();

    let donor = state.store.donor_for_user(user_id).await?;
    if !state.store.delete_appointment(appointment_id, donor.id).await? {
        return Err(ApiError::NotFound(format!("Appointment {} not found", appointment_id)));
    }

    Ok(HttpResponse::Ok().json(DeletedResponse { deleted: true }))
}
