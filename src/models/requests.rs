use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{AppointmentStatus, BloodType};

/// Query string for `GET /hospitals/nearby-donors`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NearbyDonorsQuery {
    /// A blood type label, or `all`
    #[serde(rename = "bloodType")]
    pub blood_type: Option<String>,
    #[validate(range(min = 1))]
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<u32>,
}

/// Query string for `GET /donors/nearby-requests`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NearbyRequestsQuery {
    #[validate(range(min = 1))]
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<u32>,
}

/// Location update; either an address to geocode or explicit coordinates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_location_source"))]
pub struct UpdateLocationRequest {
    #[validate(length(min = 3, max = 500))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

fn validate_location_source(req: &UpdateLocationRequest) -> Result<(), ValidationError> {
    let has_coordinates = req.latitude.is_some() && req.longitude.is_some();
    let has_partial = req.latitude.is_some() != req.longitude.is_some();
    if has_partial || (!has_coordinates && req.address.is_none()) {
        let mut err = ValidationError::new("location_source");
        err.message = Some("provide an address or both latitude and longitude".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUrgencyRequest {
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    #[validate(range(min = 1, max = 5))]
    pub level: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateInventoryRequest {
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    #[validate(range(min = 0))]
    pub units: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    #[serde(rename = "hospitalId")]
    pub hospital_id: uuid::Uuid,
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub status: AppointmentStatus,
}
