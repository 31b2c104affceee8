// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Appointment, AppointmentStatus, BloodType, Coordinate, Donor, DonorCandidate,
    EligibilityStatus, Hospital, HospitalOrigin, InventoryItem, MatchResult, NearbyRequest,
    OpenRequest, UnknownBloodType, UrgencyLevel,
};
pub use requests::{
    CreateAppointmentRequest, NearbyDonorsQuery, NearbyRequestsQuery, UpdateAppointmentRequest,
    UpdateInventoryRequest, UpdateLocationRequest, UpdateUrgencyRequest,
};
pub use responses::{
    DeletedResponse, ErrorResponse, HealthResponse, InventoryResponse, NearbyDonorsResponse,
    NearbyRequestsResponse,
};
