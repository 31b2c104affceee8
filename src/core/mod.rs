// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;

pub use distance::{haversine_miles, round_to_tenth, EARTH_RADIUS_MILES};
pub use filters::{within_radius, BloodTypeFilter};
pub use matcher::{match_donors, nearby_requests, DEFAULT_MAX_DISTANCE_MILES};
