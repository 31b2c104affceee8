//! Bloodlink - blood donation coordination service
//!
//! Hospitals post urgency levels and inventory; donors find nearby requests
//! and book appointments. The core of the crate is the proximity matcher that
//! ranks eligible donors around a hospital by great-circle distance.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_miles, match_donors, BloodTypeFilter};
pub use error::ApiError;
pub use models::{BloodType, Coordinate, DonorCandidate, MatchResult, NearbyDonorsResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let here = Coordinate::new(33.7490, -84.3880);
        assert_eq!(haversine_miles(here, here), 0.0);
        assert!(match_donors(here, vec![], None, BloodTypeFilter::All).is_empty());
    }
}
