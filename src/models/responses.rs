use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::domain::{HospitalOrigin, InventoryItem, MatchResult, NearbyRequest};

/// Response for the nearby donors endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyDonorsResponse {
    pub hospital: HospitalOrigin,
    pub donors: Vec<MatchResult>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    /// The filter as requested, `all` when unfiltered
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(rename = "maxDistance")]
    pub max_distance: u32,
}

/// Response for the nearby requests endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyRequestsResponse {
    pub requests: Vec<NearbyRequest>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    #[serde(rename = "maxDistance")]
    pub max_distance: u32,
}

/// Inventory listing with a per-blood-type unit summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResponse {
    pub items: Vec<InventoryItem>,
    /// Units keyed by blood type field key (`a_plus`, ...); missing types are 0
    pub summary: BTreeMap<String, i32>,
}

impl InventoryResponse {
    pub fn from_items(items: Vec<InventoryItem>) -> Self {
        let mut summary: BTreeMap<String, i32> = crate::models::BloodType::ALL
            .iter()
            .map(|bt| (bt.key().to_string(), 0))
            .collect();
        for item in &items {
            summary.insert(item.blood_type.key().to_string(), item.units);
        }
        Self { items, summary }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for deletions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}
