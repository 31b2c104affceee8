use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A point on the earth's surface, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a coordinate from nullable columns; `None` unless both are set
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self { latitude, longitude }),
            _ => None,
        }
    }
}

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blood_type")]
pub enum BloodType {
    #[serde(rename = "A+")]
    #[sqlx(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    #[sqlx(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    #[sqlx(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    #[sqlx(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    #[sqlx(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    #[sqlx(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    #[sqlx(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    #[sqlx(rename = "O-")]
    ONegative,
}

/// Display label and field key for every blood type.
///
/// Inventory summaries are keyed by the second column; both columns are
/// accepted when parsing.
static BLOOD_TYPE_TABLE: [(BloodType, &str, &str); 8] = [
    (BloodType::APositive, "A+", "a_plus"),
    (BloodType::ANegative, "A-", "a_minus"),
    (BloodType::BPositive, "B+", "b_plus"),
    (BloodType::BNegative, "B-", "b_minus"),
    (BloodType::AbPositive, "AB+", "ab_plus"),
    (BloodType::AbNegative, "AB-", "ab_minus"),
    (BloodType::OPositive, "O+", "o_plus"),
    (BloodType::ONegative, "O-", "o_minus"),
];

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    fn row(self) -> &'static (BloodType, &'static str, &'static str) {
        // every variant has exactly one row
        &BLOOD_TYPE_TABLE[self as usize]
    }

    /// Display label, e.g. `AB+`
    pub fn label(self) -> &'static str {
        self.row().1
    }

    /// Field key, e.g. `ab_plus`
    pub fn key(self) -> &'static str {
        self.row().2
    }

    pub fn from_label(label: &str) -> Option<Self> {
        BLOOD_TYPE_TABLE
            .iter()
            .find(|(_, l, _)| l.eq_ignore_ascii_case(label))
            .map(|(bt, _, _)| *bt)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        BLOOD_TYPE_TABLE
            .iter()
            .find(|(_, _, k)| k.eq_ignore_ascii_case(key))
            .map(|(bt, _, _)| *bt)
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBloodType(pub String);

impl fmt::Display for UnknownBloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown blood type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBloodType {}

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_label(s)
            .or_else(|| Self::from_key(s))
            .ok_or_else(|| UnknownBloodType(s.to_string()))
    }
}

/// Donor eligibility; only `Eligible` donors are offered to hospitals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "eligibility_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EligibilityStatus {
    Eligible,
    Deferred,
    Ineligible,
}

/// Snapshot of a donor as handed to the proximity matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorCandidate {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "eligibilityStatus")]
    pub eligibility_status: EligibilityStatus,
}

impl DonorCandidate {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// The hospital a matching request originates from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalOrigin {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl HospitalOrigin {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A donor within range, with distance in miles rounded to one decimal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub donor: DonorCandidate,
    pub distance: f64,
}

/// Hospital profile row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Hospital {
    /// Origin for proximity matching, if the hospital has set its location
    pub fn origin(&self) -> Option<HospitalOrigin> {
        Coordinate::from_parts(self.latitude, self.longitude).map(|c| HospitalOrigin {
            id: self.id,
            name: self.name.clone(),
            latitude: c.latitude,
            longitude: c.longitude,
        })
    }
}

/// Donor profile row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    #[serde(rename = "eligibilityStatus")]
    pub eligibility_status: EligibilityStatus,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "lastDonationDate")]
    pub last_donation_date: Option<chrono::NaiveDate>,
}

impl Donor {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

/// Hospital-declared need for one blood type, 1 (low) to 5 (critical)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgencyLevel {
    #[serde(rename = "hospitalId")]
    pub hospital_id: Uuid,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    pub level: i16,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Units of one blood type held by a hospital
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "hospitalId")]
    pub hospital_id: Uuid,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    pub units: i32,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A hospital asking for a blood type, as seen by a donor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRequest {
    #[serde(rename = "hospitalId")]
    pub hospital_id: Uuid,
    #[serde(rename = "hospitalName")]
    pub hospital_name: String,
    #[serde(rename = "bloodType")]
    pub blood_type: BloodType,
    #[serde(rename = "urgencyLevel")]
    pub urgency_level: i16,
    pub latitude: f64,
    pub longitude: f64,
}

impl OpenRequest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// An open request within range of the donor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyRequest {
    #[serde(flatten)]
    pub request: OpenRequest,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    #[serde(rename = "donorId")]
    pub donor_id: Uuid,
    #[serde(rename = "hospitalId")]
    pub hospital_id: Uuid,
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_type_table_order_matches_variants() {
        for bt in BloodType::ALL {
            assert_eq!(BLOOD_TYPE_TABLE[bt as usize].0, bt);
        }
    }

    #[test]
    fn test_blood_type_parses_label_and_key() {
        assert_eq!("AB+".parse::<BloodType>(), Ok(BloodType::AbPositive));
        assert_eq!("ab_plus".parse::<BloodType>(), Ok(BloodType::AbPositive));
        assert_eq!("o-".parse::<BloodType>(), Ok(BloodType::ONegative));
        assert_eq!(BloodType::BNegative.key(), "b_minus");
        assert!("C+".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_blood_type_serde_uses_label() {
        let json = serde_json::to_string(&BloodType::OPositive).unwrap();
        assert_eq!(json, "\"O+\"");
        let parsed: BloodType = serde_json::from_str("\"A-\"").unwrap();
        assert_eq!(parsed, BloodType::ANegative);
    }

    #[test]
    fn test_hospital_origin_requires_both_coordinates() {
        let mut hospital = Hospital {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Grady Memorial".to_string(),
            address: None,
            latitude: Some(33.7490),
            longitude: None,
        };
        assert!(hospital.origin().is_none());

        hospital.longitude = Some(-84.3880);
        let origin = hospital.origin().unwrap();
        assert_eq!(origin.name, "Grady Memorial");
        assert_eq!(origin.coordinate(), Coordinate::new(33.7490, -84.3880));
    }

    #[test]
    fn test_match_result_flattens_candidate() {
        let result = MatchResult {
            donor: DonorCandidate {
                id: Uuid::nil(),
                name: "Dana".to_string(),
                blood_type: BloodType::OPositive,
                latitude: 1.0,
                longitude: 2.0,
                eligibility_status: EligibilityStatus::Eligible,
            },
            distance: 1.5,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["bloodType"], "O+");
        assert_eq!(value["eligibilityStatus"], "eligible");
        assert_eq!(value["distance"], 1.5);
    }
}
