use std::fmt;
use std::str::FromStr;

use crate::models::{BloodType, UnknownBloodType};

/// Sentinel accepted in place of a blood type to disable filtering
pub const ALL_BLOOD_TYPES: &str = "all";

/// Optional exact-match restriction on donor blood type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BloodTypeFilter {
    #[default]
    All,
    Only(BloodType),
}

impl BloodTypeFilter {
    /// Parse an optional request parameter; absent, empty or `all` disables filtering
    pub fn from_param(param: Option<&str>) -> Result<Self, UnknownBloodType> {
        match param.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(s) => s.parse(),
        }
    }

    #[inline]
    pub fn admits(&self, blood_type: BloodType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == blood_type,
        }
    }

    /// The concrete type to push down into a store query, if any
    pub fn blood_type(&self) -> Option<BloodType> {
        match self {
            Self::All => None,
            Self::Only(bt) => Some(*bt),
        }
    }
}

impl FromStr for BloodTypeFilter {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_BLOOD_TYPES) {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl fmt::Display for BloodTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_BLOOD_TYPES),
            Self::Only(bt) => write!(f, "{}", bt),
        }
    }
}

/// Inclusive radius check; NaN distances never pass
#[inline]
pub fn within_radius(distance_miles: f64, max_distance_miles: f64) -> bool {
    distance_miles <= max_distance_miles
}
