//! Frontend Models
//!
//! Data structures matching the REST backend's JSON payloads, plus the two
//! domain primitives every workflow leans on: `ChildId` and `Coordinate`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized child identifier.
///
/// IDs arrive as numbers from the API and as strings from `<select>` values
/// and the storage slot. They are parsed into this newtype once at the
/// boundary and compared strictly everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(pub u32);

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for ChildId {
    fn from(raw: u32) -> Self {
        ChildId(raw)
    }
}

impl FromStr for ChildId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(ChildId)
    }
}

/// Default map center when nothing better is known (Cairo).
pub const DEFAULT_CENTER: Coordinate = Coordinate { lat: 30.0444, lng: 31.2357 };

/// A validated (latitude, longitude) pair.
///
/// The only constructor rejects non-finite values and out-of-range axes, so
/// holding a `Coordinate` means the pair is usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng)
        {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// Parent contact entry attached to a child record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentPhone {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Child record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: ChildId,
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub class_id: Option<u32>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub academic_year_id: Option<u32>,
    #[serde(default)]
    pub academic_year_name: Option<String>,
    #[serde(default)]
    pub parent_phones: Vec<ParentPhone>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Child {
    /// Last known home location, if the stored pair is valid.
    pub fn location(&self) -> Option<Coordinate> {
        Coordinate::new(self.latitude?, self.longitude?)
    }
}

/// Payload for creating or updating a child.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildUpsert {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year_id: Option<u32>,
    pub parent_phones: Vec<ParentPhone>,
}

/// Visit record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: u32,
    pub visit_date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub visit_latitude: Option<f64>,
    #[serde(default)]
    pub visit_longitude: Option<f64>,
    #[serde(default)]
    pub location_saved_to_child: bool,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Body for `POST /visits`.
///
/// Coordinate fields are omitted entirely on location-less submissions,
/// matching the wire shape the backend already accepts from the reference
/// client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVisit {
    pub child_id: ChildId,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_longitude: Option<f64>,
    pub save_location_to_child: bool,
}

/// Class record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoom {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Academic year record (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Name + description body shared by class and academic-year upserts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedUpsert {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecentVisit {
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub visit_date: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Dashboard counters (matches backend)
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_children: u32,
    #[serde(default)]
    pub total_visits: u32,
    #[serde(default)]
    pub total_users: u32,
    #[serde(default)]
    pub recent_visits: Vec<RecentVisit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accepts_valid_range() {
        assert!(Coordinate::new(30.0444, 31.2357).is_some());
        assert!(Coordinate::new(-90.0, -180.0).is_some());
        assert!(Coordinate::new(90.0, 180.0).is_some());
        assert!(Coordinate::new(0.0, 0.0).is_some());
    }

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(90.001, 0.0).is_none());
        assert!(Coordinate::new(-90.001, 0.0).is_none());
        assert!(Coordinate::new(0.0, 180.001).is_none());
        assert!(Coordinate::new(0.0, -180.001).is_none());
    }

    #[test]
    fn coordinate_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::NAN).is_none());
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_none());
        assert!(Coordinate::new(0.0, f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn child_id_parses_string_forms() {
        assert_eq!("7".parse::<ChildId>().unwrap(), ChildId(7));
        assert_eq!(" 42 ".parse::<ChildId>().unwrap(), ChildId(42));
        assert!("seven".parse::<ChildId>().is_err());
        assert!("-3".parse::<ChildId>().is_err());
    }

    #[test]
    fn child_location_requires_both_axes_valid() {
        let mut child = Child {
            id: ChildId(1),
            full_name: "A".into(),
            date_of_birth: None,
            address: None,
            latitude: Some(30.0),
            longitude: Some(31.0),
            image_url: None,
            class_id: None,
            class_name: None,
            academic_year_id: None,
            academic_year_name: None,
            parent_phones: Vec::new(),
            visits: Vec::new(),
        };
        assert_eq!(child.location(), Coordinate::new(30.0, 31.0));

        child.longitude = None;
        assert!(child.location().is_none());

        child.longitude = Some(999.0);
        assert!(child.location().is_none());
    }

    #[test]
    fn new_visit_omits_absent_coordinates() {
        let body = NewVisit {
            child_id: ChildId(5),
            notes: "checked in".into(),
            visit_latitude: None,
            visit_longitude: None,
            save_location_to_child: false,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("visitLatitude"));
        assert!(!json.contains("visitLongitude"));
        assert!(json.contains("\"childId\":5"));
    }
}
