//! Map marker projection

use crate::record::{GeoPoint, HazardId, HazardRecord};
use crate::snapshot::HazardSnapshot;
use serde::{Deserialize, Serialize};

/// Marker color, keyed off the hazard's repair status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    /// Resolved hazard
    Green,
    /// Anything not yet resolved
    Red,
}

/// Visual description of one hazard for the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub hazard_id: HazardId,
    pub position: GeoPoint,
    pub color: ColorClass,
    /// Marker title, the hazard's address
    pub title: String,
}

/// Project a single record onto a marker
pub fn project(record: &HazardRecord) -> Marker {
    Marker {
        hazard_id: record.id.clone(),
        position: record.location,
        color: if record.status.is_resolved() {
            ColorClass::Green
        } else {
            ColorClass::Red
        },
        title: record.address.clone(),
    }
}

/// Project every record, in snapshot order
pub fn project_all(snapshot: &HazardSnapshot) -> Vec<Marker> {
    snapshot.iter().map(project).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HazardStatus;

    fn record(id: &str, status: Option<&str>) -> HazardRecord {
        HazardRecord {
            id: HazardId::from(id),
            location: GeoPoint::new(-26.2041, 28.0473).unwrap(),
            address: format!("{id} Street"),
            status: HazardStatus::from_feed(status),
        }
    }

    #[test]
    fn test_color_by_status() {
        assert_eq!(project(&record("a", Some("Fixed"))).color, ColorClass::Green);
        assert_eq!(project(&record("b", Some("fIxEd"))).color, ColorClass::Green);
        assert_eq!(project(&record("c", Some("unfixed"))).color, ColorClass::Red);
        assert_eq!(project(&record("d", Some("in progress"))).color, ColorClass::Red);
        assert_eq!(project(&record("e", None)).color, ColorClass::Red);
    }

    #[test]
    fn test_marker_carries_position_and_title() {
        let marker = project(&record("a", None));
        assert_eq!(marker.hazard_id.as_str(), "a");
        assert_eq!(marker.position.latitude, -26.2041);
        assert_eq!(marker.title, "a Street");
    }

    #[test]
    fn test_project_all_keeps_order() {
        let snapshot = HazardSnapshot::from_records(vec![
            record("z", None),
            record("a", Some("fixed")),
            record("m", None),
        ]);

        let markers = project_all(&snapshot);
        let ids: Vec<&str> = markers.iter().map(|m| m.hazard_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(markers[1].color, ColorClass::Green);

        assert!(project_all(&HazardSnapshot::default()).is_empty());
    }
}
