// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A mosque record as returned by the MAWAQIT directory search endpoints.
///
/// Both the neighborhood search and the keyword search return arrays of
/// these. Fields beyond `uuid` are frequently null depending on which
/// search produced the record, so everything else is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mosque {
    pub uuid: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub label: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Distance in meters from the searched coordinates; only present on
    /// neighborhood search results.
    pub proximity: Option<f64>,
    pub localisation: Option<String>,
    pub jumua: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "associationName")]
    pub association_name: Option<String>,
}

impl Mosque {
    /// Human-readable name for log lines and pick lists.
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_neighborhood_result() {
        let json = r#"{
            "uuid": "a1b2c3d4-0000-1111-2222-333344445555",
            "name": "Grande Mosquee",
            "slug": "grande-mosquee-de-paris",
            "label": "Grande Mosquee de Paris",
            "latitude": 48.842,
            "longitude": 2.355,
            "proximity": 1240.5,
            "localisation": "2bis Place du Puits de l'Ermite, 75005 Paris",
            "jumua": "13:30",
            "associationName": "Societe des Habous"
        }"#;

        let mosque: Mosque = serde_json::from_str(json).expect("valid mosque JSON");
        assert_eq!(mosque.uuid, "a1b2c3d4-0000-1111-2222-333344445555");
        assert_eq!(mosque.display_name(), "Grande Mosquee de Paris");
        assert_eq!(mosque.proximity, Some(1240.5));
        assert_eq!(mosque.association_name.as_deref(), Some("Societe des Habous"));
    }

    #[test]
    fn test_display_name_falls_back_to_uuid() {
        let mosque: Mosque =
            serde_json::from_str(r#"{"uuid": "only-a-uuid"}"#).expect("minimal mosque JSON");
        assert_eq!(mosque.display_name(), "only-a-uuid");
    }
}
