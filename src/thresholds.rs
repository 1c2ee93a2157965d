//! Operational limits used by the decision engine.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

/// The numeric limits checked by [`evaluate_with`](crate::evaluate_with).
///
/// `Default` gives the standard operational ranges. Every field can be overridden from a JSON
/// document, fields that are left out keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Precipitation rate above which seeding is denied (mm/h).
    pub max_precip_rate_mm_h: f64,
    /// Wind speed above which seeding is denied (m/s).
    pub max_wind_speed_m_s: f64,
    /// Reflectivity below which seeding is denied (dBZ).
    pub min_reflectivity_dbz: f64,

    /// Lowest cloud base a drone can work (m).
    pub drone_min_cloud_base_m: f64,
    /// Highest cloud base a drone can work (m).
    pub drone_max_cloud_base_m: f64,
    /// Highest cloud top a drone can work (m).
    pub drone_max_cloud_top_m: f64,
    /// Minimum relative humidity for drone seeding (%).
    pub drone_min_rel_humidity_pct: f64,

    /// Lowest cloud top for aircraft seeding (m).
    pub aircraft_min_cloud_top_m: f64,
    /// Highest cloud top for aircraft seeding (m).
    pub aircraft_max_cloud_top_m: f64,
    /// Cloud top must be at least this cold for AgI seeding (C).
    pub aircraft_max_cloud_top_temp_c: f64,
    /// Minimum relative humidity for aircraft seeding (%).
    pub aircraft_min_rel_humidity_pct: f64,

    /// Lower end of the moderate precipitation band (mm/h). The upper end is
    /// `max_precip_rate_mm_h`.
    pub moderate_precip_rate_mm_h: f64,
    /// Upper end of the marginal reflectivity band (dBZ). The lower end is
    /// `min_reflectivity_dbz`.
    pub marginal_reflectivity_dbz: f64,
    /// Precipitable water below which the column is considered dry (mm).
    pub low_precipitable_water_mm: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            max_precip_rate_mm_h: 20.0,
            max_wind_speed_m_s: 15.0,
            min_reflectivity_dbz: 10.0,

            drone_min_cloud_base_m: 300.0,
            drone_max_cloud_base_m: 2800.0,
            drone_max_cloud_top_m: 4000.0,
            drone_min_rel_humidity_pct: 60.0,

            aircraft_min_cloud_top_m: 3500.0,
            aircraft_max_cloud_top_m: 9000.0,
            aircraft_max_cloud_top_temp_c: -5.0,
            aircraft_min_rel_humidity_pct: 40.0,

            moderate_precip_rate_mm_h: 10.0,
            marginal_reflectivity_dbz: 15.0,
            low_precipitable_water_mm: 10.0,
        }
    }
}

impl Thresholds {
    /// Read thresholds from a JSON document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::Thresholds;
    ///
    /// let json = r#"{ "max_wind_speed_m_s": 12.0 }"#;
    /// let thresholds = Thresholds::from_json_reader(json.as_bytes()).unwrap();
    ///
    /// assert_eq!(thresholds.max_wind_speed_m_s, 12.0);
    /// assert_eq!(thresholds.max_precip_rate_mm_h, 20.0);
    /// ```
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let thresholds = serde_json::from_reader(reader)?;
        tracing::debug!(?thresholds, "loaded thresholds");
        Ok(thresholds)
    }

    /// Read thresholds from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path.as_ref())?;
        Self::from_json_reader(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let thresholds = Thresholds::from_json_reader("{}".as_bytes()).unwrap();
        assert_eq!(thresholds, Thresholds::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"drone_min_cloud_base_m": 500.0, "low_precipitable_water_mm": 8.0}"#;
        let thresholds = Thresholds::from_json_reader(json.as_bytes()).unwrap();

        assert_eq!(thresholds.drone_min_cloud_base_m, 500.0);
        assert_eq!(thresholds.low_precipitable_water_mm, 8.0);
        assert_eq!(thresholds.drone_max_cloud_base_m, 2800.0);
        assert_eq!(thresholds.aircraft_max_cloud_top_temp_c, -5.0);
    }

    #[test]
    fn test_malformed_document() {
        let err = Thresholds::from_json_reader("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, crate::SeedingError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Thresholds::load("test_data/does_not_exist.json").unwrap_err();
        assert!(matches!(err, crate::SeedingError::Io(_)));
    }
}
