use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use thiserror::Error;

use crate::error::DataError;

/// Carry-vs-speed curve for one club, tabulated at scratch level.
///
/// Built from the document's `mph -> yards` object. Construction enforces the
/// interpolation invariant up front: numeric keys, no duplicate speeds, and
/// carry non-decreasing with speed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct CarryCurve {
    points: Vec<(f64, f64)>,
}

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("carry curve key '{0}' is not a number")]
    BadKey(String),

    #[error("carry curve tabulates {0} mph more than once")]
    DuplicateSpeed(f64),

    #[error("carry must be non-decreasing with speed (breaks at {0} mph)")]
    NotMonotonic(f64),
}

impl CarryCurve {
    pub fn from_points(mut points: Vec<(f64, f64)>) -> Result<Self, CurveError> {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in points.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if upper.0 == lower.0 {
                return Err(CurveError::DuplicateSpeed(upper.0));
            }
            if upper.1 < lower.1 {
                return Err(CurveError::NotMonotonic(upper.0));
            }
        }
        Ok(Self { points })
    }

    /// Tabulated `(speed mph, carry yards)` pairs, ascending by speed.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for CarryCurve {
    type Error = CurveError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut points = Vec::with_capacity(raw.len());
        for (speed, carry) in raw {
            let parsed: f64 = speed
                .trim()
                .parse()
                .map_err(|_| CurveError::BadKey(speed.clone()))?;
            points.push((parsed, carry));
        }
        Self::from_points(points)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubProfile {
    /// Display name, e.g. "7 Iron".
    pub name: String,
    /// Standard static loft in degrees.
    pub loft: f64,
    /// Scratch player's full swing speed in mph.
    pub swing_speed: f64,
    pub carry: CarryCurve,
}

/// Scratch player's impact characteristics for one club.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubMetrics {
    /// Degrees delivered at impact.
    pub dynamic_loft: f64,
    /// Rpm.
    pub spin_rate: f64,
    /// Degrees.
    pub launch_angle: f64,
}

/// Carry and spin of a theoretical zero-compression strike; the ratio's
/// zero-point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaselineData {
    pub carry: f64,
    pub spin: f64,
}

/// Smash factor (ball speed / swing speed) bounds, mishit to pure strike.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SmashFactorRange {
    pub low: f64,
    pub high: f64,
}

/// All four reference tables from one club's row, borrowed together.
#[derive(Debug, Clone, Copy)]
pub struct ClubRecord<'a> {
    pub key: &'a str,
    pub profile: &'a ClubProfile,
    pub metrics: &'a ClubMetrics,
    pub baseline: &'a BaselineData,
    pub smash: &'a SmashFactorRange,
}

/// The reference data document: four per-club tables sharing one key set.
///
/// Loaded once at startup and read-only afterwards. Constructed explicitly and
/// handed to the estimator, never ambient state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    club_data: HashMap<String, ClubProfile>,
    club_metrics: HashMap<String, ClubMetrics>,
    no_compression_data: HashMap<String, BaselineData>,
    smash_factors: HashMap<String, SmashFactorRange>,
}

impl ReferenceData {
    pub fn new(
        club_data: HashMap<String, ClubProfile>,
        club_metrics: HashMap<String, ClubMetrics>,
        no_compression_data: HashMap<String, BaselineData>,
        smash_factors: HashMap<String, SmashFactorRange>,
    ) -> Result<Self, DataError> {
        let data = Self {
            club_data,
            club_metrics,
            no_compression_data,
            smash_factors,
        };
        data.validate()?;
        Ok(data)
    }

    /// Cross-table key consistency: every club in `clubData` must appear in
    /// the other three tables.
    fn validate(&self) -> Result<(), DataError> {
        for (key, profile) in &self.club_data {
            if !self.club_metrics.contains_key(key) {
                return Err(DataError::InconsistentTables {
                    club: key.clone(),
                    table: "clubMetrics",
                });
            }
            if !self.no_compression_data.contains_key(key) {
                return Err(DataError::InconsistentTables {
                    club: key.clone(),
                    table: "noCompressionData",
                });
            }
            if !self.smash_factors.contains_key(key) {
                return Err(DataError::InconsistentTables {
                    club: key.clone(),
                    table: "smashFactors",
                });
            }
            if profile.carry.len() < 2 {
                log::warn!(
                    "[DATA] Club '{}' tabulates {} carry point(s); scratch carry will be unavailable",
                    key,
                    profile.carry.len()
                );
            }
        }
        Ok(())
    }

    pub fn club_count(&self) -> usize {
        self.club_data.len()
    }

    /// Look up one club across all four tables.
    pub fn club(&self, key: &str) -> Option<ClubRecord<'_>> {
        let (key, profile) = self.club_data.get_key_value(key)?;
        Some(ClubRecord {
            key: key.as_str(),
            profile,
            metrics: self.club_metrics.get(key)?,
            baseline: self.no_compression_data.get(key)?,
            smash: self.smash_factors.get(key)?,
        })
    }

    /// Clubs in bag order: scratch swing speed descending, then key.
    pub fn clubs(&self) -> Vec<(&str, &ClubProfile)> {
        let mut clubs: Vec<(&str, &ClubProfile)> = self
            .club_data
            .iter()
            .map(|(key, profile)| (key.as_str(), profile))
            .collect();
        clubs.sort_by(|a, b| {
            b.1.swing_speed
                .total_cmp(&a.1.swing_speed)
                .then_with(|| a.0.cmp(b.0))
        });
        clubs
    }
}

/// Load and validate the reference document from a filesystem path or an
/// `http(s)://` URL. One-time startup fetch; the caller installs the result
/// behind the engine's readiness gate.
pub async fn load_reference(source: &str) -> Result<ReferenceData, DataError> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        log::info!("[DATA] Fetching reference data from {}", source);
        reqwest::get(source)
            .await?
            .error_for_status()?
            .text()
            .await?
    } else {
        log::info!("[DATA] Reading reference data from {}", source);
        tokio::fs::read_to_string(source).await?
    };

    let data: ReferenceData = serde_json::from_str(&text)?;
    data.validate()?;
    log::info!("[DATA] Loaded reference tables for {} clubs", data.club_count());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_DOC: &str = r#"{
        "clubData": {
            "7iron": {
                "name": "7 Iron",
                "loft": 34.0,
                "swingSpeed": 90,
                "carry": { "60": 84, "90": 142, "130": 189 }
            }
        },
        "clubMetrics": {
            "7iron": { "dynamicLoft": 26.5, "spinRate": 7097, "launchAngle": 16.3 }
        },
        "noCompressionData": {
            "7iron": { "carry": 85, "spin": 9000 }
        },
        "smashFactors": {
            "7iron": { "low": 1.08, "high": 1.33 }
        }
    }"#;

    #[test]
    fn parses_minimal_document() {
        let data: ReferenceData = serde_json::from_str(MINIMAL_DOC).unwrap();
        let record = data.club("7iron").unwrap();
        assert_eq!(record.profile.name, "7 Iron");
        assert_eq!(record.profile.carry.points(), &[(60.0, 84.0), (90.0, 142.0), (130.0, 189.0)]);
        assert_eq!(record.baseline.carry, 85.0);
        assert_eq!(record.smash.high, 1.33);
        assert!(data.club("putter").is_none());
    }

    #[test]
    fn curve_rejects_non_numeric_key() {
        let raw: BTreeMap<String, f64> = [("fast".to_string(), 200.0)].into_iter().collect();
        assert_eq!(
            CarryCurve::try_from(raw),
            Err(CurveError::BadKey("fast".to_string()))
        );
    }

    #[test]
    fn curve_rejects_duplicate_speed() {
        // "90" and "90.0" are distinct strings but the same speed.
        let raw: BTreeMap<String, f64> = [
            ("90".to_string(), 142.0),
            ("90.0".to_string(), 143.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(CarryCurve::try_from(raw), Err(CurveError::DuplicateSpeed(90.0)));
    }

    #[test]
    fn curve_rejects_decreasing_carry() {
        let result = CarryCurve::from_points(vec![(60.0, 120.0), (70.0, 110.0)]);
        assert_eq!(result, Err(CurveError::NotMonotonic(70.0)));
    }

    #[test]
    fn curve_sorts_points_ascending() {
        let curve =
            CarryCurve::from_points(vec![(130.0, 189.0), (60.0, 84.0), (90.0, 142.0)]).unwrap();
        assert_eq!(curve.points(), &[(60.0, 84.0), (90.0, 142.0), (130.0, 189.0)]);
    }

    #[test]
    fn validate_flags_missing_table_row() {
        let mut doc: serde_json::Value = serde_json::from_str(MINIMAL_DOC).unwrap();
        doc["smashFactors"] = serde_json::json!({});
        let data: Result<ReferenceData, _> = serde_json::from_value(doc);
        let data = data.unwrap();
        match data.validate() {
            Err(DataError::InconsistentTables { club, table }) => {
                assert_eq!(club, "7iron");
                assert_eq!(table, "smashFactors");
            }
            other => panic!("expected InconsistentTables, got {:?}", other),
        }
    }

    #[test]
    fn clubs_are_listed_in_bag_order() {
        let mut doc: serde_json::Value = serde_json::from_str(MINIMAL_DOC).unwrap();
        doc["clubData"]["driver"] = serde_json::json!({
            "name": "Driver",
            "loft": 10.5,
            "swingSpeed": 113,
            "carry": { "90": 211, "130": 310 }
        });
        doc["clubMetrics"]["driver"] =
            serde_json::json!({ "dynamicLoft": 12.9, "spinRate": 2686, "launchAngle": 10.9 });
        doc["noCompressionData"]["driver"] = serde_json::json!({ "carry": 150, "spin": 4500 });
        doc["smashFactors"]["driver"] = serde_json::json!({ "low": 1.30, "high": 1.50 });

        let data: ReferenceData = serde_json::from_value(doc).unwrap();
        let keys: Vec<&str> = data.clubs().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["driver", "7iron"]);
    }
}
