use std::f64::consts::PI;

use crate::nmea_content::GllRecord;

/// Degrees to radians conversion factor
const DTOR: f64 = PI / 180.0;

/// Average radius for spherical Earth approximation in meters
pub const SPHERICAL_R: f64 = 6371e3;

/// Returns the great-circle distance in meters between two GLL fixes.
///
/// Uses the haversine formula on a spherical Earth of radius [`SPHERICAL_R`].
/// Returns `NaN` unless both fixes carry a latitude and a longitude.
///
/// # Example
///
/// ```rust
/// use nmea0183_epoch::{GllRecord, Parsable, distance};
///
/// let a = GllRecord::parse("$GPGLL,4807.038,N,01131.000,E,123519,A*00").unwrap();
/// let b = GllRecord::parse("$GPGLL,4807.038,N,01132.000,E,123520,A*00").unwrap();
///
/// let meters = distance(&a, &b);
/// assert!((meters - 1237.2).abs() < 1.0);
/// assert!(distance(&a, &GllRecord::default()).is_nan());
/// ```
pub fn distance(a: &GllRecord, b: &GllRecord) -> f64 {
    match (a.decimal_position(), b.decimal_position()) {
        (Some((lat0, lon0)), Some((lat1, lon1))) => haversine(lat0, lon0, lat1, lon1),
        _ => f64::NAN,
    }
}

/// Great-circle distance in meters between two points given in degrees.
pub fn haversine(lat0: f64, lon0: f64, lat1: f64, lon1: f64) -> f64 {
    let lat0_rad = lat0 * DTOR;
    let lat1_rad = lat1 * DTOR;
    let dlat = (lat1 - lat0) * DTOR;
    let dlon = (lon1 - lon0) * DTOR;

    let h = (dlat / 2.0).sin().powi(2)
        + lat0_rad.cos() * lat1_rad.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * SPHERICAL_R * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parsable;

    fn fix(sentence: &str) -> GllRecord {
        GllRecord::parse(sentence).unwrap()
    }

    #[test]
    fn test_identical_fixes() {
        let a = fix("$GPGLL,4916.45,N,12311.12,W,225444,A*31");
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let cases = [
            (
                "$GPGLL,4916.45,N,12311.12,W,225444,A*00",
                "$GPGLL,4807.038,N,01131.000,E,123519,A*00",
            ),
            ("$GPGLL,0000.01,S,00000.01,W,000000,A*00", "$GPGLL,0000.01,N,17959.99,E,000000,A*00"),
            ("$GPGLL,8959.99,N,00100.00,E,000000,A*00", "$GPGLL,8959.99,N,18000.00,W,000000,A*00"),
        ];

        for (a, b) in cases {
            let (a, b) = (fix(a), fix(b));
            let ab = distance(&a, &b);
            assert!(ab.is_finite() && ab > 0.0, "Failed: {ab}");
            assert_eq!(ab, distance(&b, &a));
        }
    }

    #[test]
    fn test_known_distance() {
        // One degree of latitude along a meridian.
        let meters = haversine(10.0, 20.0, 11.0, 20.0);
        assert!((meters - SPHERICAL_R * DTOR).abs() < 1e-6);

        // Half way around the equator.
        let meters = haversine(0.0, 0.0, 0.0, 180.0);
        assert!((meters - SPHERICAL_R * PI).abs() < 1e-6);
    }

    #[test]
    fn test_missing_coordinate() {
        let full = fix("$GPGLL,4916.45,N,12311.12,W,225444,A*31");
        let cases = [
            "$GPGLL,,N,12311.12,W,225444,A*00",
            "$GPGLL,4916.45,N,,W,225444,A*00",
            "$GPGLL,,,,,225444,V*00",
        ];

        for input in cases {
            let partial = fix(input);
            assert!(distance(&full, &partial).is_nan(), "Failed: {input:?}");
            assert!(distance(&partial, &full).is_nan(), "Failed: {input:?}");
        }
    }
}
