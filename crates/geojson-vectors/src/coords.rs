//! Longitude convention handling.

/// Fold a longitude from the `[0, 360)` convention into `[-180, 180)`.
///
/// With `is_360` false the value is returned unchanged. Values already inside
/// `[-180, 180)` are returned as-is so no precision is lost to the round trip
/// through `+180`/`-180`. NaN stays NaN.
pub fn normalize_longitude(lon: f64, is_360: bool) -> f64 {
    if !is_360 || (-180.0..180.0).contains(&lon) {
        return lon;
    }

    let folded = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative remainders
    if folded >= 180.0 {
        folded - 360.0
    } else {
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_passes_through() {
        assert_eq!(normalize_longitude(350.0, false), 350.0);
        assert_eq!(normalize_longitude(-720.5, false), -720.5);
    }

    #[test]
    fn test_fold_360_range() {
        assert_eq!(normalize_longitude(10.0, true), 10.0);
        assert_eq!(normalize_longitude(350.0, true), -10.0);
        assert_eq!(normalize_longitude(170.0, true), 170.0);
        assert_eq!(normalize_longitude(190.0, true), -170.0);
        assert_eq!(normalize_longitude(180.0, true), -180.0);
        assert_eq!(normalize_longitude(0.0, true), 0.0);
    }

    #[test]
    fn test_fold_out_of_range_values() {
        assert_eq!(normalize_longitude(360.0, true), 0.0);
        assert_eq!(normalize_longitude(540.0, true), -180.0);
        assert_eq!(normalize_longitude(-190.0, true), 170.0);
        assert_eq!(normalize_longitude(-540.0, true), -180.0);
    }

    #[test]
    fn test_fractional_precision_preserved() {
        assert_eq!(normalize_longitude(0.1, true), 0.1);
        assert_eq!(normalize_longitude(-179.999, true), -179.999);
        assert!((normalize_longitude(359.75, true) - (-0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let mut lon = -1000.0;
        while lon < 1000.0 {
            let once = normalize_longitude(lon, true);
            assert!((-180.0..180.0).contains(&once), "{} folded to {}", lon, once);
            assert_eq!(normalize_longitude(once, true), once);
            lon += 7.3;
        }
    }

    #[test]
    fn test_nan_propagates() {
        assert!(normalize_longitude(f64::NAN, true).is_nan());
    }
}
