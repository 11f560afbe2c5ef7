//! # Pile Geometry Utilities
//!
//! Cross-section quantities for circular piles, derived from the diameter.

use crate::errors::{CalcError, CalcResult};

/// Pile tip (base) area in m2, Ab = pi * d^2 / 4.
pub fn tip_area_m2(diameter_m: f64) -> CalcResult<f64> {
    check_diameter(diameter_m)?;
    Ok(std::f64::consts::PI * diameter_m * diameter_m / 4.0)
}

/// Pile shaft perimeter in m, P = pi * d.
pub fn perimeter_m(diameter_m: f64) -> CalcResult<f64> {
    check_diameter(diameter_m)?;
    Ok(std::f64::consts::PI * diameter_m)
}

fn check_diameter(diameter_m: f64) -> CalcResult<()> {
    if diameter_m <= 0.0 {
        return Err(CalcError::invalid_input(
            "diameter_m",
            diameter_m.to_string(),
            "Pile diameter must be positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_area() {
        // Ab(0.4) = pi * 0.16 / 4 = 0.12566...
        let ab = tip_area_m2(0.4).unwrap();
        assert!((ab - 0.125_663_706).abs() < 1e-9);
    }

    #[test]
    fn test_perimeter() {
        let p = perimeter_m(0.4).unwrap();
        assert!((p - 1.256_637_061).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_diameter() {
        assert!(tip_area_m2(0.0).is_err());
        assert!(tip_area_m2(-0.3).is_err());
        assert!(perimeter_m(0.0).is_err());
        assert!(perimeter_m(-1.0).is_err());
    }
}
