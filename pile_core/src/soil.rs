//! # Soil Stratigraphy Model
//!
//! Soil layer definitions and the Decourt-Quaresma tip coefficient table.
//!
//! A layered profile is an ordered `Vec<SoilLayer>`, top to bottom and
//! contiguous. Each layer carries the parameters of both capacity methods
//! as optional fields; which fields are mandatory depends on the layer's
//! behavior and on the method being run, and is checked eagerly by
//! [`SoilLayer::validate_for_method`] before any computation starts.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::soil::{SoilBehavior, SoilLayer};
//!
//! // 10 m of clay with NSPT 10 (Decourt-Quaresma parameters)
//! let layer = SoilLayer::clay(10.0, "clay").with_nspt(10.0);
//! assert_eq!(layer.soil_behavior, SoilBehavior::Clay);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::piles::CapacityMethod;

/// Broad soil behavior classes recognized by both capacity methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilBehavior {
    Clay,
    Silt,
    Sand,
}

impl SoilBehavior {
    /// All behavior variants for UI selection
    pub const ALL: [SoilBehavior; 3] = [SoilBehavior::Clay, SoilBehavior::Silt, SoilBehavior::Sand];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SoilBehavior::Clay => "clay",
            SoilBehavior::Silt => "silt",
            SoilBehavior::Sand => "sand",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "clay" => Ok(SoilBehavior::Clay),
            "silt" => Ok(SoilBehavior::Silt),
            "sand" => Ok(SoilBehavior::Sand),
            _ => Err(CalcError::invalid_input(
                "soil_behavior",
                s,
                "Expected one of: clay, silt, sand",
            )),
        }
    }
}

impl std::fmt::Display for SoilBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Decourt-Quaresma tip coefficient Kdp (kPa per NSPT blow), keyed by the
/// fine-grained soil type label.
pub static KDP: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("sand", 400.0),
        ("clayey sand", 400.0),
        ("silty - clayey sand", 400.0),
        ("clayey - silty sand", 400.0),
        ("silty sand", 400.0),
        ("clay", 120.0),
        ("sandy clay", 120.0),
        ("silty - sandy clay", 120.0),
        ("sandy - silty clay", 120.0),
        ("silty clay", 120.0),
        ("silt", 200.0),
        ("sandy silt", 250.0),
        ("clayey - sandy silt", 250.0),
        ("sandy - clayey silt", 200.0),
        ("clayey silt", 200.0),
    ])
});

/// Fine-grained soil type labels grouped by behavior, for validation and
/// UI dropdowns.
pub static SOIL_TYPES_BY_BEHAVIOR: Lazy<HashMap<SoilBehavior, Vec<&'static str>>> =
    Lazy::new(|| {
        HashMap::from([
            (
                SoilBehavior::Sand,
                vec![
                    "sand",
                    "clayey sand",
                    "silty - clayey sand",
                    "clayey - silty sand",
                    "silty sand",
                ],
            ),
            (
                SoilBehavior::Clay,
                vec![
                    "clay",
                    "sandy clay",
                    "silty - sandy clay",
                    "sandy - silty clay",
                    "silty clay",
                ],
            ),
            (
                SoilBehavior::Silt,
                vec![
                    "silt",
                    "sandy silt",
                    "clayey - sandy silt",
                    "sandy - clayey silt",
                    "clayey silt",
                ],
            ),
        ])
    });

/// Look up the Decourt-Quaresma tip coefficient for a soil type label.
pub fn kdp_for(soil_type: &str) -> Option<f64> {
    KDP.get(soil_type).copied()
}

/// One soil stratum along the pile shaft.
///
/// Method-specific parameters are optional at construction time; the
/// engine rejects a layer that lacks the fields its behavior + method
/// requires before any depth marching happens.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thickness_m": 10.0,
///   "soil_behavior": "clay",
///   "soil_type": "sandy clay",
///   "nspt": 10.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Stratum thickness in meters (must be positive)
    pub thickness_m: f64,

    /// Broad behavior class (drives which parameters are mandatory)
    pub soil_behavior: SoilBehavior,

    /// Fine-grained category (e.g., "sandy clay"); used only by the
    /// Decourt-Quaresma tip coefficient lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,

    /// SPT blow count (Decourt-Quaresma, all behaviors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nspt: Option<f64>,

    /// Undrained shear strength in kPa (Mayerhof, clay)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub su: Option<f64>,

    /// Tomlinson adhesion factor (Mayerhof, clay)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_tomlinson: Option<f64>,

    /// Effective unit weight in kN/m3 (Mayerhof, sand)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_eff: Option<f64>,

    /// Friction angle in degrees (Mayerhof, sand)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<f64>,
}

impl SoilLayer {
    /// Create a clay layer with no method parameters set
    pub fn clay(thickness_m: f64, soil_type: impl Into<String>) -> Self {
        SoilLayer::bare(thickness_m, SoilBehavior::Clay, Some(soil_type.into()))
    }

    /// Create a silt layer with no method parameters set
    pub fn silt(thickness_m: f64, soil_type: impl Into<String>) -> Self {
        SoilLayer::bare(thickness_m, SoilBehavior::Silt, Some(soil_type.into()))
    }

    /// Create a sand layer with no method parameters set
    pub fn sand(thickness_m: f64, soil_type: impl Into<String>) -> Self {
        SoilLayer::bare(thickness_m, SoilBehavior::Sand, Some(soil_type.into()))
    }

    fn bare(thickness_m: f64, soil_behavior: SoilBehavior, soil_type: Option<String>) -> Self {
        SoilLayer {
            thickness_m,
            soil_behavior,
            soil_type,
            nspt: None,
            su: None,
            alpha_tomlinson: None,
            gamma_eff: None,
            phi: None,
        }
    }

    /// Set the SPT blow count (Decourt-Quaresma)
    pub fn with_nspt(mut self, nspt: f64) -> Self {
        self.nspt = Some(nspt);
        self
    }

    /// Set undrained shear strength and adhesion factor (Mayerhof clay)
    pub fn with_clay_params(mut self, su_kpa: f64, alpha_tomlinson: f64) -> Self {
        self.su = Some(su_kpa);
        self.alpha_tomlinson = Some(alpha_tomlinson);
        self
    }

    /// Set effective unit weight and friction angle (Mayerhof sand)
    pub fn with_sand_params(mut self, gamma_eff_kn_m3: f64, phi_deg: f64) -> Self {
        self.gamma_eff = Some(gamma_eff_kn_m3);
        self.phi = Some(phi_deg);
        self
    }

    /// Clone this layer with a different thickness (used when clipping the
    /// final segment to the pile depth).
    pub fn with_thickness(&self, thickness_m: f64) -> Self {
        let mut layer = self.clone();
        layer.thickness_m = thickness_m;
        layer
    }

    /// Validate that this layer carries every field its behavior requires
    /// for the given method. `index` is the 1-based layer position, used
    /// in error messages.
    pub fn validate_for_method(&self, method: CapacityMethod, index: usize) -> CalcResult<()> {
        if self.thickness_m <= 0.0 {
            return Err(CalcError::invalid_input(
                format!("layer #{index} thickness_m"),
                self.thickness_m.to_string(),
                "Layer thickness must be positive",
            ));
        }

        match method {
            CapacityMethod::DecourtQuaresma => {
                let nspt = self
                    .nspt
                    .ok_or_else(|| CalcError::missing_field(format!("layer #{index} nspt")))?;
                if nspt <= 0.0 {
                    return Err(CalcError::invalid_input(
                        format!("layer #{index} nspt"),
                        nspt.to_string(),
                        "NSPT must be positive",
                    ));
                }
                let soil_type = self
                    .soil_type
                    .as_deref()
                    .ok_or_else(|| CalcError::missing_field(format!("layer #{index} soil_type")))?;
                if kdp_for(soil_type).is_none() {
                    return Err(CalcError::invalid_input(
                        format!("layer #{index} soil_type"),
                        soil_type,
                        "Unknown soil type (no Kdp entry)",
                    ));
                }
            }
            CapacityMethod::Mayerhof => match self.soil_behavior {
                SoilBehavior::Clay => {
                    let su = self
                        .su
                        .ok_or_else(|| CalcError::missing_field(format!("layer #{index} su")))?;
                    if su <= 0.0 {
                        return Err(CalcError::invalid_input(
                            format!("layer #{index} su"),
                            su.to_string(),
                            "Su must be positive",
                        ));
                    }
                    let alpha = self.alpha_tomlinson.ok_or_else(|| {
                        CalcError::missing_field(format!("layer #{index} alpha_tomlinson"))
                    })?;
                    if alpha <= 0.0 {
                        return Err(CalcError::invalid_input(
                            format!("layer #{index} alpha_tomlinson"),
                            alpha.to_string(),
                            "Adhesion factor must be positive",
                        ));
                    }
                }
                SoilBehavior::Sand => {
                    let gamma = self.gamma_eff.ok_or_else(|| {
                        CalcError::missing_field(format!("layer #{index} gamma_eff"))
                    })?;
                    if gamma <= 0.0 {
                        return Err(CalcError::invalid_input(
                            format!("layer #{index} gamma_eff"),
                            gamma.to_string(),
                            "Effective unit weight must be positive",
                        ));
                    }
                    let phi = self
                        .phi
                        .ok_or_else(|| CalcError::missing_field(format!("layer #{index} phi")))?;
                    if phi <= 0.0 {
                        return Err(CalcError::invalid_input(
                            format!("layer #{index} phi"),
                            phi.to_string(),
                            "Friction angle must be positive",
                        ));
                    }
                }
                // Mayerhof carries no silt parameters; the engine treats
                // silt as zero resistance under this method.
                SoilBehavior::Silt => {}
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdp_table() {
        assert_eq!(kdp_for("clay"), Some(120.0));
        assert_eq!(kdp_for("sand"), Some(400.0));
        assert_eq!(kdp_for("silt"), Some(200.0));
        assert_eq!(kdp_for("sandy silt"), Some(250.0));
        assert_eq!(kdp_for("basalt"), None);
        assert_eq!(KDP.len(), 15);
    }

    #[test]
    fn test_soil_types_grouping() {
        for behavior in SoilBehavior::ALL {
            let types = &SOIL_TYPES_BY_BEHAVIOR[&behavior];
            assert_eq!(types.len(), 5);
            for t in types {
                assert!(kdp_for(t).is_some(), "missing Kdp for {t}");
            }
        }
    }

    #[test]
    fn test_behavior_parse() {
        assert_eq!(SoilBehavior::from_str_flexible("Clay").unwrap(), SoilBehavior::Clay);
        assert_eq!(SoilBehavior::from_str_flexible(" sand ").unwrap(), SoilBehavior::Sand);
        assert!(SoilBehavior::from_str_flexible("rock").is_err());
    }

    #[test]
    fn test_validate_decourt_quaresma() {
        let ok = SoilLayer::clay(10.0, "clay").with_nspt(10.0);
        assert!(ok.validate_for_method(CapacityMethod::DecourtQuaresma, 1).is_ok());

        let missing_nspt = SoilLayer::clay(10.0, "clay");
        let err = missing_nspt
            .validate_for_method(CapacityMethod::DecourtQuaresma, 1)
            .unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");

        let bad_type = SoilLayer::clay(10.0, "peat").with_nspt(10.0);
        assert!(bad_type
            .validate_for_method(CapacityMethod::DecourtQuaresma, 1)
            .is_err());
    }

    #[test]
    fn test_validate_mayerhof() {
        let clay = SoilLayer::clay(5.0, "clay").with_clay_params(50.0, 0.9);
        assert!(clay.validate_for_method(CapacityMethod::Mayerhof, 1).is_ok());

        let clay_no_su = SoilLayer::clay(5.0, "clay");
        assert!(clay_no_su.validate_for_method(CapacityMethod::Mayerhof, 1).is_err());

        let sand = SoilLayer::sand(5.0, "sand").with_sand_params(9.0, 30.0);
        assert!(sand.validate_for_method(CapacityMethod::Mayerhof, 2).is_ok());

        let sand_bad_phi = SoilLayer::sand(5.0, "sand").with_sand_params(9.0, -1.0);
        let err = sand_bad_phi
            .validate_for_method(CapacityMethod::Mayerhof, 2)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        // Silt has no Mayerhof parameters to validate
        let silt = SoilLayer::silt(3.0, "silt");
        assert!(silt.validate_for_method(CapacityMethod::Mayerhof, 3).is_ok());
    }

    #[test]
    fn test_non_positive_thickness() {
        let layer = SoilLayer::clay(0.0, "clay").with_nspt(5.0);
        assert!(layer
            .validate_for_method(CapacityMethod::DecourtQuaresma, 1)
            .is_err());
    }

    #[test]
    fn test_layer_serialization() {
        let layer = SoilLayer::sand(4.0, "silty sand")
            .with_nspt(25.0)
            .with_sand_params(10.0, 33.0);
        let json = serde_json::to_string(&layer).unwrap();
        assert!(json.contains("\"soil_behavior\":\"sand\""));
        // Unset optional fields stay out of the JSON
        assert!(!json.contains("su"));
        let roundtrip: SoilLayer = serde_json::from_str(&json).unwrap();
        assert_eq!(layer, roundtrip);
    }
}
