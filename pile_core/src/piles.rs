//! # Pile Classification and Method Coefficients
//!
//! Capacity method selection plus the empirical coefficient tables keyed
//! by pile construction type (Decourt-Quaresma alpha/beta) and pile
//! material (Mayerhof sand Ks and interface friction angle delta).
//!
//! ## Example
//!
//! ```rust
//! use pile_core::piles::{PileType, PileMaterial};
//! use pile_core::soil::SoilBehavior;
//!
//! let alpha = PileType::ContinuousFlightAuger.alpha(SoilBehavior::Clay);
//! assert_eq!(alpha, 0.3);
//!
//! let delta = PileMaterial::Concrete.delta_deg(30.0);
//! assert_eq!(delta, 22.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::soil::SoilBehavior;

/// Axial bearing capacity methods implemented by the engine.
///
/// Reese & Wright and Schmertmann are planned but not yet available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityMethod {
    #[serde(rename = "Decourt-Quaresma")]
    DecourtQuaresma,
    Mayerhof,
}

impl CapacityMethod {
    /// All implemented methods for UI selection
    pub const ALL: [CapacityMethod; 2] = [CapacityMethod::DecourtQuaresma, CapacityMethod::Mayerhof];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CapacityMethod::DecourtQuaresma => "Decourt-Quaresma",
            CapacityMethod::Mayerhof => "Mayerhof",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "decourt-quaresma" | "decourt" | "dq" => Ok(CapacityMethod::DecourtQuaresma),
            "mayerhof" | "meyerhof" => Ok(CapacityMethod::Mayerhof),
            _ => Err(CalcError::invalid_input(
                "method",
                s,
                "Expected one of: Decourt-Quaresma, Mayerhof",
            )),
        }
    }
}

impl std::fmt::Display for CapacityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Pile construction types for the Decourt-Quaresma alpha/beta tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileType {
    #[serde(rename = "Prefabricated driven piles or steel piles")]
    PrefabricatedDrivenOrSteel,
    #[serde(rename = "Franki piles")]
    Franki,
    #[serde(rename = "Driven wooden piles")]
    DrivenWooden,
    #[serde(rename = "Vibrating or vibropressed")]
    VibratingOrVibropressed,
    #[serde(rename = "Cast in place screw piles")]
    CastInPlaceScrew,
    #[serde(rename = "Prefabricated screw piles")]
    PrefabricatedScrew,
    #[serde(rename = "Cast in place screw piles with additional grouting")]
    CastInPlaceScrewGrouted,
    #[serde(rename = "Prefabricated screw piles with additional grouting")]
    PrefabricatedScrewGrouted,
    #[serde(rename = "Steel tubular piles")]
    SteelTubular,
    #[serde(rename = "Continuous flight auger piles (CFA)")]
    ContinuousFlightAuger,
    #[serde(rename = "Bored piles or piles sheeted by bentonite suspense")]
    BoredOrBentoniteSlurry,
    #[serde(rename = "Bore piles with steel casing")]
    BoredWithSteelCasing,
}

impl PileType {
    /// All construction type variants for UI selection
    pub const ALL: [PileType; 12] = [
        PileType::PrefabricatedDrivenOrSteel,
        PileType::Franki,
        PileType::DrivenWooden,
        PileType::VibratingOrVibropressed,
        PileType::CastInPlaceScrew,
        PileType::PrefabricatedScrew,
        PileType::CastInPlaceScrewGrouted,
        PileType::PrefabricatedScrewGrouted,
        PileType::SteelTubular,
        PileType::ContinuousFlightAuger,
        PileType::BoredOrBentoniteSlurry,
        PileType::BoredWithSteelCasing,
    ];

    /// Get display name (the label used in the source tables)
    pub fn display_name(&self) -> &'static str {
        match self {
            PileType::PrefabricatedDrivenOrSteel => "Prefabricated driven piles or steel piles",
            PileType::Franki => "Franki piles",
            PileType::DrivenWooden => "Driven wooden piles",
            PileType::VibratingOrVibropressed => "Vibrating or vibropressed",
            PileType::CastInPlaceScrew => "Cast in place screw piles",
            PileType::PrefabricatedScrew => "Prefabricated screw piles",
            PileType::CastInPlaceScrewGrouted => {
                "Cast in place screw piles with additional grouting"
            }
            PileType::PrefabricatedScrewGrouted => {
                "Prefabricated screw piles with additional grouting"
            }
            PileType::SteelTubular => "Steel tubular piles",
            PileType::ContinuousFlightAuger => "Continuous flight auger piles (CFA)",
            PileType::BoredOrBentoniteSlurry => {
                "Bored piles or piles sheeted by bentonite suspense"
            }
            PileType::BoredWithSteelCasing => "Bore piles with steel casing",
        }
    }

    /// Decourt-Quaresma tip coefficient alpha by soil behavior.
    ///
    /// Driven and screw pile families use 1.0 across the board; CFA and
    /// bored piles carry reduced values.
    pub fn alpha(&self, behavior: SoilBehavior) -> f64 {
        match self {
            PileType::ContinuousFlightAuger => 0.3,
            PileType::BoredOrBentoniteSlurry | PileType::BoredWithSteelCasing => match behavior {
                SoilBehavior::Sand => 0.5,
                SoilBehavior::Clay => 0.85,
                SoilBehavior::Silt => 0.6,
            },
            _ => 1.0,
        }
    }

    /// Decourt-Quaresma shaft coefficient beta by soil behavior.
    pub fn beta(&self, behavior: SoilBehavior) -> f64 {
        match self {
            PileType::BoredOrBentoniteSlurry | PileType::BoredWithSteelCasing => match behavior {
                SoilBehavior::Sand => 0.5,
                SoilBehavior::Clay => 0.8,
                SoilBehavior::Silt => 0.65,
            },
            _ => 1.0,
        }
    }
}

impl std::fmt::Display for PileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Pile shaft material, used by the Mayerhof sand friction term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileMaterial {
    Steel,
    Concrete,
    Timber,
}

impl PileMaterial {
    /// All material variants for UI selection
    pub const ALL: [PileMaterial; 3] = [
        PileMaterial::Steel,
        PileMaterial::Concrete,
        PileMaterial::Timber,
    ];

    /// Soil-pile interface friction angle delta in degrees, from the soil
    /// friction angle phi. Steel uses a flat 20 degrees; concrete and
    /// timber use fixed fractions of phi.
    pub fn delta_deg(&self, phi_deg: f64) -> f64 {
        match self {
            PileMaterial::Steel => 20.0,
            PileMaterial::Concrete => 0.75 * phi_deg,
            PileMaterial::Timber => (2.0 / 3.0) * phi_deg,
        }
    }

    /// Lateral earth pressure coefficient Ks as a linear fit of phi.
    pub fn ks(&self, phi_deg: f64) -> f64 {
        match self {
            PileMaterial::Steel => 0.029412 * phi_deg - 0.32353,
            PileMaterial::Concrete => 0.029412 * phi_deg + 0.67647059,
            PileMaterial::Timber => 0.1470588 * phi_deg - 2.6176470588,
        }
    }
}

impl std::fmt::Display for PileMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PileMaterial::Steel => "Steel",
            PileMaterial::Concrete => "Concrete",
            PileMaterial::Timber => "Timber",
        };
        write!(f, "{name}")
    }
}
