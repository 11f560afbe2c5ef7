//! # Axial Capacity Engine
//!
//! The depth-marching capacity calculator. Given a validated layered
//! profile and pile geometry, it samples the pile length at vertical
//! increments and computes, per sample depth, the tip resistance Qb, the
//! cumulative shaft resistance Qfs below the cutoff depth, the ultimate
//! capacity Qult = Qb + Qfs and the allowable capacity Qall = Qult / FS.
//!
//! The calculation is a pure function of its input: no I/O, no shared
//! state, one pass in non-decreasing depth order (the Mayerhof sand
//! overburden term is the only sequential dependency).
//!
//! ## Example
//!
//! ```rust
//! use pile_core::capacity::{calculate, CapacityInput};
//! use pile_core::piles::{CapacityMethod, PileType};
//! use pile_core::soil::SoilLayer;
//!
//! let input = CapacityInput {
//!     method: CapacityMethod::DecourtQuaresma,
//!     diameter_m: 0.4,
//!     pile_depth_m: 10.0,
//!     cutoff_m: 0.0,
//!     fs: 2.5,
//!     pile_type: Some(PileType::PrefabricatedDrivenOrSteel),
//!     pile_material: None,
//!     dz: 1.0,
//!     layers: vec![SoilLayer::clay(10.0, "clay").with_nspt(10.0)],
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.samples.len(), 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{perimeter_m, tip_area_m2};
use crate::piles::{CapacityMethod, PileMaterial, PileType};
use crate::soil::{kdp_for, SoilBehavior, SoilLayer};
use crate::stratigraphy::{average_nspt, segment, DepthSegment};

/// Input parameters for a single-pile axial capacity run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "method": "Decourt-Quaresma",
///   "diameter_m": 0.4,
///   "pile_depth_m": 10.0,
///   "cutoff_m": 0.0,
///   "fs": 2.5,
///   "pile_type": "Prefabricated driven piles or steel piles",
///   "dz": 1.0,
///   "layers": [
///     { "thickness_m": 10.0, "soil_behavior": "clay", "soil_type": "clay", "nspt": 10.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityInput {
    /// Capacity method to run
    pub method: CapacityMethod,

    /// Pile diameter (m)
    pub diameter_m: f64,

    /// Pile tip depth below ground surface (m)
    pub pile_depth_m: f64,

    /// Depth above which the shaft is excluded from skin friction (m)
    pub cutoff_m: f64,

    /// Safety factor applied to the ultimate capacity
    pub fs: f64,

    /// Construction type (Decourt-Quaresma coefficient tables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pile_type: Option<PileType>,

    /// Shaft material (Mayerhof sand friction term)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pile_material: Option<PileMaterial>,

    /// Vertical sampling increment (m)
    pub dz: f64,

    /// Ordered soil layers, top to bottom
    pub layers: Vec<SoilLayer>,
}

impl CapacityInput {
    /// Validate all inputs eagerly, before any depth marching.
    pub fn validate(&self) -> CalcResult<()> {
        if self.diameter_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_m",
                self.diameter_m.to_string(),
                "Pile diameter must be positive",
            ));
        }
        if self.pile_depth_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "pile_depth_m",
                self.pile_depth_m.to_string(),
                "Pile depth must be positive",
            ));
        }
        if self.cutoff_m < 0.0 {
            return Err(CalcError::invalid_input(
                "cutoff_m",
                self.cutoff_m.to_string(),
                "Cutoff depth cannot be negative",
            ));
        }
        if self.fs <= 0.0 {
            return Err(CalcError::invalid_input(
                "fs",
                self.fs.to_string(),
                "Safety factor must be positive",
            ));
        }
        if self.dz <= 0.0 {
            return Err(CalcError::invalid_input(
                "dz",
                self.dz.to_string(),
                "Vertical increment must be positive",
            ));
        }
        if self.layers.is_empty() {
            return Err(CalcError::invalid_input(
                "layers",
                "[]",
                "At least one soil layer is required",
            ));
        }

        match self.method {
            CapacityMethod::DecourtQuaresma => {
                if self.pile_type.is_none() {
                    return Err(CalcError::missing_field("pile_type"));
                }
            }
            CapacityMethod::Mayerhof => {
                let has_sand = self
                    .layers
                    .iter()
                    .any(|l| l.soil_behavior == SoilBehavior::Sand);
                if has_sand && self.pile_material.is_none() {
                    return Err(CalcError::missing_field("pile_material"));
                }
            }
        }

        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate_for_method(self.method, i + 1)?;
        }

        Ok(())
    }
}

/// One row of the capacity profile. Method-specific columns are
/// `Option`-valued; kN quantities keep full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    /// Sample depth below ground surface (m)
    pub depth_m: f64,

    /// Behavior of the layer containing the pile tip at this depth
    pub soil_behavior: SoilBehavior,

    /// Fine soil type of the tip layer (Decourt-Quaresma)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,

    /// Decourt-Quaresma tip coefficient, or Tomlinson adhesion factor of
    /// the tip layer under Mayerhof
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,

    /// Decourt-Quaresma shaft coefficient of the tip layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,

    /// Decourt-Quaresma tip coefficient Kdp (kPa per blow)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdp_kpa: Option<f64>,

    /// Undrained shear strength of the tip layer (Mayerhof)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub su_kpa: Option<f64>,

    /// Cumulative effective overburden from the surface to this depth
    /// (Mayerhof)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_eff_kpa: Option<f64>,

    /// Tip (end-bearing) resistance (kN); NaN when no NSPT data exists in
    /// the averaging zone
    pub qb_kn: f64,

    /// Cumulative shaft resistance from the cutoff depth to this depth (kN)
    pub qfs_kn: f64,

    /// Ultimate capacity Qb + Qfs (kN)
    pub qult_kn: f64,

    /// Allowable capacity Qult / FS (kN)
    pub qall_kn: f64,
}

/// Scalar snapshot of the profile's final sample plus pile geometry.
/// kN quantities are rounded to 2 decimals for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recap {
    #[serde(rename = "Ab_m2")]
    pub ab_m2: f64,
    #[serde(rename = "Perimeter_m")]
    pub perimeter_m: f64,
    #[serde(rename = "Depth_m")]
    pub depth_m: f64,
    #[serde(rename = "Cutoff_m")]
    pub cutoff_m: f64,
    #[serde(rename = "Pilelength_m")]
    pub pile_length_m: f64,
    #[serde(rename = "FS")]
    pub fs: f64,
    #[serde(rename = "Qb_at_tip_kN")]
    pub qb_at_tip_kn: f64,
    #[serde(rename = "Qfs_total_kN")]
    pub qfs_total_kn: f64,
    #[serde(rename = "Qult_total_kN")]
    pub qult_total_kn: f64,
    #[serde(rename = "Qall_total_kN")]
    pub qall_total_kn: f64,
}

/// Full output of a capacity run: the depth profile plus the recap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    pub samples: Vec<ProfileSample>,
    pub recap: Recap,
}

/// Round to 2 decimals for reporting. NaN stays NaN.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Build the sample depth grid `dz, 2dz, ...` with the terminal sample
/// clamped to exactly `pile_depth_m`, so the recap always reads values at
/// full depth regardless of dz divisibility.
fn depth_grid(pile_depth_m: f64, dz: f64) -> Vec<f64> {
    let n = ((pile_depth_m / dz) - 1e-9).ceil().max(1.0) as usize;
    let mut z_vals: Vec<f64> = (1..=n).map(|i| i as f64 * dz).collect();
    if let Some(last) = z_vals.last_mut() {
        *last = pile_depth_m;
    }
    z_vals
}

/// Decourt-Quaresma tip resistance in kPa. An undefined NSPT average (no
/// data in the 4D zone) propagates as NaN rather than raising.
fn decourt_tip_kpa(alpha: f64, kdp: f64, avg_nspt: Option<f64>) -> f64 {
    match avg_nspt {
        Some(n_avg) => alpha * kdp * n_avg,
        None => f64::NAN,
    }
}

/// Mayerhof tip resistance in kPa. Clay uses 9 Su; sand uses a linear fit
/// of the bearing factor on phi, clamped at 42 degrees; silt is not
/// covered by this method and contributes zero.
fn mayerhof_tip_kpa(layer: &SoilLayer) -> f64 {
    match layer.soil_behavior {
        SoilBehavior::Clay => match layer.su {
            Some(su) => 9.0 * su,
            None => 0.0,
        },
        SoilBehavior::Sand => {
            let phi = layer.phi.unwrap_or(0.0).min(42.0);
            280.19 * phi - 7845.177
        }
        SoilBehavior::Silt => 0.0,
    }
}

/// Run the depth-marching capacity calculation.
///
/// Validates eagerly, segments the stratigraphy to the pile depth, then
/// walks the depth grid computing tip and cumulative shaft resistance per
/// sample. The last sample always lands exactly at `pile_depth_m` and
/// feeds the recap.
pub fn calculate(input: &CapacityInput) -> CalcResult<CapacityResult> {
    input.validate()?;

    let ab_m2 = tip_area_m2(input.diameter_m)?;
    let perim_m = perimeter_m(input.diameter_m)?;
    let segs = segment(&input.layers, input.pile_depth_m)?;

    let z_vals = depth_grid(input.pile_depth_m, input.dz);
    let mut samples = Vec::with_capacity(z_vals.len());

    for &z in &z_vals {
        let tip = segs
            .iter()
            .find(|s| s.contains(z))
            .ok_or(CalcError::NoLayerAtDepth { depth_m: z })?;

        let qb_kn = match input.method {
            CapacityMethod::DecourtQuaresma => {
                // pile_type and soil_type presence guaranteed by validate()
                let pile_type = input.pile_type.ok_or_else(|| CalcError::missing_field("pile_type"))?;
                let alpha = pile_type.alpha(tip.layer.soil_behavior);
                let soil_type = tip
                    .layer
                    .soil_type
                    .as_deref()
                    .ok_or_else(|| CalcError::missing_field("soil_type"))?;
                let kdp = kdp_for(soil_type)
                    .ok_or_else(|| CalcError::invalid_input("soil_type", soil_type, "Unknown soil type"))?;
                let n_avg = average_nspt(z, input.diameter_m, &segs);
                decourt_tip_kpa(alpha, kdp, n_avg) * ab_m2
            }
            CapacityMethod::Mayerhof => mayerhof_tip_kpa(&tip.layer) * ab_m2,
        };

        let (qfs_kn, sigma_eff_kpa) = shaft_resistance_kn(input, &segs, z, perim_m)?;

        let qult_kn = qb_kn + qfs_kn;
        let qall_kn = qult_kn / input.fs;

        let sample = match input.method {
            CapacityMethod::DecourtQuaresma => {
                let pile_type = input.pile_type.ok_or_else(|| CalcError::missing_field("pile_type"))?;
                ProfileSample {
                    depth_m: z,
                    soil_behavior: tip.layer.soil_behavior,
                    soil_type: tip.layer.soil_type.clone(),
                    alpha: Some(pile_type.alpha(tip.layer.soil_behavior)),
                    beta: Some(pile_type.beta(tip.layer.soil_behavior)),
                    kdp_kpa: tip.layer.soil_type.as_deref().and_then(kdp_for),
                    su_kpa: None,
                    sigma_eff_kpa: None,
                    qb_kn,
                    qfs_kn,
                    qult_kn,
                    qall_kn,
                }
            }
            CapacityMethod::Mayerhof => ProfileSample {
                depth_m: z,
                soil_behavior: tip.layer.soil_behavior,
                soil_type: None,
                alpha: Some(tip.layer.alpha_tomlinson.unwrap_or(0.0)),
                beta: None,
                kdp_kpa: None,
                su_kpa: Some(tip.layer.su.unwrap_or(0.0)),
                sigma_eff_kpa: Some(sigma_eff_kpa),
                qb_kn,
                qfs_kn,
                qult_kn,
                qall_kn,
            },
        };
        samples.push(sample);
    }

    // The grid always produces at least one sample for a validated input
    let last = samples
        .last()
        .ok_or_else(|| CalcError::Internal {
            message: "empty capacity profile".to_string(),
        })?;

    let recap = Recap {
        ab_m2,
        perimeter_m: perim_m,
        depth_m: input.pile_depth_m,
        cutoff_m: input.cutoff_m,
        pile_length_m: input.pile_depth_m - input.cutoff_m,
        fs: input.fs,
        qb_at_tip_kn: round2(last.qb_kn),
        qfs_total_kn: round2(last.qfs_kn),
        qult_total_kn: round2(last.qult_kn),
        qall_total_kn: round2(last.qall_kn),
    };

    Ok(CapacityResult { samples, recap })
}

/// Cumulative shaft resistance down to sample depth `z`, excluding the
/// shaft portion above the cutoff depth. Also returns the Mayerhof
/// effective overburden accumulated from the surface to `z` (independent
/// of the cutoff).
fn shaft_resistance_kn(
    input: &CapacityInput,
    segs: &[DepthSegment],
    z: f64,
    perim_m: f64,
) -> CalcResult<(f64, f64)> {
    let mut qs_sum_kn = 0.0;
    let mut sum_sigma_eff = 0.0;

    for seg in segs {
        let z_bot = seg.z_bot_m();

        // Overburden accumulates over the full overlap from the surface,
        // regardless of the cutoff
        if input.method == CapacityMethod::Mayerhof {
            let overlap_full = (z_bot.min(z) - seg.z_top_m).max(0.0);
            if overlap_full > 0.0 {
                if let Some(gamma) = seg.layer.gamma_eff {
                    sum_sigma_eff += gamma * overlap_full;
                }
            }
        }

        // Friction only below the cutoff, down to the current depth
        let effective_top = seg.z_top_m.max(input.cutoff_m);
        let effective_bot = z_bot.min(z);
        let overlap = (effective_bot - effective_top).max(0.0);
        if overlap <= 0.0 {
            continue;
        }

        match input.method {
            CapacityMethod::DecourtQuaresma => {
                let pile_type = input.pile_type.ok_or_else(|| CalcError::missing_field("pile_type"))?;
                let beta = pile_type.beta(seg.layer.soil_behavior);
                let nspt = seg
                    .layer
                    .nspt
                    .ok_or_else(|| CalcError::missing_field("nspt"))?;
                let qs_kpa = beta * 10.0 * (nspt / 3.0 + 1.0);
                qs_sum_kn += qs_kpa * perim_m * overlap;
            }
            CapacityMethod::Mayerhof => match seg.layer.soil_behavior {
                SoilBehavior::Clay => {
                    if let (Some(alpha), Some(su)) = (seg.layer.alpha_tomlinson, seg.layer.su) {
                        let qs_kpa = alpha * su;
                        qs_sum_kn += qs_kpa * perim_m * overlap;
                    }
                }
                SoilBehavior::Sand => {
                    let material = input
                        .pile_material
                        .ok_or_else(|| CalcError::missing_field("pile_material"))?;
                    let phi = seg
                        .layer
                        .phi
                        .ok_or_else(|| CalcError::missing_field("phi"))?;
                    let delta_rad = material.delta_deg(phi).to_radians();
                    let ks = material.ks(phi);
                    let qs_kpa = ks * sum_sigma_eff * delta_rad.tan();
                    qs_sum_kn += qs_kpa * perim_m * overlap;
                }
                // Mayerhof has no silt friction term
                SoilBehavior::Silt => {}
            },
        }
    }

    Ok((qs_sum_kn, sum_sigma_eff))
}
