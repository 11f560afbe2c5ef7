//! # Layer Segmentation and NSPT Zone Averaging
//!
//! Clips the ordered layer stack to the pile penetration depth, producing
//! depth-anchored segments the capacity engine marches over, and computes
//! the thickness-weighted NSPT mean in the 4D influence zone around the
//! pile tip (Decourt-Quaresma).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::soil::SoilLayer;

/// One depth-anchored stratum, thickness already clipped to the pile depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSegment {
    /// Depth of the segment top below ground surface (m)
    pub z_top_m: f64,
    /// The stratum occupying `[z_top_m, z_bot_m()]`
    pub layer: SoilLayer,
}

impl DepthSegment {
    /// Depth of the segment bottom (m)
    pub fn z_bot_m(&self) -> f64 {
        self.z_top_m + self.layer.thickness_m
    }

    /// Whether the sample depth `z` falls inside this segment. Boundaries
    /// are inclusive, so a tie at a layer interface resolves to the upper
    /// segment when scanning top-down.
    pub fn contains(&self, z: f64) -> bool {
        z >= self.z_top_m && z <= self.z_bot_m() + 1e-9
    }
}

/// Clip the layer stack to `[0, pile_depth_m]`.
///
/// Walks layers top-down accumulating the running top depth, stops once
/// the pile depth is reached, and clips the final included layer so its
/// bottom lands exactly on `pile_depth_m`. The clipped thicknesses of the
/// returned segments always sum to exactly `pile_depth_m`.
///
/// Fails with `InsufficientStratigraphy` when the defined layers do not
/// reach the pile depth.
pub fn segment(layers: &[SoilLayer], pile_depth_m: f64) -> CalcResult<Vec<DepthSegment>> {
    let total_thickness_m: f64 = layers.iter().map(|l| l.thickness_m).sum();
    if total_thickness_m < pile_depth_m - 1e-9 {
        return Err(CalcError::InsufficientStratigraphy {
            pile_depth_m,
            total_thickness_m,
        });
    }

    let mut segments = Vec::new();
    let mut z_top = 0.0;
    for layer in layers {
        if z_top >= pile_depth_m {
            break;
        }
        let z_bot = z_top + layer.thickness_m;
        let use_bot = z_bot.min(pile_depth_m);
        segments.push(DepthSegment {
            z_top_m: z_top,
            layer: layer.with_thickness(use_bot - z_top),
        });
        z_top = z_bot;
    }

    if segments.is_empty() {
        return Err(CalcError::InsufficientStratigraphy {
            pile_depth_m,
            total_thickness_m,
        });
    }

    Ok(segments)
}

/// Thickness-weighted mean NSPT over the influence zone
/// `[z_tip - 4D, z_tip + 4D]`.
///
/// Only segments with `nspt > 0` contribute; returns `None` when the zone
/// holds no NSPT-bearing overlap at all. The caller treats `None` as an
/// undefined tip resistance (NaN), not as an error.
pub fn average_nspt(z_tip: f64, diameter_m: f64, segments: &[DepthSegment]) -> Option<f64> {
    let z_top_avg = z_tip - 4.0 * diameter_m;
    let z_bot_avg = z_tip + 4.0 * diameter_m;

    let mut total_thickness = 0.0;
    let mut weighted_sum = 0.0;
    for seg in segments {
        let overlap_top = seg.z_top_m.max(z_top_avg);
        let overlap_bot = seg.z_bot_m().min(z_bot_avg);
        let overlap = overlap_bot - overlap_top;
        if overlap > 0.0 {
            if let Some(nspt) = seg.layer.nspt {
                if nspt > 0.0 {
                    weighted_sum += nspt * overlap;
                    total_thickness += overlap;
                }
            }
        }
    }

    if total_thickness == 0.0 {
        return None;
    }
    Some(weighted_sum / total_thickness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::SoilLayer;

    fn three_layer_profile() -> Vec<SoilLayer> {
        vec![
            SoilLayer::clay(4.0, "clay").with_nspt(5.0),
            SoilLayer::silt(3.0, "silt").with_nspt(12.0),
            SoilLayer::sand(8.0, "sand").with_nspt(30.0),
        ]
    }

    #[test]
    fn test_segment_clips_to_pile_depth() {
        let segs = segment(&three_layer_profile(), 10.0).unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].z_top_m, 0.0);
        assert_eq!(segs[1].z_top_m, 4.0);
        assert_eq!(segs[2].z_top_m, 7.0);
        // Last segment clipped from 8 m down to 3 m
        assert!((segs[2].layer.thickness_m - 3.0).abs() < 1e-12);
        assert!((segs[2].z_bot_m() - 10.0).abs() < 1e-12);

        let total: f64 = segs.iter().map(|s| s.layer.thickness_m).sum();
        assert!((total - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_exact_boundary() {
        // Pile depth on a layer interface: the deeper layer is not included
        let segs = segment(&three_layer_profile(), 7.0).unwrap();
        assert_eq!(segs.len(), 2);
        assert!((segs[1].z_bot_m() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_insufficient_stratigraphy() {
        let err = segment(&three_layer_profile(), 20.0).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_STRATIGRAPHY");

        let err = segment(&[], 5.0).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_STRATIGRAPHY");
    }

    #[test]
    fn test_contains_resolves_ties_to_upper_segment() {
        let segs = segment(&three_layer_profile(), 10.0).unwrap();
        // z = 4.0 is the bottom of segment 0 and the top of segment 1
        assert!(segs[0].contains(4.0));
        assert!(segs[1].contains(4.0));
        let first = segs.iter().find(|s| s.contains(4.0)).unwrap();
        assert_eq!(first.z_top_m, 0.0);
    }

    #[test]
    fn test_average_nspt_weighted_mean() {
        let segs = segment(&three_layer_profile(), 10.0).unwrap();
        // Tip at 7 m, D = 0.25 m: zone [6, 8] covers 1 m of silt (N=12)
        // and 1 m of sand (N=30)
        let avg = average_nspt(7.0, 0.25, &segs).unwrap();
        assert!((avg - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_nspt_single_layer() {
        let layers = vec![SoilLayer::clay(10.0, "clay").with_nspt(10.0)];
        let segs = segment(&layers, 10.0).unwrap();
        let avg = average_nspt(10.0, 0.4, &segs).unwrap();
        assert!((avg - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_nspt_no_data() {
        // Layers without NSPT produce no overlap at all
        let layers = vec![SoilLayer::clay(10.0, "clay").with_clay_params(40.0, 0.9)];
        let segs = segment(&layers, 10.0).unwrap();
        assert_eq!(average_nspt(5.0, 0.4, &segs), None);
    }
}
