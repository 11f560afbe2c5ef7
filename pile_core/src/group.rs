//! # Pile Group Efficiency (Converse-Labarre)
//!
//! Applies the Converse-Labarre efficiency reduction to geometric pile
//! layouts sharing a cap, consuming the single-pile allowable capacity
//! from the capacity engine's recap.
//!
//! Groups are independent of each other: a group with no piles is skipped
//! with a warning and the remaining groups are still computed.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::group::{calculate_group_efficiency, GroupLayout, PilePosition};
//!
//! let layout = GroupLayout::new(1, 1.5, 1.5)
//!     .with_pile(1, 0.0, 0.0)
//!     .with_pile(2, 1.0, 0.0)
//!     .with_pile(3, 0.0, 1.0)
//!     .with_pile(4, 1.0, 1.0);
//!
//! let summary = calculate_group_efficiency(500.0, 0.4, 1.0, &[layout]).unwrap();
//! assert_eq!(summary.results[0].rows, 2);
//! assert_eq!(summary.results[0].columns, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Coordinate tolerance when counting distinct pile rows/columns.
/// Guards against float noise from hand-entered coordinates; 1 mm is far
/// below any practical pile spacing.
const COORD_TOL_M: f64 = 1e-3;

/// One pile position within a cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilePosition {
    pub pile_no: u32,
    pub x_m: f64,
    pub y_m: f64,
}

/// Pile layout for one cap: cap dimensions plus pile coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLayout {
    pub group_no: u32,
    pub cap_width_m: f64,
    pub cap_length_m: f64,
    pub piles: Vec<PilePosition>,
}

impl GroupLayout {
    /// Create an empty layout for a cap of the given dimensions
    pub fn new(group_no: u32, cap_width_m: f64, cap_length_m: f64) -> Self {
        GroupLayout {
            group_no,
            cap_width_m,
            cap_length_m,
            piles: Vec::new(),
        }
    }

    /// Add a pile at (x, y) within the cap
    pub fn with_pile(mut self, pile_no: u32, x_m: f64, y_m: f64) -> Self {
        self.piles.push(PilePosition { pile_no, x_m, y_m });
        self
    }

    /// Number of distinct X coordinates (columns)
    pub fn distinct_columns(&self) -> usize {
        distinct_count(self.piles.iter().map(|p| p.x_m))
    }

    /// Number of distinct Y coordinates (rows)
    pub fn distinct_rows(&self) -> usize {
        distinct_count(self.piles.iter().map(|p| p.y_m))
    }
}

fn distinct_count(values: impl Iterator<Item = f64>) -> usize {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mut count = 0;
    let mut last: Option<f64> = None;
    for v in sorted {
        if last.map_or(true, |prev| (v - prev).abs() > COORD_TOL_M) {
            count += 1;
        }
        last = Some(v);
    }
    count
}

/// Per-group efficiency result. Display rounding matches the report
/// format: angle to 2 dp, efficiency to 3 dp, capacities to 1 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub group_no: u32,
    pub rows: usize,
    pub columns: usize,
    pub alpha_deg: f64,
    pub efficiency: f64,
    pub single_pile_qall_kn: f64,
    pub single_pile_qall_after_efficiency_kn: f64,
    pub pile_count: usize,
    pub group_qall_kn: f64,
}

/// Results for all groups plus warnings for the ones that were skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub results: Vec<GroupResult>,
    pub warnings: Vec<String>,
}

/// Compute Converse-Labarre efficiency and group capacity for each layout.
///
/// `alpha_deg = atan(d / s)` in degrees, then
/// `eta = 1 - alpha_deg * ((c - 1) * r + (r - 1) * c) / (90 * r * c)`,
/// floor-clamped at zero. Group capacity is `eta * Qall * pile_count`.
///
/// Fails with `InvalidGroupInput` for non-positive diameter or spacing;
/// a group without piles is skipped with a warning, not an error.
pub fn calculate_group_efficiency(
    single_pile_qall_kn: f64,
    diameter_m: f64,
    spacing_m: f64,
    groups: &[GroupLayout],
) -> CalcResult<GroupSummary> {
    if diameter_m <= 0.0 {
        return Err(CalcError::invalid_group_input(
            "diameter_m",
            diameter_m.to_string(),
        ));
    }
    if spacing_m <= 0.0 {
        return Err(CalcError::invalid_group_input(
            "spacing_m",
            spacing_m.to_string(),
        ));
    }

    let alpha_deg = (diameter_m / spacing_m).atan().to_degrees();

    let mut results = Vec::new();
    let mut warnings = Vec::new();
    for group in groups {
        if group.piles.is_empty() {
            warnings.push(format!("Group #{} data is incomplete.", group.group_no));
            continue;
        }

        let n_cols = group.distinct_columns();
        let n_rows = group.distinct_rows();
        let n_piles = group.piles.len();

        let eta = 1.0
            - alpha_deg * (((n_cols - 1) * n_rows + (n_rows - 1) * n_cols) as f64)
                / (90.0 * (n_rows * n_cols) as f64);
        let eta = eta.max(0.0);

        let qall_after_eff = eta * single_pile_qall_kn;
        let group_qall = eta * single_pile_qall_kn * n_piles as f64;

        results.push(GroupResult {
            group_no: group.group_no,
            rows: n_rows,
            columns: n_cols,
            alpha_deg: round_dp(alpha_deg, 2),
            efficiency: round_dp(eta, 3),
            single_pile_qall_kn: round_dp(single_pile_qall_kn, 1),
            single_pile_qall_after_efficiency_kn: round_dp(qall_after_eff, 1),
            pile_count: n_piles,
            group_qall_kn: round_dp(group_qall, 1),
        });
    }

    Ok(GroupSummary { results, warnings })
}

fn round_dp(x: f64, dp: u32) -> f64 {
    let factor = 10_f64.powi(dp as i32);
    (x * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> GroupLayout {
        GroupLayout::new(1, 1.5, 1.5)
            .with_pile(1, 0.0, 0.0)
            .with_pile(2, 1.0, 0.0)
            .with_pile(3, 0.0, 1.0)
            .with_pile(4, 1.0, 1.0)
    }

    #[test]
    fn test_single_pile_group_has_unit_efficiency() {
        // 1 row x 1 column yields eta = 1 regardless of spacing
        let layout = GroupLayout::new(1, 1.0, 1.0).with_pile(1, 0.0, 0.0);
        let summary = calculate_group_efficiency(500.0, 0.4, 0.5, &[layout]).unwrap();
        assert_eq!(summary.results[0].efficiency, 1.0);
        assert_eq!(summary.results[0].group_qall_kn, 500.0);
    }

    #[test]
    fn test_2x2_grid() {
        // d = 0.4, s = 1.0: alpha = atan(0.4) = 21.80 deg
        // eta = 1 - 21.801 * (1*2 + 1*2) / (90 * 4) = 0.758
        let summary = calculate_group_efficiency(500.0, 0.4, 1.0, &[grid_2x2()]).unwrap();
        let result = &summary.results[0];
        assert_eq!(result.rows, 2);
        assert_eq!(result.columns, 2);
        assert_eq!(result.pile_count, 4);
        assert!((result.alpha_deg - 21.80).abs() < 1e-9);
        assert!(result.efficiency > 0.0 && result.efficiency <= 1.0);
        assert!((result.efficiency - 0.758).abs() < 1e-9);
        assert!((result.group_qall_kn - 4.0 * result.single_pile_qall_after_efficiency_kn).abs() < 0.3);
    }

    #[test]
    fn test_empty_group_skipped_with_warning() {
        let empty = GroupLayout::new(1, 1.0, 1.0);
        let mut full = grid_2x2();
        full.group_no = 2;
        let summary = calculate_group_efficiency(400.0, 0.4, 1.0, &[empty, full]).unwrap();
        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.results[0].group_no, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("Group #1"));
    }

    #[test]
    fn test_invalid_diameter_or_spacing() {
        let err = calculate_group_efficiency(400.0, 0.0, 1.0, &[grid_2x2()]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GROUP_INPUT");

        let err = calculate_group_efficiency(400.0, 0.4, -0.5, &[grid_2x2()]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GROUP_INPUT");
    }

    #[test]
    fn test_distinct_counts_with_tolerance() {
        // Coordinates differing by less than 1 mm collapse into one column
        let layout = GroupLayout::new(1, 2.0, 2.0)
            .with_pile(1, 0.0, 0.0)
            .with_pile(2, 0.0005, 1.0)
            .with_pile(3, 1.0, 0.0);
        assert_eq!(layout.distinct_columns(), 2);
        assert_eq!(layout.distinct_rows(), 2);
    }

    #[test]
    fn test_irregular_layout_rows_columns() {
        // 3 piles in an L: x in {0, 1}, y in {0, 1}
        let layout = GroupLayout::new(1, 2.0, 2.0)
            .with_pile(1, 0.0, 0.0)
            .with_pile(2, 1.0, 0.0)
            .with_pile(3, 0.0, 1.0);
        let summary = calculate_group_efficiency(300.0, 0.4, 1.2, &[layout]).unwrap();
        let result = &summary.results[0];
        assert_eq!(result.rows, 2);
        assert_eq!(result.columns, 2);
        assert_eq!(result.pile_count, 3);
    }

    #[test]
    fn test_summary_serialization() {
        let summary = calculate_group_efficiency(500.0, 0.4, 1.0, &[grid_2x2()]).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        let roundtrip: GroupSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, roundtrip);
    }
}
