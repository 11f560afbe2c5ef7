//! # AxPile CLI
//!
//! Terminal front-end for the pile capacity engine. Prompts for pile
//! geometry, runs a Decourt-Quaresma capacity profile over a demo soil
//! column, then a Converse-Labarre group efficiency check, and prints
//! both a formatted report and the JSON output for programmatic use.

use std::io::{self, BufRead, Write};

use pile_core::capacity::{calculate, CapacityInput};
use pile_core::group::{calculate_group_efficiency, GroupLayout};
use pile_core::piles::{CapacityMethod, PileType};
use pile_core::soil::SoilLayer;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("AxPile CLI - Axial Pile Capacity Calculator");
    println!("===========================================");
    println!();

    let diameter_m = prompt_f64("Pile diameter (m) [0.4]: ", 0.4);
    let pile_depth_m = prompt_f64("Pile depth (m) [10.0]: ", 10.0);
    let cutoff_m = prompt_f64("Cutoff depth (m) [0.0]: ", 0.0);
    let fs = prompt_f64("Safety factor [2.5]: ", 2.5);
    let nspt = prompt_f64("Clay NSPT blow count [10.0]: ", 10.0);

    println!();
    println!("Running Decourt-Quaresma for a driven pile in uniform clay...");
    println!();

    let input = CapacityInput {
        method: CapacityMethod::DecourtQuaresma,
        diameter_m,
        pile_depth_m,
        cutoff_m,
        fs,
        pile_type: Some(PileType::PrefabricatedDrivenOrSteel),
        pile_material: None,
        dz: 1.0,
        layers: vec![SoilLayer::clay(pile_depth_m, "clay").with_nspt(nspt)],
    };

    match calculate(&input) {
        Ok(result) => {
            println!("═══════════════════════════════════════════════════════");
            println!("  CAPACITY PROFILE ({})", input.method);
            println!("═══════════════════════════════════════════════════════");
            println!(
                "{:>8} {:>10} {:>10} {:>10} {:>10}",
                "z (m)", "Qb (kN)", "Qfs (kN)", "Qult (kN)", "Qall (kN)"
            );
            for sample in &result.samples {
                println!(
                    "{:>8.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                    sample.depth_m, sample.qb_kn, sample.qfs_kn, sample.qult_kn, sample.qall_kn
                );
            }
            println!();
            println!("Recap at full depth:");
            println!("  Ab        = {:.4} m2", result.recap.ab_m2);
            println!("  Perimeter = {:.4} m", result.recap.perimeter_m);
            println!("  Qb        = {:.2} kN", result.recap.qb_at_tip_kn);
            println!("  Qfs       = {:.2} kN", result.recap.qfs_total_kn);
            println!("  Qult      = {:.2} kN", result.recap.qult_total_kn);
            println!("  Qall      = {:.2} kN (FS = {})", result.recap.qall_total_kn, result.recap.fs);

            let spacing_m = prompt_f64("\nPile spacing for 2x2 group check (m) [1.0]: ", 1.0);
            let group = GroupLayout::new(1, spacing_m + diameter_m, spacing_m + diameter_m)
                .with_pile(1, 0.0, 0.0)
                .with_pile(2, spacing_m, 0.0)
                .with_pile(3, 0.0, spacing_m)
                .with_pile(4, spacing_m, spacing_m);

            match calculate_group_efficiency(
                result.recap.qall_total_kn,
                diameter_m,
                spacing_m,
                &[group],
            ) {
                Ok(summary) => {
                    for g in &summary.results {
                        println!();
                        println!("Group #{} (Converse-Labarre):", g.group_no);
                        println!("  rows x cols = {} x {}", g.rows, g.columns);
                        println!("  alpha       = {:.2} deg", g.alpha_deg);
                        println!("  efficiency  = {:.3}", g.efficiency);
                        println!("  group Qall  = {:.1} kN", g.group_qall_kn);
                    }
                    for w in &summary.warnings {
                        eprintln!("warning: {}", w);
                    }
                }
                Err(e) => eprintln!("Group efficiency error: {}", e),
            }

            println!();
            println!("JSON output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result.recap) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}
