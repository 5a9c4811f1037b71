//! BSM Sensitivity Visualization
//!
//! Renders the option price and PnL sensitivity to spot and volatility as
//! ASCII grids, the text counterpart of a dashboard heatmap.
//!
//! Usage: viz [call|put]

use bsm_options::models::black_scholes;
use bsm_options::prelude::*;

const GRID_STEPS: usize = 15;

fn main() {
    println!("BSM Sensitivity Heatmap");
    println!("=======================\n");

    // Kind comes in as untyped text, so parse at the boundary
    let kind = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<OptionType>() {
            Ok(kind) => kind,
            Err(e) => {
                eprintln!("Warning: {}", e);
                return;
            }
        },
        None => OptionType::Call,
    };

    let spot: f64 = 40.0;
    let strike: f64 = 45.0;
    let maturity: f64 = 0.33;
    let rate: f64 = 0.03;
    let vol: f64 = 0.40;
    let purchase_price: f64 = 5.0;

    println!("Scenario:");
    println!("  Kind: {}", kind);
    println!("  Spot: ${:.2}  Strike: ${:.2}", spot, strike);
    println!("  Maturity: {:.2}y  Rate: {:.1}%", maturity, rate * 100.0);
    println!("  Vol: {:.1}%  Purchase: ${:.2}\n", vol * 100.0, purchase_price);

    // Spot +/-25%, vol 0.5x-1.5x, like a dashboard sensitivity view
    let spots = linspace(spot * 0.75, spot * 1.25, GRID_STEPS);
    let vols = linspace(vol * 0.5, vol * 1.5, GRID_STEPS);

    let grid = match black_scholes::price_grid(&spots, &vols, strike, maturity, rate, kind) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Could not price grid: {}", e);
            return;
        }
    };

    println!("{} Price ($):", heading(kind));
    print_grid(&spots, &vols, |i, j| grid[[i, j]]);

    println!("\n{} PnL vs purchase ($):", heading(kind));
    print_grid(&spots, &vols, |i, j| grid[[i, j]] - purchase_price);

    println!("\n--- Done ---");
}

fn heading(kind: OptionType) -> &'static str {
    match kind {
        OptionType::Call => "Call",
        OptionType::Put => "Put",
    }
}

fn linspace(lo: f64, hi: f64, steps: usize) -> Vec<f64> {
    let step = (hi - lo) / (steps - 1) as f64;
    (0..steps).map(|i| lo + step * i as f64).collect()
}

fn print_grid(spots: &[f64], vols: &[f64], cell: impl Fn(usize, usize) -> f64) {
    print!("Spot\\Vol |");
    for &v in vols.iter().step_by(2) {
        print!(" {:>6.0}%", v * 100.0);
    }
    println!();
    print!("---------+");
    for _ in vols.iter().step_by(2) {
        print!("--------");
    }
    println!();

    for (i, &s) in spots.iter().enumerate() {
        print!(" {:>7.2} |", s);
        for (j, _) in vols.iter().enumerate().step_by(2) {
            print!(" {:>7.2}", cell(i, j));
        }
        println!();
    }
}
