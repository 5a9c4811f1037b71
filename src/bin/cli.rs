//! BSM Options CLI
//!
//! Command-line pricer: prices, PnL, Greeks, implied-vol round trip, and
//! scenario history. Pass a ticker to also pull a live option chain and
//! print its volatility smile.

use bsm_options::models::{black_scholes, implied_vol};
use bsm_options::prelude::*;

fn main() {
    println!("BSM Option Pricer");
    println!("=================\n");

    // Baseline scenario
    let spot = 40.0;
    let strike = 45.0;
    let maturity = 0.33; // ~4 months
    let rate = 0.03;
    let vol = 0.40;
    let purchase_price = 5.0;

    println!("Model Parameters:");
    println!("  Spot: ${:.2}", spot);
    println!("  Strike: ${:.2}", strike);
    println!("  Maturity: {:.2} years", maturity);
    println!("  Rate: {:.1}%", rate * 100.0);
    println!("  Vol: {:.1}%", vol * 100.0);
    println!("  Purchase Price: ${:.2}\n", purchase_price);

    let call_price = match black_scholes::price(spot, strike, maturity, rate, vol, OptionType::Call)
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Pricing failed: {}", e);
            return;
        }
    };
    let put_price = match black_scholes::price(spot, strike, maturity, rate, vol, OptionType::Put) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Pricing failed: {}", e);
            return;
        }
    };

    println!("Option Prices & PnL:");
    println!(
        "  Call: ${:.3}  (PnL vs purchase: ${:+.3})",
        call_price,
        call_price - purchase_price
    );
    println!(
        "  Put:  ${:.3}  (PnL vs purchase: ${:+.3})",
        put_price,
        put_price - purchase_price
    );
    println!(
        "  Call intrinsic: ${:.3}, Put intrinsic: ${:.3}\n",
        OptionType::Call.intrinsic(spot, strike),
        OptionType::Put.intrinsic(spot, strike)
    );

    println!("The Greeks:");
    for kind in [OptionType::Call, OptionType::Put] {
        match black_scholes::greeks(spot, strike, maturity, rate, vol, kind) {
            Ok(g) => println!(
                "  {:<4}  delta {:+.4}  gamma {:.4}  vega {:.4}  theta {:+.4}  rho {:+.4}",
                kind,
                g.delta,
                g.gamma,
                g.vega,
                g.theta,
                g.rho
            ),
            Err(e) => println!("  {}: Greeks failed: {}", kind, e),
        }
    }

    println!("\nImplied Volatility Round Trip:");
    match implied_vol::implied_volatility(call_price, spot, strike, maturity, rate, OptionType::Call)
    {
        Ok(Some(iv)) => println!(
            "  Recovered vol: {:.2}% (input: {:.2}%)",
            iv * 100.0,
            vol * 100.0
        ),
        Ok(None) => println!("  Implied vol could not be resolved"),
        Err(e) => println!("  Solver failed: {}", e),
    }

    // Scenario history
    println!("\nScenario History:");
    match save_and_list_scenario(spot, strike, maturity, rate, vol) {
        Ok(history) => {
            for record in history.iter().take(5) {
                println!(
                    "  {}  S={:.2} K={:.2} T={:.2} r={:.3} vol={:.2}  call=${:.3} put=${:.3}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.spot,
                    record.strike,
                    record.maturity,
                    record.rate,
                    record.volatility,
                    record.call_price,
                    record.put_price
                );
            }
        }
        Err(e) => println!("  Could not save scenario: {}", e),
    }

    // Optional live smile for a ticker argument
    if let Some(ticker) = std::env::args().nth(1) {
        println!("\n--- Live Data: {} ---", ticker);
        if let Err(e) = print_live_smile(&ticker, rate) {
            println!("Could not fetch {}: {}", ticker, e);
            println!("(This is expected if you're offline or the API is unavailable)");
        }
    }

    println!("\n--- Done ---");
}

fn save_and_list_scenario(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    vol: f64,
) -> BsmResult<Vec<ScenarioRecord>> {
    let store = ScenarioStore::new("./data/scenarios.json")?;
    let record = ScenarioRecord::evaluate(spot, strike, maturity, rate, vol)?;
    store.save(&record)?;
    store.load()
}

fn print_live_smile(ticker: &str, rate: f64) -> BsmResult<()> {
    let fetcher = CachedFetcher::new(CacheConfig::default())?;

    let spot = fetcher.get_spot(ticker)?;
    println!("{} spot: ${:.2}", ticker, spot.price);

    let expirations = fetcher.get_expirations(ticker)?;
    println!("Expirations available: {}", expirations.len());

    // Pick the nearest expiry at least a week out
    let today = chrono::Utc::now().date_naive();
    let Some(&expiry) = expirations
        .iter()
        .find(|&&e| (e - today).num_days() >= 7)
    else {
        println!("No expiry at least a week out, skipping smile");
        return Ok(());
    };

    let chain = fetcher.get_chain(ticker, expiry)?;
    println!(
        "Chain for {}: {} calls, {} puts",
        expiry,
        chain.calls.len(),
        chain.puts.len()
    );

    let smile = compute_smile(&chain, rate)?;
    if smile.is_empty() {
        println!("No liquid quotes resolved to an implied vol");
        return Ok(());
    }

    println!("Volatility smile ({} points):", smile.len());
    println!("  Strike    Call IV    Put IV");
    for strike in chain.strikes() {
        let call_iv = smile
            .calls
            .iter()
            .find(|p| (p.strike - strike).abs() < 0.01)
            .map(|p| format!("{:>6.1}%", p.implied_vol * 100.0))
            .unwrap_or_else(|| "     -".to_string());
        let put_iv = smile
            .puts
            .iter()
            .find(|p| (p.strike - strike).abs() < 0.01)
            .map(|p| format!("{:>6.1}%", p.implied_vol * 100.0))
            .unwrap_or_else(|| "     -".to_string());

        println!("  {:>7.2}   {}    {}", strike, call_iv, put_iv);
    }

    if let Some(atm) = smile.atm_vol() {
        println!("ATM vol: {:.1}%", atm * 100.0);
    }

    Ok(())
}
