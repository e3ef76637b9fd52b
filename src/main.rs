use chrono::Local;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tradeup_scanner::collection_catalog::load_catalog;
use tradeup_scanner::price_feed::load_price_cache;
use tradeup_scanner::shared_types::ScannerConfig;
use tradeup_scanner::tradeup_engine::compute_opportunities;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let cache_path = PathBuf::from(
        env::var("PRICE_CACHE_FILE").unwrap_or_else(|_| "price_cache.json".to_string()),
    );
    let catalog_path = PathBuf::from(
        env::var("COLLECTIONS_FILE").unwrap_or_else(|_| "collections.json".to_string()),
    );

    let prices = load_price_cache(&cache_path)?;
    let catalog = load_catalog(&catalog_path)?;
    println!(
        "Loaded {} prices and {} collections ({} skins).",
        prices.len(),
        catalog.len(),
        catalog.item_count()
    );

    let config = ScannerConfig::default();
    let mut opportunities = compute_opportunities(&catalog, &prices, &config);
    // Safest first: rank by guaranteed (worst-case) profit.
    opportunities.sort_by(|a, b| b.worst_case_profit.cmp(&a.worst_case_profit));

    println!(
        "Scan finished at {}.",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    if opportunities.is_empty() {
        println!("No risk-free trade-ups found.");
        return Ok(());
    }

    println!("✅ {} risk-free trade-ups found!\n", opportunities.len());
    for op in &opportunities {
        let variant = if op.stattrak { "StatTrak" } else { "Normal" };
        println!(
            "{} | {} -> {} | {} | {} | Cost: ${:.2} | Worst Case: ${:.2} | Avg: ${:.2} | ROI: {:.1}%",
            op.collection,
            op.input_rarity.name(),
            op.output_rarity.name(),
            variant,
            op.wear.full_name(),
            op.cost,
            op.worst_case_profit,
            op.avg_profit,
            op.roi_pct
        );
        println!("    Input (10x): {} @ ${:.2}", op.input_item, op.input_price);
        for output in &op.outputs {
            println!(
                "    -> {} | Sale: ${:.2} | Net: ${:.2} | Profit: ${:.2}",
                output.name, output.price, output.net_value, output.profit
            );
        }
    }

    Ok(())
}
