//! Ingestion step: turns raw third-party dumps into the two canonical
//! tables the scanner reads (`price_cache.json` and `collections.json`).

use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use tradeup_scanner::collection_catalog::{convert_collections, save_catalog, RawCollection};
use tradeup_scanner::normalization::STATTRAK_PREFIX;
use tradeup_scanner::price_feed::{
    build_price_cache, fetch_price_dump, parse_price_dump, save_price_cache, RawPriceEntry,
};
use tradeup_scanner::shared_types::ScannerConfig;
use std::collections::HashMap;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let dump_path =
        PathBuf::from(env::var("PRICES_DUMP_FILE").unwrap_or_else(|_| "v2.json".to_string()));
    let cache_path = PathBuf::from(
        env::var("PRICE_CACHE_FILE").unwrap_or_else(|_| "price_cache.json".to_string()),
    );
    let raw_collections_path = PathBuf::from(
        env::var("RAW_COLLECTIONS_FILE").unwrap_or_else(|_| "raw_data.json".to_string()),
    );
    let catalog_path = PathBuf::from(
        env::var("COLLECTIONS_FILE").unwrap_or_else(|_| "collections.json".to_string()),
    );

    let config = ScannerConfig::default();

    println!("🔄 Processing price dump...");
    let entries = load_or_fetch_dump(&dump_path).await?;
    let cache = build_price_cache(&entries, &config);
    let stattrak_count = cache.keys().filter(|k| k.starts_with(STATTRAK_PREFIX)).count();
    save_price_cache(&cache_path, &cache)?;
    println!(
        "✅ Price cache written to {}: {} items ({} StatTrak).",
        cache_path.display(),
        cache.len(),
        stattrak_count
    );

    if raw_collections_path.exists() {
        println!("🔄 Converting raw collections...");
        let text = std::fs::read_to_string(&raw_collections_path)?;
        let raw: Vec<RawCollection> = serde_json::from_str(&text)?;
        let catalog = convert_collections(raw);
        save_catalog(&catalog_path, &catalog)?;
        println!(
            "✅ Catalog written to {}: {} collections, {} skins.",
            catalog_path.display(),
            catalog.len(),
            catalog.item_count()
        );
    } else {
        println!(
            "No raw collection dump at {}; keeping the existing catalog.",
            raw_collections_path.display()
        );
    }

    Ok(())
}

async fn load_or_fetch_dump(
    dump_path: &Path,
) -> Result<HashMap<String, RawPriceEntry>, Box<dyn std::error::Error>> {
    if dump_path.exists() {
        let text = std::fs::read_to_string(dump_path)?;
        return Ok(parse_price_dump(&text)?);
    }

    match env::var("DUMP_URL") {
        Ok(url) => {
            println!("Local dump missing; fetching {}...", url);
            Ok(fetch_price_dump(&url).await?)
        }
        Err(_) => Err(format!(
            "price dump not found at {} and DUMP_URL is not set",
            dump_path.display()
        )
        .into()),
    }
}
