use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;
use tradeup_scanner::shared_types::{
    CollectionCatalog, PriceCache, RarityTier, ScannerConfig, WearState,
};
use tradeup_scanner::tradeup_engine::compute_opportunities;

fn synthetic_tables(collections: usize, items_per_tier: usize) -> (CollectionCatalog, PriceCache) {
    let mut catalog = CollectionCatalog::new();
    let mut prices = PriceCache::new();

    for c in 0..collections {
        let collection = format!("Collection {}", c);
        for (t, tier) in RarityTier::ORDER.iter().enumerate() {
            for i in 0..items_per_tier {
                let name = format!("Skin {}-{}-{}", c, t, i);
                catalog.insert_item(&collection, *tier, name.clone());
                for wear in WearState::ALL {
                    let price = dec!(0.5) * Decimal::from((t + 1) * (i + 1));
                    prices.insert(format!("{} ({})", name, wear.full_name()), price);
                }
            }
        }
    }

    (catalog, prices)
}

fn main() {
    let (catalog, prices) = synthetic_tables(50, 8);
    let config = ScannerConfig::default();

    let start = Instant::now();
    let mut found = 0;
    for _ in 0..100 {
        found = compute_opportunities(&catalog, &prices, &config).len();
    }
    let duration = start.elapsed();
    println!(
        "100 scans over {} collections: {:?} ({} opportunities per scan)",
        catalog.len(),
        duration,
        found
    );
}
