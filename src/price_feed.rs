use crate::error::ScanError;
use crate::normalization::{cache_key, normalize};
use crate::shared_types::{PriceCache, ScannerConfig};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// One entry of the raw market dump. Window fields stay as raw JSON values
/// because the feed mixes numbers, strings and nulls freely.
#[derive(Deserialize, Debug)]
pub struct RawPriceEntry {
    pub name: Option<String>,
    #[serde(default)]
    pub price: PriceWindows,
}

#[derive(Deserialize, Debug, Default)]
pub struct PriceWindows {
    #[serde(rename = "24_hours", default)]
    pub last_24h: WindowStats,
    #[serde(rename = "7_days", default)]
    pub last_7d: WindowStats,
    #[serde(rename = "30_days", default)]
    pub last_30d: WindowStats,
    #[serde(rename = "all_time", default)]
    pub all_time: WindowStats,
}

#[derive(Deserialize, Debug, Default)]
pub struct WindowStats {
    #[serde(default)]
    pub average: Value,
    #[serde(default)]
    pub median: Value,
}

/// A numeric, non-zero value counts; strings, nulls and zeros are treated
/// as absent so the next window gets a chance. Negative values are usable
/// here and rejected later by the cache's positive-price gate.
fn usable(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|price| *price != 0.0)
            .and_then(Decimal::from_f64),
        _ => None,
    }
}

/// Selects a price for an item: 24h average, then 7-day average, then
/// 30-day median, then all-time average. Zero when nothing is usable;
/// items without a strictly positive result never enter the cache.
pub fn extract_price(windows: &PriceWindows) -> Decimal {
    usable(&windows.last_24h.average)
        .or_else(|| usable(&windows.last_7d.average))
        .or_else(|| usable(&windows.last_30d.median))
        .or_else(|| usable(&windows.all_time.average))
        .unwrap_or(Decimal::ZERO)
}

/// Parses the raw dump text. Some exports wrap the item map in an
/// `items_list` field, others are the bare map; accept both.
pub fn parse_price_dump(text: &str) -> Result<HashMap<String, RawPriceEntry>, serde_json::Error> {
    #[derive(Deserialize)]
    struct Wrapped {
        items_list: HashMap<String, RawPriceEntry>,
    }

    if let Ok(wrapped) = serde_json::from_str::<Wrapped>(text) {
        return Ok(wrapped.items_list);
    }
    serde_json::from_str(text)
}

/// Builds the canonical price cache from a parsed dump: excluded categories
/// and unpriced or nameless entries are dropped, everything else is keyed
/// via the shared normalization rules.
pub fn build_price_cache(
    entries: &HashMap<String, RawPriceEntry>,
    config: &ScannerConfig,
) -> PriceCache {
    let mut cache = PriceCache::new();

    for entry in entries.values() {
        let Some(raw_name) = entry.name.as_deref() else {
            continue;
        };

        if config
            .excluded_categories
            .iter()
            .any(|category| raw_name.contains(category.as_str()))
        {
            continue;
        }

        let price = extract_price(&entry.price);
        if price <= Decimal::ZERO {
            continue;
        }

        let Some(normalized) = normalize(raw_name) else {
            continue;
        };

        cache.insert(cache_key(normalized.stattrak, &normalized.clean), price);
    }

    cache
}

/// Downloads the raw price dump.
pub async fn fetch_price_dump(url: &str) -> Result<HashMap<String, RawPriceEntry>, ScanError> {
    let client = reqwest::Client::new();
    let text = client
        .get(url)
        .header("User-Agent", "TradeupScanner/1.0")
        .send()
        .await?
        .text()
        .await?;

    parse_price_dump(&text).map_err(ScanError::DumpFormat)
}

/// Loads the canonical `price_cache.json`. A missing file is a setup error,
/// not an empty cache.
pub fn load_price_cache(path: &Path) -> Result<PriceCache, ScanError> {
    if !path.exists() {
        return Err(ScanError::MissingTable {
            path: path.to_path_buf(),
            hint: "run prepare_data first",
        });
    }

    let text = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ScanError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_price_cache(path: &Path, cache: &PriceCache) -> Result<(), ScanError> {
    let text = serde_json::to_string_pretty(cache).map_err(|source| ScanError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}
