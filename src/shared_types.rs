use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The six quality grades, ordered lowest to highest. Only adjacent-tier
/// transitions are legal trade-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    #[serde(rename = "Consumer Grade")]
    ConsumerGrade,
    #[serde(rename = "Industrial Grade")]
    IndustrialGrade,
    #[serde(rename = "Mil-Spec", alias = "Mil-Spec Grade")]
    MilSpec,
    #[serde(rename = "Restricted")]
    Restricted,
    #[serde(rename = "Classified")]
    Classified,
    #[serde(rename = "Covert")]
    Covert,
}

impl RarityTier {
    pub const ORDER: [RarityTier; 6] = [
        RarityTier::ConsumerGrade,
        RarityTier::IndustrialGrade,
        RarityTier::MilSpec,
        RarityTier::Restricted,
        RarityTier::Classified,
        RarityTier::Covert,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::ConsumerGrade => "Consumer Grade",
            RarityTier::IndustrialGrade => "Industrial Grade",
            RarityTier::MilSpec => "Mil-Spec",
            RarityTier::Restricted => "Restricted",
            RarityTier::Classified => "Classified",
            RarityTier::Covert => "Covert",
        }
    }

    /// Accepts the six canonical names plus the third-party spelling
    /// "Mil-Spec Grade" used by some catalog exports.
    pub fn from_name(name: &str) -> Option<RarityTier> {
        match name {
            "Consumer Grade" => Some(RarityTier::ConsumerGrade),
            "Industrial Grade" => Some(RarityTier::IndustrialGrade),
            "Mil-Spec" | "Mil-Spec Grade" => Some(RarityTier::MilSpec),
            "Restricted" => Some(RarityTier::Restricted),
            "Classified" => Some(RarityTier::Classified),
            "Covert" => Some(RarityTier::Covert),
            _ => None,
        }
    }
}

/// Cosmetic condition bands, enumerated in the fixed scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearState {
    #[serde(rename = "Factory New")]
    FactoryNew,
    #[serde(rename = "Minimal Wear")]
    MinimalWear,
    #[serde(rename = "Field-Tested")]
    FieldTested,
    #[serde(rename = "Well-Worn")]
    WellWorn,
    #[serde(rename = "Battle-Scarred")]
    BattleScarred,
}

impl WearState {
    pub const ALL: [WearState; 5] = [
        WearState::FactoryNew,
        WearState::MinimalWear,
        WearState::FieldTested,
        WearState::WellWorn,
        WearState::BattleScarred,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            WearState::FactoryNew => "FN",
            WearState::MinimalWear => "MW",
            WearState::FieldTested => "FT",
            WearState::WellWorn => "WW",
            WearState::BattleScarred => "BS",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            WearState::FactoryNew => "Factory New",
            WearState::MinimalWear => "Minimal Wear",
            WearState::FieldTested => "Field-Tested",
            WearState::WellWorn => "Well-Worn",
            WearState::BattleScarred => "Battle-Scarred",
        }
    }

    pub fn from_code(code: &str) -> Option<WearState> {
        match code {
            "FN" => Some(WearState::FactoryNew),
            "MW" => Some(WearState::MinimalWear),
            "FT" => Some(WearState::FieldTested),
            "WW" => Some(WearState::WellWorn),
            "BS" => Some(WearState::BattleScarred),
            _ => None,
        }
    }
}

/// Read-only mapping from canonical key to market price. Every stored price
/// is strictly positive; non-positive inserts are discarded.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PriceCache(HashMap<String, Decimal>);

/// Deserialization routes through `insert` so the positive-price invariant
/// holds even for hand-edited or corrupted cache files.
impl<'de> Deserialize<'de> for PriceCache {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = HashMap::<String, Decimal>::deserialize(deserializer)?;
        let mut cache = PriceCache::new();
        for (key, price) in entries {
            cache.insert(key, price);
        }
        Ok(cache)
    }
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, price: Decimal) {
        if price > Decimal::ZERO {
            self.0.insert(key, price);
        }
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

/// Collection name -> rarity tier -> ordered raw item names.
/// BTreeMaps keep scan output deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionCatalog(BTreeMap<String, BTreeMap<RarityTier, Vec<String>>>);

impl CollectionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&mut self, collection: &str, tier: RarityTier, item: String) {
        self.0
            .entry(collection.to_string())
            .or_default()
            .entry(tier)
            .or_default()
            .push(item);
    }

    pub fn collections(
        &self,
    ) -> impl Iterator<Item = (&String, &BTreeMap<RarityTier, Vec<String>>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|tiers| tiers.values())
            .map(|items| items.len())
            .sum()
    }
}

/// One priced output candidate of a trade-up.
#[derive(Debug, Clone, Serialize)]
pub struct OutputValue {
    pub name: String,
    pub price: Decimal,
    pub net_value: Decimal,
    pub profit: Decimal,
}

/// A risk-free trade-up candidate. Immutable once returned by the engine.
/// Callers are expected to rank by `worst_case_profit` descending.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityRecord {
    pub collection: String,
    pub input_rarity: RarityTier,
    pub output_rarity: RarityTier,
    pub stattrak: bool,
    pub wear: WearState,
    /// Cheapest eligible input item; the cost model buys it ten times.
    pub input_item: String,
    pub input_price: Decimal,
    pub cost: Decimal,
    pub outputs: Vec<OutputValue>,
    /// Uniform average over the priced outputs, post-tax.
    pub avg_net_value: Decimal,
    pub avg_profit: Decimal,
    pub worst_case_profit: Decimal,
    pub roi_pct: Decimal,
}

/// Steam takes ~13% of every sale; this is the post-tax multiplier.
pub const NET_PROCEEDS_FACTOR: Decimal = dec!(0.869565);

/// Item categories that never participate in trade-ups. Any market name
/// containing one of these substrings is dropped during cache construction.
pub const EXCLUDED_CATEGORIES: [&str; 26] = [
    "Sticker",
    "Graffiti",
    "Case",
    "Key",
    "Capsule",
    "Container",
    "Music Kit",
    "Tool",
    "Souvenir",
    "Agent",
    "crate",
    "musickit",
    "Patch",
    "Pin",
    "Knife",
    "Glove",
    "Bayonet",
    "Karambit",
    "Daggers",
    "Wraps",
    "Pass",
    "Holo",
    "Foil",
    "Contenders",
    "Challengers",
    "Legends",
];

/// Tunable knobs of a scan. Defaults reproduce the standard Steam market
/// model; override per run if modeling a different marketplace.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub tax_factor: Decimal,
    pub excluded_categories: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tax_factor: NET_PROCEEDS_FACTOR,
            excluded_categories: EXCLUDED_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Consumer Grade", Some(RarityTier::ConsumerGrade))]
    #[case("Mil-Spec", Some(RarityTier::MilSpec))]
    #[case("Mil-Spec Grade", Some(RarityTier::MilSpec))]
    #[case("Covert", Some(RarityTier::Covert))]
    #[case("Contraband", None)]
    fn rarity_from_name(#[case] name: &str, #[case] expected: Option<RarityTier>) {
        assert_eq!(RarityTier::from_name(name), expected);
    }

    #[test]
    fn rarity_order_is_strict() {
        for pair in RarityTier::ORDER.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[rstest]
    #[case("FN", "Factory New")]
    #[case("MW", "Minimal Wear")]
    #[case("FT", "Field-Tested")]
    #[case("WW", "Well-Worn")]
    #[case("BS", "Battle-Scarred")]
    fn wear_code_round_trip(#[case] code: &str, #[case] full: &str) {
        let wear = WearState::from_code(code).unwrap();
        assert_eq!(wear.code(), code);
        assert_eq!(wear.full_name(), full);
    }

    #[test]
    fn price_cache_rejects_non_positive() {
        let mut cache = PriceCache::new();
        cache.insert("free lunch".to_string(), Decimal::ZERO);
        cache.insert("refund".to_string(), dec!(-1.5));
        cache.insert("real item".to_string(), dec!(0.03));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("real item"), Some(dec!(0.03)));
        assert_eq!(cache.get("free lunch"), None);
    }

    #[test]
    fn deserialization_enforces_positive_prices() {
        let cache: PriceCache = serde_json::from_str(
            r#"{"A (Factory New)": 0.0, "B (Factory New)": -2.0, "C (Factory New)": 1.5}"#,
        )
        .unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("C (Factory New)"), Some(dec!(1.5)));
        assert_eq!(cache.get("A (Factory New)"), None);
    }

    #[test]
    fn catalog_preserves_item_order() {
        let mut catalog = CollectionCatalog::new();
        catalog.insert_item("Alpha", RarityTier::MilSpec, "B".to_string());
        catalog.insert_item("Alpha", RarityTier::MilSpec, "A".to_string());
        let (_, tiers) = catalog.collections().next().unwrap();
        assert_eq!(tiers[&RarityTier::MilSpec], vec!["B", "A"]);
    }
}
