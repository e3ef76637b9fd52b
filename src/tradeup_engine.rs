use crate::normalization::canonical_key;
use crate::shared_types::{
    CollectionCatalog, OpportunityRecord, OutputValue, PriceCache, RarityTier, ScannerConfig,
    WearState,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Looks up the market price of a catalog item at a given wear and variant.
/// `None` is the normal outcome for illiquid item/wear combinations, not an
/// error.
pub fn resolve_price(
    prices: &PriceCache,
    name: &str,
    wear: WearState,
    stattrak: bool,
) -> Option<Decimal> {
    let key = canonical_key(name, wear, stattrak)?;
    prices.get(&key)
}

/// Enumerates every (collection, adjacent tier pair, variant, wear)
/// combination and keeps only the risk-free ones: trade-ups whose worst
/// priced outcome still beats the cost.
///
/// Cost model: ten copies of the cheapest resolvable input. Revenue model:
/// every priced output weighted uniformly, taxed by `config.tax_factor`.
/// Combinations with no priced input or no priced output are skipped, never
/// reported. The result is unsorted; rank by `worst_case_profit` descending
/// for display.
pub fn compute_opportunities(
    catalog: &CollectionCatalog,
    prices: &PriceCache,
    config: &ScannerConfig,
) -> Vec<OpportunityRecord> {
    let mut results = Vec::new();

    for (collection_name, tiers) in catalog.collections() {
        for pair in RarityTier::ORDER.windows(2) {
            let (input_rarity, output_rarity) = (pair[0], pair[1]);

            let (Some(inputs), Some(outputs)) =
                (tiers.get(&input_rarity), tiers.get(&output_rarity))
            else {
                continue;
            };

            for stattrak in [false, true] {
                for wear in WearState::ALL {
                    if let Some(record) = evaluate_combination(
                        collection_name,
                        input_rarity,
                        output_rarity,
                        stattrak,
                        wear,
                        inputs,
                        outputs,
                        prices,
                        config,
                    ) {
                        results.push(record);
                    }
                }
            }
        }
    }

    results
}

#[allow(clippy::too_many_arguments)]
fn evaluate_combination(
    collection_name: &str,
    input_rarity: RarityTier,
    output_rarity: RarityTier,
    stattrak: bool,
    wear: WearState,
    inputs: &[String],
    outputs: &[String],
    prices: &PriceCache,
    config: &ScannerConfig,
) -> Option<OpportunityRecord> {
    // Cost side: cheapest resolvable input, bought ten times.
    let mut best_input: Option<(&str, Decimal)> = None;
    for item in inputs {
        let Some(price) = resolve_price(prices, item, wear, stattrak) else {
            continue;
        };
        match best_input {
            Some((_, current)) if price >= current => {}
            _ => best_input = Some((item.as_str(), price)),
        }
    }
    let (input_item, input_price) = best_input?;
    let cost = input_price * dec!(10);

    // Revenue side: every output priced at the same wear and variant.
    let mut output_values = Vec::new();
    let mut total_net = Decimal::ZERO;
    let mut min_net: Option<Decimal> = None;

    for item in outputs {
        let Some(price) = resolve_price(prices, item, wear, stattrak) else {
            continue;
        };
        let net_value = price * config.tax_factor;
        total_net += net_value;
        min_net = Some(match min_net {
            Some(current) if current <= net_value => current,
            _ => net_value,
        });
        output_values.push(OutputValue {
            name: item.clone(),
            price,
            net_value,
            profit: net_value - cost,
        });
    }

    // No priced output means revenue is wholly unknown, not zero.
    let min_net = min_net?;

    let avg_net_value = total_net / Decimal::from(output_values.len());
    let avg_profit = avg_net_value - cost;
    let worst_case_profit = min_net - cost;
    let roi_pct = avg_profit / cost * dec!(100);

    // Risk-free only: the worst outcome must be strictly profitable.
    if worst_case_profit <= Decimal::ZERO {
        return None;
    }

    Some(OpportunityRecord {
        collection: collection_name.to_string(),
        input_rarity,
        output_rarity,
        stattrak,
        wear,
        input_item: input_item.to_string(),
        input_price,
        cost,
        outputs: output_values,
        avg_net_value,
        avg_profit,
        worst_case_profit,
        roi_pct,
    })
}
