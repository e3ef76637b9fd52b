use crate::shared_types::WearState;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Fixed key prefix for the tracked (StatTrak) variant.
pub const STATTRAK_PREFIX: &str = "ST | ";

/// A raw market name reduced to its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub stattrak: bool,
    pub clean: String,
}

/// Normalizes a raw, decorated market name.
///
/// Turns `★ StatTrak™ Karambit | Fade (FN)` into `Karambit | Fade (FN)`
/// with `stattrak = true`, and `Negev | Mjölnir` into `Negev | Mjolnir`.
/// Returns `None` for names that are empty before or after cleaning; no
/// empty key may ever reach a cache.
///
/// Cache construction and price resolution both key through this function.
/// The two sides must agree byte-for-byte or lookups fail silently, so the
/// cleaning rules live here and nowhere else.
pub fn normalize(raw: &str) -> Option<Normalized> {
    if raw.is_empty() {
        return None;
    }

    // StatTrak detection must happen on the undecorated input.
    let stattrak = raw.contains("StatTrak");

    let stripped = raw
        .replace("StatTrak\u{2122}", "")
        .replace("StatTrak", "")
        .replace('\u{2122}', "")
        .replace('\u{2605}', "");

    let transliterated = stripped.replace('ö', "o").replace('Ö', "O");

    let clean = RE_WHITESPACE
        .replace_all(transliterated.trim(), " ")
        .into_owned();

    if clean.is_empty() {
        return None;
    }

    Some(Normalized { stattrak, clean })
}

/// Formats a price-cache key from an already-cleaned name.
pub fn cache_key(stattrak: bool, clean: &str) -> String {
    if stattrak {
        format!("{}{}", STATTRAK_PREFIX, clean)
    } else {
        clean.to_string()
    }
}

/// Builds the full lookup key for a catalog item at a given wear and
/// variant: `{prefix}{clean name} ({wear full name})`.
///
/// Catalog names carry no wear suffix, so the wear is appended here; the
/// caller's variant flag decides the prefix regardless of any marker left
/// in the raw name.
pub fn canonical_key(name: &str, wear: WearState, stattrak: bool) -> Option<String> {
    let normalized = normalize(name)?;
    Some(cache_key(
        stattrak,
        &format!("{} ({})", normalized.clean, wear.full_name()),
    ))
}
