use crate::error::ScanError;
use crate::shared_types::{CollectionCatalog, RarityTier};
use serde::Deserialize;
use std::path::Path;

/// Raw third-party collection export: a list of collection objects, each
/// with a `contains` array of skins tagged with a rarity object.
#[derive(Deserialize, Debug)]
pub struct RawCollection {
    pub name: Option<String>,
    #[serde(default)]
    pub contains: Vec<RawSkin>,
}

#[derive(Deserialize, Debug)]
pub struct RawSkin {
    pub name: Option<String>,
    pub rarity: Option<RawRarity>,
}

#[derive(Deserialize, Debug)]
pub struct RawRarity {
    pub name: Option<String>,
}

/// Converts the raw export into the canonical catalog. Collections without
/// a name, skins missing a name or rarity, and unknown rarity spellings are
/// skipped; no partial record is ever stored. Item order is preserved.
pub fn convert_collections(raw: Vec<RawCollection>) -> CollectionCatalog {
    let mut catalog = CollectionCatalog::new();

    for collection in raw {
        let Some(collection_name) = collection.name else {
            continue;
        };

        for skin in collection.contains {
            let Some(skin_name) = skin.name else {
                continue;
            };
            let Some(rarity_name) = skin.rarity.and_then(|r| r.name) else {
                continue;
            };
            let Some(tier) = RarityTier::from_name(&rarity_name) else {
                continue;
            };

            catalog.insert_item(&collection_name, tier, skin_name);
        }
    }

    catalog
}

/// Loads the canonical `collections.json`. A missing file is a setup error.
pub fn load_catalog(path: &Path) -> Result<CollectionCatalog, ScanError> {
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

pub fn save_catalog(path: &Path, catalog: &CollectionCatalog) -> Result<(), ScanError> {
    let text = serde_json::to_string_pretty(catalog).map_err(|source| ScanError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> Vec<RawCollection> {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn converts_and_normalizes_rarity_spelling() {
        let catalog = convert_collections(raw(
            r#"[{
                "name": "The Dust Collection",
                "contains": [
                    {"name": "P250 | Sand Dune", "rarity": {"name": "Mil-Spec Grade"}},
                    {"name": "AK-47 | Safari Mesh", "rarity": {"name": "Restricted"}}
                ]
            }]"#,
        ));

        let (name, tiers) = catalog.collections().next().unwrap();
        assert_eq!(name, "The Dust Collection");
        assert_eq!(tiers[&RarityTier::MilSpec], vec!["P250 | Sand Dune"]);
        assert_eq!(tiers[&RarityTier::Restricted], vec!["AK-47 | Safari Mesh"]);
    }

    #[test]
    fn skips_malformed_entries() {
        let catalog = convert_collections(raw(
            r#"[
                {"contains": [{"name": "Orphan", "rarity": {"name": "Covert"}}]},
                {"name": "Partial", "contains": [
                    {"rarity": {"name": "Covert"}},
                    {"name": "No Rarity"},
                    {"name": "Weird", "rarity": {"name": "Ultra Mega"}},
                    {"name": "Kept", "rarity": {"name": "Classified"}}
                ]}
            ]"#,
        ));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.item_count(), 1);
        let (_, tiers) = catalog.collections().next().unwrap();
        assert_eq!(tiers[&RarityTier::Classified], vec!["Kept"]);
    }

    #[test]
    fn load_fails_fast_when_catalog_is_missing() {
        let path = std::env::temp_dir().join(format!(
            "tradeup_scanner_no_such_catalog_{}.json",
            std::process::id()
        ));
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, ScanError::MissingTable { .. }));
    }

    #[test]
    fn load_rejects_malformed_catalog() {
        let path = std::env::temp_dir().join(format!(
            "tradeup_scanner_bad_catalog_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "[not json").unwrap();
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, ScanError::Parse { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn catalog_survives_a_save_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "tradeup_scanner_catalog_roundtrip_{}.json",
            std::process::id()
        ));
        let mut catalog = CollectionCatalog::new();
        catalog.insert_item("Alpha", RarityTier::MilSpec, "A".to_string());
        save_catalog(&path, &catalog).unwrap();

        let back = load_catalog(&path).unwrap();
        assert_eq!(back.item_count(), 1);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn canonical_catalog_round_trips_through_json() {
        let mut catalog = CollectionCatalog::new();
        catalog.insert_item("Alpha", RarityTier::MilSpec, "A".to_string());
        catalog.insert_item("Alpha", RarityTier::Restricted, "C".to_string());

        let text = serde_json::to_string(&catalog).unwrap();
        assert!(text.contains("\"Mil-Spec\""));
        let back: CollectionCatalog = serde_json::from_str(&text).unwrap();
        assert_eq!(back.item_count(), 2);
    }
}
