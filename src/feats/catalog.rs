//! Feat catalogs loaded from JSON
//!
//! A catalog is the flat list of every feat the host knows about, each tagged
//! with the slot category it can fill:
//!
//! ```json
//! { "feats": [ { "category": "class", "id": "...", "name": "...", "level": 1 } ] }
//! ```

use ahash::AHashMap;
use std::collections::hash_map::Entry;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{FeatCategory, FeatId, Level};
use crate::feats::record::FeatRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub category: FeatCategory,
    #[serde(flatten)]
    pub feat: FeatRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatCatalog {
    feats: Vec<CatalogEntry>,
    #[serde(skip)]
    by_id: AHashMap<FeatId, usize>,
}

impl FeatCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = Self {
            feats: entries,
            by_id: AHashMap::new(),
        };
        catalog.reindex();
        catalog
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut catalog: FeatCatalog = serde_json::from_str(content)?;
        catalog.reindex();
        tracing::debug!("Loaded feat catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn reindex(&mut self) {
        self.by_id.clear();
        for (index, entry) in self.feats.iter().enumerate() {
            match self.by_id.entry(entry.feat.id.clone()) {
                Entry::Occupied(_) => {
                    tracing::warn!("Duplicate feat id {} in catalog; first entry wins", entry.feat.id)
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }
    }

    pub fn insert(&mut self, category: FeatCategory, feat: FeatRecord) {
        self.feats.push(CatalogEntry { category, feat });
        self.reindex();
    }

    pub fn len(&self) -> usize {
        self.feats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feats.is_empty()
    }

    pub fn get(&self, id: &FeatId) -> Option<&FeatRecord> {
        self.by_id.get(id).map(|&index| &self.feats[index].feat)
    }

    /// Feats of a category available at `target_level`, in catalog order
    pub fn candidates(&self, category: FeatCategory, target_level: Level) -> Vec<FeatRecord> {
        self.feats
            .iter()
            .filter(|entry| entry.category == category && entry.feat.level <= target_level)
            .map(|entry| entry.feat.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "feats": [
            { "category": "class", "id": "f1", "name": "Power Attack", "level": 1 },
            { "category": "class", "id": "f2", "name": "Brutish Shove", "level": 2 },
            { "category": "class", "id": "f3", "name": "Lunge", "level": 6 },
            { "category": "skill", "id": "s1", "name": "Cat Fall", "level": 1,
              "traits": ["general", "skill"], "prerequisites": ["trained in Acrobatics"] }
        ]
    }"#;

    #[test]
    fn test_load_from_json() {
        let catalog = FeatCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 4);
        let cat_fall = catalog.get(&FeatId::from("s1")).unwrap();
        assert_eq!(cat_fall.prerequisites, vec!["trained in Acrobatics"]);
        assert!(cat_fall.has_trait("skill"));
    }

    #[test]
    fn test_candidates_by_category_and_level() {
        let catalog = FeatCatalog::from_json_str(CATALOG).unwrap();
        let class_feats = catalog.candidates(FeatCategory::Class, 2);
        let ids: Vec<_> = class_feats.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"]);
        assert!(catalog.candidates(FeatCategory::General, 20).is_empty());
    }

    #[test]
    fn test_insert_indexes_entry() {
        let mut catalog = FeatCatalog::default();
        catalog.insert(FeatCategory::General, FeatRecord::new("g1", "Toughness", 1));
        assert!(catalog.get(&FeatId::from("g1")).is_some());
        assert!(catalog.get(&FeatId::from("g2")).is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_first_entry() {
        let mut catalog = FeatCatalog::default();
        catalog.insert(FeatCategory::General, FeatRecord::new("g1", "Toughness", 1));
        catalog.insert(FeatCategory::General, FeatRecord::new("g1", "Diehard", 1));
        assert_eq!(catalog.get(&FeatId::from("g1")).unwrap().name, "Toughness");
    }

    #[test]
    fn test_invalid_json() {
        assert!(FeatCatalog::from_json_str("{ \"feats\": [ { \"id\": 1 } ] }").is_err());
    }
}
