//! Regional cultural and ecological context
//!
//! Maps a glacier's administrative region to the communities and heritage
//! sites that depend on it, plus the ecosystems and species of the
//! Patagonian ice margin.

use serde::{Deserialize, Serialize};

/// Communities and sites tied to one region
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionalHeritage {
    /// Indigenous and historic communities
    pub communities: Vec<String>,
    /// Culturally significant sites
    pub sites: Vec<String>,
}

/// Catalog entry keyed by region-name substrings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    /// Substrings matched against the glacier's region name
    pub region_keys: Vec<String>,
    /// Heritage for matching regions
    pub heritage: RegionalHeritage,
}

/// Region lookup plus the regional ecosystem and species lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCatalog {
    entries: Vec<RegionEntry>,
    ecosystems: Vec<String>,
    species: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl RegionCatalog {
    /// Catalog over custom entries
    pub fn new(entries: Vec<RegionEntry>, ecosystems: Vec<String>, species: Vec<String>) -> Self {
        RegionCatalog {
            entries,
            ecosystems,
            species,
        }
    }

    /// Aysén and Magallanes catalog
    pub fn patagonia() -> Self {
        RegionCatalog::new(
            vec![
                RegionEntry {
                    region_keys: strings(&["Aysén", "Patagonia"]),
                    heritage: RegionalHeritage {
                        communities: strings(&["Tehuelche", "Historic gaucho communities"]),
                        sites: strings(&[
                            "Traditional livestock droving routes",
                            "Patagonian archaeological sites",
                        ]),
                    },
                },
                RegionEntry {
                    region_keys: strings(&["Magallanes"]),
                    heritage: RegionalHeritage {
                        communities: strings(&["Kawésqar", "Yagán", "Selk'nam (historic sites)"]),
                        sites: strings(&[
                            "Traditional navigable channels",
                            "Kawésqar ceremonial sites",
                        ]),
                    },
                },
            ],
            strings(&[
                "Periglacial ecosystems",
                "Patagonian temperate forests",
                "Sphagnum peatlands",
                "Glacial lake systems",
            ]),
            strings(&[
                "Huemul (Hippocamelus bisulcus)",
                "Andean condor (Vultur gryphus)",
                "Ruddy-headed goose (Chloephaga rubidiceps)",
                "Endemic periglacial flora",
            ]),
        )
    }

    /// Heritage for a region name
    ///
    /// Every matching entry contributes its sites. Communities come from the
    /// last matching entry, so a region naming both Patagonia and Magallanes
    /// reports the Magallanes peoples.
    pub fn heritage_for(&self, region: &str) -> RegionalHeritage {
        let mut heritage = RegionalHeritage::default();
        for entry in &self.entries {
            if entry.region_keys.iter().any(|key| region.contains(key.as_str())) {
                heritage.communities.clone_from(&entry.heritage.communities);
                heritage.sites.extend(entry.heritage.sites.iter().cloned());
            }
        }
        heritage
    }

    /// Ecosystems of the ice margin
    pub fn ecosystems(&self) -> &[String] {
        &self.ecosystems
    }

    /// Species depending on glacial habitats
    pub fn species(&self) -> &[String] {
        &self.species
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::patagonia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aysen_heritage() {
        let catalog = RegionCatalog::patagonia();
        let h = catalog.heritage_for("Aysén del General Carlos Ibáñez del Campo");
        assert_eq!(h.communities, vec!["Tehuelche", "Historic gaucho communities"]);
        assert_eq!(h.sites.len(), 2);
    }

    #[test]
    fn test_magallanes_heritage() {
        let catalog = RegionCatalog::patagonia();
        let h = catalog.heritage_for("Magallanes y de la Antártica Chilena");
        assert_eq!(h.communities.len(), 3);
        assert!(h.communities.iter().any(|c| c == "Kawésqar"));
    }

    #[test]
    fn test_both_keys_merge_sites() {
        let catalog = RegionCatalog::patagonia();
        let h = catalog.heritage_for("Patagonia, Magallanes");
        assert_eq!(h.sites.len(), 4);
        assert!(h.communities.iter().any(|c| c == "Yagán"));
    }

    #[test]
    fn test_unknown_region_is_empty() {
        let catalog = RegionCatalog::patagonia();
        assert_eq!(catalog.heritage_for("Los Lagos"), RegionalHeritage::default());
        assert_eq!(catalog.ecosystems().len(), 4);
        assert_eq!(catalog.species().len(), 4);
    }
}
