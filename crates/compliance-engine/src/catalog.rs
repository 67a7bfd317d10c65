//! Standards catalog types
//!
//! A catalog maps framework names to one of two shapes:
//! - Grouped: standard groups, each an ordered list of disclosures (GRI)
//! - Flat: an ordered list of standards with a code and title (IFRS)
//!
//! Catalogs are immutable once loaded. Order is preserved because report
//! rows are emitted in catalog order.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A single disclosure requirement within a standard group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisclosureSpec {
    #[serde(rename = "disclosure")]
    pub id: String,
    pub title: String,
    pub weight: f64,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_ref: Option<String>,
}

impl DisclosureSpec {
    pub fn new(id: &str, title: &str, weight: f64, mandatory: bool) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            weight,
            mandatory,
            sector_ref: None,
        }
    }

    /// Requirement label used in report rows, e.g. "2-1 Organizational details"
    pub fn requirement(&self) -> String {
        format!("{} {}", self.id, self.title)
    }
}

/// Named group of disclosures, e.g. "GRI 2: General Disclosures 2021"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardGroup {
    pub name: String,
    pub disclosures: Vec<DisclosureSpec>,
}

/// Entry of a flat framework, e.g. "IFRS 16 Leases"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardSpec {
    #[serde(rename = "standard")]
    pub code: String,
    pub title: String,
    pub weight: f64,
}

/// The two catalog shapes a framework can take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameworkCatalog {
    Grouped { groups: Vec<StandardGroup> },
    Flat { standards: Vec<StandardSpec> },
}

impl FrameworkCatalog {
    /// Number of report rows an analysis against this framework produces
    pub fn row_count(&self) -> usize {
        match self {
            FrameworkCatalog::Grouped { groups } => {
                groups.iter().map(|g| g.disclosures.len()).sum()
            }
            FrameworkCatalog::Flat { standards } => standards.len(),
        }
    }

    fn validate(&self, framework: &str) -> Result<(), CatalogError> {
        match self {
            FrameworkCatalog::Grouped { groups } => {
                let mut group_names = HashSet::new();
                for group in groups {
                    if !group_names.insert(group.name.as_str()) {
                        return Err(CatalogError::DuplicateGroup {
                            framework: framework.to_string(),
                            group: group.name.clone(),
                        });
                    }

                    let mut ids = HashSet::new();
                    for disclosure in &group.disclosures {
                        check_weight(&disclosure.id, disclosure.weight)?;
                        if !ids.insert(disclosure.id.as_str()) {
                            return Err(CatalogError::DuplicateDisclosure {
                                group: group.name.clone(),
                                id: disclosure.id.clone(),
                            });
                        }
                    }
                }
            }
            FrameworkCatalog::Flat { standards } => {
                let mut codes = HashSet::new();
                for standard in standards {
                    check_weight(&standard.code, standard.weight)?;
                    if !codes.insert(standard.code.as_str()) {
                        return Err(CatalogError::DuplicateStandard {
                            framework: framework.to_string(),
                            code: standard.code.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_weight(id: &str, weight: f64) -> Result<(), CatalogError> {
    if weight > 0.0 && weight <= 1.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidWeight {
            id: id.to_string(),
            weight,
        })
    }
}

/// Versioned set of frameworks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub frameworks: BTreeMap<String, FrameworkCatalog>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate groups/ids and out-of-range weights
    pub fn new(
        version: impl Into<String>,
        frameworks: BTreeMap<String, FrameworkCatalog>,
    ) -> Result<Self, CatalogError> {
        for (name, framework) in &frameworks {
            framework.validate(name)?;
        }
        Ok(Self {
            version: version.into(),
            frameworks,
        })
    }

    /// Load and validate a catalog from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Catalog = serde_json::from_str(json)?;
        Self::new(raw.version, raw.frameworks)
    }

    pub fn framework(&self, name: &str) -> Option<&FrameworkCatalog> {
        self.frameworks.get(name)
    }

    pub fn framework_names(&self) -> Vec<&str> {
        self.frameworks.keys().map(String::as_str).collect()
    }
}
