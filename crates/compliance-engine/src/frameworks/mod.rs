//! Built-in framework catalogs
//!
//! - `GRI`: grouped disclosures (Universal + selected topic standards)
//! - `IFRS`: flat list of accounting standards
//!
//! A deployment can replace these with a JSON catalog via
//! [`Catalog::from_json_str`](crate::catalog::Catalog::from_json_str).

pub mod gri;
pub mod ifrs;

use std::collections::BTreeMap;

use lazy_static::lazy_static;

use crate::catalog::{Catalog, FrameworkCatalog};

/// Version tag of the built-in catalog
pub const BUILTIN_CATALOG_VERSION: &str = "2024.1";

lazy_static! {
    static ref BUILTIN: Catalog = Catalog {
        version: BUILTIN_CATALOG_VERSION.to_string(),
        frameworks: builtin_frameworks(),
    };
}

fn builtin_frameworks() -> BTreeMap<String, FrameworkCatalog> {
    let mut frameworks = BTreeMap::new();
    frameworks.insert("GRI".to_string(), gri::gri_framework());
    frameworks.insert("IFRS".to_string(), ifrs::ifrs_framework());
    frameworks
}

/// The catalog compiled into the engine
pub fn builtin_catalog() -> &'static Catalog {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_passes_validation() {
        let catalog = builtin_catalog();
        assert!(Catalog::new(catalog.version.clone(), catalog.frameworks.clone()).is_ok());
    }

    #[test]
    fn test_builtin_frameworks() {
        assert_eq!(builtin_catalog().framework_names(), vec!["GRI", "IFRS"]);
        assert!(matches!(
            builtin_catalog().framework("IFRS"),
            Some(FrameworkCatalog::Flat { standards }) if standards.len() == 3
        ));
    }
}
