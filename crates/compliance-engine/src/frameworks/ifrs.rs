//! IFRS Accounting Standards (flat: no disclosure groups)

use crate::catalog::{FrameworkCatalog, StandardSpec};

const STANDARDS: &[(&str, &str, f64)] = &[
    ("IFRS 9", "Financial Instruments", 0.9),
    ("IFRS 15", "Revenue from Contracts with Customers", 0.9),
    ("IFRS 16", "Leases", 0.8),
];

pub fn ifrs_framework() -> FrameworkCatalog {
    FrameworkCatalog::Flat {
        standards: STANDARDS
            .iter()
            .map(|&(code, title, weight)| StandardSpec {
                code: code.to_string(),
                title: title.to_string(),
                weight,
            })
            .collect(),
    }
}
