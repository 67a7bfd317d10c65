//! GRI Standards disclosures
//!
//! Universal Standards (GRI 2, GRI 3) plus the topic standards covered so far.
//! Mandatory disclosures are those required for reporting "in accordance
//! with" the GRI Standards; everything else may be omitted with a reason.

use crate::catalog::{DisclosureSpec, FrameworkCatalog, StandardGroup};

/// (disclosure, title, weight, mandatory)
type Row = (&'static str, &'static str, f64, bool);

const GENERAL_DISCLOSURES: &[Row] = &[
    ("2-1", "Organizational details", 1.0, true),
    ("2-2", "Entities included in the organization’s sustainability reporting", 1.0, true),
    ("2-3", "Reporting period, frequency and contact point", 1.0, true),
    ("2-4", "Restatements of information", 0.8, false),
    ("2-5", "External assurance", 0.9, false),
    ("2-6", "Activities, value chain and other business relationships", 1.0, true),
    ("2-7", "Employees", 1.0, true),
    ("2-8", "Workers who are not employees", 0.8, false),
    ("2-9", "Governance structure and composition", 1.0, true),
    ("2-10", "Nomination and selection of the highest governance body", 0.9, false),
    ("2-11", "Chair of the highest governance body", 0.8, false),
    ("2-12", "Role of the highest governance body in overseeing the management of impacts", 1.0, true),
    ("2-13", "Delegation of responsibility for managing impacts", 0.9, false),
    ("2-14", "Role of the highest governance body in sustainability reporting", 1.0, true),
    ("2-15", "Conflicts of interest", 0.8, false),
    ("2-16", "Communication of critical concerns", 0.9, false),
    ("2-17", "Collective knowledge of the highest governance body", 0.8, false),
    ("2-18", "Evaluation of the performance of the highest governance body", 0.8, false),
    ("2-19", "Remuneration policies", 0.9, false),
    ("2-20", "Process to determine remuneration", 0.8, false),
    ("2-21", "Annual total compensation ratio", 0.7, false),
    ("2-22", "Statement on sustainable development strategy", 1.0, true),
    ("2-23", "Policy commitments", 1.0, true),
    ("2-24", "Embedding policy commitments", 0.9, false),
    ("2-25", "Processes to remediate negative impacts", 0.9, false),
    ("2-26", "Mechanisms for seeking advice and raising concerns", 0.8, false),
    ("2-27", "Compliance with laws and regulations", 1.0, true),
    ("2-28", "Membership associations", 0.7, false),
    ("2-29", "Approach to stakeholder engagement", 1.0, true),
    ("2-30", "Collective bargaining agreements", 0.8, false),
];

const MATERIAL_TOPICS: &[Row] = &[
    ("3-1", "Process to determine material topics", 1.0, true),
    ("3-2", "List of material topics", 1.0, true),
    ("3-3", "Management of material topics", 1.0, true),
];

const BIODIVERSITY: &[Row] = &[
    ("101-1", "Direct drivers of biodiversity loss", 0.9, false),
    ("101-2", "Impacts on biodiversity", 1.0, true),
    ("101-3", "Management of biodiversity impacts", 0.9, false),
    ("101-4", "Biodiversity protection commitments", 0.8, false),
];

const ECONOMIC_PERFORMANCE: &[Row] = &[
    ("201-1", "Direct economic value generated and distributed", 1.0, true),
    ("201-2", "Financial implications and other risks and opportunities due to climate change", 0.9, false),
    ("201-3", "Defined benefit plan obligations and other retirement plans", 0.8, false),
    ("201-4", "Financial assistance received from government", 0.7, false),
];

const ANTI_CORRUPTION: &[Row] = &[
    ("205-1", "Operations assessed for risks related to corruption", 0.9, false),
    ("205-2", "Communication and training about anti-corruption policies and procedures", 1.0, true),
    ("205-3", "Confirmed incidents of corruption and actions taken", 1.0, true),
];

const ENERGY: &[Row] = &[
    ("302-1", "Energy consumption within the organization", 1.0, true),
    ("302-2", "Energy consumption outside of the organization", 0.8, false),
    ("302-3", "Energy intensity", 0.9, false),
    ("302-4", "Reduction of energy consumption", 0.9, false),
    ("302-5", "Reductions in energy requirements of products and services", 0.8, false),
];

const WATER_AND_EFFLUENTS: &[Row] = &[
    ("303-1", "Interactions with water as a shared resource", 1.0, true),
    ("303-2", "Management of water discharge-related impacts", 0.9, false),
    ("303-3", "Water withdrawal", 1.0, true),
    ("303-4", "Water discharge", 0.9, false),
    ("303-5", "Water consumption", 1.0, true),
];

const EMISSIONS: &[Row] = &[
    ("305-1", "Direct (Scope 1) GHG emissions", 1.0, true),
    ("305-2", "Energy indirect (Scope 2) GHG emissions", 1.0, true),
    ("305-3", "Other indirect (Scope 3) GHG emissions", 0.9, false),
    ("305-4", "GHG emissions intensity", 0.9, false),
    ("305-5", "Reduction of GHG emissions", 0.9, false),
    ("305-6", "Emissions of ozone-depleting substances (ODS)", 0.8, false),
    ("305-7", "Nitrogen oxides (NOx), sulfur oxides (SOx), and other significant air emissions", 0.8, false),
];

const EMPLOYMENT: &[Row] = &[
    ("401-1", "New employee hires and employee turnover", 1.0, true),
    ("401-2", "Benefits provided to full-time employees that are not provided to temporary or part-time employees", 0.8, false),
    ("401-3", "Parental leave", 0.9, false),
];

const OCCUPATIONAL_HEALTH_AND_SAFETY: &[Row] = &[
    ("403-1", "Occupational health and safety management system", 1.0, true),
    ("403-2", "Hazard identification, risk assessment, and incident investigation", 1.0, true),
    ("403-3", "Occupational health services", 0.9, false),
    ("403-4", "Worker participation, consultation, and communication on occupational health and safety", 0.9, false),
    ("403-5", "Worker training on occupational health and safety", 0.9, false),
    ("403-6", "Promotion of worker health", 0.8, false),
    ("403-7", "Prevention and mitigation of occupational health and safety impacts directly linked by business relationships", 0.8, false),
    ("403-8", "Workers covered by an occupational health and safety management system", 1.0, true),
    ("403-9", "Work-related injuries", 1.0, true),
    ("403-10", "Work-related ill health", 0.9, false),
];

const TRAINING_AND_EDUCATION: &[Row] = &[
    ("404-1", "Average hours of training per year per employee", 1.0, true),
    ("404-2", "Programs for upgrading employee skills and transition assistance programs", 0.9, false),
    ("404-3", "Percentage of employees receiving regular performance and career development reviews", 0.9, false),
];

/// Groups in reporting order
const GROUPS: &[(&str, &[Row])] = &[
    ("GRI 2: General Disclosures 2021", GENERAL_DISCLOSURES),
    ("GRI 3: Material Topics 2021", MATERIAL_TOPICS),
    ("GRI 101: Biodiversity 2024", BIODIVERSITY),
    ("GRI 201: Economic Performance 2016", ECONOMIC_PERFORMANCE),
    ("GRI 205: Anti-corruption 2016", ANTI_CORRUPTION),
    ("GRI 302: Energy 2016", ENERGY),
    ("GRI 303: Water and Effluents 2018", WATER_AND_EFFLUENTS),
    ("GRI 305: Emissions 2016", EMISSIONS),
    ("GRI 401: Employment 2016", EMPLOYMENT),
    ("GRI 403: Occupational Health and Safety 2018", OCCUPATIONAL_HEALTH_AND_SAFETY),
    ("GRI 404: Training and Education 2016", TRAINING_AND_EDUCATION),
];

pub fn gri_framework() -> FrameworkCatalog {
    let groups = GROUPS
        .iter()
        .map(|(name, rows)| StandardGroup {
            name: name.to_string(),
            disclosures: rows
                .iter()
                .map(|&(id, title, weight, mandatory)| {
                    DisclosureSpec::new(id, title, weight, mandatory)
                })
                .collect(),
        })
        .collect();

    FrameworkCatalog::Grouped { groups }
}
