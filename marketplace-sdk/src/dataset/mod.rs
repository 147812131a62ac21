//! Local fallback dataset
//!
//! Static reference data substituted when the remote API cannot answer. The
//! bundled copy is compiled into the crate and parsed once on first use.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::models::{Company, CriteriaOption, PostalCodeCity, Question, RecommendedSuppliers, Supplier};

const COMPANIES_JSON: &str = include_str!("../../data/companies.json");
const LOCATIONS_JSON: &str = include_str!("../../data/locations.json");
const QUESTIONS_JSON: &str = include_str!("../../data/questions.json");
const SUPPLIERS_JSON: &str = include_str!("../../data/suppliers.json");
const CRITERIA_JSON: &str = include_str!("../../data/criteria.json");

static BUNDLED: Lazy<std::result::Result<Arc<LocalDataset>, String>> =
    Lazy::new(|| LocalDataset::bundled().map(Arc::new).map_err(|e| e.to_string()));

/// Postal codes and countries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    #[serde(default)]
    pub postal_codes: Vec<PostalCodeCity>,
    #[serde(default)]
    pub countries: Vec<String>,
}

/// Search criteria lists and the default criteria tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaCatalog {
    #[serde(default)]
    pub capacities: Vec<CriteriaOption>,
    #[serde(default)]
    pub zones: Vec<CriteriaOption>,
    #[serde(default)]
    pub voltages: Vec<CriteriaOption>,
    #[serde(default)]
    pub lift_types: Vec<CriteriaOption>,
    #[serde(default)]
    pub options: Vec<CriteriaOption>,
    #[serde(default)]
    pub defaults: Vec<String>,
}

/// Read-only reference data for every domain service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDataset {
    #[serde(default)]
    companies: Vec<Company>,
    #[serde(default)]
    locations: LocationData,
    #[serde(default)]
    questions: Vec<Question>,
    suppliers: RecommendedSuppliers,
    #[serde(default)]
    criteria: CriteriaCatalog,
}

impl LocalDataset {
    /// Parse the copy bundled with the crate
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            companies: parse("companies", COMPANIES_JSON)?,
            locations: parse("locations", LOCATIONS_JSON)?,
            questions: parse("questions", QUESTIONS_JSON)?,
            suppliers: parse("suppliers", SUPPLIERS_JSON)?,
            criteria: parse("criteria", CRITERIA_JSON)?,
        })
    }

    /// The bundled dataset, parsed once and shared
    pub fn shared() -> Result<Arc<Self>> {
        match &*BUNDLED {
            Ok(dataset) => Ok(Arc::clone(dataset)),
            Err(message) => Err(ServiceError::parsing(message.clone())),
        }
    }

    /// Build a dataset from a single JSON document.
    ///
    /// The document has the keys `companies`, `locations`
    /// (`{postalCodes, countries}`), `questions`, `suppliers`
    /// (`{recommended, others}`) and `criteria`; only `suppliers` is required.
    pub fn from_json(document: &str) -> Result<Self> {
        parse("dataset", document)
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn postal_codes(&self) -> &[PostalCodeCity] {
        &self.locations.postal_codes
    }

    pub fn countries(&self) -> &[String] {
        &self.locations.countries
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn recommended_suppliers(&self) -> &[Supplier] {
        &self.suppliers.recommended
    }

    pub fn other_suppliers(&self) -> &[Supplier] {
        &self.suppliers.others
    }

    /// The recommended/other split as stored
    pub fn supplier_split(&self) -> &RecommendedSuppliers {
        &self.suppliers
    }

    /// Recommended suppliers followed by the others
    pub fn all_suppliers(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.recommended.iter().chain(self.suppliers.others.iter())
    }

    pub fn criteria(&self) -> &CriteriaCatalog {
        &self.criteria
    }
}

fn parse<T: serde::de::DeserializeOwned>(section: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| ServiceError::parsing(format!("Invalid {} dataset: {}", section, e)))
}
