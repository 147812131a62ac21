//! Marketplace data models
//!
//! Records exchanged with the marketplace API and held in the local dataset.
//! Wire names are camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A registered company, looked up by SIREN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub siren: String,
    pub name: String,
    pub address: String,
}

/// One postal code / city pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalCodeCity {
    pub postal_code: String,
    pub city: String,
}

/// An answer choice of a questionnaire step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A questionnaire step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub multi_select: bool,
    #[serde(default)]
    pub allow_other: bool,
    pub options: Vec<QuestionOption>,
}

/// A product characteristic compared against the buyer's needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

/// A supplier offer shown during selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub product_name: String,
    pub supplier_name: String,
    pub rating: f32,
    /// Kilometres from the buyer
    pub distance: f32,
    /// 0-100
    pub match_score: u8,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specs: Vec<ProductSpec>,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub is_certified: bool,
    #[serde(default)]
    pub match_gaps: Vec<String>,
}

/// Supplier split returned for a set of answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSuppliers {
    pub recommended: Vec<Supplier>,
    pub others: Vec<Supplier>,
}

/// Answer ids keyed by question id
pub type UserAnswers = BTreeMap<u32, Vec<String>>;

/// Structured filters of a supplier search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSearchParams {
    /// Free text matched against product, supplier and description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lift_type: Option<String>,
}

impl SupplierSearchParams {
    /// Search by free text only
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            q: Some(query.into()),
            ..Self::default()
        }
    }

    /// Convert parameters to query pairs, in a stable order
    pub fn to_query_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", &self.q),
            ("capacity", &self.capacity),
            ("zone", &self.zone),
            ("voltage", &self.voltage),
            ("liftType", &self.lift_type),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    /// The free-text filter, if any non-empty one was given
    pub fn text_query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

/// Kind of buyer captured on the profile step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    ProFrance,
    Creation,
    ProForeign,
    Particulier,
}

/// Buyer profile captured before matching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[serde(rename = "type", default)]
    pub profile_type: Option<ProfileType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Contact form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// Final step of the wizard: contact details plus selected suppliers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub contact: ContactDetails,
    pub supplier_ids: Vec<String>,
    #[serde(default)]
    pub answers: UserAnswers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileData>,
}

/// Acknowledgement of a submitted lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub success: bool,
    pub lead_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// A stored lead, as shown on the confirmation page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub contact: ContactDetails,
    pub supplier_ids: Vec<String>,
    #[serde(default)]
    pub answers: UserAnswers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileData>,
    /// Processing state reported by the marketplace
    pub status: String,
}

/// A selectable value of a search criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaOption {
    pub value: String,
    pub label: String,
}
