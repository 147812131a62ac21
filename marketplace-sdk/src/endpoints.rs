//! Endpoint resolution
//!
//! Maps every domain operation to an absolute URL below the configured base
//! address. Query values are form-encoded.

use std::borrow::Borrow;

use url::form_urlencoded;

use crate::models::{SupplierSearchParams, UserAnswers};

/// Resolves marketplace API paths against a base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_query<I, K, V>(&self, path: &str, pairs: I) -> String
    where
        I: IntoIterator,
        I::Item: Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(pairs);
        let query = serializer.finish();

        if query.is_empty() {
            self.path(path)
        } else {
            format!("{}?{}", self.path(path), query)
        }
    }

    pub fn questions(&self) -> String {
        self.path("/questions")
    }

    pub fn question(&self, id: u32) -> String {
        self.path(&format!("/questions/{}", id))
    }

    pub fn company_search(&self, query: &str) -> String {
        self.with_query("/companies/search", [("q", query)])
    }

    pub fn company(&self, siren: &str) -> String {
        self.path(&format!("/companies/{}", encode_segment(siren)))
    }

    pub fn postal_codes(&self, prefix: &str) -> String {
        self.with_query("/location/postal-codes", [("prefix", prefix)])
    }

    pub fn cities(&self, postal_code: &str) -> String {
        self.with_query("/location/cities", [("postalCode", postal_code)])
    }

    pub fn countries(&self) -> String {
        self.path("/location/countries")
    }

    pub fn suppliers(&self) -> String {
        self.path("/suppliers")
    }

    pub fn supplier(&self, id: &str) -> String {
        self.path(&format!("/suppliers/{}", encode_segment(id)))
    }

    /// Search URL; no `?` is appended when no filter is set
    pub fn supplier_search(&self, params: &SupplierSearchParams) -> String {
        self.with_query("/suppliers/search", params.to_query_params())
    }

    /// Recommendation URL, one `q{questionId}` parameter per selected answer
    pub fn recommended_suppliers(&self, answers: &UserAnswers) -> String {
        let pairs: Vec<(String, &str)> = answers
            .iter()
            .flat_map(|(question, values)| {
                values.iter().map(move |value| (format!("q{}", question), value.as_str()))
            })
            .collect();

        self.with_query("/suppliers/recommended", pairs)
    }

    pub fn leads(&self) -> String {
        self.path("/leads")
    }

    pub fn lead(&self, id: &str) -> String {
        self.path(&format!("/leads/{}", encode_segment(id)))
    }

    pub fn criteria(&self, kind: CriteriaKind) -> String {
        self.path(&format!("/criteria/{}", kind.as_str()))
    }
}

/// Lists of search criteria served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaKind {
    Capacities,
    Zones,
    Voltages,
    Options,
}

impl CriteriaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriteriaKind::Capacities => "capacities",
            CriteriaKind::Zones => "zones",
            CriteriaKind::Voltages => "voltages",
            CriteriaKind::Options => "options",
        }
    }
}

fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
