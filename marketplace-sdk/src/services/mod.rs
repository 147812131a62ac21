//! Domain services
//!
//! One service per entity. Each calls the request executor and falls back to
//! the local dataset according to the operation's failure policy.

mod common;
pub mod companies;
pub mod criteria;
pub mod leads;
pub mod locations;
pub mod questions;
pub mod suppliers;

pub use common::{ServiceContext, MIN_QUERY_CHARS};
pub use companies::CompaniesService;
pub use criteria::CriteriaService;
pub use leads::LeadsService;
pub use locations::LocationsService;
pub use questions::QuestionsService;
pub use suppliers::SuppliersService;
