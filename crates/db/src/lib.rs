pub mod catalog;
pub mod fixtures;
pub mod repositories;

pub use catalog::{load_catalog_file, load_reference_data, ReferenceData};
pub use repositories::{InMemoryApproverDirectory, InMemoryRuleStore};
