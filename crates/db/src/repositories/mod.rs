pub mod memory;

pub use memory::{InMemoryApproverDirectory, InMemoryRuleStore};
