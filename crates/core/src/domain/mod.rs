pub mod approver;
pub mod department;
pub mod invoice;
pub mod rule;
