use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::department::Department;
use crate::errors::ValidationError;

/// An invoice waiting for sign-off. Fields are fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvoiceApprovalRequest {
    amount: Decimal,
    department: Department,
    requires_manager_approval: bool,
}

impl InvoiceApprovalRequest {
    pub fn new(
        amount: Decimal,
        department: Department,
        requires_manager_approval: bool,
    ) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::NegativeAmount { amount });
        }

        Ok(Self { amount, department, requires_manager_approval })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn department(&self) -> Department {
        self.department
    }

    pub fn requires_manager_approval(&self) -> bool {
        self.requires_manager_approval
    }
}
