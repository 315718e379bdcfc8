//! Notification stub. Nothing is delivered; each approver gets a confirmation string and a
//! structured log line describing the message that would have been sent.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::approver::Approver;
use crate::domain::invoice::InvoiceApprovalRequest;

pub trait Notifier: Send + Sync {
    fn notify(&self, approver: &Approver, request: &InvoiceApprovalRequest) -> String;

    fn notify_all(&self, approvers: &[Approver], request: &InvoiceApprovalRequest) -> Vec<String> {
        approvers.iter().map(|approver| self.notify(approver, request)).collect()
    }
}

pub fn confirmation(approver: &Approver) -> String {
    format!("notification sent to {}", approver.name)
}

pub fn render_message(approver: &Approver, request: &InvoiceApprovalRequest) -> String {
    format!(
        "Hi {}, Invoice approval required: Amount=${}, Department={}, Manager Approval Required={}",
        approver.name,
        request.amount(),
        request.department(),
        request.requires_manager_approval()
    )
}

#[derive(Clone, Debug)]
pub struct LoggingNotifier {
    channel: String,
}

impl LoggingNotifier {
    pub fn new(channel: impl Into<String>) -> Self {
        Self { channel: channel.into() }
    }
}

impl Default for LoggingNotifier {
    fn default() -> Self {
        Self::new("slack")
    }
}

impl Notifier for LoggingNotifier {
    fn notify(&self, approver: &Approver, request: &InvoiceApprovalRequest) -> String {
        let message = render_message(approver, request);
        info!(
            event_name = "notification.sent",
            channel = %self.channel,
            approver_id = approver.id.as_str(),
            recipient = %approver.email,
            message = %message,
            "approval notification recorded"
        );
        confirmation(approver)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub approver_id: String,
    pub recipient: String,
    pub message: String,
}

/// Keeps every would-be message in memory, in send order.
#[derive(Clone, Debug, Default)]
pub struct OutboxNotifier {
    sent: Arc<Mutex<Vec<OutboxEntry>>>,
}

impl OutboxNotifier {
    pub fn sent(&self) -> Vec<OutboxEntry> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for OutboxNotifier {
    fn notify(&self, approver: &Approver, request: &InvoiceApprovalRequest) -> String {
        let entry = OutboxEntry {
            approver_id: approver.id.0.clone(),
            recipient: approver.email.clone(),
            message: render_message(approver, request),
        };
        match self.sent.lock() {
            Ok(mut sent) => sent.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
        confirmation(approver)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{LoggingNotifier, Notifier, OutboxNotifier};
    use crate::domain::approver::Approver;
    use crate::domain::department::Department;
    use crate::domain::invoice::InvoiceApprovalRequest;

    fn request() -> InvoiceApprovalRequest {
        InvoiceApprovalRequest::new(Decimal::new(50_050, 2), Department::Marketing, false)
            .expect("valid request")
    }

    fn cfo() -> Approver {
        Approver::new("cfo", "CFO", "cfo@company.com", Some(Department::Finance), true)
    }

    fn vp() -> Approver {
        Approver::new("vp-finance", "VP of Finance", "vp@company.com", Some(Department::Finance), true)
    }

    #[test]
    fn notify_returns_confirmation_for_the_approver() {
        let result = LoggingNotifier::default().notify(&cfo(), &request());

        assert_eq!(result, "notification sent to CFO");
    }

    #[test]
    fn notify_all_keeps_approver_order() {
        let results = LoggingNotifier::new("email").notify_all(&[cfo(), vp()], &request());

        assert_eq!(results, vec!["notification sent to CFO", "notification sent to VP of Finance"]);
    }

    #[test]
    fn notify_all_with_no_approvers_is_empty() {
        assert!(LoggingNotifier::default().notify_all(&[], &request()).is_empty());
    }

    #[test]
    fn outbox_records_rendered_message_details() {
        let outbox = OutboxNotifier::default();
        let john =
            Approver::new("emp-1", "John Smith", "john@company.com", Some(Department::Sales), false);

        outbox.notify_all(&[john], &request());

        let sent = outbox.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "john@company.com");
        assert_eq!(
            sent[0].message,
            "Hi John Smith, Invoice approval required: Amount=$500.50, Department=MARKETING, \
             Manager Approval Required=false"
        );
    }
}
