//! Order state machine rules
//!
//! Pure functions: which status a new order starts in, and which action is
//! allowed from which status. Storage applies the result as a
//! compare-and-set.

use serde::Serialize;
use shared::models::OrderStatus;
use std::fmt;

/// Payment method that waits for a manual payment confirmation
pub const PIX_PAYMENT: &str = "pix";

/// A transition request on an existing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    ApprovePayment,
    RejectPayment,
    MarkReady,
    Call,
}

impl OrderAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApprovePayment => "approve_payment",
            Self::RejectPayment => "reject_payment",
            Self::MarkReady => "mark_ready",
            Self::Call => "call",
        }
    }

    /// The only status this action may start from
    pub const fn source(&self) -> OrderStatus {
        match self {
            Self::ApprovePayment | Self::RejectPayment => OrderStatus::PendingPayment,
            Self::MarkReady => OrderStatus::Preparing,
            Self::Call => OrderStatus::Ready,
        }
    }

    pub const fn target(&self) -> OrderStatus {
        match self {
            Self::ApprovePayment => OrderStatus::Preparing,
            Self::RejectPayment => OrderStatus::Rejected,
            Self::MarkReady => OrderStatus::Ready,
            Self::Call => OrderStatus::Completed,
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a freshly placed order
pub fn initial_status(payment_method: &str) -> OrderStatus {
    if payment_method.trim().eq_ignore_ascii_case(PIX_PAYMENT) {
        OrderStatus::PendingPayment
    } else {
        OrderStatus::Preparing
    }
}

/// Next status, or None when `action` is not allowed from `from`
pub fn next_status(from: OrderStatus, action: OrderAction) -> Option<OrderStatus> {
    (from == action.source()).then(|| action.target())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [OrderStatus; 5] = [
        OrderStatus::PendingPayment,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Rejected,
    ];

    const ALL_ACTIONS: [OrderAction; 4] = [
        OrderAction::ApprovePayment,
        OrderAction::RejectPayment,
        OrderAction::MarkReady,
        OrderAction::Call,
    ];

    #[test]
    fn test_initial_status() {
        assert_eq!(initial_status("pix"), OrderStatus::PendingPayment);
        assert_eq!(initial_status("PIX"), OrderStatus::PendingPayment);
        assert_eq!(initial_status("cash"), OrderStatus::Preparing);
        assert_eq!(initial_status("card"), OrderStatus::Preparing);
    }

    #[test]
    fn test_allowed_transitions() {
        use OrderAction::*;
        use OrderStatus::*;
        assert_eq!(next_status(PendingPayment, ApprovePayment), Some(Preparing));
        assert_eq!(next_status(PendingPayment, RejectPayment), Some(Rejected));
        assert_eq!(next_status(Preparing, MarkReady), Some(Ready));
        assert_eq!(next_status(Ready, Call), Some(Completed));
    }

    #[test]
    fn test_each_status_allows_only_its_actions() {
        for status in ALL_STATUSES {
            let allowed: Vec<_> = ALL_ACTIONS
                .into_iter()
                .filter(|a| next_status(status, *a).is_some())
                .collect();
            match status {
                OrderStatus::PendingPayment => assert_eq!(allowed.len(), 2),
                OrderStatus::Preparing | OrderStatus::Ready => assert_eq!(allowed.len(), 1),
                OrderStatus::Completed | OrderStatus::Rejected => {
                    assert!(status.is_terminal());
                    assert!(allowed.is_empty(), "{status} must be terminal");
                }
            }
        }
    }
}
