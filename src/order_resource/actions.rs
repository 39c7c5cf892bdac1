use crate::domain::OrderStatus;

/// Custom actions for Order entities beyond create/read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Moves the order to a new status. Privileged.
    UpdateStatus(OrderStatus),
}
