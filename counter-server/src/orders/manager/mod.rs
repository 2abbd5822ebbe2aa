//! OrdersManager - order lifecycle on top of the storage seam
//!
//! # Lifecycle
//!
//! ```text
//! create_order(cmd)
//!     ├─ 1. Validate the request
//!     ├─ 2. Initial status from payment method (pix → pending_payment)
//!     └─ 3. store.place_order: number + insert + reserve, one atomic unit
//!
//! approve_payment / mark_ready   → store.transition (compare-and-set)
//! reject_payment                 → store.reject_order (CAS + restock)
//! call_next                      → store.call_next_ready (oldest ready)
//! ```
//!
//! Read-side projections (kitchen, board, monitor, pending payments) are built
//! from `store.list_orders`.

mod error;
pub use error::*;

use chrono::FixedOffset;
use shared::models::{
    BoardEntry, CalledOrder, KitchenOrder, MonitorActive, MonitorBoard, MonitorCalled, Order,
    OrderBoard, OrderCreate, OrderStatus, PendingPayment, PlacedOrder,
};
use std::sync::Arc;

use super::status::{OrderAction, initial_status};
use crate::store::{CounterStore, LineRequest, NewOrder, OrderQuery, OrderSort};
use crate::utils::time::format_local;

/// Default number of recently called orders shown on the monitor
pub const DEFAULT_RECENTLY_CALLED_LIMIT: i64 = 6;

/// OrdersManager for order lifecycle operations
#[derive(Clone)]
pub struct OrdersManager {
    store: Arc<dyn CounterStore>,
    /// Business wall-clock offset for `*_local` fields
    offset: FixedOffset,
    recently_called_limit: i64,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("offset", &self.offset)
            .field("recently_called_limit", &self.recently_called_limit)
            .finish_non_exhaustive()
    }
}

impl OrdersManager {
    pub fn new(store: Arc<dyn CounterStore>, offset: FixedOffset) -> Self {
        Self {
            store,
            offset,
            recently_called_limit: DEFAULT_RECENTLY_CALLED_LIMIT,
        }
    }

    pub fn with_recently_called_limit(mut self, limit: i64) -> Self {
        self.recently_called_limit = limit.max(0);
        self
    }

    // ========== Commands ==========

    /// Validate and place a new order
    pub async fn create_order(&self, cmd: OrderCreate) -> OrderResult<PlacedOrder> {
        let new_order = validate_create(cmd)?;
        let placed = self.store.place_order(new_order).await?;
        tracing::info!(
            order_id = placed.order_id,
            order_number = %placed.order_number,
            status = %placed.status,
            "Order created"
        );
        Ok(placed)
    }

    /// pending_payment → preparing
    pub async fn approve_payment(&self, id: i64) -> OrderResult<Order> {
        self.apply(id, OrderAction::ApprovePayment).await
    }

    /// pending_payment → rejected, every line restocked
    pub async fn reject_payment(&self, id: i64) -> OrderResult<Order> {
        let order = self
            .store
            .reject_order(id)
            .await
            .map_err(|e| OrderError::from_store(e, OrderAction::RejectPayment))?;
        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            lines = order.lines.len(),
            "Payment rejected, stock restored"
        );
        Ok(order)
    }

    /// preparing → ready
    pub async fn mark_ready(&self, id: i64) -> OrderResult<Order> {
        self.apply(id, OrderAction::MarkReady).await
    }

    /// Complete the oldest ready order
    pub async fn call_next(&self) -> OrderResult<CalledOrder> {
        let now = shared::util::now_millis();
        let order = self
            .store
            .call_next_ready(now)
            .await?
            .ok_or(OrderError::NoneReady)?;
        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            "Order called"
        );
        Ok(CalledOrder {
            success: true,
            customer_name: order.customer_name,
            order_number: order.order_number,
        })
    }

    /// Delete every order and restart numbering at "001". Irreversible.
    pub async fn reset_all(&self) -> OrderResult<u64> {
        let removed = self.store.reset_orders().await?;
        tracing::warn!(removed, "All orders deleted, order numbering reset");
        Ok(removed)
    }

    async fn apply(&self, id: i64, action: OrderAction) -> OrderResult<Order> {
        let order = self
            .store
            .transition(id, action.source(), action.target())
            .await
            .map_err(|e| OrderError::from_store(e, action))?;
        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            action = %action,
            status = %order.status,
            "Order status changed"
        );
        Ok(order)
    }

    // ========== Queries ==========

    pub async fn order_status(&self, id: i64) -> OrderResult<OrderStatus> {
        self.store
            .order_status(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    pub async fn get_order(&self, id: i64) -> OrderResult<Order> {
        self.store
            .find_order(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    /// Orders the kitchen still has to prepare, oldest first
    pub async fn kitchen_orders(&self) -> OrderResult<Vec<KitchenOrder>> {
        let orders = self
            .store
            .list_orders(OrderQuery::with_status(&[OrderStatus::Preparing]))
            .await?;
        Ok(orders.iter().map(KitchenOrder::from).collect())
    }

    /// Customer status board
    pub async fn board(&self) -> OrderResult<OrderBoard> {
        let orders = self
            .store
            .list_orders(OrderQuery::with_status(&[
                OrderStatus::Preparing,
                OrderStatus::Ready,
            ]))
            .await?;
        let (preparing, ready): (Vec<&Order>, Vec<&Order>) = orders
            .iter()
            .partition(|o| o.status == OrderStatus::Preparing);
        Ok(OrderBoard {
            preparing: preparing.into_iter().map(BoardEntry::from).collect(),
            ready: ready.into_iter().map(BoardEntry::from).collect(),
        })
    }

    /// Hall monitor: active orders plus the most recently called ones
    pub async fn monitor(&self) -> OrderResult<MonitorBoard> {
        let active = self
            .store
            .list_orders(OrderQuery::with_status(&[
                OrderStatus::Preparing,
                OrderStatus::Ready,
            ]))
            .await?;
        let called = self
            .store
            .list_orders(
                OrderQuery::with_status(&[OrderStatus::Completed])
                    .sorted(OrderSort::CalledDesc)
                    .limit(self.recently_called_limit),
            )
            .await?;

        Ok(MonitorBoard {
            preparing: active
                .into_iter()
                .map(|o| MonitorActive {
                    order: o.order_number,
                    name: o.customer_name,
                    status: o.status,
                })
                .collect(),
            ready: called
                .into_iter()
                .map(|o| MonitorCalled {
                    order: o.order_number,
                    name: o.customer_name,
                })
                .collect(),
        })
    }

    /// Orders waiting for a payment confirmation, newest first
    pub async fn pending_payments(&self) -> OrderResult<Vec<PendingPayment>> {
        let orders = self
            .store
            .list_orders(
                OrderQuery::with_status(&[OrderStatus::PendingPayment])
                    .sorted(OrderSort::CreatedDesc),
            )
            .await?;
        Ok(orders
            .into_iter()
            .map(|o| PendingPayment {
                created_at_local: format_local(o.created_at, self.offset),
                id: o.id,
                order_number: o.order_number,
                customer_name: o.customer_name,
                total: o.total,
                created_at: o.created_at,
            })
            .collect())
    }

    pub async fn ready_count(&self) -> OrderResult<i64> {
        Ok(self.store.count_by_status(OrderStatus::Ready).await?)
    }
}

/// Check a create request and turn it into a storable order
fn validate_create(cmd: OrderCreate) -> OrderResult<NewOrder> {
    let customer_name = cmd
        .customer_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| OrderError::Validation("customer_name is required".into()))?;

    let items = cmd
        .items
        .filter(|items| !items.is_empty())
        .ok_or_else(|| OrderError::Validation("items must not be empty".into()))?;

    let total = cmd
        .total
        .ok_or_else(|| OrderError::Validation("total is required".into()))?;
    if !total.is_finite() || total < 0.0 {
        return Err(OrderError::Validation(format!("invalid total: {total}")));
    }

    let payment_method = cmd
        .payment_method
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| OrderError::Validation("payment_method is required".into()))?;

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity <= 0 {
            return Err(OrderError::Validation(format!(
                "quantity for item {} must be positive",
                item.id
            )));
        }
        lines.push(LineRequest {
            stock_id: item.id,
            quantity: item.quantity,
        });
    }

    let phone = cmd
        .phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    Ok(NewOrder {
        status: initial_status(&payment_method),
        customer_name,
        phone,
        lines,
        total,
        payment_method,
        created_at: shared::util::now_millis(),
    })
}

#[cfg(test)]
mod tests;
