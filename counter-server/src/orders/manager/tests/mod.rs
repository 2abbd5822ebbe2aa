use super::*;
use crate::store::{MemoryStore, NewStockItem};
use crate::utils::time::offset_from_hours;
use shared::models::OrderItemInput;

mod test_rules;
mod test_validation;

struct Fixture {
    store: Arc<MemoryStore>,
    manager: OrdersManager,
}

fn create_test_manager() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let manager = OrdersManager::new(store.clone(), offset_from_hours(-3).unwrap());
    Fixture { store, manager }
}

impl Fixture {
    async fn add_stock(&self, name: &str, price: f64, quantity: i64) -> i64 {
        self.store
            .insert_stock(NewStockItem {
                name: name.to_string(),
                description: None,
                detailed_description: Some(format!("{name} of the house")),
                price,
                image_ref: None,
                quantity,
                is_promo: false,
            })
            .await
            .unwrap()
            .id
    }

    async fn stock_quantity(&self, id: i64) -> i64 {
        self.store.find_stock(id).await.unwrap().unwrap().quantity
    }

    async fn place(&self, customer: &str, items: &[(i64, i64)], payment: &str) -> PlacedOrder {
        self.manager
            .create_order(order_cmd(customer, items, payment))
            .await
            .unwrap()
    }
}

fn order_cmd(customer: &str, items: &[(i64, i64)], payment: &str) -> OrderCreate {
    OrderCreate {
        customer_name: Some(customer.to_string()),
        phone: None,
        items: Some(
            items
                .iter()
                .map(|&(id, quantity)| OrderItemInput {
                    id,
                    name: None,
                    quantity,
                })
                .collect(),
        ),
        total: Some(15.0),
        payment_method: Some(payment.to_string()),
    }
}
