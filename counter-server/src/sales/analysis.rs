//! Per-item sales totals

use shared::models::{ItemSales, Order, SalesAnalysis};

/// Sum line quantities per item name
///
/// `orders` are visited in the given order, lines in line order. Names keep
/// their first-seen position, and on a tie for most or least sold the
/// first-seen name wins.
pub fn analyze(orders: &[Order]) -> SalesAnalysis {
    let mut sales_data: Vec<ItemSales> = Vec::new();
    for line in orders.iter().flat_map(|o| o.lines.iter()) {
        match sales_data.iter_mut().find(|s| s.name == line.name) {
            Some(entry) => entry.quantity += line.quantity,
            None => sales_data.push(ItemSales {
                name: line.name.clone(),
                quantity: line.quantity,
            }),
        }
    }

    let mut most: Option<&ItemSales> = None;
    let mut least: Option<&ItemSales> = None;
    for entry in &sales_data {
        if most.is_none_or(|m| entry.quantity > m.quantity) {
            most = Some(entry);
        }
        if least.is_none_or(|l| entry.quantity < l.quantity) {
            least = Some(entry);
        }
    }

    SalesAnalysis {
        most_sold: most.cloned(),
        least_sold: least.cloned(),
        sales_data,
    }
}
