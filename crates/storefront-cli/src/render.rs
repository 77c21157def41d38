//! Plain-text views of the catalog and the cart.

use std::fmt::Write;

use storefront_core::cart::CartState;
use storefront_core::catalog::Product;
use storefront_core::config::StorefrontConfig;

pub fn products(products: &[&Product], config: &StorefrontConfig) -> String {
    if products.is_empty() {
        return "No products found\n".to_string();
    }
    let id_width = products.iter().map(|p| p.id.to_string().len()).max().unwrap_or(1);
    let mut out = String::new();
    for p in products {
        let _ = writeln!(
            out,
            "{:>id_width$}  {}  {}",
            p.id,
            p.title,
            config.format_price(p.price)
        );
    }
    out
}

pub fn cart(state: &CartState, config: &StorefrontConfig) -> String {
    if state.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let rows: Vec<[String; 5]> = state
        .items()
        .iter()
        .map(|line| {
            [
                line.id.to_string(),
                line.title.clone(),
                config.format_price(line.price),
                line.quantity.to_string(),
                config.format_price(line.subtotal()),
            ]
        })
        .collect();

    let header = ["ID", "Product", "Price", "Qty", "Subtotal"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &header[..], &widths);
    for row in &rows {
        write_row(&mut out, &row[..], &widths);
    }
    out.push('\n');
    out.push_str(&total(state, config));
    out
}

/// Total line printed after every mutation.
pub fn total(state: &CartState, config: &StorefrontConfig) -> String {
    let count = state.item_count();
    let unit = if count == 1 { "item" } else { "items" };
    format!("Total: {} ({count} {unit})\n", config.format_price(state.total_price()))
}

pub fn summary(state: &CartState, config: &StorefrontConfig) -> String {
    let mut out = String::from("Order Summary\n");
    for line in state.items() {
        let _ = writeln!(
            out,
            "  {} x{}  {}",
            line.title,
            line.quantity,
            config.format_price(line.subtotal())
        );
    }
    out.push_str(&total(state, config));
    out
}

/// Left-align text columns, right-align the numeric ones.
fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 5]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let cell = cell.as_ref();
        let pad = width.saturating_sub(cell.chars().count());
        if i == 1 {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        } else {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::cart::{reduce, CartAction, CartItem};

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: String::new(),
            image: String::new(),
            category: None,
        }
    }

    fn cart_state() -> CartState {
        let add = |id, title: &str, price| {
            CartAction::Add(CartItem {
                id,
                title: title.to_string(),
                price,
                image: String::new(),
            })
        };
        [add(1, "Backpack", 109.95), add(1, "Backpack", 109.95), add(12, "Ring", 9.5)]
            .iter()
            .fold(CartState::new(), reduce)
    }

    #[test]
    fn empty_views() {
        let config = StorefrontConfig::default();
        assert_eq!(products(&[], &config), "No products found\n");
        assert_eq!(cart(&CartState::new(), &config), "Your cart is empty\n");
    }

    #[test]
    fn product_listing() {
        let config = StorefrontConfig::default();
        let (a, b) = (product(1, "Backpack", 109.95), product(20, "Jacket", 55.0));
        assert_eq!(
            products(&[&a, &b], &config),
            " 1  Backpack  Rs. 109.95\n20  Jacket  Rs. 55.00\n"
        );
    }

    #[test]
    fn cart_table() {
        let config = StorefrontConfig::default();
        let expected = "\
ID  Product        Price  Qty    Subtotal
 1  Backpack  Rs. 109.95    2  Rs. 219.90
12  Ring        Rs. 9.50    1    Rs. 9.50

Total: Rs. 229.40 (3 items)
";
        assert_eq!(cart(&cart_state(), &config), expected);
    }

    #[test]
    fn total_singular() {
        let config = StorefrontConfig::default();
        let item = CartItem {
            id: 1,
            title: "A".to_string(),
            price: 2.0,
            image: String::new(),
        };
        let state = reduce(CartState::new(), &CartAction::Add(item));
        assert_eq!(total(&state, &config), "Total: Rs. 2.00 (1 item)\n");
    }

    #[test]
    fn order_summary() {
        let config = StorefrontConfig::default();
        assert_eq!(
            summary(&cart_state(), &config),
            "Order Summary\n  Backpack x2  Rs. 219.90\n  Ring x1  Rs. 9.50\nTotal: Rs. 229.40 (3 items)\n"
        );
    }
}
