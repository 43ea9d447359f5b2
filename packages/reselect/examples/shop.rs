//! A shopping cart total derived from a store with memoized selectors.
//!
//! Run with `RUST_LOG=trace` to see which selectors recompute.

use reselect::prelude::*;
use std::rc::Rc;

struct Item {
    name: &'static str,
    price: f64,
}

struct Shop {
    tax_percent: f64,
    items: Rc<Vec<Item>>,
}

struct Store {
    shop: Shop,
}

struct Coupon {
    discount_percent: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let items = create_selector((|store: &Store| store.shop.items.clone(),), |items: &Rc<Vec<Item>>| {
        items.clone()
    })
    .with_name("items");
    let subtotal = create_selector((&items,), |items: &Rc<Vec<Item>>| {
        items.iter().map(|item| item.price).sum::<f64>()
    })
    .with_name("subtotal");
    let total = create_selector(
        (
            &subtotal,
            |store: &Store| store.shop.tax_percent,
            |_: &Store, coupon: &Coupon| coupon.discount_percent,
        ),
        |subtotal: &f64, tax: &f64, discount: &f64| {
            subtotal * (1.0 - discount / 100.0) * (1.0 + tax / 100.0)
        },
    )
    .with_name("total");
    let receipt = structured_selector!(Receipt {
        lines: |store: &Store| store.shop.items.len(),
        total: &total,
    });

    let mut store = Store {
        shop: Shop {
            tax_percent: 8.0,
            items: Rc::new(vec![
                Item {
                    name: "apple",
                    price: 1.2,
                },
                Item {
                    name: "orange",
                    price: 0.95,
                },
            ]),
        },
    };
    let coupon = Coupon {
        discount_percent: 10.0,
    };

    let first = receipt.select(&store, &coupon);
    println!("{} items, total {:.4}", first.lines, first.total);

    // Nothing the receipt depends on changed.
    let again = receipt.select(&store, &coupon);
    println!("same receipt: {}", std::sync::Arc::ptr_eq(&first, &again));

    store.shop.tax_percent = 20.0;
    let taxed = receipt.select(&store, &coupon);
    println!("{} items, total {:.4}", taxed.lines, taxed.total);

    for item in items.select(&store, &coupon).iter() {
        println!("  {} at {:.2}", item.name, item.price);
    }
    println!(
        "recomputed: subtotal {} times, total {} times",
        subtotal.recomputations(),
        total.recomputations()
    );
}

struct Receipt {
    lines: usize,
    total: f64,
}
