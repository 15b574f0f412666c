//! Flattening plain serde types, with annotations carried in `rename`.
//!
//! Run with: cargo run --example serde_records

use serde::Serialize;
use serde_dotted::{to_flat_map_with_options, FlattenOptions, NamingPolicy};
use std::error::Error;

#[derive(Serialize)]
struct Product {
    sku: String,
    price: f64,
}

#[derive(Serialize)]
enum Status {
    Pending,
    Shipped { carrier: String },
}

#[derive(Serialize)]
struct Order {
    #[serde(rename = "orderId")]
    order_id: u32,
    items: Vec<Product>,
    status: Status,
    #[serde(rename = "coupon,omitempty")]
    coupon: Option<String>,
    #[serde(rename = "warehouse,ignoreparents")]
    warehouse: Warehouse,
}

#[derive(Serialize)]
struct Warehouse {
    code: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let order = Order {
        order_id: 12345,
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 5.0,
            },
        ],
        status: Status::Shipped {
            carrier: "DHL".to_string(),
        },
        coupon: None,
        warehouse: Warehouse {
            code: "LIS-1".to_string(),
        },
    };

    for options in [
        FlattenOptions::default(),
        FlattenOptions::new().with_policy(NamingPolicy::Snake),
    ] {
        if let Some(map) = to_flat_map_with_options(&order, &options)? {
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }

    let pending = Order {
        status: Status::Pending,
        ..order
    };
    if let Some(map) = to_flat_map_with_options(&pending, &FlattenOptions::default())? {
        println!("status = {:?}", map.get("status"));
    }

    Ok(())
}
