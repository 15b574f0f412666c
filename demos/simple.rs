//! Flattening a nested record into dotted keys.
//!
//! Run with: cargo run --example simple

use serde_dotted::{flatten, record};
use std::collections::BTreeMap;

record! {
    #[derive(Debug)]
    pub struct Address {
        pub city: String,
        pub zip: Option<String> => "zip,omitempty",
    }
}

record! {
    #[derive(Debug)]
    pub struct User {
        pub id: u32 => "userId",
        pub name: String,
        pub address: Address,
        pub roles: Vec<String>,
        pub quotas: BTreeMap<String, u64>,
        pub password_hash: String => "-",
        session_token: String,
    }
}

fn main() {
    let user = User {
        id: 42,
        name: "Alice Johnson".to_string(),
        address: Address {
            city: "Lisbon".to_string(),
            zip: None,
        },
        roles: vec!["admin".to_string(), "developer".to_string()],
        quotas: [("storage".to_string(), 10_240), ("seats".to_string(), 5)]
            .into_iter()
            .collect(),
        password_hash: "x".to_string(),
        session_token: "y".to_string(),
    };

    let Some(map) = flatten(&user) else {
        println!("not a record");
        return;
    };

    println!("Flattened {} keys:", map.len());
    for (key, value) in &map {
        println!("  {} = {}", key, value);
    }

    assert!(!map.contains_key("session_token"));
    assert!(!map.contains_key("address.zip"));
}
