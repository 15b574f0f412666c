//! The same record under every naming policy.
//!
//! Run with: cargo run --example naming_policies

use serde_dotted::{flatten, flatten_with, record, NamingPolicy};

record! {
    pub struct HttpRequest {
        pub request_method: String => "method",
        pub request_uri: String => "uri",
        pub remote_addr: Option<String> => "remote,omitempty",
        pub response: HttpResponse,
    }
}

record! {
    pub struct HttpResponse {
        pub status_code: u16 => "status",
        pub body_bytes: u64,
    }
}

fn main() {
    let request = HttpRequest {
        request_method: "GET".to_string(),
        request_uri: "/index.html".to_string(),
        remote_addr: None,
        response: HttpResponse {
            status_code: 200,
            body_bytes: 1024,
        },
    };

    if let Some(map) = flatten(&request) {
        println!("annotations: {:?}", map.sorted_keys());
    }

    for policy in [
        NamingPolicy::Identity,
        NamingPolicy::Lower,
        NamingPolicy::Upper,
        NamingPolicy::UpperCamel,
        NamingPolicy::LowerCamel,
        NamingPolicy::Snake,
    ] {
        if let Some(map) = flatten_with(&request, [policy]) {
            println!("{:?}: {:?}", policy, map.sorted_keys());
        }
    }
}
