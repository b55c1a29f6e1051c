//! # Catalog Browser
//!
//! Pulls pages of the remote catalog and prints them. Development tool for
//! poking at the API client without a frontend.
//!
//! ## Usage
//! ```bash
//! # First page of the configured catalog
//! cargo run -p steel-client --bin catalog
//!
//! # Three pages against a specific endpoint
//! cargo run -p steel-client --bin catalog -- --base-url http://localhost:3000 --pages 3
//!
//! # Search instead of listing
//! cargo run -p steel-client --bin catalog -- --search phone
//! ```
//!
//! Logging is controlled by `RUST_LOG` (e.g. `RUST_LOG=steel_client=debug`).

use std::env;

use steel_client::{ClientConfig, HttpTransport, ProductApi, ProductPager};
use steel_core::Product;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut base_url: Option<String> = None;
    let mut search: Option<String> = None;
    let mut pages: usize = 1;
    let mut page_size: i64 = steel_client::DEFAULT_PAGE_SIZE;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--base-url" | "-u" => {
                if i + 1 < args.len() {
                    base_url = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--search" | "-s" => {
                if i + 1 < args.len() {
                    search = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--pages" | "-p" => {
                if i + 1 < args.len() {
                    pages = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "--page-size" => {
                if i + 1 < args.len() {
                    page_size = args[i + 1].parse().unwrap_or(steel_client::DEFAULT_PAGE_SIZE);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Steel POS Catalog Browser");
                println!();
                println!("Usage: catalog [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -u, --base-url <URL>   API endpoint (default: from config/env)");
                println!("  -s, --search <QUERY>   Search the catalog instead of listing");
                println!("  -p, --pages <N>        Pages to load (default: 1)");
                println!("      --page-size <N>    Products per page (default: 20)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    // Config file + env, then CLI override
    let mut config = ClientConfig::load_or_default(None);
    if let Some(url) = base_url {
        config.api.base_url = url;
    }
    config.validate()?;

    println!("Steel POS Catalog Browser");
    println!("=========================");
    println!("Endpoint: {}", config.api.base_url);
    println!();

    let transport = HttpTransport::new(&config)?;
    let api = ProductApi::new(transport);

    if let Some(query) = search {
        let page = api.search_products(&query).await?;
        println!(
            "Search '{}': showing {} of {} products",
            query,
            page.products.len(),
            page.total
        );
        for product in &page.products {
            print_product(product);
        }
        return Ok(());
    }

    let mut pager = ProductPager::with_page_size(api, page_size);
    for _ in 0..pages {
        if pager.load_more().await? == 0 {
            break;
        }
    }

    println!(
        "Loaded {} products{}",
        pager.len(),
        if pager.has_more() {
            " (more available)"
        } else {
            ""
        }
    );
    for product in pager.products() {
        print_product(product);
    }

    Ok(())
}

fn print_product(product: &Product) {
    let mut title: String = product.title.chars().take(44).collect();
    if title.len() < product.title.len() {
        title = title.chars().take(41).collect();
        title.push_str("...");
    }
    println!(
        "  [{:>6}] {:<44} {:>12}  {}",
        product.id,
        title,
        product.price().to_string(),
        product.brand
    );
}
