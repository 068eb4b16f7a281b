//! # MilenaShop Storefront Entry Point
//!
//! Starts the storefront against the configured backend and loads the home
//! page once, which makes it a quick check of a deployment's configuration.
//!
//! ## Usage
//! ```bash
//! # Platform config file plus SUPABASE_URL / SUPABASE_ANON_KEY
//! cargo run -p milena-storefront
//!
//! # Explicit config file
//! cargo run -p milena-storefront -- ./storefront.toml
//! ```

use std::path::PathBuf;

use milena_storefront::commands::catalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let app = milena_storefront::start(config_path)?;

    let featured = catalog::load_home(&app.backend, &app.catalog).await?;
    let page = catalog::get_catalog(&app.catalog);

    println!("{}", app.config.shop_name);
    println!("  {} products, tabs: {}", page.products.len(), page.categories.join(" | "));
    for product in &featured {
        println!("  ★ {}", product.name);
    }
    println!(
        "  admin session: {}",
        if app.session.is_logged_in() { "open" } else { "closed" }
    );

    Ok(())
}
