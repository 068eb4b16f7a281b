//! # Seed Data Generator
//!
//! Creates the shop's starter categories on a fresh backend project.
//!
//! ## Usage
//! ```bash
//! # Uses SUPABASE_URL / SUPABASE_ANON_KEY from the environment
//! cargo run -p milena-remote --bin seed
//!
//! # Explicit backend
//! cargo run -p milena-remote --bin seed -- --url https://xyz.supabase.co --key <anon-key>
//!
//! # Only print what would be created
//! cargo run -p milena-remote --bin seed -- --dry-run
//! ```
//!
//! Categories that already exist (same name) are skipped, so running it
//! twice is harmless.

use std::env;

use milena_remote::{Backend, BackendConfig};

/// Starter categories of the shop.
const CATEGORIES: &[&str] = &["Pintura", "Tejido", "Bordado", "Papelería", "Resina"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut url = env::var("SUPABASE_URL").unwrap_or_default();
    let mut key = env::var("SUPABASE_ANON_KEY").unwrap_or_default();
    let mut dry_run = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--url" | "-u" => {
                if i + 1 < args.len() {
                    url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--key" | "-k" => {
                if i + 1 < args.len() {
                    key = args[i + 1].clone();
                    i += 1;
                }
            }
            "--dry-run" | "-n" => dry_run = true,
            "--help" | "-h" => {
                println!("MilenaShop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -u, --url <URL>    Backend project URL (default: $SUPABASE_URL)");
                println!("  -k, --key <KEY>    Anon key (default: $SUPABASE_ANON_KEY)");
                println!("  -n, --dry-run      Show what would be created");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 MilenaShop Seed Data Generator");
    println!("=================================");
    println!("Backend: {}", url);
    println!();

    let backend = Backend::new(BackendConfig::new(&url, &key))?;

    if !backend.health_check().await {
        eprintln!("✗ Backend is not reachable or rejected the key");
        return Ok(());
    }
    println!("✓ Connected to backend");

    let existing = backend.categories().list().await?;
    println!("  {} categories already present", existing.len());

    let mut created = 0;
    for name in CATEGORIES {
        if existing.iter().any(|c| c.name == *name) {
            println!("  - {} (exists)", name);
            continue;
        }

        if dry_run {
            println!("  + {} (dry run)", name);
            continue;
        }

        match backend.categories().create(name).await {
            Ok(category) => {
                println!("  + {} (id {})", category.name, category.id);
                created += 1;
            }
            Err(e) => eprintln!("Failed to create {}: {}", name, e),
        }
    }

    println!();
    println!("✓ Seed complete! {} categories created", created);

    Ok(())
}
