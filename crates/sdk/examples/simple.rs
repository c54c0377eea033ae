//! Simple SDK Example
//!
//! Demonstrates basic usage of the binlaunch SDK.
//!
//! # Usage
//!
//! ```bash
//! BINLAUNCH_PROJECT_DIR=/path/to/project \
//!     cargo run --package binlaunch-sdk --example simple -- ./vne.toml
//! ```

use binlaunch_sdk::{resolve_executable, SetupOptions, ShimError, SpawnOptions};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("binlaunch SDK - Simple Example");
    println!("==============================\n");

    // 1. Resolve the executable (once)
    println!("1. Resolving executable...");
    let shim = match resolve_executable() {
        Ok(shim) => shim,
        Err(e @ ShimError::UnsupportedPlatform { .. }) => {
            println!("   ✗ {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    println!("   ✓ {}\n", shim.location().path().display());

    // 2. Raw mode
    println!("2. Running --version...");
    let mut handle = shim.exec(["--version"], SpawnOptions::default())?;
    let mut version = String::new();
    handle.stdout.read_to_string(&mut version).await?;
    let exit = handle.wait().await?;
    println!("   ✓ {} ({})\n", version.trim(), exit);

    // 3. Structured mode
    let config = std::env::args().nth(1).unwrap_or_else(|| "./vne.toml".to_string());
    println!("3. Running setup with {}...", config);
    match shim.setup(&SetupOptions::new(config)).await {
        Ok(value) => println!("   ✓ {}", serde_json::to_string_pretty(&value)?),
        Err(e) => println!("   ✗ [{}] {}", e.kind(), e),
    }

    Ok(())
}
