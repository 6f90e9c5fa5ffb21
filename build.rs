//! Build script for spotidal.
//!
//! Copies the `.env.example` template into the local data directory, next to
//! the `.env` file the application reads at startup, so a fresh install ships
//! a ready-to-edit configuration template.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to `<data_local_dir>/spotidal/`.
///
/// A missing template only produces a cargo warning; the build itself never
/// fails because of it.
///
/// - Linux: `~/.local/share/spotidal/.env.example`
/// - macOS: `~/Library/Application Support/spotidal/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotidal/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotidal");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
