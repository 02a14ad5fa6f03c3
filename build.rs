//! Build script for the spotremote backend.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory, next to the `.env` file that `config::load_env` falls back to:
//! - Linux: `~/.local/share/spotremote/.env.example`
//! - macOS: `~/Library/Application Support/spotremote/.env.example`
//! - Windows: `%LOCALAPPDATA%/spotremote/.env.example`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

/// Seeds the per-user data directory with the configuration template.
///
/// # Behaviour
///
/// - Cargo re-runs the script whenever `.env.example` changes.
/// - The `spotremote` directory under the local data directory is created if
///   needed. Without a data directory the current directory is used.
/// - An existing `.env` next to the template is never touched; only
///   `.env.example` is (over)written.
///
/// # Errors
///
/// Failing to read `CARGO_MANIFEST_DIR`, create the directory or write the
/// template fails the build. A missing template in the crate root does not.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotremote");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
