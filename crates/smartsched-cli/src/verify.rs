//! # Verify-Face Subcommand
//!
//! Reads two image files, wraps them as data URIs, and asks the hosted
//! model whether they show the same person. Prints the verdict as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use smartsched_core::DataUri;
use smartsched_model::{FaceComparison, ModelApiConfig, ModelGateway};

/// Arguments for the `smartsched verify-face` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the registered (reference) face image.
    #[arg(long, value_name = "PATH")]
    pub registered: PathBuf,

    /// Path to the current (captured) face image.
    #[arg(long, value_name = "PATH")]
    pub current: PathBuf,
}

/// Execute the verify-face subcommand.
///
/// Returns exit code 0 when the faces match, 1 when they do not.
pub async fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let registered = read_image(&args.registered)?;
    let current = read_image(&args.current)?;

    let config = ModelApiConfig::from_env().context("model client not configured")?;
    let gateway = ModelGateway::new(config).context("failed to create model client")?;

    let verdict = gateway
        .face()
        .verify(&FaceComparison {
            registered,
            current,
        })
        .await;

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(if verdict.is_match { 0 } else { 1 })
}

/// Read an image file and encode it as a data URI, inferring the media
/// type from the file extension.
fn read_image(path: &Path) -> Result<DataUri> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image {}", path.display()))?;
    Ok(DataUri::from_bytes(media_type_for(path), &bytes))
}

fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        // Camera captures default to JPEG.
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(media_type_for(Path::new("face.png")), "image/png");
        assert_eq!(media_type_for(Path::new("FACE.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("face.jpg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("face")), "image/jpeg");
    }
}
