//! Extract command implementation.

use anyhow::{bail, Context, Result};
use lintmsg_core::extract_hybrid_trailer;
use std::io::Read;
use std::path::Path;

/// Runs the extract command, printing the trailer of each message as JSON.
///
/// Input may hold several messages; each trailer is found on its own line.
pub fn run(file: Option<&Path>) -> Result<()> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let trailers: Vec<_> = input.lines().filter_map(extract_hybrid_trailer).collect();
    if trailers.is_empty() {
        bail!("No hybrid trailer found in input");
    }

    for trailer in trailers {
        println!("{}", serde_json::to_string(&trailer)?);
    }
    Ok(())
}
