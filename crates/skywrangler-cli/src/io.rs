//! Reading requests and writing plans. `-` means stdin/stdout.

use anyhow::{Context, Result};
use skywrangler_core::{MissionRequest, PlanDocument};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

const STDIO_PATH: &str = "-";

/// Read and validate a mission parameters record.
pub fn read_request(path: &Path) -> Result<MissionRequest> {
    let json = if path.as_os_str() == STDIO_PATH {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display()))?
    };

    MissionRequest::from_json(&json)
        .with_context(|| format!("invalid mission request {}", path.display()))
}

/// Serialize a plan and write it out, pretty-printed unless `compact`.
pub fn write_plan(plan: &PlanDocument, path: &Path, compact: bool) -> Result<()> {
    let mut json = if compact {
        plan.to_json()?
    } else {
        plan.to_json_pretty()?
    };
    json.push('\n');

    if path.as_os_str() == STDIO_PATH {
        let mut stdout = io::stdout().lock();
        stdout.write_all(json.as_bytes())?;
        stdout.flush()?;
    } else {
        fs::write(path, json).with_context(|| format!("failed to write plan {}", path.display()))?;
    }
    Ok(())
}
