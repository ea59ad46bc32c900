use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::state::MemberStats;

/// The stats endpoint wraps the per-track record in an array on some
/// deployments and returns it bare on others; only the first element
/// matters.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatsDocument {
    Many(Vec<MemberStats>),
    One(MemberStats),
}

/// Parse an already-fetched member stats payload.
///
/// Lenient by contract: `null` or empty input is an empty record, unknown
/// fields are ignored, and optional fields that arrive in an unexpected
/// shape degrade to "not present" instead of failing the document.
pub fn parse_member_stats_json(raw: &str) -> Result<MemberStats> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(MemberStats::default());
    }
    let doc: StatsDocument =
        serde_json::from_str(trimmed).context("invalid member stats json")?;
    Ok(match doc {
        StatsDocument::Many(mut list) => {
            if list.is_empty() {
                MemberStats::default()
            } else {
                list.swap_remove(0)
            }
        }
        StatsDocument::One(stats) => stats,
    })
}

/// Read and parse a stats file, reporting its modification time so the UI
/// can show data freshness.
pub fn load_member_stats(path: &Path) -> Result<(MemberStats, Option<SystemTime>)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read stats file {}", path.display()))?;
    let stats = parse_member_stats_json(&raw)?;
    let modified = fs::metadata(path).ok().and_then(|meta| meta.modified().ok());
    Ok((stats, modified))
}
