use std::collections::VecDeque;
use std::env;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::active_tracks::compute_active_tracks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackId {
    Copilot,
    Develop,
    Design,
    DataScience,
}

impl TrackId {
    /// Competition tracks in display precedence order. Copilot is handled
    /// separately because it is keyed off fulfillment, not subtracks.
    pub const COMPETITION_ORDER: [TrackId; 3] =
        [TrackId::Develop, TrackId::Design, TrackId::DataScience];

    pub fn api_key(self) -> &'static str {
        match self {
            TrackId::Copilot => "COPILOT",
            TrackId::Develop => "DEVELOP",
            TrackId::Design => "DESIGN",
            TrackId::DataScience => "DATA_SCIENCE",
        }
    }
}

/// Member statistics keyed by track, as returned by the stats endpoint.
/// Every field is optional; a missing track simply contributes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberStats {
    #[serde(rename = "COPILOT")]
    pub copilot: Option<TrackStats>,
    #[serde(rename = "DEVELOP")]
    pub develop: Option<TrackStats>,
    #[serde(rename = "DESIGN")]
    pub design: Option<TrackStats>,
    #[serde(rename = "DATA_SCIENCE")]
    pub data_science: Option<TrackStats>,
}

impl MemberStats {
    pub fn track(&self, id: TrackId) -> Option<&TrackStats> {
        match id {
            TrackId::Copilot => self.copilot.as_ref(),
            TrackId::Develop => self.develop.as_ref(),
            TrackId::Design => self.design.as_ref(),
            TrackId::DataScience => self.data_science.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.copilot.is_none()
            && self.develop.is_none()
            && self.design.is_none()
            && self.data_science.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackStats {
    pub fulfillment: Option<f64>,
    #[serde(rename = "subTracks", deserialize_with = "vec_or_default")]
    pub sub_tracks: Vec<Subtrack>,
    // SRM / MARATHON_MATCH arrive as bare stat records without a name; they
    // are folded into the subtrack list under fixed display names.
    #[serde(rename = "SRM")]
    pub srm: Option<Subtrack>,
    #[serde(rename = "MARATHON_MATCH")]
    pub marathon_match: Option<Subtrack>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subtrack {
    pub name: String,
    pub rank: Option<SubtrackRank>,
    pub submissions: Option<Submissions>,
    pub wins: Option<f64>,
    pub challenges: Option<f64>,
    pub fulfillment: Option<f64>,
}

impl Subtrack {
    pub fn rating(&self) -> Option<f64> {
        self.rank.as_ref().and_then(|r| r.rating)
    }

    /// The submission count regardless of which shape the field arrived in.
    pub fn submission_count(&self) -> Option<f64> {
        match &self.submissions {
            Some(Submissions::Count(n)) => Some(*n),
            Some(Submissions::Detail(detail)) => detail.submissions,
            Some(Submissions::Other(_)) | None => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtrackRank {
    pub rating: Option<f64>,
}

/// `submissions` is either a plain count or a nested record carrying its own
/// `submissions` field. Anything else is kept as raw JSON and treated as
/// "not present" by the activity rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Submissions {
    Count(f64),
    Detail(SubmissionDetail),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionDetail {
    pub submissions: Option<f64>,
}

/// A subtrack that passed the activity rules, flattened for display.
#[derive(Debug, Clone)]
pub struct ActiveSubtrack {
    pub name: String,
    pub rating: Option<f64>,
    pub wins: Option<f64>,
    pub submissions: Option<f64>,
    pub challenges: Option<f64>,
    pub fulfillment: Option<f64>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ActiveTrack {
    pub track: TrackId,
    pub sub_tracks: Vec<ActiveSubtrack>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSource {
    Sample,
    File(PathBuf),
}

/// Index of a subtrack row within the flattened profile widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileRow {
    pub track_idx: usize,
    pub sub_idx: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub handle: String,
    pub source: StatsSource,
    pub stats: MemberStats,
    pub show_marathon: bool,
    pub active_tracks: Vec<ActiveTrack>,
    pub selected: usize,
    pub loaded_at: Option<SystemTime>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new() -> Self {
        let handle = env::var("MEMBER_HANDLE")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| "demo".to_string());
        let show_marathon = bool_env("SHOW_MARATHON");
        Self {
            handle,
            source: StatsSource::Sample,
            stats: MemberStats::default(),
            show_marathon,
            active_tracks: Vec::new(),
            selected: 0,
            loaded_at: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn set_stats(&mut self, stats: MemberStats, loaded_at: Option<SystemTime>) {
        self.stats = stats;
        self.loaded_at = loaded_at;
        self.recompute();
    }

    pub fn toggle_marathon(&mut self) {
        self.show_marathon = !self.show_marathon;
        self.recompute();
    }

    /// Re-derive the active-track list. Called whenever the stats or the
    /// marathon toggle change; the source stats are never mutated.
    pub fn recompute(&mut self) {
        self.active_tracks = compute_active_tracks(&self.stats, self.show_marathon);
        let total = self.rows().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    /// Flattened subtrack rows across all active tracks, in display order.
    pub fn rows(&self) -> Vec<ProfileRow> {
        let mut rows = Vec::new();
        for (track_idx, track) in self.active_tracks.iter().enumerate() {
            for sub_idx in 0..track.sub_tracks.len() {
                rows.push(ProfileRow { track_idx, sub_idx });
            }
        }
        rows
    }

    pub fn selected_entry(&self) -> Option<(&ActiveTrack, &ActiveSubtrack)> {
        let row = self.rows().get(self.selected).copied()?;
        let track = self.active_tracks.get(row.track_idx)?;
        let sub = track.sub_tracks.get(row.sub_idx)?;
        Some((track, sub))
    }

    pub fn select_next(&mut self) {
        let total = self.rows().len();
        if total > 0 && self.selected + 1 < total {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn bool_env(key: &str) -> bool {
    env::var(key)
        .ok()
        .map(|val| {
            let val = val.trim().to_ascii_lowercase();
            val == "1" || val == "true" || val == "yes"
        })
        .unwrap_or(false)
}

fn vec_or_default<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
