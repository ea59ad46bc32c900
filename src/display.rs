use std::collections::HashMap;

use once_cell::sync::Lazy;
use ratatui::style::Color;

use crate::active_tracks::MARATHON_MATCH_NAME;
use crate::state::{ActiveSubtrack, TrackId};

// Maps API track names to their display form.
static TRACK_LABELS: Lazy<HashMap<TrackId, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (TrackId::Copilot, "COPILOT"),
        (TrackId::Develop, "DEVELOPMENT"),
        (TrackId::Design, "DESIGN"),
        (TrackId::DataScience, "DATA SCIENCE"),
    ])
});

pub fn track_label(track: TrackId) -> &'static str {
    TRACK_LABELS.get(&track).copied().unwrap_or("UNKNOWN")
}

/// Human-readable subtrack name: underscores become spaces, with the one
/// literal rename the profile page has always carried.
pub fn subtrack_label(name: &str) -> String {
    name.replace("FIRST_2_FINISH", "FIRST2FINISH").replace('_', " ")
}

/// Rating bands: gray below 900, green to 1199, blue to 1499, yellow to
/// 2199, red from 2200 up.
pub fn rating_color(rating: f64) -> Color {
    if rating < 900.0 {
        Color::Gray
    } else if rating < 1200.0 {
        Color::Green
    } else if rating < 1500.0 {
        Color::Blue
    } else if rating < 2200.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub const WINS_COLOR: Color = Color::Cyan;
pub const FULFILLMENT_COLOR: Color = Color::DarkGray;

/// Navigation target for a subtrack row. Spaces in the subtrack name become
/// underscores so the folded "MARATHON MATCH" entry round-trips to its API
/// form.
pub fn details_link(handle: &str, track: TrackId, subtrack_name: &str) -> String {
    format!(
        "/members/{handle}/details/?track={}&subTrack={}",
        track.api_key(),
        subtrack_name.replace(' ', "_")
    )
}

/// What a subtrack row displays next to its name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Figure {
    Rating(f64),
    /// A forced-visible marathon entry with no recorded challenges has a
    /// rating field but nothing behind it.
    NoRating,
    Fulfillment(f64),
    Wins(f64),
}

impl Figure {
    pub fn value_text(self) -> String {
        match self {
            Figure::Rating(rating) => format!("{rating:.0}"),
            Figure::NoRating => String::new(),
            Figure::Fulfillment(pct) => format!("{pct:.0}%"),
            Figure::Wins(wins) => format!("{wins:.0}"),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Figure::Rating(_) => "Rating",
            Figure::NoRating => "No Rating",
            Figure::Fulfillment(_) => "Fulfillment",
            Figure::Wins(_) => "Wins",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Figure::Rating(rating) => rating_color(rating),
            Figure::NoRating => FULFILLMENT_COLOR,
            Figure::Fulfillment(_) => FULFILLMENT_COLOR,
            Figure::Wins(_) => WINS_COLOR,
        }
    }
}

pub fn subtrack_figure(sub: &ActiveSubtrack, show_marathon: bool) -> Figure {
    if let Some(rating) = sub.rating {
        let challengeless_marathon = sub.name == MARATHON_MATCH_NAME
            && !sub.challenges.is_some_and(|c| c > 0.0)
            && show_marathon;
        if challengeless_marathon {
            return Figure::NoRating;
        }
        return Figure::Rating(rating);
    }
    if let Some(pct) = sub.fulfillment {
        return Figure::Fulfillment(pct);
    }
    Figure::Wins(sub.wins.unwrap_or(0.0))
}
