use std::cmp::Ordering;

use crate::state::{ActiveSubtrack, ActiveTrack, MemberStats, Submissions, Subtrack, TrackId};

pub const SRM_NAME: &str = "SRM";
pub const MARATHON_MATCH_NAME: &str = "MARATHON MATCH";

const COPILOT_POSTING: &str = "COPILOT_POSTING";
const HIDDEN_SUBTRACK: &str = "DEVELOP_MARATHON_MATCH";

/// Derive the ordered active-track list for the profile widget.
///
/// Copilot comes first whenever a fulfillment value is present; the
/// competition tracks follow in fixed order, each containing only the
/// subtracks that pass the activity rules, sorted by wins then rating.
/// Inputs with missing or malformed fields never fail — they just don't
/// qualify.
pub fn compute_active_tracks(stats: &MemberStats, include_marathon_match: bool) -> Vec<ActiveTrack> {
    let mut active_tracks = Vec::new();

    if let Some(fulfillment) = stats.copilot.as_ref().and_then(|t| t.fulfillment) {
        active_tracks.push(ActiveTrack {
            track: TrackId::Copilot,
            sub_tracks: vec![ActiveSubtrack {
                name: TrackId::Copilot.api_key().to_string(),
                rating: None,
                wins: None,
                submissions: None,
                challenges: None,
                fulfillment: Some(fulfillment),
                active: true,
            }],
        });
    }

    for track in TrackId::COMPETITION_ORDER {
        let Some(track_stats) = stats.track(track) else {
            continue;
        };

        let mut sub_tracks = track_stats.sub_tracks.clone();
        if let Some(srm) = &track_stats.srm {
            sub_tracks.push(named(srm, SRM_NAME));
        }
        if let Some(marathon) = &track_stats.marathon_match {
            sub_tracks.push(named(marathon, MARATHON_MATCH_NAME));
        }

        let mut active: Vec<ActiveSubtrack> = sub_tracks
            .iter()
            .filter(|sub| {
                (is_active_subtrack(sub) && !is_hidden(sub))
                    || (sub.name == MARATHON_MATCH_NAME && include_marathon_match)
            })
            .map(annotate)
            .collect();

        if active.is_empty() {
            continue;
        }

        // Stable sort: equal wins+rating keep their input order.
        active.sort_by(compare_sub_tracks);
        active_tracks.push(ActiveTrack {
            track,
            sub_tracks: active,
        });
    }

    active_tracks
}

/// Activity threshold: a positive rating, or a positive submission count in
/// either of the shapes the field arrives in. `COPILOT_POSTING` is excluded
/// outright.
fn is_active_subtrack(sub: &Subtrack) -> bool {
    if sub.name == COPILOT_POSTING {
        return false;
    }
    if sub.rating().is_some_and(|rating| rating > 0.0) {
        return true;
    }
    match &sub.submissions {
        Some(Submissions::Count(n)) => *n > 0.0,
        Some(Submissions::Detail(detail)) => detail.submissions.is_some_and(|n| n > 0.0),
        Some(Submissions::Other(_)) | None => false,
    }
}

// The marathon override can never resurrect this entry: the override matches
// the folded "MARATHON MATCH" name, which is disjoint from the hidden one.
fn is_hidden(sub: &Subtrack) -> bool {
    sub.name == HIDDEN_SUBTRACK
}

fn named(sub: &Subtrack, name: &str) -> Subtrack {
    let mut sub = sub.clone();
    sub.name = name.to_string();
    sub
}

fn annotate(sub: &Subtrack) -> ActiveSubtrack {
    ActiveSubtrack {
        name: sub.name.clone(),
        rating: sub.rating(),
        wins: sub.wins,
        submissions: sub.submission_count(),
        challenges: sub.challenges,
        fulfillment: sub.fulfillment,
        active: true,
    }
}

fn compare_sub_tracks(a: &ActiveSubtrack, b: &ActiveSubtrack) -> Ordering {
    let wins_a = a.wins.unwrap_or(0.0);
    let wins_b = b.wins.unwrap_or(0.0);
    match wins_b.partial_cmp(&wins_a) {
        Some(Ordering::Equal) | None => {}
        Some(order) => return order,
    }
    let rating_a = a.rating.unwrap_or(0.0);
    let rating_b = b.rating.unwrap_or(0.0);
    rating_b.partial_cmp(&rating_a).unwrap_or(Ordering::Equal)
}
