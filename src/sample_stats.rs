use rand::Rng;

use crate::state::{
    MemberStats, SubmissionDetail, Submissions, Subtrack, SubtrackRank, TrackStats,
};

/// Demo payload used when no stats file is supplied. Covers every shape the
/// loader handles: copilot fulfillment, plain and nested submission counts,
/// folded SRM / MARATHON_MATCH records, and the two special-cased subtrack
/// names.
pub fn sample_member_stats() -> MemberStats {
    let mut rng = rand::thread_rng();
    let jitter: f64 = rng.gen_range(-25.0..=25.0);

    MemberStats {
        copilot: Some(TrackStats {
            fulfillment: Some(94.0),
            ..TrackStats::default()
        }),
        develop: Some(TrackStats {
            sub_tracks: vec![
                rated("CODE", 1923.0 + jitter, 14.0, nested(87.0)),
                unrated("FIRST_2_FINISH", 42.0, plain(133.0)),
                rated("ASSEMBLY_COMPETITION", 1204.0 + jitter, 6.0, nested(23.0)),
                unrated("UI_PROTOTYPE_COMPETITION", 3.0, nested(9.0)),
                // Hidden from the widget regardless of activity.
                rated("DEVELOP_MARATHON_MATCH", 1517.0, 2.0, nested(4.0)),
                // Never active, whatever the counts say.
                unrated("COPILOT_POSTING", 0.0, plain(12.0)),
            ],
            ..TrackStats::default()
        }),
        design: Some(TrackStats {
            sub_tracks: vec![
                unrated("WEB_DESIGNS", 9.0, nested(31.0)),
                // Zero submissions: stays inactive.
                unrated("LOGO_DESIGN", 0.0, nested(0.0)),
            ],
            ..TrackStats::default()
        }),
        data_science: Some(TrackStats {
            srm: Some(Subtrack {
                rank: Some(SubtrackRank {
                    rating: Some(1448.0 + jitter),
                }),
                challenges: Some(26.0),
                wins: Some(0.0),
                ..Subtrack::default()
            }),
            marathon_match: Some(Subtrack {
                rank: Some(SubtrackRank { rating: Some(0.0) }),
                challenges: Some(0.0),
                wins: Some(0.0),
                ..Subtrack::default()
            }),
            ..TrackStats::default()
        }),
    }
}

fn rated(name: &str, rating: f64, wins: f64, submissions: Submissions) -> Subtrack {
    Subtrack {
        name: name.to_string(),
        rank: Some(SubtrackRank {
            rating: Some(rating),
        }),
        submissions: Some(submissions),
        wins: Some(wins),
        ..Subtrack::default()
    }
}

fn unrated(name: &str, wins: f64, submissions: Submissions) -> Subtrack {
    Subtrack {
        name: name.to_string(),
        submissions: Some(submissions),
        wins: Some(wins),
        ..Subtrack::default()
    }
}

fn plain(count: f64) -> Submissions {
    Submissions::Count(count)
}

fn nested(count: f64) -> Submissions {
    Submissions::Detail(SubmissionDetail {
        submissions: Some(count),
    })
}
