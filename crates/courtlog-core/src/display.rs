use crate::types::{MatchScore, Side};
use serde::Serialize;

/// A regular-game point count as called by the umpire.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointCall {
    Love,
    Fifteen,
    Thirty,
    Forty,
}

impl PointCall {
    /// Map a raw point count. Counts of 4 and above only exist at deuce and
    /// are rendered by the deuce rule instead, so they have no call.
    pub fn from_points(points: u32) -> Option<PointCall> {
        match points {
            0 => Some(PointCall::Love),
            1 => Some(PointCall::Fifteen),
            2 => Some(PointCall::Thirty),
            3 => Some(PointCall::Forty),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PointCall::Love => "0",
            PointCall::Fifteen => "15",
            PointCall::Thirty => "30",
            PointCall::Forty => "40",
        }
    }
}

/// What the scoreboard shows for the game in progress.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreDisplay {
    Points { a: PointCall, b: PointCall },
    Tiebreak { a: u32, b: u32 },
    Deuce,
    Advantage { side: Side },
}

impl ScoreDisplay {
    pub fn of(score: &MatchScore) -> ScoreDisplay {
        let (a, b) = (score.points_a, score.points_b);
        if score.is_tiebreak {
            return ScoreDisplay::Tiebreak { a, b };
        }
        if a >= 3 && b >= 3 {
            return match a.cmp(&b) {
                std::cmp::Ordering::Equal => ScoreDisplay::Deuce,
                std::cmp::Ordering::Greater => ScoreDisplay::Advantage { side: Side::A },
                std::cmp::Ordering::Less => ScoreDisplay::Advantage { side: Side::B },
            };
        }
        // Only reachable through an edit: one side past 40 with the other under 40.
        match (PointCall::from_points(a), PointCall::from_points(b)) {
            (Some(a), Some(b)) => ScoreDisplay::Points { a, b },
            _ => ScoreDisplay::Tiebreak { a, b },
        }
    }

    /// Side holding the advantage, if any.
    pub fn leader(&self) -> Option<Side> {
        match self {
            ScoreDisplay::Advantage { side } => Some(*side),
            _ => None,
        }
    }

    /// Render with caller-chosen names for the advantage label.
    pub fn render(&self, name_a: &str, name_b: &str) -> String {
        match self {
            ScoreDisplay::Points { a, b } => format!("{} - {}", a.as_str(), b.as_str()),
            ScoreDisplay::Tiebreak { a, b } => format!("{a} - {b}"),
            ScoreDisplay::Deuce => "Deuce".to_string(),
            ScoreDisplay::Advantage { side: Side::A } => format!("Ad ({name_a})"),
            ScoreDisplay::Advantage { side: Side::B } => format!("Ad ({name_b})"),
        }
    }
}

impl std::fmt::Display for ScoreDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render("A", "B"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_points(a: u32, b: u32) -> MatchScore {
        MatchScore {
            points_a: a,
            points_b: b,
            ..MatchScore::default()
        }
    }

    #[test]
    fn regular_calls() {
        assert_eq!(ScoreDisplay::of(&with_points(0, 0)).to_string(), "0 - 0");
        assert_eq!(ScoreDisplay::of(&with_points(1, 0)).to_string(), "15 - 0");
        assert_eq!(ScoreDisplay::of(&with_points(2, 3)).to_string(), "30 - 40");
    }

    #[test]
    fn deuce_and_advantage() {
        assert_eq!(ScoreDisplay::of(&with_points(3, 3)), ScoreDisplay::Deuce);
        assert_eq!(ScoreDisplay::of(&with_points(5, 5)), ScoreDisplay::Deuce);
        let ad = ScoreDisplay::of(&with_points(4, 3));
        assert_eq!(ad.leader(), Some(Side::A));
        assert_eq!(ad.render("Me", "Opp"), "Ad (Me)");
        assert_eq!(ScoreDisplay::of(&with_points(6, 7)).to_string(), "Ad (B)");
    }

    #[test]
    fn tiebreak_shows_raw_counts() {
        let mut s = with_points(5, 3);
        s.is_tiebreak = true;
        assert_eq!(ScoreDisplay::of(&s).to_string(), "5 - 3");
        assert_eq!(ScoreDisplay::of(&s).leader(), None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ScoreDisplay::Deuce).unwrap();
        assert_eq!(json["kind"], "deuce");
    }
}
