use serde::{Deserialize, Serialize};

/// Points needed to take a regular (non-tiebreak) game.
pub const POINTS_TO_WIN_GAME: u32 = 4;

/// Games needed to take a set.
pub const GAMES_TO_WIN_SET: u32 = 6;

/// Default number of points needed to win a tiebreak.
pub const DEFAULT_TIEBREAK_TARGET: u32 = 7;

/// One of the two sides of the match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown side '{0}' (expected a/b, me/opp)")]
pub struct ParseSideError(pub String);

impl std::str::FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "me" | "m" | "n" => Ok(Side::A),
            "b" | "opp" | "opponent" | "o" => Ok(Side::B),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// Match-start configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    /// Sudden death at 40-40 instead of deuce/advantage.
    #[serde(default)]
    pub no_ad: bool,
    #[serde(default = "default_tiebreak_target")]
    pub tiebreak_target: u32,
}

fn default_tiebreak_target() -> u32 {
    DEFAULT_TIEBREAK_TARGET
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            no_ad: false,
            tiebreak_target: DEFAULT_TIEBREAK_TARGET,
        }
    }
}

/// Full score of a match. Copied wholesale into undo frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchScore {
    pub sets_a: u32,
    pub sets_b: u32,
    pub games_a: u32,
    pub games_b: u32,
    /// Points in the current game. Raw tiebreak points while `is_tiebreak`.
    pub points_a: u32,
    pub points_b: u32,
    pub is_tiebreak: bool,
    pub no_ad: bool,
    pub tiebreak_target: u32,
    pub current_set: u32,
}

impl MatchScore {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            sets_a: 0,
            sets_b: 0,
            games_a: 0,
            games_b: 0,
            points_a: 0,
            points_b: 0,
            is_tiebreak: false,
            no_ad: config.no_ad,
            tiebreak_target: config.tiebreak_target,
            current_set: 1,
        }
    }

    pub fn points(&self, side: Side) -> u32 {
        match side {
            Side::A => self.points_a,
            Side::B => self.points_b,
        }
    }

    pub fn games(&self, side: Side) -> u32 {
        match side {
            Side::A => self.games_a,
            Side::B => self.games_b,
        }
    }

    pub fn sets(&self, side: Side) -> u32 {
        match side {
            Side::A => self.sets_a,
            Side::B => self.sets_b,
        }
    }

    pub(crate) fn points_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::A => &mut self.points_a,
            Side::B => &mut self.points_b,
        }
    }

    pub(crate) fn games_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::A => &mut self.games_a,
            Side::B => &mut self.games_b,
        }
    }

    pub(crate) fn sets_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::A => &mut self.sets_a,
            Side::B => &mut self.sets_b,
        }
    }
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_aliases() {
        assert_eq!("a".parse::<Side>().unwrap(), Side::A);
        assert_eq!("Me".parse::<Side>().unwrap(), Side::A);
        assert_eq!("opp".parse::<Side>().unwrap(), Side::B);
        assert_eq!(" B ".parse::<Side>().unwrap(), Side::B);
        assert!("c".parse::<Side>().is_err());
    }

    #[test]
    fn new_score_starts_at_set_one() {
        let s = MatchScore::new(MatchConfig {
            no_ad: true,
            tiebreak_target: 10,
        });
        assert_eq!(s.current_set, 1);
        assert_eq!(s.points_a + s.points_b + s.games_a + s.games_b, 0);
        assert!(s.no_ad);
        assert_eq!(s.tiebreak_target, 10);
        assert!(!s.is_tiebreak);
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: MatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, MatchConfig::default());
        assert_eq!(cfg.tiebreak_target, 7);
    }
}
