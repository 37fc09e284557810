use crate::display::ScoreDisplay;
use crate::edit::ScoreEdit;
use crate::types::{MatchConfig, MatchScore, Side, GAMES_TO_WIN_SET, POINTS_TO_WIN_GAME};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tennis score state machine for a single match.
///
/// Every `award_point` first pushes a full copy of the score, so `undo`
/// is a plain restore and also reverts any game or set rollover.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEngine {
    score: MatchScore,
    #[serde(default)]
    history: Vec<MatchScore>,
}

impl ScoreEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            score: MatchScore::new(config),
            history: Vec::new(),
        }
    }

    /// Start a fresh match and forget the undo history.
    pub fn reset_match(&mut self, config: MatchConfig) {
        self.score = MatchScore::new(config);
        self.history.clear();
        debug!(no_ad = config.no_ad, tiebreak_target = config.tiebreak_target, "match reset");
    }

    pub fn award_point(&mut self, winner: Side) {
        self.history.push(self.score);
        *self.score.points_mut(winner) += 1;
        self.resolve_game();
    }

    /// Restore the score as it was before the last `award_point`.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(frame) => {
                self.score = frame;
                true
            }
            None => false,
        }
    }

    /// Overwrite the counters directly. No undo frame is recorded.
    pub fn edit_score(&mut self, edit: ScoreEdit) {
        self.score.sets_a = edit.sets_a;
        self.score.sets_b = edit.sets_b;
        self.score.games_a = edit.games_a;
        self.score.games_b = edit.games_b;
        self.score.points_a = edit.points_a;
        self.score.points_b = edit.points_b;
        self.score.is_tiebreak = edit.is_tiebreak;
        debug!(?edit, "score edited");
    }

    pub fn current_score(&self) -> ScoreDisplay {
        ScoreDisplay::of(&self.score)
    }

    pub fn score(&self) -> &MatchScore {
        &self.score
    }

    pub fn set_number(&self) -> u32 {
        self.score.current_set
    }

    /// 1-based number of the game in progress within the current set.
    pub fn game_number(&self) -> u32 {
        self.score.games_a + self.score.games_b + 1
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn resolve_game(&mut self) {
        let s = &self.score;
        let (needed, margin) = if s.is_tiebreak {
            (s.tiebreak_target, 2)
        } else {
            (POINTS_TO_WIN_GAME, if s.no_ad { 1 } else { 2 })
        };
        let Some(winner) = leader_by(s.points_a, s.points_b, needed, margin) else {
            return;
        };

        let was_tiebreak = self.score.is_tiebreak;
        *self.score.games_mut(winner) += 1;
        self.score.points_a = 0;
        self.score.points_b = 0;
        self.score.is_tiebreak = false;
        debug!(%winner, tiebreak = was_tiebreak, games_a = self.score.games_a, games_b = self.score.games_b, "game won");

        self.resolve_set();
    }

    fn resolve_set(&mut self) {
        // TODO: decide whether 6-6 should switch the next game into a tiebreak;
        // today only an edit can start one.
        let s = &self.score;
        let Some(winner) = leader_by(s.games_a, s.games_b, GAMES_TO_WIN_SET, 2) else {
            return;
        };

        *self.score.sets_mut(winner) += 1;
        self.score.games_a = 0;
        self.score.games_b = 0;
        self.score.current_set += 1;
        debug!(%winner, sets_a = self.score.sets_a, sets_b = self.score.sets_b, "set won");
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

/// The side that has reached `needed` with at least `margin` to spare.
fn leader_by(a: u32, b: u32, needed: u32, margin: u32) -> Option<Side> {
    if a >= needed && a >= b + margin {
        Some(Side::A)
    } else if b >= needed && b >= a + margin {
        Some(Side::B)
    } else {
        None
    }
}

impl std::fmt::Display for ScoreEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = &self.score;
        write!(
            f,
            "Sets {}-{} | Games {}-{} | {}",
            s.sets_a,
            s.sets_b,
            s.games_a,
            s.games_b,
            self.current_score()
        )
    }
}
