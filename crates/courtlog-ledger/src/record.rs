use serde::{Deserialize, Serialize};

/// One column of the persisted point log, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    PointId,
    Timestamp,
    SetNo,
    GameNo,
    ScoreBeforePoint,
    Server,
    ServeNumber,
    ServeCode,
    ReturnCode,
    ReturnAggr,
    RallyLenShots,
    StrokeSeq,
    Pattern,
    TacticCode,
    PressureFlags,
    FinalShotType,
    FinalOutcome,
    CourtPosFinal,
    Notes,
}

impl Column {
    pub const ALL: [Column; 19] = [
        Column::PointId,
        Column::Timestamp,
        Column::SetNo,
        Column::GameNo,
        Column::ScoreBeforePoint,
        Column::Server,
        Column::ServeNumber,
        Column::ServeCode,
        Column::ReturnCode,
        Column::ReturnAggr,
        Column::RallyLenShots,
        Column::StrokeSeq,
        Column::Pattern,
        Column::TacticCode,
        Column::PressureFlags,
        Column::FinalShotType,
        Column::FinalOutcome,
        Column::CourtPosFinal,
        Column::Notes,
    ];

    /// Header name as written to the partition file.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::PointId => "point_id",
            Column::Timestamp => "timestamp",
            Column::SetNo => "set_no",
            Column::GameNo => "game_no",
            Column::ScoreBeforePoint => "score_before_point",
            Column::Server => "server",
            Column::ServeNumber => "serve_number",
            Column::ServeCode => "serve_code",
            Column::ReturnCode => "return_code",
            Column::ReturnAggr => "return_aggr",
            Column::RallyLenShots => "rally_len_shots",
            Column::StrokeSeq => "stroke_seq",
            Column::Pattern => "pattern",
            Column::TacticCode => "tactic_code",
            Column::PressureFlags => "pressure_flags",
            Column::FinalShotType => "final_shot_type",
            Column::FinalOutcome => "final_outcome",
            Column::CourtPosFinal => "court_pos_final",
            Column::Notes => "notes",
        }
    }

    pub fn header() -> [&'static str; 19] {
        Column::ALL.map(Column::as_str)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log column '{0}'")]
pub struct UnknownColumn(pub String);

impl std::str::FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// A single logged point. Every column is a plain string; empty means absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PointRecord {
    pub point_id: String,
    pub timestamp: String,
    pub set_no: String,
    pub game_no: String,
    pub score_before_point: String,
    pub server: String,
    pub serve_number: String,
    pub serve_code: String,
    pub return_code: String,
    pub return_aggr: String,
    pub rally_len_shots: String,
    pub stroke_seq: String,
    pub pattern: String,
    pub tactic_code: String,
    pub pressure_flags: String,
    pub final_shot_type: String,
    pub final_outcome: String,
    pub court_pos_final: String,
    pub notes: String,
}

impl PointRecord {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::PointId => &self.point_id,
            Column::Timestamp => &self.timestamp,
            Column::SetNo => &self.set_no,
            Column::GameNo => &self.game_no,
            Column::ScoreBeforePoint => &self.score_before_point,
            Column::Server => &self.server,
            Column::ServeNumber => &self.serve_number,
            Column::ServeCode => &self.serve_code,
            Column::ReturnCode => &self.return_code,
            Column::ReturnAggr => &self.return_aggr,
            Column::RallyLenShots => &self.rally_len_shots,
            Column::StrokeSeq => &self.stroke_seq,
            Column::Pattern => &self.pattern,
            Column::TacticCode => &self.tactic_code,
            Column::PressureFlags => &self.pressure_flags,
            Column::FinalShotType => &self.final_shot_type,
            Column::FinalOutcome => &self.final_outcome,
            Column::CourtPosFinal => &self.court_pos_final,
            Column::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        let slot = match column {
            Column::PointId => &mut self.point_id,
            Column::Timestamp => &mut self.timestamp,
            Column::SetNo => &mut self.set_no,
            Column::GameNo => &mut self.game_no,
            Column::ScoreBeforePoint => &mut self.score_before_point,
            Column::Server => &mut self.server,
            Column::ServeNumber => &mut self.serve_number,
            Column::ServeCode => &mut self.serve_code,
            Column::ReturnCode => &mut self.return_code,
            Column::ReturnAggr => &mut self.return_aggr,
            Column::RallyLenShots => &mut self.rally_len_shots,
            Column::StrokeSeq => &mut self.stroke_seq,
            Column::Pattern => &mut self.pattern,
            Column::TacticCode => &mut self.tactic_code,
            Column::PressureFlags => &mut self.pressure_flags,
            Column::FinalShotType => &mut self.final_shot_type,
            Column::FinalOutcome => &mut self.final_outcome,
            Column::CourtPosFinal => &mut self.court_pos_final,
            Column::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Set a column by its header name, e.g. from a `key=value` pair.
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownColumn> {
        let column: Column = name.trim().parse()?;
        self.set(column, value);
        Ok(())
    }

    /// Values in file column order.
    pub fn values(&self) -> [&str; 19] {
        Column::ALL.map(|c| self.get(c))
    }
}
