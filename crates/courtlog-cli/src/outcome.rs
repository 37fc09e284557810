use courtlog_core::Side;

const WON: &str = "PtWon";
const LOST: &str = "PtLost";

/// How the point ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum How {
    /// Clean winner
    #[value(name = "W")]
    Winner,
    /// Forced error
    #[value(name = "FE")]
    ForcedError,
    /// Unforced error
    #[value(name = "UE")]
    UnforcedError,
    /// Double fault
    #[value(name = "DF")]
    DoubleFault,
}

impl How {
    fn code(self) -> &'static str {
        match self {
            How::Winner => "W",
            How::ForcedError => "FE",
            How::UnforcedError => "UE",
            How::DoubleFault => "DF",
        }
    }
}

/// `final_outcome` value, from side A's point of view: `PtWon|W`, `PtLost|UE`, ...
pub fn final_outcome(winner: Side, how: Option<How>) -> String {
    let base = match winner {
        Side::A => WON,
        Side::B => LOST,
    };
    match how {
        Some(h) => format!("{base}|{}", h.code()),
        None => base.to_string(),
    }
}
