use crate::session::Session;
use courtlog_core::ScoreEdit;
use courtlog_ledger::CourtlogPaths;

pub fn show(paths: CourtlogPaths, json: bool) -> anyhow::Result<()> {
    let session = Session::open(paths)?;
    if json {
        let out = serde_json::json!({
            "score": session.engine.score(),
            "display": session.engine.current_score(),
            "text": session.scoreboard(),
            "can_undo": session.engine.can_undo(),
            "can_redo": session.log.can_redo(),
            "partition": session.log.partition(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", session.scoreboard());
        if session.engine.score().is_tiebreak {
            println!("  (tiebreak to {})", session.engine.score().tiebreak_target);
        }
    }
    Ok(())
}

/// `courtlog edit` takes the seven counters as given; bad input changes nothing.
pub fn edit(paths: CourtlogPaths, values: &[String; 7]) -> anyhow::Result<()> {
    let raw: [&str; 7] = std::array::from_fn(|i| values[i].as_str());
    let edit = ScoreEdit::parse(&raw)?;

    let mut session = Session::open(paths)?;
    session.engine.edit_score(edit);
    session.save()?;
    println!("Score edited");
    println!("{}", session.scoreboard());
    Ok(())
}

pub fn reset(paths: CourtlogPaths) -> anyhow::Result<()> {
    let mut session = Session::open(paths)?;
    session.new_match();
    session.save()?;
    let config = session.config.match_config();
    tracing::info!(no_ad = config.no_ad, tiebreak_target = config.tiebreak_target, "new match started");
    println!("New match started");
    println!("{}", session.scoreboard());
    Ok(())
}
