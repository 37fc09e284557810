use crate::session::Session;
use courtlog_ledger::CourtlogPaths;

pub fn undo(paths: CourtlogPaths) -> anyhow::Result<()> {
    let mut session = Session::open(paths)?;
    let removed = session.undo()?;
    session.save()?;

    match removed {
        Some(r) => println!("Undid point {} ({})", r.point_id, describe(&r.notes)),
        None => println!("Nothing to undo in {}", session.log.partition()),
    }
    println!("{}", session.scoreboard());
    Ok(())
}

pub fn redo(paths: CourtlogPaths) -> anyhow::Result<()> {
    let mut session = Session::open(paths)?;
    let restored = session.redo()?;
    session.save()?;

    match restored {
        Some(r) => println!(
            "Redid point {} ({}), {} more to redo",
            r.point_id,
            describe(&r.notes),
            session.log.redo_depth()
        ),
        None => println!("Nothing to redo"),
    }
    println!("{}", session.scoreboard());
    Ok(())
}

fn describe(notes: &str) -> &str {
    if notes.is_empty() {
        "no notes"
    } else {
        notes
    }
}
