use crate::session::Session;
use courtlog_ledger::{Column, CourtlogPaths, PointRecord};

pub fn execute(paths: CourtlogPaths, limit: usize, json: bool) -> anyhow::Result<()> {
    let session = Session::open(paths)?;
    let records = session.log.records()?;
    let skip = if limit > 0 {
        records.len().saturating_sub(limit)
    } else {
        0
    };
    let shown = &records[skip..];

    if shown.is_empty() {
        println!("No points logged in {}", session.log.partition());
        return Ok(());
    }

    if json {
        for r in shown {
            println!("{}", serde_json::to_string(r)?);
        }
    } else {
        for r in shown {
            print_record_line(r);
        }
        println!(
            "\n({} of {} points in {})",
            shown.len(),
            records.len(),
            session.log.partition()
        );
    }
    Ok(())
}

fn print_record_line(r: &PointRecord) {
    let detail: Vec<String> = [
        Column::Server,
        Column::ServeCode,
        Column::RallyLenShots,
        Column::FinalShotType,
        Column::FinalOutcome,
    ]
    .into_iter()
    .filter(|c| !r.get(*c).is_empty())
    .map(|c| format!("{c}={}", r.get(c)))
    .collect();

    println!(
        "{}  {}  S{} G{}  [{}]  {}",
        r.point_id,
        r.timestamp,
        r.set_no,
        r.game_no,
        r.score_before_point,
        detail.join(" ")
    );
    if !r.notes.is_empty() {
        println!("    {}", r.notes);
    }
}
