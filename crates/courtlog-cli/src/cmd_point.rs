use crate::outcome::{final_outcome, How};
use crate::session::Session;
use anyhow::Context;
use courtlog_core::Side;
use courtlog_ledger::{CourtlogPaths, PointRecord};

/// Attributes of one point as entered by the operator.
pub struct PointParams {
    pub winner: Option<Side>,
    pub server: Option<Side>,
    pub how: Option<How>,
    pub serve_number: String,
    pub serve_code: Option<String>,
    pub return_code: Option<String>,
    pub rally: Option<String>,
    pub pattern: Option<String>,
    pub tactic: Option<String>,
    pub final_shot: Option<String>,
    pub notes: Option<String>,
    /// Raw `column=value` overrides, applied last.
    pub fields: Vec<String>,
}

pub fn execute(paths: CourtlogPaths, params: PointParams) -> anyhow::Result<()> {
    let mut session = Session::open(paths)?;
    let record = build_record(&session, &params)?;

    let written = session.record_point(record, params.winner)?;
    session.save()?;

    println!("Logged point {}", written.point_id);
    if params.winner.is_none() {
        println!("  (no winner given, score unchanged)");
    }
    println!("{}", session.scoreboard());
    Ok(())
}

fn build_record<C: courtlog_ledger::Clock>(
    session: &Session<C>,
    params: &PointParams,
) -> anyhow::Result<PointRecord> {
    let engine = &session.engine;
    let mut record = PointRecord {
        set_no: engine.set_number().to_string(),
        game_no: engine.game_number().to_string(),
        score_before_point: engine
            .current_score()
            .render(&session.config.name_a, &session.config.name_b),
        server: params.server.map(server_code).unwrap_or_default(),
        serve_number: params.serve_number.clone(),
        serve_code: params.serve_code.clone().unwrap_or_default(),
        return_code: params.return_code.clone().unwrap_or_default(),
        rally_len_shots: params.rally.clone().unwrap_or_default(),
        pattern: params.pattern.clone().unwrap_or_default(),
        tactic_code: params.tactic.clone().unwrap_or_default(),
        final_shot_type: params.final_shot.clone().unwrap_or_default(),
        final_outcome: params
            .winner
            .map(|w| final_outcome(w, params.how))
            .unwrap_or_default(),
        notes: params.notes.clone().unwrap_or_default(),
        ..Default::default()
    };

    for pair in &params.fields {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("--field expects column=value, got '{pair}'"))?;
        record.set_named(key, value)?;
    }
    Ok(record)
}

/// Server column code: `n` for side A (near), `o` for side B (opponent).
fn server_code(side: Side) -> String {
    match side {
        Side::A => "n".to_string(),
        Side::B => "o".to_string(),
    }
}
