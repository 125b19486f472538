//! The `bandwise simulate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use bandwise_core::session::{Advisory, SubmitOutcome};

use super::{load_config, start_session, status_lines, write_reports};

pub fn execute(
    answers: String,
    initial_band: Option<String>,
    name: Option<String>,
    quit_on_high: bool,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let answers = parse_answers(&answers)?;
    let config = load_config(config_path.as_deref(), name)?;
    let mut session = start_session(config, initial_band.as_deref())?;

    eprintln!(
        "bandwise v{} — Simulating {} answers from {}",
        env!("CARGO_PKG_VERSION"),
        answers.len(),
        session.state().band()
    );

    let mut steps: Vec<(bool, SubmitOutcome)> = Vec::with_capacity(answers.len());
    for correct in answers {
        let outcome = session.submit_answer("", correct)?;
        steps.push((correct, outcome));

        if let Some(checkpoint) = outcome.checkpoint {
            println!("{checkpoint}");
            if quit_on_high && checkpoint.advisory == Advisory::High {
                session.quit();
                break;
            }
            session.continue_test()?;
        }
    }

    print_steps(&steps);
    for line in status_lines(session.state()) {
        println!("{line}");
    }

    if let Some(output) = output {
        for path in write_reports(&session, &output, &format)? {
            eprintln!("Report: {}", path.display());
        }
    }

    Ok(())
}

/// Parse `YYNY`, `1 1 0 1` or `y,n,y` into correctness flags.
fn parse_answers(raw: &str) -> Result<Vec<bool>> {
    let answers = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_uppercase() {
            'Y' | '1' => Ok(true),
            'N' | '0' => Ok(false),
            other => Err(anyhow::anyhow!("invalid answer '{other}', expected Y/N/1/0")),
        })
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(!answers.is_empty(), "answers must have at least one value");
    Ok(answers)
}

fn print_steps(steps: &[(bool, SubmitOutcome)]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Question",
        "Answer",
        "Band",
        "Move",
        "Next Difficulty",
        "Confidence",
        "Checkpoint",
    ]);

    for (i, (correct, outcome)) in steps.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(if *correct { "Yes" } else { "No" }),
            Cell::new(outcome.band),
            Cell::new(format!("{:?}", outcome.band_move).to_lowercase()),
            Cell::new(outcome.next_difficulty),
            Cell::new(format!("{:.4}", outcome.confidence)),
            Cell::new(
                outcome
                    .checkpoint
                    .map(|c| format!("{:?}", c.advisory).to_lowercase())
                    .unwrap_or_default(),
            ),
        ]);
    }

    println!("{table}");
}
