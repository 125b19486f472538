//! The `bandwise run` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use bandwise_core::TestSession;

use super::{load_config, start_session, status_lines, write_reports};

pub fn execute(
    name: Option<String>,
    initial_band: Option<String>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref(), name)?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let mut session = start_session(config, initial_band.as_deref())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    drive(&mut session, stdin.lock(), stdout.lock())?;

    if session.state().log().is_empty() {
        eprintln!("No answers recorded, nothing to save.");
        return Ok(());
    }
    for path in write_reports(&session, &output, &format)? {
        eprintln!("Report: {}", path.display());
    }
    Ok(())
}

enum Answer {
    Correct,
    Incorrect,
    Quit,
}

fn parse_answer(line: &str) -> Option<Answer> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" | "1" => Some(Answer::Correct),
        "n" | "no" | "0" => Some(Answer::Incorrect),
        "q" | "quit" => Some(Answer::Quit),
        _ => None,
    }
}

/// Question loop over arbitrary input and output. EOF quits the session.
fn drive<R: BufRead, W: Write>(session: &mut TestSession, input: R, mut out: W) -> Result<()> {
    let mut lines = input.lines();

    loop {
        let state = session.state();
        writeln!(out, "Questions Count: {}", state.total_questions())?;
        writeln!(out, "Question Difficulty Level: {}", state.current_difficulty())?;
        write!(out, "Did you get the question right? [y/n/q] ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            session.quit();
            break;
        };
        let correct = match parse_answer(&line) {
            Some(Answer::Correct) => true,
            Some(Answer::Incorrect) => false,
            Some(Answer::Quit) => {
                session.quit();
                break;
            }
            None => {
                writeln!(out, "Please answer y, n or q.")?;
                continue;
            }
        };

        let outcome = session.submit_answer("", correct)?;

        if let Some(checkpoint) = outcome.checkpoint {
            writeln!(out, "{checkpoint}")?;
            write!(out, "Continue test? [c/q] ")?;
            out.flush()?;
            let choice = lines.next().transpose()?.unwrap_or_default();
            if matches!(choice.trim().to_lowercase().as_str(), "q" | "quit") {
                session.quit();
                break;
            }
            session.continue_test()?;
        }

        if session.state().total_questions() >= session.config().confidence_trigger {
            for line in status_lines(session.state()) {
                writeln!(out, "{line}")?;
            }
        }
    }

    writeln!(out, "Test ended after {} questions.", session.state().total_questions())?;
    for line in status_lines(session.state()) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandwise_core::session::Phase;
    use bandwise_core::Level;

    fn run_script(script: &str) -> (TestSession, String) {
        let mut session = TestSession::create(Some(0)).unwrap();
        let mut out = Vec::new();
        drive(&mut session, script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn answers_until_eof() {
        let (session, out) = run_script("y\ny\nn\ny\ny\n");
        assert_eq!(session.state().total_questions(), 5);
        assert_eq!(session.state().band(), Level::B1);
        assert_eq!(session.state().phase(), Phase::Terminated);
        assert!(out.contains("Test ended after 5 questions."));
        assert!(!out.contains("Most Likely Level"));
    }

    #[test]
    fn invalid_input_is_reprompted() {
        let (session, out) = run_script("maybe\nyes\nq\n");
        assert_eq!(session.state().total_questions(), 1);
        assert!(out.contains("Please answer y, n or q."));
    }

    #[test]
    fn quit_at_checkpoint() {
        let script = "y\n".repeat(15) + "q\n" + &"y\n".repeat(3);
        let (session, out) = run_script(&script);
        assert_eq!(session.state().total_questions(), 15);
        assert!(out.contains("You have answered 15 questions."));
        assert!(session.is_closed());
    }

    #[test]
    fn continue_past_checkpoint() {
        let script = "y\n".repeat(15) + "c\n" + &"n\n".repeat(2);
        let (session, out) = run_script(&script);
        assert_eq!(session.state().total_questions(), 17);
        assert!(out.contains("Confidence in current band:"));
        assert!(out.contains("Most Likely Level: "));
        assert!(out.contains("Final Level: C2"));
    }
}
