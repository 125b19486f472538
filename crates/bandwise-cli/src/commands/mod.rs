pub mod init;
pub mod render;
pub mod run;
pub mod simulate;
pub mod table;

use std::path::{Path, PathBuf};

use anyhow::Result;

use bandwise_core::config::{load_config_from, AssessmentConfig};
use bandwise_core::report::SessionReport;
use bandwise_core::session::TestState;
use bandwise_core::{Level, TestSession};
use bandwise_report::html::write_html_report;

/// Load config and apply the CLI's name override.
pub fn load_config(config_path: Option<&Path>, name: Option<String>) -> Result<AssessmentConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(name) = name {
        config.examinee = name;
    }
    Ok(config)
}

/// Build a session from an optional level argument.
pub fn start_session(config: AssessmentConfig, initial_band: Option<&str>) -> Result<TestSession> {
    let initial = initial_band
        .map(|s| s.parse::<Level>().map_err(|e| anyhow::anyhow!(e)))
        .transpose()?;
    Ok(TestSession::with_config(config, initial))
}

/// Status lines shown once confidence is being tracked.
pub fn status_lines(state: &TestState) -> Vec<String> {
    let mut lines = vec![
        format!("Confidence in current band: {:.4}", state.confidence()),
        format!("Current Band: {}", state.band()),
    ];
    if let Some(posterior) = state.posterior() {
        lines.push(format!("Most Likely Level: {}", posterior.most_likely()));
    }
    if let Some(level) = state.final_level() {
        lines.push(format!("Final Level: {level}"));
    }
    lines
}

/// Write the session report in the requested formats.
pub fn write_reports(session: &TestSession, output: &Path, format: &str) -> Result<Vec<PathBuf>> {
    let report = SessionReport::from_session(session);
    std::fs::create_dir_all(output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html"]
    } else {
        format.split(',').map(|s| s.trim()).collect()
    };
    if let Some(bad) = formats.iter().find(|f| !matches!(**f, "json" | "html")) {
        anyhow::bail!("unknown format: {bad}");
    }

    let mut written = Vec::new();
    for fmt in formats {
        let path = output.join(format!("session-{timestamp}.{fmt}"));
        if fmt == "json" {
            report.save_json(&path)?;
        } else {
            write_html_report(&report, &path)?;
        }
        tracing::debug!(path = %path.display(), "report written");
        written.push(path);
    }
    Ok(written)
}
