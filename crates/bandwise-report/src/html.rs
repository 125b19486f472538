//! HTML report generator.
//!
//! Produces a standalone "Test Responses Log" document: a summary line and
//! one bordered, centred table row per response.

use anyhow::{Context, Result};
use std::path::Path;

use bandwise_core::log::{ResponseLog, EXPORT_COLUMNS};
use bandwise_core::report::SessionReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render just the response table.
pub fn response_table(log: &ResponseLog) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"responses\">\n<thead><tr>");
    for column in EXPORT_COLUMNS {
        html.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for response in log {
        let class = if response.correct { "pass" } else { "fail" };
        html.push_str(&format!("<tr class=\"{class}\">"));
        for cell in response.cells() {
            html.push_str(&format!("<td>{}</td>", html_escape(&cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Generate a full HTML document from a session report.
pub fn generate_html(report: &SessionReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("<title>Test Responses Log</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<h1>Test Responses Log</h1>\n");

    let final_level = report
        .final_level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | band <strong>{}</strong> | confidence {:.4} | final level {} | {}</p>\n",
        report.total_questions,
        report.band,
        report.confidence,
        final_level,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    html.push_str(&response_table(&report.responses));

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; }
.meta { color: #6b7280; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid black; padding: 8px; text-align: center; }
.pass { background: #dcfce7; }
.fail { background: #fde2e2; }
"#;
