//! The `bandwise render` command.

use std::path::PathBuf;

use anyhow::Result;

use bandwise_core::report::SessionReport;
use bandwise_report::html::write_html_report;

pub fn execute(report_path: PathBuf, output: PathBuf) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;
    write_html_report(&report, &output)?;
    println!(
        "Rendered {} responses to {}",
        report.responses.len(),
        output.display()
    );
    Ok(())
}
