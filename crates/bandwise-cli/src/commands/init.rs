//! The `bandwise init` command.

use anyhow::{Context, Result};

use bandwise_core::config::AssessmentConfig;

const CONFIG_FILE: &str = "bandwise.toml";

pub fn execute() -> Result<()> {
    if std::path::Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    let body = toml::to_string_pretty(&AssessmentConfig::default())
        .context("failed to serialize default config")?;
    std::fs::write(CONFIG_FILE, format!("{HEADER}{body}"))?;
    println!("Created {CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Set examinee in {CONFIG_FILE} (or pass --name)");
    println!("  2. Run: bandwise simulate --answers YYNYY --initial-band A1");
    println!("  3. Run: bandwise run");

    Ok(())
}

const HEADER: &str = "# bandwise configuration
#
# confidence_trigger: answers needed before confidence is computed
# finalize_threshold: confidence at which the current band becomes final
# match_probability:  P(correct) when the examinee's level equals the band
# checkpoints:        question counts that pause for continue/quit

";
