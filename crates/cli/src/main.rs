//! ech-roundtrip
//!
//! Checks that eCH documents survive a parse and re-export without losing
//! or gaining elements.

use clap::Parser;
use openmun_cli::{
    Command, Config, OutputFormat, diff_files, init_logging, render_diff_text, render_text,
    roundtrip_files,
};
use openmun_serde::json::to_json_string_pretty;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }
    let format = config.output_format().map_err(|e| anyhow::anyhow!(e))?;

    let catalog = openmun_ech::catalog()
        .map_err(|e| anyhow::anyhow!("eCH catalog definition is defective: {}", e))?;

    let ok = match &config.command {
        Command::Roundtrip { files } => {
            info!(files = files.len(), fail_fast = config.fail_fast, "Starting round trip");
            let reports = roundtrip_files(catalog, files, config.fail_fast);
            match format {
                OutputFormat::Text => print!("{}", render_text(&reports)),
                OutputFormat::Json => println!("{}", to_json_string_pretty(&reports)?),
            }
            reports.iter().all(|r| r.is_ok())
        }
        Command::Diff { original, exported } => {
            let report = diff_files(catalog, original, exported)?;
            match format {
                OutputFormat::Text => print!("{}", render_diff_text(&report)),
                OutputFormat::Json => println!("{}", to_json_string_pretty(&report)?),
            }
            report.is_lossless
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
