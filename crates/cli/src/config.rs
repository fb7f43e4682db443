//! Command-line configuration for `ech-roundtrip`.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OPENMUN_LOG_LEVEL` | info | Log level |
//! | `OPENMUN_OUTPUT` | text | Report format (`text` or `json`) |
//! | `OPENMUN_FAIL_FAST` | false | Stop at the first failing document |

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Parser)]
#[command(name = "ech-roundtrip")]
#[command(about = "Round-trip verification for eCH XML documents")]
pub struct Config {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "OPENMUN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Report format: text or json.
    #[arg(long, global = true, env = "OPENMUN_OUTPUT", default_value = "text")]
    pub output: String,

    /// Stop at the first document that fails.
    #[arg(long, global = true, env = "OPENMUN_FAIL_FAST", default_value = "false")]
    pub fail_fast: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse each document, write it back and compare the two trees.
    Roundtrip {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Compare two documents tag by tag, without parsing them as models.
    Diff { original: PathBuf, exported: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Config {
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        match self.output.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{}' (expected text or json)", other)),
        }
    }

    /// Validates the configuration and returns any errors.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log level '{}' (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if let Err(e) = self.output_format() {
            errors.push(e);
        }

        if let Command::Diff { original, exported } = &self.command
            && original == exported
        {
            errors.push("Diff needs two different files".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(command: Command) -> Config {
        Config {
            log_level: "info".to_string(),
            output: "text".to_string(),
            fail_fast: false,
            command,
        }
    }

    fn roundtrip() -> Command {
        Command::Roundtrip {
            files: vec![PathBuf::from("delivery.xml")],
        }
    }

    #[test]
    fn test_validate_valid() {
        assert!(config(roundtrip()).validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_output() {
        let config = Config {
            output: "yaml".to_string(),
            ..config(roundtrip())
        };
        let result = config.validate();
        assert!(result.unwrap_err().iter().any(|e| e.contains("yaml")));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = Config {
            log_level: "loud".to_string(),
            output: "xml".to_string(),
            ..config(roundtrip())
        };
        assert_eq!(config.validate().unwrap_err().len(), 2);
    }

    #[test]
    fn test_validate_diff_same_file() {
        let config = config(Command::Diff {
            original: PathBuf::from("a.xml"),
            exported: PathBuf::from("a.xml"),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_arguments() {
        let config = Config::try_parse_from([
            "ech-roundtrip",
            "--output",
            "json",
            "--fail-fast",
            "roundtrip",
            "a.xml",
            "b.xml",
        ])
        .unwrap();
        assert!(config.fail_fast);
        assert_eq!(config.output_format(), Ok(OutputFormat::Json));
        match config.command {
            Command::Roundtrip { files } => assert_eq!(files.len(), 2),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_roundtrip_requires_files() {
        assert!(Config::try_parse_from(["ech-roundtrip", "roundtrip"]).is_err());
    }
}
