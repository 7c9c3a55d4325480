//! Output formatting for the `detect` subcommand

use crate::generator::StartupPlan;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, plan: &StartupPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(plan)),
        }
    }

    fn format_human(&self, plan: &StartupPlan) -> String {
        let mut output = String::new();

        match &plan.detection {
            Some(detection) => {
                output.push_str(&format!("App type:  {}\n", detection.app_type));
                output.push_str(&format!("Module:    {}\n", detection.module));
                output.push_str(&format!("Directory: {}\n", detection.app_dir.display()));
            }
            None => output.push_str("App type:  user-provided startup command\n"),
        }
        output.push_str(&format!("Command:   {}\n", plan.command));

        output
    }
}
