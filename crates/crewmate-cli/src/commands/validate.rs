//! Validate command implementation
//!
//! Strictly validates an appearance overrides file merged onto a preset.

use anyhow::{Context, Result};
use colored::Colorize;
use crewmate_spec::{canonical_appearance_hash, validate_appearance, ValidationResult};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::input::resolve_appearance;

/// One error or warning in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonDiagnostic {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Machine-readable validate report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub appearance_path: String,
    pub preset: String,
    pub source_hash: Option<String>,
    pub appearance_hash: String,
    pub errors: Vec<JsonDiagnostic>,
    pub warnings: Vec<JsonDiagnostic>,
}

impl ValidateOutput {
    fn new(
        appearance_path: &str,
        preset: &str,
        source_hash: Option<String>,
        appearance_hash: String,
        result: &ValidationResult,
    ) -> Self {
        Self {
            success: result.is_ok(),
            appearance_path: appearance_path.to_string(),
            preset: preset.to_string(),
            source_hash,
            appearance_hash,
            errors: result
                .errors
                .iter()
                .map(|e| JsonDiagnostic {
                    code: e.code.code().to_string(),
                    message: e.message.clone(),
                    path: e.path.clone(),
                })
                .collect(),
            warnings: result
                .warnings
                .iter()
                .map(|w| JsonDiagnostic {
                    code: w.code.code().to_string(),
                    message: w.message.clone(),
                    path: w.path.clone(),
                })
                .collect(),
        }
    }
}

/// Run the validate command
///
/// # Arguments
/// * `appearance_path` - Appearance overrides JSON
/// * `preset` - Preset the overrides are merged onto
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(appearance_path: &str, preset: &str, json_output: bool) -> Result<ExitCode> {
    let output = check(appearance_path, preset)?;

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_human(&output);
    }

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Loads, merges and validates without printing.
pub fn check(appearance_path: &str, preset: &str) -> Result<ValidateOutput> {
    let resolved = resolve_appearance(preset, Some(Path::new(appearance_path)))
        .with_context(|| format!("Failed to load appearance file: {}", appearance_path))?;
    let result = validate_appearance(&resolved.appearance);
    let appearance_hash = canonical_appearance_hash(&resolved.appearance)
        .context("Failed to hash appearance")?;
    Ok(ValidateOutput::new(
        appearance_path,
        resolved.preset.name(),
        resolved.source_hash,
        appearance_hash,
        &result,
    ))
}

fn print_human(output: &ValidateOutput) {
    println!(
        "{} {} (onto {})",
        "Validating:".cyan().bold(),
        output.appearance_path,
        output.preset
    );
    println!("{} {}", "Appearance hash:".dimmed(), &output.appearance_hash[..16]);

    for warning in &output.warnings {
        println!("  {} {}: {}", "!".yellow(), warning.code.yellow(), describe(warning));
    }
    for error in &output.errors {
        println!("  {} {}: {}", "x".red(), error.code.red(), describe(error));
    }

    if output.success {
        println!("\n{} Appearance is valid", "SUCCESS".green().bold());
    } else {
        println!(
            "\n{} {} error(s)",
            "FAILED".red().bold(),
            output.errors.len()
        );
    }
}

fn describe(diagnostic: &JsonDiagnostic) -> String {
    match &diagnostic.path {
        Some(path) => format!("{} (at {})", diagnostic.message, path),
        None => diagnostic.message.clone(),
    }
}
