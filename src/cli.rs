//! CLI-facing helpers.
//!
//! A deterministic command surface that the `contract-parity` binary wraps:
//! loading inputs from JSON files, rendering reports in the requested format
//! and writing artifacts to disk.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cross_platform::{self, generate_report, CrossPlatformReport};
use crate::error::{Error, Result};
use crate::interface::{InterfaceContractResult, InterfaceDefinition, ValidatorConfig};
use crate::reporter::{self, DetailedValidationReport};
use crate::tokens::{
    MathematicalConsistencyValidator, TokenComparator, TokenComparisonOptions, TokenSet,
    TokenValues,
};

/// Supported report output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    /// File extension for artifacts in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(Error::Config(format!(
                "unknown report format '{}' (expected text, json or markdown)",
                other
            ))),
        }
    }
}

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|error| {
        Error::Config(format!(
            "failed to read {} from '{}': {}",
            what,
            path.display(),
            error
        ))
    })
}

/// Load an ordered array of interface definitions.
pub fn load_definitions(path: &Path) -> Result<Vec<InterfaceDefinition>> {
    let json = read(path, "interface definitions")?;
    serde_json::from_str(&json).map_err(|error| {
        Error::Config(format!(
            "invalid interface definitions in '{}': {}",
            path.display(),
            error
        ))
    })
}

/// Load a validator configuration.
pub fn load_config(path: &Path) -> Result<ValidatorConfig> {
    let json = read(path, "validator config")?;
    ValidatorConfig::from_json(&json)
}

/// Token input: a full set, or a bare array of tokens.
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenInput {
    Set(TokenSet),
    Tokens(Vec<TokenValues>),
}

/// Load a token set.
pub fn load_token_set(path: &Path) -> Result<TokenSet> {
    let json = read(path, "tokens")?;
    let input: TokenInput = serde_json::from_str(&json).map_err(|error| {
        Error::Config(format!("invalid tokens in '{}': {}", path.display(), error))
    })?;
    Ok(match input {
        TokenInput::Set(set) => set,
        TokenInput::Tokens(tokens) => TokenSet {
            tokens,
            ..TokenSet::default()
        },
    })
}

/// Run token comparison and the mathematical checks, then merge with `contracts`.
pub fn cross_platform_report(
    set: &TokenSet,
    options: TokenComparisonOptions,
    contracts: &[InterfaceContractResult],
) -> Result<CrossPlatformReport> {
    let math = MathematicalConsistencyValidator::new()
        .with_options(options)
        .validate(set)?;
    let batch = TokenComparator::new()
        .with_options(options)
        .compare_batch(&set.tokens);
    Ok(generate_report(&math, &batch, contracts))
}

/// Render a detailed interface report.
pub fn render_report(report: &DetailedValidationReport, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Text => reporter::format_as_text(report),
        ReportFormat::Json => reporter::format_as_json(report)?,
        ReportFormat::Markdown => reporter::format_as_markdown(report),
    })
}

/// Render a cross-platform report.
pub fn render_cross_platform(report: &CrossPlatformReport, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Text => cross_platform::format_as_text(report),
        ReportFormat::Json => cross_platform::format_as_json(report)?,
        ReportFormat::Markdown => cross_platform::format_as_markdown(report),
    })
}

/// Write an artifact, creating parent directories as needed.
pub fn write_output(path: &Path, artifact: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| {
            Error::Config(format!(
                "failed to create output directory '{}': {}",
                parent.display(),
                error
            ))
        })?;
    }

    fs::write(path, artifact).map_err(|error| {
        Error::Config(format!(
            "failed to write report to '{}': {}",
            path.display(),
            error
        ))
    })?;
    Ok(path.to_path_buf())
}

/// Suggest a default output path for a component report.
pub fn suggested_output_path(component: &str, format: ReportFormat) -> PathBuf {
    PathBuf::from(format!("{}-validation.{}", component, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::InterfaceValidator;
    use crate::platform::Platform;
    use crate::reporter::ValidationReporter;
    use tempfile::tempdir;

    const DEFINITIONS: &str = r#"[
        {
            "name": "Button",
            "platform": "ios",
            "properties": [{ "name": "title", "type": "String", "required": true }],
            "methods": [{ "name": "onClick", "parameters": [], "returnType": "void" }],
            "events": [],
            "states": []
        },
        {
            "name": "Button",
            "platform": "android",
            "properties": [{ "name": "title", "type": "String", "required": true }],
            "methods": [{ "name": "onClick", "parameters": [], "returnType": "boolean" }],
            "events": [],
            "states": []
        }
    ]"#;

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("html".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_load_and_render_definitions() {
        let dir = tempdir().expect("tempdir should be created");
        let input = dir.path().join("button.json");
        fs::write(&input, DEFINITIONS).expect("fixture should be written");

        let defs = load_definitions(&input).expect("definitions should load");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[1].platform, Platform::Android);

        let report = InterfaceValidator::new()
            .validate_interfaces(&defs)
            .expect("validation should run");
        let detailed = ValidationReporter::new().generate_report(&report);

        let markdown = render_report(&detailed, ReportFormat::Markdown).expect("markdown renders");
        assert!(markdown.contains("return_type_mismatch"));

        let json = render_report(&detailed, ReportFormat::Json).expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json parses");
        assert_eq!(value["valid"], false);
    }

    #[test]
    fn test_load_definitions_rejects_invalid_payload() {
        let dir = tempdir().expect("tempdir should be created");
        let input = dir.path().join("broken.json");
        fs::write(&input, "{not-json}").expect("fixture should be written");

        let err = load_definitions(&input).unwrap_err();
        assert!(err.to_string().contains("invalid interface definitions"));
        assert!(load_definitions(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_load_token_set_accepts_bare_array() {
        let dir = tempdir().expect("tempdir should be created");
        let bare = dir.path().join("tokens.json");
        fs::write(
            &bare,
            r#"[{ "name": "space100", "tier": "primitive", "category": "spacing",
                  "baseValue": 8, "values": { "ios": 8, "android": 8, "web": 8 } }]"#,
        )
        .expect("fixture should be written");
        let set = load_token_set(&bare).expect("tokens should load");
        assert_eq!(set.tokens.len(), 1);
        assert!(set.color_pairs.is_empty());

        let full = dir.path().join("set.json");
        fs::write(
            &full,
            r##"{ "tokens": [], "colorPairs": [{ "foreground": "#000", "background": "#fff" }] }"##,
        )
        .expect("fixture should be written");
        let set = load_token_set(&full).expect("set should load");
        assert_eq!(set.color_pairs.len(), 1);

        let report = cross_platform_report(&set, TokenComparisonOptions::default(), &[])
            .expect("report should build");
        assert!(report.valid);
    }

    #[test]
    fn test_load_config() {
        let dir = tempdir().expect("tempdir should be created");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "severity": { "optionalPropertyAbsence": "warning" }, "advisories": false }"#,
        )
        .expect("fixture should be written");

        let config = load_config(&path).expect("config should load");
        assert!(!config.advisories);
    }

    #[test]
    fn test_write_output_creates_directories() {
        let dir = tempdir().expect("tempdir should be created");
        let output = dir.path().join("reports").join("nested").join("button.md");

        let written = write_output(&output, "# Report\n").expect("write should succeed");
        assert_eq!(written, output);
        assert_eq!(
            fs::read_to_string(&output).expect("output should be readable"),
            "# Report\n"
        );
    }

    #[test]
    fn test_suggested_output_path_uses_extension() {
        assert_eq!(
            suggested_output_path("Button", ReportFormat::Json),
            PathBuf::from("Button-validation.json")
        );
    }
}
