//! Top-level Warden configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CoverageConfig, PolicyConfig, ReportConfig, RulesConfig, ScanConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`WARDEN_*`)
/// 3. Project config (`warden.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WardenConfig {
    pub scan: ScanConfig,
    pub policies: PolicyConfig,
    pub rules: RulesConfig,
    pub coverage: CoverageConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output_dir: Option<String>,
    pub top_gaps: Option<usize>,
    pub source_roots: Vec<String>,
}

impl WardenConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join("warden.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &WardenConfig) -> Result<(), ConfigError> {
        if let Some(size) = config.scan.max_file_size {
            if size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(window) = config.rules.id_window {
            if window == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "rules.id_window".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(top) = config.report.top_gaps {
            if top == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "report.top_gaps".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut WardenConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: WardenConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` value or a non-empty list.
    fn merge(base: &mut WardenConfig, other: &WardenConfig) {
        // Scan
        if !other.scan.source_roots.is_empty() {
            base.scan.source_roots = other.scan.source_roots.clone();
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }

        // Policies
        if !other.policies.paths.is_empty() {
            base.policies.paths = other.policies.paths.clone();
        }

        // Rules
        if other.rules.id_window.is_some() {
            base.rules.id_window = other.rules.id_window;
        }
        if !other.rules.forbidden_decorators.is_empty() {
            base.rules.forbidden_decorators = other.rules.forbidden_decorators.clone();
        }
        if !other.rules.forbidden_primitives.is_empty() {
            base.rules.forbidden_primitives = other.rules.forbidden_primitives.clone();
        }
        if !other.rules.trusted_domains.is_empty() {
            base.rules.trusted_domains = other.rules.trusted_domains.clone();
        }
        if !other.rules.mutating_params.is_empty() {
            base.rules.mutating_params = other.rules.mutating_params.clone();
        }
        if !other.rules.mutating_verbs.is_empty() {
            base.rules.mutating_verbs = other.rules.mutating_verbs.clone();
        }
        if other.rules.governance_decorator.is_some() {
            base.rules.governance_decorator = other.rules.governance_decorator.clone();
        }
        if !other.rules.exempt_prefixes.is_empty() {
            base.rules.exempt_prefixes = other.rules.exempt_prefixes.clone();
        }
        if !other.rules.write_methods.is_empty() {
            base.rules.write_methods = other.rules.write_methods.clone();
        }

        // Coverage
        if other.coverage.evidence_path.is_some() {
            base.coverage.evidence_path = other.coverage.evidence_path.clone();
        }
        if other.coverage.execution_evidence_path.is_some() {
            base.coverage.execution_evidence_path =
                other.coverage.execution_evidence_path.clone();
        }
        if other.coverage.links_path.is_some() {
            base.coverage.links_path = other.coverage.links_path.clone();
        }
        if !other.coverage.exclusions.is_empty() {
            base.coverage.exclusions = other.coverage.exclusions.clone();
        }

        // Report
        if other.report.output_dir.is_some() {
            base.report.output_dir = other.report.output_dir.clone();
        }
        if other.report.top_gaps.is_some() {
            base.report.top_gaps = other.report.top_gaps;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `WARDEN_SCAN_MAX_FILE_SIZE`, `WARDEN_REPORT_TOP_GAPS`, etc.
    fn apply_env_overrides(config: &mut WardenConfig) {
        if let Ok(val) = std::env::var("WARDEN_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WARDEN_REPORT_OUTPUT_DIR") {
            config.report.output_dir = Some(val);
        }
        if let Ok(val) = std::env::var("WARDEN_REPORT_TOP_GAPS") {
            if let Ok(v) = val.parse::<usize>() {
                config.report.top_gaps = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WARDEN_COVERAGE_EVIDENCE_PATH") {
            config.coverage.evidence_path = Some(val);
        }
        if let Ok(val) = std::env::var("WARDEN_RULES_ID_WINDOW") {
            if let Ok(v) = val.parse::<usize>() {
                config.rules.id_window = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut WardenConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.output_dir {
            config.report.output_dir = Some(v.clone());
        }
        if let Some(v) = cli.top_gaps {
            config.report.top_gaps = Some(v);
        }
        if !cli.source_roots.is_empty() {
            config.scan.source_roots = cli.source_roots.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
