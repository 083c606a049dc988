//! Configuration system for Warden.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod coverage_config;
pub mod policy_config;
pub mod report_config;
pub mod rules_config;
pub mod scan_config;
pub mod warden_config;

pub use coverage_config::CoverageConfig;
pub use policy_config::PolicyConfig;
pub use report_config::ReportConfig;
pub use rules_config::RulesConfig;
pub use scan_config::ScanConfig;
pub use warden_config::{CliOverrides, WardenConfig};
