//! dragcut Settings Crate
//!
//! Handles job configuration files: the machine, its tool heads, the cutting
//! roles and the program header and footer.

pub mod config;
pub mod error;

pub use config::{ConfigFormat, JobConfig, MachineSettings, RoleConfig, ToolSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
