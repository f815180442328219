//! Job configuration for dragcut
//!
//! Describes the machine, its tool heads and the cutting roles of a job.
//! Supports JSON and TOML file formats. Angles are written in degrees and
//! converted to radians when building compiler settings.
//!
//! Configuration is organized into logical sections:
//! - Machine settings (travel feed, output precision, tolerances)
//! - Tool heads (axes, heights, feeds, blade compensation)
//! - Roles (which tool cuts which curves, and how)
//! - Program text (header and footer lines)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use dragcut_core::Vector2;
use dragcut_toolpath::{CompilerSettings, OrientationMode, RoleSettings, ToolKind, ToolProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File formats a job configuration can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format implied by the file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Machine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Travel feed rate (mm/min)
    pub movement_feed: f64,
    /// Digits after the decimal point in emitted coordinates
    pub precision: usize,
    /// Distance below which a chain start counts as the current position (mm)
    pub position_tolerance: f64,
    /// Blade heading change below which no rotation is emitted (degrees)
    pub angle_tolerance: f64,
    pub orientation_mode: OrientationMode,
}

impl Default for MachineSettings {
    fn default() -> Self {
        let compiler = CompilerSettings::default();
        Self {
            movement_feed: compiler.movement_feed,
            precision: compiler.precision,
            position_tolerance: compiler.position_tolerance,
            angle_tolerance: compiler.angle_tolerance.to_degrees(),
            orientation_mode: compiler.orientation_mode,
        }
    }
}

/// One tool head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub index: usize,
    pub kind: ToolKind,
    pub offset_x: f64,
    pub offset_y: f64,
    pub lift_axis: char,
    pub rotation_axis: char,
    pub cut_height: f64,
    pub lift_height: f64,
    pub park_height: f64,
    pub pass_depth: f64,
    pub lift_feed: f64,
    pub rotation_feed: f64,
    pub overcut: f64,
    pub precut: f64,
    /// Largest heading change cut without lifting (degrees)
    pub slope_max: f64,
    /// Rotary axis reading for a blade pointing along +X (degrees)
    pub rotation_zero: f64,
    pub rotation_reversed: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from(&ToolProfile::groove_knife())
    }
}

impl From<&ToolProfile> for ToolSettings {
    fn from(profile: &ToolProfile) -> Self {
        Self {
            index: profile.index,
            kind: profile.kind,
            offset_x: profile.mounting_offset.x,
            offset_y: profile.mounting_offset.y,
            lift_axis: profile.lift_axis,
            rotation_axis: profile.rotation_axis,
            cut_height: profile.cut_height,
            lift_height: profile.lift_height,
            park_height: profile.park_height,
            pass_depth: profile.pass_depth,
            lift_feed: profile.lift_feed,
            rotation_feed: profile.rotation_feed,
            overcut: profile.overcut,
            precut: profile.precut,
            slope_max: profile.slope_max.to_degrees(),
            rotation_zero: profile.rotation_zero,
            rotation_reversed: profile.rotation_reversed,
        }
    }
}

impl ToolSettings {
    pub fn to_profile(&self) -> ToolProfile {
        ToolProfile {
            index: self.index,
            kind: self.kind,
            mounting_offset: Vector2::new(self.offset_x, self.offset_y),
            lift_axis: self.lift_axis,
            rotation_axis: self.rotation_axis,
            cut_height: self.cut_height,
            lift_height: self.lift_height,
            park_height: self.park_height,
            pass_depth: self.pass_depth,
            lift_feed: self.lift_feed,
            rotation_feed: self.rotation_feed,
            overcut: self.overcut,
            precut: self.precut,
            slope_max: self.slope_max.to_radians(),
            rotation_zero: self.rotation_zero,
            rotation_reversed: self.rotation_reversed,
        }
    }
}

/// One cutting role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub name: String,
    pub tool: usize,
    /// Cutting feed rate (mm/min)
    pub cutting_feed: f64,
    /// Maximum deviation of flattened curves (mm)
    pub chord_tolerance: f64,
    /// Overrides the tool's slope max (degrees)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope_max: Option<f64>,
    pub sequence: bool,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self::from(&RoleSettings::cuts())
    }
}

impl From<&RoleSettings> for RoleConfig {
    fn from(role: &RoleSettings) -> Self {
        Self {
            name: role.name.clone(),
            tool: role.tool,
            cutting_feed: role.cutting_feed,
            chord_tolerance: role.chord_tolerance,
            slope_max: role.slope_max.map(f64::to_degrees),
            sequence: role.sequence,
            offset_x: role.offset.x,
            offset_y: role.offset.y,
        }
    }
}

impl RoleConfig {
    pub fn to_role_settings(&self) -> RoleSettings {
        RoleSettings {
            name: self.name.clone(),
            tool: self.tool,
            cutting_feed: self.cutting_feed,
            chord_tolerance: self.chord_tolerance,
            slope_max: self.slope_max.map(f64::to_radians),
            sequence: self.sequence,
            offset: Vector2::new(self.offset_x, self.offset_y),
        }
    }
}

/// Complete job configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub machine: MachineSettings,
    pub tools: Vec<ToolSettings>,
    pub roles: Vec<RoleConfig>,
    /// Lines written verbatim before the first role
    pub header: Vec<String>,
    /// Lines written verbatim after the last role
    pub footer: Vec<String>,
    pub passes: usize,
    pub park_all_on_start: bool,
    pub align_to_origin: bool,
    /// Cap height handed to the label renderer (mm)
    pub label_size: f64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            machine: MachineSettings::default(),
            tools: vec![
                ToolSettings::from(&ToolProfile::groove_knife()),
                ToolSettings::from(&ToolProfile::cut_knife()),
            ],
            roles: vec![
                RoleConfig::from(&RoleSettings::grooves()),
                RoleConfig::from(&RoleSettings::cuts()),
            ],
            header: vec![
                "G28 Z W".to_string(),
                "G28 A B".to_string(),
                "G1 A0 B0 F10000".to_string(),
            ],
            footer: vec![
                "G1 Z20 W20".to_string(),
                "G1 X0 Y0 F10000".to_string(),
                "M9".to_string(),
            ],
            passes: 1,
            park_all_on_start: true,
            align_to_origin: false,
            label_size: 5.0,
        }
    }
}

impl JobConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the user's job configuration, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dragcut").join("job.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded job config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved job config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let m = &self.machine;
        if !(m.movement_feed > 0.0) {
            return Err(ConfigError::out_of_range("machine.movement_feed", m.movement_feed));
        }
        if m.precision > 10 {
            return Err(ConfigError::out_of_range("machine.precision", m.precision));
        }
        if m.position_tolerance < 0.0 {
            return Err(ConfigError::out_of_range(
                "machine.position_tolerance",
                m.position_tolerance,
            ));
        }
        if m.angle_tolerance < 0.0 {
            return Err(ConfigError::out_of_range("machine.angle_tolerance", m.angle_tolerance));
        }

        let mut indexes = HashSet::new();
        for tool in &self.tools {
            if !indexes.insert(tool.index) {
                return Err(ConfigError::DuplicateTool(tool.index));
            }
            let key = |field: &str| format!("tools[{}].{}", tool.index, field);
            if tool.overcut < 0.0 {
                return Err(ConfigError::out_of_range(key("overcut"), tool.overcut));
            }
            if !(0.0..=360.0).contains(&tool.slope_max) {
                return Err(ConfigError::out_of_range(key("slope_max"), tool.slope_max));
            }
            if !(tool.lift_feed > 0.0) {
                return Err(ConfigError::out_of_range(key("lift_feed"), tool.lift_feed));
            }
            if tool.kind == ToolKind::DragKnife && !(tool.rotation_feed > 0.0) {
                return Err(ConfigError::out_of_range(key("rotation_feed"), tool.rotation_feed));
            }
        }

        for role in &self.roles {
            if !indexes.contains(&role.tool) {
                return Err(ConfigError::UnknownTool {
                    role: role.name.clone(),
                    tool: role.tool,
                });
            }
            let key = |field: &str| format!("roles.{}.{}", role.name, field);
            if !(role.cutting_feed > 0.0) {
                return Err(ConfigError::out_of_range(key("cutting_feed"), role.cutting_feed));
            }
            if !(role.chord_tolerance > 0.0) {
                return Err(ConfigError::out_of_range(
                    key("chord_tolerance"),
                    role.chord_tolerance,
                ));
            }
            if let Some(slope_max) = role.slope_max {
                if !(0.0..=360.0).contains(&slope_max) {
                    return Err(ConfigError::out_of_range(key("slope_max"), slope_max));
                }
            }
        }

        if self.passes == 0 {
            return Err(ConfigError::out_of_range("passes", self.passes));
        }
        if !(self.label_size > 0.0) {
            return Err(ConfigError::out_of_range("label_size", self.label_size));
        }

        Ok(())
    }

    /// Settings for the toolpath compiler, angles in radians
    pub fn to_compiler_settings(&self) -> CompilerSettings {
        CompilerSettings {
            movement_feed: self.machine.movement_feed,
            precision: self.machine.precision,
            position_tolerance: self.machine.position_tolerance,
            angle_tolerance: self.machine.angle_tolerance.to_radians(),
            orientation_mode: self.machine.orientation_mode,
            tools: self.tools.iter().map(ToolSettings::to_profile).collect(),
        }
    }

    /// Role settings by name (case-insensitive)
    pub fn role_settings(&self, name: &str) -> Option<RoleSettings> {
        self.roles
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
            .map(RoleConfig::to_role_settings)
    }
}
