//! Curve files: artwork already imported and partitioned into roles.
//!
//! ```json
//! { "roles": [ { "role": "Cuts", "curves": [
//!     { "kind": "line", "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 10.0, "y": 0.0 } }
//! ] } ] }
//! ```

use anyhow::{anyhow, Context};
use dragcut_core::Curve;
use dragcut_settings::JobConfig;
use dragcut_toolpath::{CutJob, RoleInput};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Curves of one role, matched to a role of the job configuration by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCurves {
    pub role: String,
    #[serde(default)]
    pub curves: Vec<Curve>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub roles: Vec<RoleCurves>,
}

impl CurveFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read curve file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid curve file {}", path.display()))
    }

    pub fn curve_count(&self) -> usize {
        self.roles.iter().map(|r| r.curves.len()).sum()
    }

    /// Builds a job in file order, taking role settings from `config`.
    ///
    /// `sequence` set to `false` disables sequencing for every role.
    pub fn into_job(self, config: &JobConfig, sequence: bool) -> anyhow::Result<CutJob> {
        let roles = self
            .roles
            .into_iter()
            .map(|role| {
                let mut settings = config
                    .role_settings(&role.role)
                    .ok_or_else(|| anyhow!("No role named '{}' in the job configuration", role.role))?;
                settings.sequence &= sequence;
                Ok(RoleInput::new(settings, role.curves))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(CutJob {
            header: config.header.clone(),
            footer: config.footer.clone(),
            roles,
        })
    }
}
