//! Output file naming.

use anyhow::Context;
use dragcut_toolpath::Program;
use std::path::{Path, PathBuf};

/// First `<stem>_<n>.gcode` next to `input` that does not exist yet,
/// counting from zero.
pub fn next_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let dir = input.parent().unwrap_or_else(|| Path::new(""));

    let mut n = 0usize;
    loop {
        let candidate = dir.join(format!("{}_{}.gcode", stem, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Writes the program text to `path`, creating missing parent directories.
pub fn write_program(path: &Path, program: &Program) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, program.to_gcode())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} lines to {}", program.lines.len(), path.display());
    Ok(())
}
