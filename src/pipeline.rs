//! From a curve file and a job configuration to a finished program.

use crate::input::CurveFile;
use anyhow::Context;
use dragcut_core::Shared;
use dragcut_settings::JobConfig;
use dragcut_toolpath::{LabelStyle, MotionHistory, Program, ProgramBuilder};

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Turns nearest-neighbour ordering off for every role.
    pub no_sequence: bool,
    /// Prefix the program with a generation timestamp.
    pub stamp: bool,
    /// Receives every committed move when set.
    pub history: Option<Shared<MotionHistory>>,
}

pub fn compile(
    curves: CurveFile,
    config: &JobConfig,
    options: CompileOptions,
) -> anyhow::Result<Program> {
    config.validate().context("Invalid job configuration")?;
    let job = curves.into_job(config, !options.no_sequence)?;

    let mut builder = ProgramBuilder::new(config.to_compiler_settings())
        .passes(config.passes)
        .park_all_on_start(config.park_all_on_start)
        .align_to_origin(config.align_to_origin)
        .label_style(LabelStyle {
            size: config.label_size,
        })
        .stamp(options.stamp);
    if let Some(history) = options.history {
        builder = builder.observer(Box::new(history));
    }

    builder.build(&job).context("Compilation failed")
}
