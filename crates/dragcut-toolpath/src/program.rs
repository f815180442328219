//! Program assembly - turns a whole cut job into one instruction file.
//!
//! A job is a list of roles (grooves, cuts, labels...). Each role is
//! translated, flattened, optionally sequenced and compiled against one
//! shared machine, so later roles continue from where earlier ones ended.

use crate::compiler::{CompilerSettings, RoleSettings, ToolpathCompiler};
use crate::error::{CompileResult, Diagnostic, DiagnosticKind};
use crate::flatten::Flattener;
use crate::formatter::Formatter;
use crate::history::{MotionObserver, MoveKind, MoveRecord};
use crate::label::{split_labels, LabelRenderer, LabelStyle};
use crate::machine::{GcodeMachine, MachineInterface};
use crate::sequence::order;
use dragcut_core::{shared, Bounds, Curve, SegmentChain, Shared, Vector2};
use tracing::{debug, info, warn};

/// Curves of one role together with how to cut them.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleInput {
    pub settings: RoleSettings,
    pub curves: Vec<Curve>,
}

impl RoleInput {
    pub fn new(settings: RoleSettings, curves: Vec<Curve>) -> Self {
        Self { settings, curves }
    }
}

/// A complete job: verbatim header and footer lines around the roles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutJob {
    pub header: Vec<String>,
    pub footer: Vec<String>,
    pub roles: Vec<RoleInput>,
}

/// Summary of a compiled program.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JobStats {
    pub chains: usize,
    /// Cut length including corner compensation moves (mm).
    pub cut_length: f64,
    pub travel_length: f64,
    pub estimated_seconds: f64,
}

/// Output of [`ProgramBuilder::build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub lines: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: JobStats,
}

impl Program {
    /// The full instruction file, one line per entry.
    pub fn to_gcode(&self) -> String {
        let mut gcode = self.lines.join("\n");
        gcode.push('\n');
        gcode
    }
}

/// Accumulates travelled and cut distance, then forwards to the caller's observer.
#[derive(Default)]
struct Meter {
    travel: f64,
    cut: f64,
    forward: Option<Box<dyn MotionObserver>>,
}

impl MotionObserver for Meter {
    fn record(&mut self, record: &MoveRecord) {
        match record.kind {
            MoveKind::Travel => self.travel += record.delta.length(),
            MoveKind::Cut | MoveKind::Compensation => self.cut += record.delta.length(),
            MoveKind::Lift | MoveKind::Rotate => {}
        }
        if let Some(forward) = self.forward.as_mut() {
            forward.record(record);
        }
    }
}

/// Configures and runs the compilation of a [`CutJob`].
pub struct ProgramBuilder {
    settings: CompilerSettings,
    label_renderer: Option<Box<dyn LabelRenderer>>,
    label_style: LabelStyle,
    observer: Option<Box<dyn MotionObserver>>,
    passes: usize,
    park_all_on_start: bool,
    align_to_origin: bool,
    stamp: bool,
}

impl ProgramBuilder {
    pub fn new(settings: CompilerSettings) -> Self {
        Self {
            settings,
            label_renderer: None,
            label_style: LabelStyle::default(),
            observer: None,
            passes: 1,
            park_all_on_start: false,
            align_to_origin: false,
            stamp: false,
        }
    }

    pub fn label_renderer(mut self, renderer: Box<dyn LabelRenderer>) -> Self {
        self.label_renderer = Some(renderer);
        self
    }

    pub fn label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    pub fn observer(mut self, observer: Box<dyn MotionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Number of passes over every role, at least one.
    pub fn passes(mut self, passes: usize) -> Self {
        self.passes = passes.max(1);
        self
    }

    /// Park every configured tool before the first role.
    pub fn park_all_on_start(mut self, park: bool) -> Self {
        self.park_all_on_start = park;
        self
    }

    /// Shift the whole job so its lower-left extent sits on the origin.
    pub fn align_to_origin(mut self, align: bool) -> Self {
        self.align_to_origin = align;
        self
    }

    /// Prefix the program with a generation timestamp comment.
    pub fn stamp(mut self, stamp: bool) -> Self {
        self.stamp = stamp;
        self
    }

    pub fn build(self, job: &CutJob) -> CompileResult<Program> {
        self.settings.validate()?;
        for role in &job.roles {
            self.settings.tool(role.settings.tool)?;
        }

        let mut diagnostics = Vec::new();
        let shift = if self.align_to_origin {
            Bounds::of_curves(job.roles.iter().flat_map(|r| r.curves.iter()))
                .map_or(Vector2::ZERO, |b| -b.min)
        } else {
            Vector2::ZERO
        };

        let prepared: Vec<Vec<SegmentChain>> = job
            .roles
            .iter()
            .map(|role| self.prepare_role(role, shift, &mut diagnostics))
            .collect();

        let meter = shared(Meter {
            forward: self.observer,
            ..Meter::default()
        });
        let machine = GcodeMachine::new(
            self.settings.tools.clone(),
            Formatter::new(self.settings.precision),
        )
        .with_observer(Box::new(meter.clone()));
        let mut compiler = ToolpathCompiler::new(machine, self.settings.clone());

        if self.stamp {
            compiler.machine_mut().push_raw(format!(
                "; Generated: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        for line in &job.header {
            compiler.machine_mut().push_raw(line.clone());
        }

        if self.park_all_on_start {
            let mut tools: Vec<usize> = self.settings.tools.iter().map(|t| t.index).collect();
            tools.sort_unstable();
            for tool in tools {
                compiler.park(tool)?;
            }
        }

        let mut stats = JobStats::default();
        for pass in 0..self.passes {
            if pass > 0 {
                lower_tools(&mut compiler, &self.settings, pass);
            }
            for (role, chains) in job.roles.iter().zip(&prepared) {
                let name = &role.settings.name;
                if self.passes > 1 {
                    compiler
                        .machine_mut()
                        .comment(&format!("{} (pass {}/{})", name, pass + 1, self.passes));
                } else {
                    compiler.machine_mut().comment(name);
                }

                let (travel_before, cut_before) = meter_reading(&meter);
                stats.chains += compiler.compile(chains, role.settings.tool, &role.settings)?;
                let (travel_after, cut_after) = meter_reading(&meter);

                stats.estimated_seconds += (travel_after - travel_before)
                    / self.settings.movement_feed
                    * 60.0
                    + (cut_after - cut_before) / role.settings.cutting_feed * 60.0;
            }
        }

        // Compiler diagnostics repeat on every pass; report them once.
        for diagnostic in compiler.take_diagnostics() {
            if !diagnostics.contains(&diagnostic) {
                diagnostics.push(diagnostic);
            }
        }

        let (travel, cut) = meter_reading(&meter);
        stats.travel_length = travel;
        stats.cut_length = cut;

        let mut lines = compiler.into_machine().into_lines();
        lines.extend(job.footer.iter().cloned());

        info!(
            "Compiled {} chains: cut {:.1} mm, travel {:.1} mm, about {:.0} s, {} diagnostics",
            stats.chains,
            stats.cut_length,
            stats.travel_length,
            stats.estimated_seconds,
            diagnostics.len()
        );

        Ok(Program {
            lines,
            diagnostics,
            stats,
        })
    }

    /// Translates, flattens, renders labels and sequences one role.
    fn prepare_role(
        &self,
        role: &RoleInput,
        shift: Vector2,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<SegmentChain> {
        let settings = &role.settings;
        let offset = settings.offset + shift;
        let curves: Vec<Curve> = role.curves.iter().map(|c| c.translated(offset)).collect();
        let (geometry, labels) = split_labels(&curves);

        let flattener = Flattener::new(settings.chord_tolerance);
        let mut chains = Vec::with_capacity(geometry.len() + labels.len());
        for curve in &geometry {
            let flattened = flattener.flatten(curve);
            diagnostics.extend(flattened.diagnostics);
            chains.push(flattened.chain);
        }

        for label in &labels {
            match &self.label_renderer {
                Some(renderer) => chains.extend(renderer.render(label, &self.label_style)),
                None => {
                    warn!(
                        "Role '{}': no label renderer, skipping label '{}'",
                        settings.name, label.text
                    );
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::LabelSkipped,
                        format!("label '{}' at {}", label.text, label.position),
                    ));
                }
            }
        }

        if settings.sequence {
            chains = order(chains);
        }
        debug!(
            "Role '{}': {} curves -> {} chains",
            settings.name,
            role.curves.len(),
            chains.len()
        );
        chains
    }
}

fn meter_reading(meter: &Shared<Meter>) -> (f64, f64) {
    let meter = meter.borrow();
    (meter.travel, meter.cut)
}

/// Lowers every tool's cut height for pass `pass` (zero-based).
fn lower_tools(
    compiler: &mut ToolpathCompiler<GcodeMachine>,
    settings: &CompilerSettings,
    pass: usize,
) {
    for base in &settings.tools {
        let mut profile = base.clone();
        profile.cut_height -= pass as f64 * base.pass_depth;
        compiler.machine_mut().set_profile(profile);
    }
}
