use dragcut_core::{SegmentChain, Vector2};
use dragcut_toolpath::{
    CompilerSettings, Formatter, GcodeMachine, RoleSettings, ToolProfile, ToolpathCompiler,
};

pub fn compiler_for(profile: ToolProfile) -> ToolpathCompiler<GcodeMachine> {
    let settings = CompilerSettings {
        tools: vec![profile],
        ..CompilerSettings::default()
    };
    let machine = GcodeMachine::new(settings.tools.clone(), Formatter::new(settings.precision));
    ToolpathCompiler::new(machine, settings)
}

pub fn role(tool: usize, slope_max_deg: f64) -> RoleSettings {
    RoleSettings::new("Test", tool).with_slope_max(Some(slope_max_deg.to_radians()))
}

pub fn polyline(points: &[(f64, f64)]) -> SegmentChain {
    let points: Vec<Vector2> = points.iter().map(|&p| p.into()).collect();
    SegmentChain::from_points(&points)
}

pub fn compile_lines(
    profile: ToolProfile,
    chains: &[SegmentChain],
    slope_max_deg: f64,
) -> Vec<String> {
    let tool = profile.index;
    let mut compiler = compiler_for(profile);
    compiler
        .compile(chains, tool, &role(tool, slope_max_deg))
        .unwrap();
    compiler.into_machine().into_lines()
}
