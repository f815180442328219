use dragcut::{compile, next_output_path, write_program, CompileOptions, CurveFile, JobConfig};
use tempfile::TempDir;

const CURVES: &str = r#"{
    "roles": [
        { "role": "Grooves", "curves": [
            { "kind": "line", "start": { "x": 0.0, "y": 5.0 }, "end": { "x": 20.0, "y": 5.0 } }
        ] },
        { "role": "Cuts", "curves": [
            { "kind": "line", "start": { "x": 0.0, "y": 0.0 }, "end": { "x": 20.0, "y": 0.0 } },
            { "kind": "line", "start": { "x": 20.0, "y": 0.0 }, "end": { "x": 20.0, "y": 10.0 } }
        ] }
    ]
}"#;

#[test]
fn test_compile_from_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sheet.json");
    std::fs::write(&input, CURVES).unwrap();

    let config_path = dir.path().join("job.toml");
    JobConfig::default().save_to_file(&config_path).unwrap();
    let config = JobConfig::load_from_file(&config_path).unwrap();

    let curves = CurveFile::load(&input).unwrap();
    let program = compile(curves, &config, CompileOptions::default()).unwrap();
    assert_eq!(program.stats.chains, 3);

    let grooves = program.lines.iter().position(|l| l == "; Grooves").unwrap();
    let cuts = program.lines.iter().position(|l| l == "; Cuts").unwrap();
    assert!(grooves < cuts);
    assert!(program.lines[grooves..cuts].iter().any(|l| l == ";T0"));
    assert!(program.lines[cuts..].iter().any(|l| l == ";T1"));

    let out = next_output_path(&input);
    assert_eq!(out, dir.path().join("sheet_0.gcode"));
    write_program(&out, &program).unwrap();
    assert_eq!(next_output_path(&input), dir.path().join("sheet_1.gcode"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.ends_with("M9\n"));
}

#[test]
fn test_missing_curve_file() {
    let dir = TempDir::new().unwrap();
    let err = CurveFile::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
