//! CLI 출력(리포트/TOML)과 입력 파일 처리 테스트.
use std::fs;

use stress_strain_toolbox::app::{self, AppError, RunOptions};
use stress_strain_toolbox::i18n::Translator;
use stress_strain_toolbox::tensile::{ChartSpec, TensileError};
use stress_strain_toolbox::ui_cli::OutputFormat;

const RECORD: &str = r#"
diameter = 10.0
initial_length = 100.0
loads = [0.0, 1000.0, 2000.0, 2500.0, 2400.0, 3000.0, 2800.0]
lengths = [100.0, 99.9, 99.0, 98.0, 98.5, 95.0, 90.0]
"#;

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("ss_cli_{}_{name}", std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn toml_output_parses_back_to_chart() {
    let path = write_temp("record.toml", RECORD);
    let record = app::load_record(&path).unwrap();
    let opts = RunOptions {
        format: OutputFormat::Toml,
        ..Default::default()
    };
    let out = app::run_once(&record, &Translator::new("en"), &opts).unwrap();
    let chart: ChartSpec = toml::from_str(&out).unwrap();
    assert_eq!(chart.smooth_curve.points.len(), 300);
    assert_eq!(chart.key_points[0].text, "Zero Load");
    let _ = fs::remove_file(path);
}

#[test]
fn korean_report_uses_translated_headings() {
    let path = write_temp("record_ko.toml", RECORD);
    let record = app::load_record(&path).unwrap();
    let out = app::run_once(&record, &Translator::new("ko"), &RunOptions::default()).unwrap();
    assert!(out.contains("단면적"));
    let _ = fs::remove_file(path);
}

#[test]
fn malformed_record_names_file() {
    let path = write_temp("broken.toml", "diameter = \"ten\"");
    let err = app::load_record(&path).unwrap_err();
    assert!(matches!(err, AppError::InputParse { .. }));
    assert!(err.to_string().contains("broken.toml"));
    let _ = fs::remove_file(path);
}

#[test]
fn degenerate_record_produces_no_output() {
    let src = RECORD.replace("98.5", "98.0");
    let path = write_temp("degenerate.toml", &src);
    let record = app::load_record(&path).unwrap();
    let err = app::run_once(&record, &Translator::new("en"), &RunOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        AppError::Tensile(TensileError::DegenerateInput { .. })
    ));
    let _ = fs::remove_file(path);
}
