use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stress_strain_toolbox::{
    app, config, conversion, i18n, logging, tensile::LabelMode, ui_cli::OutputFormat,
    units::{ForceUnit, LengthUnit},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Toml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LabelModeArg {
    Positional,
    ByOrigin,
}

/// 인장 시험 측정값으로 응력-변형률 선도를 계산한다.
#[derive(Debug, Parser)]
#[command(name = "stress_strain_toolbox_cli", version, about)]
struct Cli {
    /// 입력 레코드 TOML 파일 (없으면 대화형 입력)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// 출력 형식
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
    /// 주요 점 라벨 부착 방식 (기본값은 설정 파일을 따른다)
    #[arg(long, value_enum)]
    label_mode: Option<LabelModeArg>,
    /// 대화형 입력 길이 단위 (mm, cm, m, in, ft)
    #[arg(long, value_parser = parse_length_unit)]
    length_unit: Option<LengthUnit>,
    /// 대화형 입력 하중 단위 (N, kN, kgf, lbf)
    #[arg(long, value_parser = parse_force_unit)]
    force_unit: Option<ForceUnit>,
    /// 언어 (auto/en-us/ko-kr)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 디버그 로그 출력
    #[arg(short, long)]
    verbose: bool,
}

fn parse_length_unit(s: &str) -> Result<LengthUnit, conversion::ConversionError> {
    conversion::parse_length_unit(s)
}

fn parse_force_unit(s: &str) -> Result<ForceUnit, conversion::ConversionError> {
    conversion::parse_force_unit(s)
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 한 번의 계산을 실행한다.
fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    let opts = app::RunOptions {
        input: cli.input,
        format: match cli.format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Toml => OutputFormat::Toml,
        },
        label_mode: match cli.label_mode {
            Some(LabelModeArg::Positional) => LabelMode::Positional,
            Some(LabelModeArg::ByOrigin) => LabelMode::ByOrigin,
            None => cfg.label_mode,
        },
        length_unit: cli.length_unit,
        force_unit: cli.force_unit,
    };
    if let Err(err) = app::run(&cfg, &tr, &opts) {
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_flags_are_parsed_by_clap() {
        let cli = Cli::try_parse_from(["cli", "--length-unit", "in", "--force-unit", "kN"]).unwrap();
        assert_eq!(cli.length_unit, Some(LengthUnit::Inch));
        assert_eq!(cli.force_unit, Some(ForceUnit::KiloNewton));
    }

    #[test]
    fn unknown_unit_is_a_usage_error() {
        let err = Cli::try_parse_from(["cli", "--length-unit", "furlong"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("furlong"));
    }
}
