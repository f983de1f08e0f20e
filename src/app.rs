use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::i18n::Translator;
use crate::tensile::{self, LabelMode, TensileError, TestRecord};
use crate::ui_cli::{self, OutputFormat};
use crate::units::{ForceUnit, LengthUnit};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/표준 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 응력-변형률 계산 오류
    #[error("계산 오류: {0}")]
    Tensile(#[from] TensileError),
    /// 입력 레코드 파일 해석 오류
    #[error("입력 파일 {path} 해석 오류: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 한 번의 CLI 실행 옵션.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 입력 레코드 TOML 파일. 없으면 대화형으로 입력받는다.
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub label_mode: LabelMode,
    /// 대화형 입력 시 길이 단위
    pub length_unit: Option<LengthUnit>,
    /// 대화형 입력 시 하중 단위
    pub force_unit: Option<ForceUnit>,
}

/// TOML 입력 레코드를 읽는다.
pub fn load_record(path: &Path) -> Result<TestRecord, AppError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| AppError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

/// 입력 수집 → 계산 → 출력까지 한 번 실행한 결과 문자열을 만든다.
pub fn run_once(record: &TestRecord, tr: &Translator, opts: &RunOptions) -> Result<String, AppError> {
    let chart = tensile::generate(record, opts.label_mode)?;
    let out = match opts.format {
        OutputFormat::Text => ui_cli::format_report(tr, record, &chart),
        OutputFormat::Toml => toml::to_string_pretty(&chart)?,
    };
    Ok(out)
}

/// CLI 애플리케이션을 실행한다. 오류가 나면 결과를 출력하지 않고 그대로 반환한다.
pub fn run(config: &Config, tr: &Translator, opts: &RunOptions) -> Result<(), AppError> {
    let record = match &opts.input {
        Some(path) => {
            info!(path = %path.display(), "loading test record");
            load_record(path)?
        }
        None => {
            let mut defaults = config.defaults.clone();
            if let Some(unit) = opts.length_unit {
                defaults.length_unit = unit;
            }
            if let Some(unit) = opts.force_unit {
                defaults.force_unit = unit;
            }
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut stdout = io::stdout();
            ui_cli::collect_record(tr, &defaults, &mut input, &mut stdout)?
        }
    };
    let out = run_once(&record, tr, opts)?;
    println!("{out}");
    Ok(())
}
