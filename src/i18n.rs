use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_TITLE: &str = "general.app_title";
    pub const INVALID_NUMBER: &str = "error.invalid_number";
    pub const KEEP_DEFAULT_HINT: &str = "prompt.keep_default";

    pub const INPUT_HEADER: &str = "input.header";
    pub const INPUT_DIAMETER: &str = "input.diameter";
    pub const INPUT_INITIAL_LENGTH: &str = "input.initial_length";
    pub const INPUT_LOADS_HEADER: &str = "input.loads_header";
    pub const INPUT_LENGTHS_HEADER: &str = "input.lengths_header";
    pub const INPUT_LENGTH_AT: &str = "input.length_at";
    pub const INPUT_UNITS: &str = "input.units";

    pub const GENERATE_BUTTON: &str = "gui.generate";
    pub const LABEL_BY_ORIGIN: &str = "gui.label_by_origin";
    pub const LOAD_RECORD: &str = "gui.load_record";
    pub const LOAD_RECORD_FAILED: &str = "gui.load_record_failed";
    pub const CHART_PLACEHOLDER: &str = "gui.chart_placeholder";
    pub const SETTINGS_TITLE: &str = "gui.settings.title";
    pub const SETTINGS_LANGUAGE: &str = "gui.settings.language";
    pub const SETTINGS_ALPHA: &str = "gui.settings.alpha";
    pub const SETTINGS_SAVE: &str = "gui.settings.save";
    pub const SETTINGS_SAVED: &str = "gui.settings.saved";
    pub const SETTINGS_FONT: &str = "gui.settings.font";
    pub const SETTINGS_FONT_APPLY: &str = "gui.settings.font_apply";
    pub const SETTINGS_FONT_APPLIED: &str = "gui.settings.font_applied";
    pub const HELP_TITLE: &str = "gui.help.title";
    pub const HELP_FORMULA: &str = "gui.help.formula";
    pub const HELP_LABELS: &str = "gui.help.labels";

    pub const REPORT_HEADING: &str = "report.heading";
    pub const REPORT_AREA: &str = "report.area";
    pub const REPORT_TABLE_HEADER: &str = "report.table_header";
    pub const REPORT_CURVE: &str = "report.curve";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    /// "ko", "ko-kr", "ko_KR" 등은 한국어, 그 밖의 코드는 영어.
    fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾고, 없으면 키를 그대로 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        let built_in = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        built_in.unwrap_or(key)
    }
}

/// `{name}` 형태의 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// `dir` 아래에서 `<lang>.toml`, 없으면 `<기본 언어>.toml`을 찾아 읽는다.
///
/// 형식: 최상위 `key = "value"` 또는 `[section]` 아래 `key = "value"` (키는 `section.key`).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let base = lang.split(['-', '_']).next().unwrap_or(lang);
    [lang, base].into_iter().find_map(|code| {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let map = parse_toml_to_map(&fs::read_to_string(&path).ok()?)?;
        debug!(path = %path.display(), entries = map.len(), "language pack loaded");
        Some(map)
    })
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let root: toml::Table = toml::from_str(src).ok()?;
    let mut map = HashMap::new();
    let mut pending: Vec<(String, toml::Value)> = root.into_iter().collect();
    while let Some((key, value)) = pending.pop() {
        match value {
            toml::Value::String(text) => {
                map.insert(key, text);
            }
            toml::Value::Table(section) => {
                pending.extend(section.into_iter().map(|(k, v)| (format!("{key}.{k}"), v)));
            }
            // 문자열이 아닌 값은 무시
            _ => {}
        }
    }
    (!map.is_empty()).then_some(map)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_TITLE => "Stress-Strain Curve Generator",
        INVALID_NUMBER => "Please enter a number.",
        KEEP_DEFAULT_HINT => "(Enter = {default})",
        INPUT_HEADER => "Input Parameters",
        INPUT_DIAMETER => "Enter the diameter ({unit}):",
        INPUT_INITIAL_LENGTH => "Enter the initial length ({unit}):",
        INPUT_LOADS_HEADER => "Load Inputs ({unit})",
        INPUT_LENGTHS_HEADER => "Corresponding Lengths ({unit})",
        INPUT_LENGTH_AT => "Length at {label}:",
        INPUT_UNITS => "Units",
        GENERATE_BUTTON => "Generate Stress-Strain Graph",
        LABEL_BY_ORIGIN => "Label points by original milestone",
        LOAD_RECORD => "Load record...",
        LOAD_RECORD_FAILED => "Could not load record",
        CHART_PLACEHOLDER => "Enter the measurements and press Generate.",
        SETTINGS_TITLE => "Settings",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_ALPHA => "Window transparency",
        SETTINGS_SAVE => "Save settings",
        SETTINGS_SAVED => "Saved.",
        SETTINGS_FONT => "Font file (.ttf/.ttc)",
        SETTINGS_FONT_APPLY => "Apply font",
        SETTINGS_FONT_APPLIED => "Font applied.",
        HELP_TITLE => "Help",
        HELP_FORMULA => "A = π/4·d², strain = (L0 - l)/L0, stress = P/A; smooth curve: cubic spline (not-a-knot), 300 samples.",
        HELP_LABELS => "By default the i-th label is placed on the i-th point after sorting by strain. Labels only match their milestone when the input is already in strain order.",
        REPORT_HEADING => "=== Stress-Strain Curve ===",
        REPORT_AREA => "Cross-section area: {area} mm²",
        REPORT_TABLE_HEADER => "  #  label                 strain        stress [N/mm²]",
        REPORT_CURVE => "Smooth curve: {count} samples, strain {min} .. {max}",
        "milestone.zero_load" => "Zero Load",
        "milestone.initial_load" => "Initial Load",
        "milestone.elastic_limit" => "Elastic Limit",
        "milestone.yield_point" => "Yield Point",
        "milestone.lower_yield_point" => "Lower Yield Point",
        "milestone.uts" => "Maximum Load (UTS)",
        "milestone.fracture" => "Fracture Load",
        _ => return None,
    };
    Some(s)
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_TITLE => "응력-변형률 선도 생성기",
        INVALID_NUMBER => "숫자를 입력하세요.",
        KEEP_DEFAULT_HINT => "(엔터 = {default})",
        INPUT_HEADER => "입력 값",
        INPUT_DIAMETER => "시편 직경 ({unit}):",
        INPUT_INITIAL_LENGTH => "초기 표점 길이 ({unit}):",
        INPUT_LOADS_HEADER => "하중 입력 ({unit})",
        INPUT_LENGTHS_HEADER => "해당 길이 ({unit})",
        INPUT_LENGTH_AT => "{label} 시 길이:",
        INPUT_UNITS => "단위",
        GENERATE_BUTTON => "응력-변형률 선도 생성",
        LABEL_BY_ORIGIN => "원래 기준점 기준으로 라벨 표시",
        LOAD_RECORD => "레코드 불러오기...",
        LOAD_RECORD_FAILED => "레코드를 불러오지 못했습니다",
        CHART_PLACEHOLDER => "측정값을 입력하고 생성 버튼을 누르세요.",
        SETTINGS_TITLE => "설정",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_ALPHA => "창 투명도",
        SETTINGS_SAVE => "설정 저장",
        SETTINGS_SAVED => "저장되었습니다.",
        SETTINGS_FONT => "폰트 파일 (.ttf/.ttc)",
        SETTINGS_FONT_APPLY => "폰트 적용",
        SETTINGS_FONT_APPLIED => "폰트를 적용했습니다.",
        HELP_TITLE => "도움말",
        HELP_FORMULA => "A = π/4·d², 변형률 = (L0 - l)/L0, 응력 = P/A; 곡선: 3차 스플라인(not-a-knot), 300점 샘플.",
        HELP_LABELS => "기본값은 변형률로 정렬한 i번째 점에 i번째 라벨을 붙입니다. 입력이 이미 변형률 순일 때만 라벨이 기준점과 일치합니다.",
        REPORT_HEADING => "=== 응력-변형률 선도 ===",
        REPORT_AREA => "단면적: {area} mm²",
        REPORT_TABLE_HEADER => "  #  라벨                  변형률        응력 [N/mm²]",
        REPORT_CURVE => "곡선: {count}점, 변형률 {min} .. {max}",
        "milestone.zero_load" => "무부하",
        "milestone.initial_load" => "초기 하중",
        "milestone.elastic_limit" => "탄성 한도",
        "milestone.yield_point" => "항복점",
        "milestone.lower_yield_point" => "하항복점",
        "milestone.uts" => "최대 하중 (UTS)",
        "milestone.fracture" => "파단 하중",
        _ => return None,
    };
    Some(s)
}
