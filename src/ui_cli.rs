use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::i18n::{fill_template, keys, Translator};
use crate::tensile::{cross_section_area, ChartSpec, Milestone, TestRecord};
use crate::units::{convert_length, LengthUnit};

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 사람이 읽는 표 형식 리포트
    #[default]
    Text,
    /// 그래프 명세 전체를 TOML로 출력
    Toml,
}

/// 시편 형상과 7개 기준점의 하중/길이를 순서대로 입력받는다.
///
/// 빈 줄을 입력하면 `defaults`의 값을 그대로 사용한다. 단위는 `defaults`의 단위를 따른다.
pub fn collect_record<R: BufRead, W: Write>(
    tr: &Translator,
    defaults: &TestRecord,
    input: &mut R,
    out: &mut W,
) -> Result<TestRecord, AppError> {
    let len_unit = defaults.length_unit.symbol();
    let force_unit = defaults.force_unit.symbol();
    let mut record = defaults.clone();

    writeln!(out, "\n-- {} --", tr.t(keys::INPUT_HEADER))?;
    record.diameter = read_f64_or(
        tr,
        &fill_template(tr.t(keys::INPUT_DIAMETER), &[("unit", len_unit)]),
        defaults.diameter,
        input,
        out,
    )?;
    record.initial_length = read_f64_or(
        tr,
        &fill_template(tr.t(keys::INPUT_INITIAL_LENGTH), &[("unit", len_unit)]),
        defaults.initial_length,
        input,
        out,
    )?;

    writeln!(
        out,
        "\n{}",
        fill_template(tr.t(keys::INPUT_LOADS_HEADER), &[("unit", force_unit)])
    )?;
    for m in Milestone::ALL {
        let prompt = format!("{}:", tr.t(m.i18n_key()));
        record.loads[m.index()] = read_f64_or(tr, &prompt, defaults.loads[m.index()], input, out)?;
    }

    writeln!(
        out,
        "\n{}",
        fill_template(tr.t(keys::INPUT_LENGTHS_HEADER), &[("unit", len_unit)])
    )?;
    for m in Milestone::ALL {
        let prompt = fill_template(tr.t(keys::INPUT_LENGTH_AT), &[("label", tr.t(m.i18n_key()))]);
        record.lengths[m.index()] =
            read_f64_or(tr, &prompt, defaults.lengths[m.index()], input, out)?;
    }
    Ok(record)
}

/// 그래프 명세를 표 형식 텍스트로 만든다.
pub fn format_report(tr: &Translator, record: &TestRecord, chart: &ChartSpec) -> String {
    let mut s = String::new();
    let diameter_mm = convert_length(record.diameter, record.length_unit, LengthUnit::Millimeter);
    let area = format!("{:.4}", cross_section_area(diameter_mm));

    let _ = writeln!(s, "{}", tr.t(keys::REPORT_HEADING));
    let _ = writeln!(s, "{}", fill_template(tr.t(keys::REPORT_AREA), &[("area", &area)]));
    let _ = writeln!(s, "{}  /  {}", chart.x_label, chart.y_label);
    let _ = writeln!(s, "{}", tr.t(keys::REPORT_TABLE_HEADER));
    for (i, a) in chart.key_points.iter().enumerate() {
        let _ = writeln!(s, "  {:<2} {:<20} {:>12.6} {:>16.4}", i + 1, a.text, a.x, a.y);
    }
    if let Some((lo, hi)) = chart.strain_domain() {
        let count = chart.smooth_curve.points.len().to_string();
        let lo = format!("{lo:.6}");
        let hi = format!("{hi:.6}");
        let _ = writeln!(
            s,
            "{}",
            fill_template(
                tr.t(keys::REPORT_CURVE),
                &[("count", &count), ("min", &lo), ("max", &hi)]
            )
        );
    }
    s
}

fn read_line<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    out: &mut W,
) -> Result<String, AppError> {
    write!(out, "{prompt} ")?;
    out.flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "입력이 끝났습니다",
        )));
    }
    Ok(buf)
}

fn read_f64_or<R: BufRead, W: Write>(
    tr: &Translator,
    prompt: &str,
    default: f64,
    input: &mut R,
    out: &mut W,
) -> Result<f64, AppError> {
    let default_text = default.to_string();
    let hint = fill_template(tr.t(keys::KEEP_DEFAULT_HINT), &[("default", &default_text)]);
    loop {
        let s = read_line(&format!("{prompt} {hint}"), input, out)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => writeln!(out, "{}", tr.t(keys::INVALID_NUMBER))?,
        }
    }
}
