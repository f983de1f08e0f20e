//! 정렬된 응력-변형률 점으로부터 선언적 그래프 명세를 만든다.
//!
//! 그리기 자체는 하지 않는다. GUI(egui_plot)나 CLI 리포트가 [`ChartSpec`]을 받아 표시한다.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::TensileError;
use super::milestone::MILESTONE_COUNT;
use super::physics::SortedSeries;
use super::spline::{linspace, CubicSpline};

/// 매끄러운 곡선의 샘플 수.
pub const CURVE_SAMPLES: usize = 300;

pub const TITLE: &str = "Stress-Strain Curve";
pub const X_LABEL: &str = "Strain";
pub const Y_LABEL: &str = "Stress (N/mm²)";
pub const SMOOTH_CURVE_NAME: &str = "Smooth Stress-Strain Curve";
pub const DATA_POINTS_NAME: &str = "Data Points";

/// 주석 라벨을 점에 붙이는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelMode {
    /// 정렬 후 i번째 점에 i번째 라벨을 붙인다. 입력이 이미 변형률 순이 아니면 라벨이 어긋날 수 있다.
    #[default]
    Positional,
    /// 각 점을 만든 원래 기준점의 라벨을 붙인다.
    ByOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle,
}

/// 텍스트를 기준점의 어느 쪽에 둘지. `Bottom`은 텍스트 아래 끝이 점에 맞춰진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAnchor {
    Bottom,
    Center,
    Top,
}

/// 범례 항목 하나에 대응하는 선/마커 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    /// [strain, stress] 쌍
    pub points: Vec<[f64; 2]>,
    pub color: Rgb,
    pub line: LineStyle,
    pub marker: Option<MarkerShape>,
}

/// 주요 점 표시(마커 + 텍스트).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub marker_color: Rgb,
    pub font_size: f32,
    pub anchor: VerticalAnchor,
}

/// 한 번의 실행 결과로 만들어지는 그래프 명세. 생성 후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: bool,
    pub grid: bool,
    /// (폭, 높이) [inch]
    pub figure_size_in: (f32, f32),
    pub smooth_curve: Series,
    pub data_points: Series,
    pub key_points: Vec<Annotation>,
}

impl ChartSpec {
    /// 매끄러운 곡선이 덮는 변형률 범위.
    pub fn strain_domain(&self) -> Option<(f64, f64)> {
        let first = self.smooth_curve.points.first()?;
        let last = self.smooth_curve.points.last()?;
        Some((first[0], last[0]))
    }
}

/// 정렬된 점과 라벨 목록으로 그래프 명세를 만든다.
///
/// 변형률이 순증가하지 않으면(중복 변형률) `DegenerateInput`으로 실패하며 대체 곡선은 만들지 않는다.
pub fn render(
    series: &SortedSeries,
    labels: &[&str; MILESTONE_COUNT],
    mode: LabelMode,
) -> Result<ChartSpec, TensileError> {
    let strains = series.strains();
    let stresses = series.stresses();

    if let Some(index) = (1..MILESTONE_COUNT).find(|&i| strains[i] <= strains[i - 1]) {
        return Err(TensileError::DegenerateInput {
            index,
            strain: strains[index],
        });
    }

    let spline = CubicSpline::not_a_knot(&strains, &stresses)?;
    let (lo, hi) = spline.domain();
    let smooth = spline.sample(&linspace(lo, hi, CURVE_SAMPLES));

    if mode == LabelMode::Positional && !series.preserves_milestone_order() {
        warn!("milestone order differs from strain order; positional labels do not match their origin");
    }

    let key_points = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let text = match mode {
                LabelMode::Positional => labels[i],
                LabelMode::ByOrigin => labels[p.milestone.index()],
            };
            Annotation {
                text: text.to_string(),
                x: p.strain,
                y: p.stress,
                marker_color: Rgb::RED,
                font_size: 9.0,
                anchor: VerticalAnchor::Bottom,
            }
        })
        .collect();

    Ok(ChartSpec {
        title: TITLE.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        legend: true,
        grid: true,
        figure_size_in: (8.0, 6.0),
        smooth_curve: Series {
            name: SMOOTH_CURVE_NAME.to_string(),
            points: smooth,
            color: Rgb::BLUE,
            line: LineStyle::Solid,
            marker: None,
        },
        data_points: Series {
            name: DATA_POINTS_NAME.to_string(),
            points: strains
                .iter()
                .zip(stresses.iter())
                .map(|(&e, &s)| [e, s])
                .collect(),
            color: Rgb::GREEN,
            line: LineStyle::Dashed,
            marker: Some(MarkerShape::Circle),
        },
        key_points,
    })
}
