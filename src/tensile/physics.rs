//! 시편 형상과 하중/길이 측정값을 공칭 응력-변형률 점으로 변환한다.

use std::cmp::Ordering;
use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use super::error::TensileError;
use super::milestone::{Milestone, MILESTONE_COUNT};
use super::specimen::{Sample, Specimen};

/// 측정값 하나에서 유도한 (변형률, 응력) 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedPoint {
    /// 이 점을 만든 원래 기준점
    pub milestone: Milestone,
    /// 공칭 변형률 (무차원)
    pub strain: f64,
    /// 공칭 응력 [N/mm²]
    pub stress: f64,
}

/// 원형 단면적 [mm²] = π/4 · d²
pub fn cross_section_area(diameter_mm: f64) -> f64 {
    (PI / 4.0) * diameter_mm.powi(2)
}

/// 각 기준점의 변형률/응력을 기준점 순서대로 계산한다.
///
/// 변형률은 `(L0 - l) / L0`로 정의하므로 측정 길이가 초기 길이 이상이면 0 또는 음수가 된다.
pub fn derive_points(
    specimen: &Specimen,
    samples: &[Sample; MILESTONE_COUNT],
) -> Result<[DerivedPoint; MILESTONE_COUNT], TensileError> {
    let area = cross_section_area(specimen.diameter_mm());
    let l0 = specimen.initial_length_mm();
    if area == 0.0 {
        return Err(TensileError::DivisionByZero("단면적이 0입니다"));
    }
    if l0 == 0.0 {
        return Err(TensileError::DivisionByZero("초기 길이가 0입니다"));
    }
    debug!(area_mm2 = area, initial_length_mm = l0, "cross-section computed");

    let mut points = Milestone::ALL.map(|milestone| DerivedPoint {
        milestone,
        strain: 0.0,
        stress: 0.0,
    });
    for point in points.iter_mut() {
        let sample = samples[point.milestone.index()];
        point.strain = (l0 - sample.length_mm) / l0;
        point.stress = sample.load_n / area;
        // 아주 작은 단면적/초기 길이에서는 나눗셈이 무한대로 넘친다.
        if !point.strain.is_finite() {
            return Err(TensileError::InvalidSample {
                milestone: point.milestone,
                reason: "변형률이 유한하지 않습니다",
            });
        }
        if !point.stress.is_finite() {
            return Err(TensileError::InvalidSample {
                milestone: point.milestone,
                reason: "응력이 유한하지 않습니다",
            });
        }
    }
    Ok(points)
}

fn strain_then_stress(a: &DerivedPoint, b: &DerivedPoint) -> Ordering {
    a.strain
        .total_cmp(&b.strain)
        .then_with(|| a.stress.total_cmp(&b.stress))
}

/// 변형률 오름차순(같으면 응력 오름차순)으로 정렬된 7개 점.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortedSeries {
    points: [DerivedPoint; MILESTONE_COUNT],
}

impl SortedSeries {
    /// 안정 정렬로 점들을 재배열한다. 이미 정렬된 입력에 다시 적용해도 결과가 같다.
    pub fn from_points(mut points: [DerivedPoint; MILESTONE_COUNT]) -> Self {
        points.sort_by(strain_then_stress);
        Self { points }
    }

    pub fn points(&self) -> &[DerivedPoint; MILESTONE_COUNT] {
        &self.points
    }

    pub fn strains(&self) -> [f64; MILESTONE_COUNT] {
        self.points.map(|p| p.strain)
    }

    pub fn stresses(&self) -> [f64; MILESTONE_COUNT] {
        self.points.map(|p| p.stress)
    }

    /// 정렬 후에도 기준점 순서가 그대로인지 여부.
    pub fn preserves_milestone_order(&self) -> bool {
        self.points
            .iter()
            .enumerate()
            .all(|(i, p)| p.milestone.index() == i)
    }
}

/// 시편과 측정값으로부터 정렬된 응력-변형률 점을 만든다.
pub fn transform(
    specimen: &Specimen,
    samples: &[Sample; MILESTONE_COUNT],
) -> Result<SortedSeries, TensileError> {
    let points = derive_points(specimen, samples)?;
    let series = SortedSeries::from_points(points);
    debug!(strains = ?series.strains(), "points sorted by strain");
    Ok(series)
}
