use tracing::info;

use super::chart::{self, ChartSpec, LabelMode};
use super::error::TensileError;
use super::milestone::PLOT_LABELS;
use super::physics;
use super::specimen::TestRecord;

/// 입력 레코드 하나로 전체 계산(검증 → 응력/변형률 → 정렬 → 곡선 → 그래프 명세)을 수행한다.
///
/// 실행 간 공유 상태가 없는 순수 계산이며, 어느 단계든 실패하면 부분 결과 없이 오류를 반환한다.
pub fn generate(record: &TestRecord, mode: LabelMode) -> Result<ChartSpec, TensileError> {
    info!(
        diameter = record.diameter,
        initial_length = record.initial_length,
        length_unit = record.length_unit.symbol(),
        force_unit = record.force_unit.symbol(),
        "generating stress-strain curve"
    );
    let (specimen, samples) = record.to_inputs()?;
    let series = physics::transform(&specimen, &samples)?;
    let chart = chart::render(&series, &PLOT_LABELS, mode)?;
    info!(
        curve_samples = chart.smooth_curve.points.len(),
        key_points = chart.key_points.len(),
        "chart ready"
    );
    Ok(chart)
}
