use thiserror::Error;

use super::milestone::Milestone;
use super::spline::SplineError;

/// 인장 시험 곡선 계산 중 발생 가능한 오류.
///
/// 모든 오류는 입력값에 대한 결정적 결과이므로 재시도 없이 해당 실행 전체를 중단한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensileError {
    /// 직경 또는 초기 길이가 0 이하이거나 유한하지 않음
    #[error("시편 형상 오류: {field} = {value} (0보다 커야 합니다)")]
    InvalidGeometry { field: &'static str, value: f64 },
    /// 하중/길이 측정값 오류
    #[error("{milestone} 측정값 오류: {reason}")]
    InvalidSample {
        milestone: Milestone,
        reason: &'static str,
    },
    /// 단면적 또는 초기 길이가 0이 되어 나눗셈 불가
    #[error("0으로 나눌 수 없습니다: {0}")]
    DivisionByZero(&'static str),
    /// 정렬 후 변형률이 중복되어 스플라인을 만들 수 없음
    #[error("변형률이 순증가하지 않습니다: {index}번째 점의 변형률 {strain}이 앞 점과 같습니다")]
    DegenerateInput { index: usize, strain: f64 },
    /// 그 밖의 스플라인 구성 실패
    #[error("스플라인 구성 오류: {0}")]
    Spline(SplineError),
}

impl From<SplineError> for TensileError {
    fn from(value: SplineError) -> Self {
        match value {
            SplineError::NotStrictlyIncreasing { index, x } => {
                TensileError::DegenerateInput { index, strain: x }
            }
            other => TensileError::Spline(other),
        }
    }
}
