//! 3차 보간 스플라인.
//!
//! 양 끝 조건은 not-a-knot(두 번째/끝에서 두 번째 절점에서 3계 도함수 연속)이다.
//! 절점의 2계 도함수 `M_i`에 대한 선형 연립방정식을 세워 LU 분해로 푼다.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// 스플라인 구성 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("x/y 길이가 다릅니다: {0} != {1}")]
    LengthMismatch(usize, usize),
    #[error("not-a-knot 3차 스플라인에는 최소 4개 점이 필요합니다 (입력 {0}개)")]
    TooFewPoints(usize),
    #[error("유한하지 않은 값이 포함되어 있습니다 (index {0})")]
    NonFinite(usize),
    #[error("x가 순증가하지 않습니다: index {index}, x = {x}")]
    NotStrictlyIncreasing { index: usize, x: f64 },
    #[error("스플라인 연립방정식이 특이 행렬입니다")]
    Singular,
}

/// 구간별 3차 다항식으로 표현한 보간 스플라인.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// 각 절점의 2계 도함수
    m: Vec<f64>,
}

impl CubicSpline {
    pub const MIN_POINTS: usize = 4;

    /// not-a-knot 끝 조건으로 스플라인을 만든다. `xs`는 순증가해야 한다.
    pub fn not_a_knot(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::LengthMismatch(xs.len(), ys.len()));
        }
        let n = xs.len();
        if n < Self::MIN_POINTS {
            return Err(SplineError::TooFewPoints(n));
        }
        if let Some(i) = (0..n).find(|&i| !xs[i].is_finite() || !ys[i].is_finite()) {
            return Err(SplineError::NonFinite(i));
        }
        if let Some(i) = (1..n).find(|&i| xs[i] <= xs[i - 1]) {
            return Err(SplineError::NotStrictlyIncreasing { index: i, x: xs[i] });
        }

        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let mut a = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);

        a[(0, 0)] = h[1];
        a[(0, 1)] = -(h[0] + h[1]);
        a[(0, 2)] = h[0];
        for i in 1..n - 1 {
            a[(i, i - 1)] = h[i - 1];
            a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            a[(i, i + 1)] = h[i];
            rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
        }
        a[(n - 1, n - 3)] = h[n - 2];
        a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
        a[(n - 1, n - 1)] = h[n - 3];

        let m = a.lu().solve(&rhs).ok_or(SplineError::Singular)?;
        if m.iter().any(|v| !v.is_finite()) {
            return Err(SplineError::Singular);
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m: m.iter().copied().collect(),
        })
    }

    /// 절점 범위 `[x_0, x_{n-1}]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// x에서 스플라인 값을 계산한다. 범위 밖은 경계 구간의 다항식으로 외삽한다.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let i = self.xs.partition_point(|&xi| xi <= x).clamp(1, n - 1) - 1;

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    pub fn sample(&self, xs: &[f64]) -> Vec<[f64; 2]> {
        xs.iter().map(|&x| [x, self.evaluate(x)]).collect()
    }
}

/// `[start, end]`를 n개로 균등 분할한다. 마지막 값은 정확히 `end`이다.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|k| start + step * k as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cubic(x: f64) -> f64 {
        x.powi(3) - 2.0 * x + 1.0
    }

    #[test]
    fn passes_through_knots() {
        let xs = [0.0, 0.001, 0.01, 0.015, 0.02, 0.05, 0.1];
        let ys = [0.0, 12.7, 25.5, 30.6, 31.8, 38.2, 35.7];
        let s = CubicSpline::not_a_knot(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(s.evaluate(*x), *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn reproduces_a_cubic_exactly() {
        // not-a-knot 조건에서는 3차 다항식 데이터가 그대로 복원된다.
        let xs = [0.0, 1.0, 2.0, 3.5, 4.0, 5.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|&x| cubic(x)).collect();
        let s = CubicSpline::not_a_knot(&xs, &ys).unwrap();
        for x in [0.5, 2.7, 3.9, 6.1] {
            assert_relative_eq!(s.evaluate(x), cubic(x), epsilon = 1e-8);
        }
    }

    #[test]
    fn extrapolates_with_boundary_polynomial() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|&x| cubic(x)).collect();
        let s = CubicSpline::not_a_knot(&xs, &ys).unwrap();
        assert_relative_eq!(s.evaluate(-1.0), cubic(-1.0), epsilon = 1e-8);
        assert_relative_eq!(s.evaluate(5.0), cubic(5.0), epsilon = 1e-8);
    }

    #[test]
    fn rejects_repeated_abscissa() {
        let err = CubicSpline::not_a_knot(&[0.0, 1.0, 1.0, 2.0, 3.0], &[0.0; 5]).unwrap_err();
        assert_eq!(err, SplineError::NotStrictlyIncreasing { index: 2, x: 1.0 });
    }

    #[test]
    fn rejects_short_or_mismatched_input() {
        assert_eq!(
            CubicSpline::not_a_knot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap_err(),
            SplineError::TooFewPoints(3)
        );
        assert_eq!(
            CubicSpline::not_a_knot(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0]).unwrap_err(),
            SplineError::LengthMismatch(4, 2)
        );
        assert_eq!(
            CubicSpline::not_a_knot(&[0.0, 1.0, 2.0, 3.0], &[0.0, f64::NAN, 2.0, 3.0])
                .unwrap_err(),
            SplineError::NonFinite(1)
        );
    }

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(0.0, 0.1, 300);
        assert_eq!(v.len(), 300);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[299], 0.1);
        assert!(v.windows(2).all(|w| w[1] > w[0]));
    }
}
