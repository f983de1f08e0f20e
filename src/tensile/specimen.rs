use serde::{Deserialize, Serialize};

use super::error::TensileError;
use super::milestone::{Milestone, MILESTONE_COUNT};
use crate::units::{convert_force, convert_length, ForceUnit, LengthUnit};

/// 원형 단면 인장 시편의 형상. `Specimen::new`로만 만들 수 있으며 생성 후 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specimen {
    diameter_mm: f64,
    initial_length_mm: f64,
}

impl Specimen {
    /// 직경/초기 길이가 양의 유한값인지 검사한 뒤 시편을 만든다.
    pub fn new(diameter_mm: f64, initial_length_mm: f64) -> Result<Self, TensileError> {
        if !(diameter_mm.is_finite() && diameter_mm > 0.0) {
            return Err(TensileError::InvalidGeometry {
                field: "diameter",
                value: diameter_mm,
            });
        }
        if !(initial_length_mm.is_finite() && initial_length_mm > 0.0) {
            return Err(TensileError::InvalidGeometry {
                field: "initial_length",
                value: initial_length_mm,
            });
        }
        Ok(Self {
            diameter_mm,
            initial_length_mm,
        })
    }

    pub fn diameter_mm(&self) -> f64 {
        self.diameter_mm
    }

    pub fn initial_length_mm(&self) -> f64 {
        self.initial_length_mm
    }
}

/// 한 기준점에서 측정한 하중과 표점 길이.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// 하중 [N]
    pub load_n: f64,
    /// 측정 길이 [mm]
    pub length_mm: f64,
}

/// 입력 폼/파일에서 넘어오는 고정 형태 레코드.
///
/// `loads[i]`, `lengths[i]`는 [`Milestone::ALL`]의 i번째 기준점에 대응한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub diameter: f64,
    pub initial_length: f64,
    pub loads: [f64; MILESTONE_COUNT],
    pub lengths: [f64; MILESTONE_COUNT],
    #[serde(default)]
    pub length_unit: LengthUnit,
    #[serde(default)]
    pub force_unit: ForceUnit,
}

impl Default for TestRecord {
    fn default() -> Self {
        Self {
            diameter: 10.0,
            initial_length: 100.0,
            loads: [1000.0; MILESTONE_COUNT],
            lengths: [99.0; MILESTONE_COUNT],
            length_unit: LengthUnit::Millimeter,
            force_unit: ForceUnit::Newton,
        }
    }
}

impl TestRecord {
    /// mm/N 기준 레코드를 만든다.
    pub fn new_mm_n(
        diameter: f64,
        initial_length: f64,
        loads: [f64; MILESTONE_COUNT],
        lengths: [f64; MILESTONE_COUNT],
    ) -> Self {
        Self {
            diameter,
            initial_length,
            loads,
            lengths,
            length_unit: LengthUnit::Millimeter,
            force_unit: ForceUnit::Newton,
        }
    }

    /// 입력 단위를 바꾸고 모든 값을 새 단위로 환산한다. 물리량은 그대로 유지된다.
    pub fn convert_units(&mut self, length_unit: LengthUnit, force_unit: ForceUnit) {
        let (from_len, from_force) = (self.length_unit, self.force_unit);
        let len = |v: f64| convert_length(v, from_len, length_unit);
        self.diameter = len(self.diameter);
        self.initial_length = len(self.initial_length);
        self.lengths = self.lengths.map(len);
        self.loads = self.loads.map(|v| convert_force(v, from_force, force_unit));
        self.length_unit = length_unit;
        self.force_unit = force_unit;
    }

    /// 내부 단위(mm, N)로 환산하고 검증한 시편과 측정값을 반환한다.
    pub fn to_inputs(&self) -> Result<(Specimen, [Sample; MILESTONE_COUNT]), TensileError> {
        let mm = |v: f64| convert_length(v, self.length_unit, LengthUnit::Millimeter);
        let newton = |v: f64| convert_force(v, self.force_unit, ForceUnit::Newton);

        let specimen = Specimen::new(mm(self.diameter), mm(self.initial_length))?;

        let mut samples = [Sample {
            load_n: 0.0,
            length_mm: 0.0,
        }; MILESTONE_COUNT];
        for milestone in Milestone::ALL {
            let i = milestone.index();
            let load_n = newton(self.loads[i]);
            let length_mm = mm(self.lengths[i]);
            if !load_n.is_finite() || load_n < 0.0 {
                return Err(TensileError::InvalidSample {
                    milestone,
                    reason: "하중은 0 이상이어야 합니다",
                });
            }
            if !length_mm.is_finite() || length_mm <= 0.0 {
                return Err(TensileError::InvalidSample {
                    milestone,
                    reason: "길이는 0보다 커야 합니다",
                });
            }
            samples[i] = Sample { load_n, length_mm };
        }
        Ok((specimen, samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_non_positive_geometry() {
        assert!(matches!(
            Specimen::new(0.0, 100.0),
            Err(TensileError::InvalidGeometry { field: "diameter", .. })
        ));
        assert!(matches!(
            Specimen::new(10.0, -1.0),
            Err(TensileError::InvalidGeometry {
                field: "initial_length",
                ..
            })
        ));
        assert!(Specimen::new(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn default_record_matches_form_defaults() {
        let rec = TestRecord::default();
        assert_eq!(rec.diameter, 10.0);
        assert_eq!(rec.initial_length, 100.0);
        assert!(rec.loads.iter().all(|&p| p == 1000.0));
        assert!(rec.lengths.iter().all(|&l| l == 99.0));
    }

    #[test]
    fn negative_load_names_milestone() {
        let mut rec = TestRecord::default();
        rec.loads[4] = -5.0;
        let err = rec.to_inputs().unwrap_err();
        assert!(matches!(
            err,
            TensileError::InvalidSample {
                milestone: Milestone::LowerYieldPoint,
                ..
            }
        ));
    }

    #[test]
    fn zero_length_is_rejected() {
        let mut rec = TestRecord::default();
        rec.lengths[0] = 0.0;
        assert!(matches!(
            rec.to_inputs(),
            Err(TensileError::InvalidSample {
                milestone: Milestone::ZeroLoad,
                ..
            })
        ));
    }

    #[test]
    fn converts_record_units_to_mm_and_newton() {
        let mut rec = TestRecord::default();
        rec.length_unit = LengthUnit::Centimeter;
        rec.force_unit = ForceUnit::KiloNewton;
        rec.diameter = 1.0;
        rec.initial_length = 10.0;
        rec.loads = [2.0; MILESTONE_COUNT];
        rec.lengths = [9.9; MILESTONE_COUNT];
        let (specimen, samples) = rec.to_inputs().unwrap();
        assert!((specimen.diameter_mm() - 10.0).abs() < 1e-12);
        assert!((specimen.initial_length_mm() - 100.0).abs() < 1e-12);
        assert!((samples[0].load_n - 2000.0).abs() < 1e-9);
        assert!((samples[6].length_mm - 99.0).abs() < 1e-9);
    }

    #[test]
    fn switching_units_keeps_physical_values() {
        let mut rec = TestRecord::default();
        rec.convert_units(LengthUnit::Centimeter, ForceUnit::KiloNewton);
        assert_relative_eq!(rec.diameter, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rec.lengths[6], 9.9, epsilon = 1e-12);
        assert_relative_eq!(rec.loads[0], 1.0, epsilon = 1e-12);
        let (specimen, samples) = rec.to_inputs().unwrap();
        assert_relative_eq!(specimen.initial_length_mm(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(samples[3].load_n, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn record_parses_from_toml_with_default_units() {
        let src = r#"
diameter = 10.0
initial_length = 100.0
loads = [0.0, 1000.0, 2000.0, 2500.0, 2400.0, 3000.0, 2800.0]
lengths = [100.0, 99.9, 99.0, 98.0, 98.5, 95.0, 90.0]
"#;
        let rec: TestRecord = toml::from_str(src).unwrap();
        assert_eq!(rec.length_unit, LengthUnit::Millimeter);
        assert_eq!(rec.force_unit, ForceUnit::Newton);
        assert_eq!(rec.loads[5], 3000.0);
    }

    #[test]
    fn record_rejects_wrong_sample_count() {
        let src = r#"
diameter = 10.0
initial_length = 100.0
loads = [0.0, 1000.0]
lengths = [100.0, 99.9]
"#;
        assert!(toml::from_str::<TestRecord>(src).is_err());
    }
}
