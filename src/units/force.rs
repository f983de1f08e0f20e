use serde::{Deserialize, Serialize};

/// 하중(힘) 단위. 내부 기준은 뉴턴이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceUnit {
    #[default]
    #[serde(rename = "N")]
    Newton,
    #[serde(rename = "kN")]
    KiloNewton,
    #[serde(rename = "kgf")]
    KilogramForce,
    #[serde(rename = "lbf")]
    PoundForce,
}

impl ForceUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            ForceUnit::Newton => "N",
            ForceUnit::KiloNewton => "kN",
            ForceUnit::KilogramForce => "kgf",
            ForceUnit::PoundForce => "lbf",
        }
    }
}

fn to_newton(value: f64, unit: ForceUnit) -> f64 {
    match unit {
        ForceUnit::Newton => value,
        ForceUnit::KiloNewton => value * 1000.0,
        ForceUnit::KilogramForce => value * 9.80665,
        ForceUnit::PoundForce => value * 4.448_221_615,
    }
}

fn from_newton(value_n: f64, unit: ForceUnit) -> f64 {
    match unit {
        ForceUnit::Newton => value_n,
        ForceUnit::KiloNewton => value_n / 1000.0,
        ForceUnit::KilogramForce => value_n / 9.80665,
        ForceUnit::PoundForce => value_n / 4.448_221_615,
    }
}

/// 하중을 다른 단위로 변환한다.
pub fn convert_force(value: f64, from: ForceUnit, to: ForceUnit) -> f64 {
    let n = to_newton(value, from);
    from_newton(n, to)
}
