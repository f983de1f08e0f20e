use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "ft")]
    Foot,
}

impl LengthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }
}

fn to_millimeter(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value,
        LengthUnit::Centimeter => value * 10.0,
        LengthUnit::Meter => value * 1000.0,
        LengthUnit::Inch => value * 25.4,
        LengthUnit::Foot => value * 304.8,
    }
}

fn from_millimeter(value_mm: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value_mm,
        LengthUnit::Centimeter => value_mm / 10.0,
        LengthUnit::Meter => value_mm / 1000.0,
        LengthUnit::Inch => value_mm / 25.4,
        LengthUnit::Foot => value_mm / 304.8,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let mm = to_millimeter(value, from);
    from_millimeter(mm, to)
}
