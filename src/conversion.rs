use thiserror::Error;

use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}

/// 길이 단위 문자열(`mm`, `in`, `ft` 등)을 해석한다.
pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mm" | "millimeter" | "millimetre" => Ok(LengthUnit::Millimeter),
        "cm" => Ok(LengthUnit::Centimeter),
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "in" | "inch" => Ok(LengthUnit::Inch),
        "ft" | "foot" => Ok(LengthUnit::Foot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 하중 단위 문자열(`N`, `kN`, `kgf`, `lbf` 등)을 해석한다.
pub fn parse_force_unit(s: &str) -> Result<ForceUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "n" | "newton" => Ok(ForceUnit::Newton),
        "kn" | "kilonewton" => Ok(ForceUnit::KiloNewton),
        "kgf" | "kp" => Ok(ForceUnit::KilogramForce),
        "lbf" | "lb" => Ok(ForceUnit::PoundForce),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
