//! 입력 측정값 단위 정의 및 변환 모듈 모음.

pub mod force;
pub mod length;

pub use force::{convert_force, ForceUnit};
pub use length::{convert_length, LengthUnit};
