//! 인장 시험 응력-변형률 곡선 계산 모듈 모음.
//! 측정값 → 응력/변형률 변환, 정렬, 3차 스플라인 보간, 그래프 명세 생성으로 구성한다.

pub mod chart;
pub mod error;
pub mod milestone;
pub mod physics;
pub mod pipeline;
pub mod specimen;
pub mod spline;

pub use chart::{render, ChartSpec, LabelMode};
pub use error::TensileError;
pub use milestone::{Milestone, MILESTONE_COUNT, PLOT_LABELS};
pub use physics::{cross_section_area, transform, DerivedPoint, SortedSeries};
pub use pipeline::generate;
pub use specimen::{Sample, Specimen, TestRecord};
