use serde::{Deserialize, Serialize};

/// 인장 시험의 7개 기준점. 선언 순서가 곧 입력 배열의 인덱스 순서이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    ZeroLoad,
    InitialLoad,
    ElasticLimit,
    YieldPoint,
    LowerYieldPoint,
    UltimateTensileLoad,
    FractureLoad,
}

/// 기준점 개수. 입력은 항상 이 개수로 고정된다.
pub const MILESTONE_COUNT: usize = 7;

/// 그래프 주석에 사용하는 라벨 목록(기준점 순서).
pub const PLOT_LABELS: [&str; MILESTONE_COUNT] = [
    "Zero Load",
    "Initial Load",
    "Elastic Limit",
    "Yield Point",
    "Lower Yield Point",
    "UTS",
    "Fracture",
];

impl Milestone {
    pub const ALL: [Milestone; MILESTONE_COUNT] = [
        Milestone::ZeroLoad,
        Milestone::InitialLoad,
        Milestone::ElasticLimit,
        Milestone::YieldPoint,
        Milestone::LowerYieldPoint,
        Milestone::UltimateTensileLoad,
        Milestone::FractureLoad,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// 입력 폼에 표시하는 라벨.
    pub fn input_label(self) -> &'static str {
        match self {
            Milestone::ZeroLoad => "Zero Load",
            Milestone::InitialLoad => "Initial Load",
            Milestone::ElasticLimit => "Elastic Limit",
            Milestone::YieldPoint => "Yield Point",
            Milestone::LowerYieldPoint => "Lower Yield Point",
            Milestone::UltimateTensileLoad => "Maximum Load (UTS)",
            Milestone::FractureLoad => "Fracture Load",
        }
    }

    /// 그래프 주석용 짧은 라벨.
    pub fn plot_label(self) -> &'static str {
        PLOT_LABELS[self.index()]
    }

    /// i18n 키. GUI/CLI 입력 라벨 번역에 사용한다.
    pub fn i18n_key(self) -> &'static str {
        match self {
            Milestone::ZeroLoad => "milestone.zero_load",
            Milestone::InitialLoad => "milestone.initial_load",
            Milestone::ElasticLimit => "milestone.elastic_limit",
            Milestone::YieldPoint => "milestone.yield_point",
            Milestone::LowerYieldPoint => "milestone.lower_yield_point",
            Milestone::UltimateTensileLoad => "milestone.uts",
            Milestone::FractureLoad => "milestone.fracture",
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.input_label())
    }
}
