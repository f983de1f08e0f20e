//! 입력 레코드 → 그래프 명세 전체 흐름 회귀 테스트.
use approx::assert_relative_eq;
use stress_strain_toolbox::tensile::{
    self, cross_section_area, generate, LabelMode, Milestone, Sample, SortedSeries, Specimen,
    TensileError, TestRecord, PLOT_LABELS,
};

const LOADS: [f64; 7] = [0.0, 1000.0, 2000.0, 2500.0, 2400.0, 3000.0, 2800.0];
const LENGTHS: [f64; 7] = [100.0, 99.9, 99.0, 98.0, 98.5, 95.0, 90.0];

fn scenario() -> TestRecord {
    TestRecord::new_mm_n(10.0, 100.0, LOADS, LENGTHS)
}

#[test]
fn area_of_reference_specimen() {
    assert_relative_eq!(cross_section_area(10.0), 78.5398, epsilon = 1e-4);
}

#[test]
fn end_to_end_reference_scenario() {
    let chart = generate(&scenario(), LabelMode::Positional).expect("chart");
    let area = cross_section_area(10.0);

    // 정렬된 점: 0, 0.001, 0.01, 0.015, 0.02, 0.05, 0.1
    let expected = [
        (0.0, 0.0),
        (0.001, 1000.0),
        (0.01, 2000.0),
        (0.015, 2400.0),
        (0.02, 2500.0),
        (0.05, 3000.0),
        (0.1, 2800.0),
    ];
    assert_eq!(chart.data_points.points.len(), 7);
    for (p, (strain, load)) in chart.data_points.points.iter().zip(expected) {
        assert_relative_eq!(p[0], strain, epsilon = 1e-12);
        assert_relative_eq!(p[1], load / area, epsilon = 1e-9);
    }

    assert_eq!(chart.smooth_curve.points.len(), 300);
    let (lo, hi) = chart.strain_domain().unwrap();
    assert_eq!(lo, chart.data_points.points[0][0]);
    assert_eq!(hi, chart.data_points.points[6][0]);

    let texts: Vec<&str> = chart.key_points.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, PLOT_LABELS.to_vec());
}

#[test]
fn smooth_curve_passes_through_data_points() {
    let chart = generate(&scenario(), LabelMode::Positional).unwrap();
    let curve = &chart.smooth_curve.points;
    // 양 끝 샘플은 첫/마지막 점과 일치한다.
    assert_relative_eq!(curve[0][1], chart.data_points.points[0][1], epsilon = 1e-9);
    assert_relative_eq!(curve[299][1], chart.data_points.points[6][1], epsilon = 1e-9);
    assert!(curve.windows(2).all(|w| w[1][0] > w[0][0]));
}

#[test]
fn labels_attach_by_sorted_position() {
    // YieldPoint(0.02)과 LowerYieldPoint(0.015)는 변형률 순서가 뒤바뀌어 있다.
    let chart = generate(&scenario(), LabelMode::Positional).unwrap();
    let at_0015 = &chart.key_points[3];
    assert_relative_eq!(at_0015.x, 0.015, epsilon = 1e-12);
    assert_eq!(at_0015.text, "Yield Point");
    assert_eq!(chart.key_points[4].text, "Lower Yield Point");
}

#[test]
fn by_origin_mode_tracks_milestones() {
    let chart = generate(&scenario(), LabelMode::ByOrigin).unwrap();
    assert_eq!(chart.key_points[3].text, "Lower Yield Point");
    assert_eq!(chart.key_points[4].text, "Yield Point");
    assert_eq!(chart.key_points[5].text, "UTS");
}

#[test]
fn identical_strains_fail_without_chart() {
    let mut lengths = LENGTHS;
    lengths[4] = lengths[3];
    let rec = TestRecord::new_mm_n(10.0, 100.0, LOADS, lengths);
    let err = generate(&rec, LabelMode::Positional).unwrap_err();
    assert!(matches!(err, TensileError::DegenerateInput { .. }), "{err}");
}

#[test]
fn invalid_geometry_is_rejected_before_transform() {
    let rec = TestRecord::new_mm_n(0.0, 100.0, LOADS, LENGTHS);
    assert!(matches!(
        generate(&rec, LabelMode::Positional),
        Err(TensileError::InvalidGeometry { .. })
    ));
    let rec = TestRecord::new_mm_n(10.0, -100.0, LOADS, LENGTHS);
    assert!(matches!(
        generate(&rec, LabelMode::Positional),
        Err(TensileError::InvalidGeometry { .. })
    ));
}

#[test]
fn sorted_series_is_idempotent() {
    let specimen = Specimen::new(10.0, 100.0).unwrap();
    let samples = Milestone::ALL.map(|m| Sample {
        load_n: LOADS[m.index()],
        length_mm: LENGTHS[m.index()],
    });
    let series = tensile::transform(&specimen, &samples).unwrap();
    assert!(!series.preserves_milestone_order());
    assert_eq!(SortedSeries::from_points(*series.points()), series);
}

#[test]
fn units_in_record_do_not_change_result() {
    use stress_strain_toolbox::units::{ForceUnit, LengthUnit};
    let mut rec = scenario();
    rec.length_unit = LengthUnit::Centimeter;
    rec.force_unit = ForceUnit::KiloNewton;
    rec.diameter = 1.0;
    rec.initial_length = 10.0;
    rec.loads = LOADS.map(|p| p / 1000.0);
    rec.lengths = LENGTHS.map(|l| l / 10.0);
    let a = generate(&rec, LabelMode::Positional).unwrap();
    let b = generate(&scenario(), LabelMode::Positional).unwrap();
    for (p, q) in a.data_points.points.iter().zip(&b.data_points.points) {
        assert_relative_eq!(p[0], q[0], epsilon = 1e-9);
        assert_relative_eq!(p[1], q[1], epsilon = 1e-9);
    }
}

#[test]
fn overflowing_stress_is_reported_per_milestone() {
    let rec = TestRecord::new_mm_n(1e-160, 100.0, LOADS, LENGTHS);
    let err = generate(&rec, LabelMode::Positional).unwrap_err();
    assert!(
        matches!(
            err,
            TensileError::InvalidSample {
                milestone: Milestone::InitialLoad,
                ..
            }
        ),
        "{err}"
    );
}
