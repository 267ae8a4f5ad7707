//! End-to-end evaluation scenarios

use bnl_core::{
    evaluate, BatchSummary, EvalError, EvaluationConfig, Evaluator, Hierarchy,
    LabelAgreementScorer, Score, Segment, ValidationError, ValueError,
};

fn seg(boundaries: &[f64], labels: &[&'static str]) -> Segment<&'static str> {
    Segment::from_boundaries(boundaries.to_vec(), labels.to_vec()).unwrap()
}

fn two_level(
    coarse: &[f64],
    coarse_labels: &[&'static str],
    fine: &[f64],
    fine_labels: &[&'static str],
) -> Hierarchy<&'static str> {
    Hierarchy::from_layers(vec![seg(coarse, coarse_labels), seg(fine, fine_labels)]).unwrap()
}

#[test]
fn test_near_miss_boundaries_all_match() {
    let reference = seg(&[0.0, 2.5, 5.0, 7.5, 10.0], &["A", "B", "A", "C"]);
    let estimate = seg(&[0.0, 2.6, 5.0, 7.4, 10.0], &["A", "B", "A", "C"]);

    let report = evaluate(&reference, &estimate, &[0.5], 0.1).unwrap();
    let boundary = report.boundary(0.5).unwrap();

    assert_eq!(boundary.matched, 3);
    assert_eq!(boundary.reference_count, 3);
    assert_eq!(boundary.estimate_count, 3);
    assert_eq!(boundary.score.precision, 1.0);
    assert_eq!(boundary.score.recall, 1.0);
}

#[test]
fn test_missing_estimate_boundary_scores_zero() {
    let reference = seg(&[0.0, 5.0, 10.0], &["A", "B"]);
    let estimate = seg(&[0.0, 10.0], &["A"]);

    for tolerance in [0.0, 0.5, 3.0, 100.0] {
        let report = evaluate(&reference, &estimate, &[tolerance], 0.1).unwrap();
        let boundary = &report.boundaries[0];
        assert_eq!(boundary.matched, 0);
        assert_eq!(boundary.estimate_count, 0);
        assert_eq!(boundary.score.recall, 0.0);
        assert_eq!(boundary.score.precision, 0.0);
        assert_eq!(boundary.score.f_measure, 0.0);
    }
}

#[test]
fn test_untrimmed_matching_includes_endpoints() {
    let reference = seg(&[0.0, 5.0, 10.0], &["A", "B"]);
    let estimate = seg(&[0.0, 10.0], &["A"]);
    let config = EvaluationConfig::builder()
        .tolerances([0.5])
        .trim_endpoints(false)
        .build()
        .unwrap();

    let report = Evaluator::with_config(config).evaluate(&reference, &estimate).unwrap();
    let boundary = &report.boundaries[0];
    assert_eq!(boundary.matched, 2);
    assert_eq!(boundary.score.precision, 1.0);
    assert!((boundary.score.recall - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_both_empty_is_perfect() {
    let reference = seg(&[0.0, 10.0], &["A"]);
    let estimate = seg(&[0.0, 10.0], &["X"]);

    let report = evaluate(&reference, &estimate, &[0.5], 0.5).unwrap();
    assert_eq!(report.boundaries[0].score, Score::PERFECT);
    // One label on each side links every frame pair in both
    assert_eq!(report.labels, Score::PERFECT);
}

#[test]
fn test_self_comparison_is_perfect() {
    let segment = seg(&[0.0, 1.5, 3.0, 4.5, 8.0], &["A", "B", "A", "B"]);
    for hop in [0.05, 0.1, 0.25, 1.0] {
        let report = evaluate(&segment, &segment, &[0.0, 0.5, 3.0], hop).unwrap();
        assert!(report.boundaries.iter().all(|b| b.score == Score::PERFECT));
        assert_eq!(report.labels, Score::PERFECT);
    }
}

#[test]
fn test_label_agreement_counts() {
    // 4 frames: reference AABB, estimate AAAA
    let reference = seg(&[0.0, 2.0, 4.0], &["A", "B"]);
    let estimate = seg(&[0.0, 4.0], &["A"]);

    let links = LabelAgreementScorer::new(1.0)
        .unwrap()
        .pairwise(&reference, &estimate)
        .unwrap();
    assert_eq!(links.reference, 2);
    assert_eq!(links.estimate, 6);
    assert_eq!(links.shared, 2);

    let score = links.score();
    assert!((score.precision - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(score.recall, 1.0);
}

#[test]
fn test_hierarchy_with_different_ends_is_rejected() {
    let err = Hierarchy::from_layers(vec![
        seg(&[0.0, 5.0, 10.0], &["A", "B"]),
        seg(&[0.0, 2.5, 9.5], &["a", "b"]),
    ])
    .unwrap_err();
    assert!(matches!(err, ValidationError::LayerSpanMismatch { layer: 1, .. }));
}

#[test]
fn test_hierarchical_agreement_thresholds() {
    let reference = two_level(
        &[0.0, 4.0, 8.0],
        &["A", "B"],
        &[0.0, 2.0, 4.0, 6.0, 8.0],
        &["a", "b", "a", "b"],
    );
    // Same coarse level, fine level collapsed
    let estimate = two_level(&[0.0, 4.0, 8.0], &["A", "B"], &[0.0, 4.0, 8.0], &["a", "a"]);

    let agreement = LabelAgreementScorer::new(1.0)
        .unwrap()
        .hierarchical(&reference, &estimate)
        .unwrap();

    let scores = agreement.threshold_scores();
    assert_eq!(scores[0], Score::PERFECT);
    assert_eq!(scores[1].recall, 1.0);
    assert!(scores[1].precision < 1.0);

    let aggregate = agreement.aggregate();
    assert_eq!(aggregate.recall, 1.0);
    assert!(aggregate.precision < 1.0 && aggregate.precision > scores[1].precision);
}

#[test]
fn test_hierarchy_report_per_level() {
    let reference = two_level(
        &[0.0, 4.0, 8.0],
        &["A", "B"],
        &[0.0, 2.0, 4.0, 6.0, 8.0],
        &["a", "b", "c", "d"],
    );
    let estimate = two_level(
        &[0.0, 4.2, 8.0],
        &["A", "B"],
        &[0.0, 2.0, 4.2, 8.0],
        &["a", "b", "c"],
    );

    let report = evaluate(&reference, &estimate, &[0.5], 0.1).unwrap();
    assert!(report.is_hierarchical());
    assert_eq!(report.levels.len(), 2);

    let coarse = &report.levels[0].boundaries[0];
    assert_eq!(coarse.matched, 1);
    assert_eq!(coarse.score, Score::PERFECT);

    let fine = &report.levels[1].boundaries[0];
    assert_eq!(fine.matched, 2);
    assert_eq!(fine.reference_count, 3);
    assert_eq!(fine.estimate_count, 2);

    let summary = &report.boundaries[0];
    assert_eq!(summary.matched, 3);
    assert_eq!(summary.reference_count, 4);
    assert_eq!(summary.estimate_count, 3);
    assert!((summary.score.recall - (1.0 + 2.0 / 3.0) / 2.0).abs() < 1e-12);
}

#[test]
fn test_layer_count_mismatch_is_rejected() {
    let shallow = Hierarchy::from_layers(vec![seg(&[0.0, 8.0], &["A"])]).unwrap();
    let deep = two_level(&[0.0, 8.0], &["A"], &[0.0, 4.0, 8.0], &["a", "b"]);

    let err = Evaluator::new().evaluate(&shallow, &deep).unwrap_err();
    assert!(matches!(
        err,
        EvalError::Validation(ValidationError::LayerCountMismatch {
            reference: 1,
            estimate: 2
        })
    ));
}

#[test]
fn test_label_at_outside_span() {
    let segment = seg(&[1.0, 2.0, 3.0], &["A", "B"]);
    assert_eq!(segment.label_at(3.0), Ok(&"B"));
    assert!(matches!(segment.label_at(3.5), Err(ValueError::OutOfSpan { .. })));
}

#[test]
fn test_batch_summary_over_dataset() {
    let reference = seg(&[0.0, 5.0, 10.0], &["A", "B"]);
    let good = reference.clone();
    let empty = seg(&[0.0, 10.0], &["A"]);
    let pairs = vec![(reference.clone(), good), (reference, empty)];

    let reports: Vec<_> = Evaluator::new()
        .evaluate_batch(&pairs)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    let summary = BatchSummary::from_reports(&reports).unwrap();

    assert_eq!(summary.count, 2);
    assert_eq!(summary.boundaries.len(), 2);
    assert_eq!(summary.boundaries[0].1.f_measure, 0.5);
}

#[test]
fn test_segment_serde_validates() {
    let segment = seg(&[0.0, 1.0, 2.0], &["A", "B"]);
    let json = serde_json::to_string(&segment).unwrap();
    let back: Segment<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.labels(), &["A".to_string(), "B".to_string()]);

    let invalid = r#"{"boundaries":[0.0,2.0,1.0],"labels":["A","B"]}"#;
    assert!(serde_json::from_str::<Segment<String>>(invalid).is_err());
}
