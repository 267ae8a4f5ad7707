//! Walkthrough of building segmentations and evaluating them
//!
//! Run with `RUST_LOG=debug` to see the evaluator's diagnostics.

use bnl_core::{evaluate, EvaluationConfig, Evaluator, Hierarchy, Segment};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Example 1: Flat segmentations
    println!("=== Example 1: Flat Segmentations ===");
    let reference = Segment::from_boundaries(
        vec![0.0, 2.5, 5.0, 7.5, 10.0],
        vec!["verse", "chorus", "verse", "outro"],
    )?;
    let estimate = Segment::from_intervals(
        &[(0.0, 2.6), (2.6, 5.0), (5.0, 7.4), (7.4, 10.0)],
        vec!["verse", "chorus", "verse", "outro"],
    )?;
    println!("{reference}");
    println!("{}", estimate.summary());

    let report = Evaluator::new().evaluate(&reference, &estimate)?;
    for boundary in &report.boundaries {
        println!(
            "  boundaries @ {:.1}s: P={:.3} R={:.3} F={:.3}",
            boundary.tolerance,
            boundary.score.precision,
            boundary.score.recall,
            boundary.score.f_measure
        );
    }
    println!(
        "  labels ({} frames): F={:.3}",
        report.frame_count, report.labels.f_measure
    );

    // Example 2: Hierarchies
    println!("\n=== Example 2: Hierarchies ===");
    let reference = Hierarchy::from_layers(vec![
        Segment::from_boundaries(vec![0.0, 5.0, 10.0], vec!["A", "B"])?,
        Segment::from_boundaries(vec![0.0, 2.5, 5.0, 7.5, 10.0], vec!["a", "b", "a", "c"])?,
    ])?;
    let estimate = Hierarchy::from_layers(vec![
        Segment::from_boundaries(vec![0.0, 5.2, 10.0], vec!["A", "B"])?,
        Segment::from_boundaries(vec![0.0, 5.2, 10.0], vec!["a", "b"])?,
    ])?;
    println!("{reference}");

    let report = evaluate(&reference, &estimate, &[0.5, 3.0], 0.1)?;
    for level in &report.levels {
        println!(
            "  level {}: boundary F={:.3}, label F={:.3}",
            level.level, level.boundaries[0].score.f_measure, level.labels.score.f_measure
        );
    }
    println!("  aggregate label F={:.3}", report.labels.f_measure);

    // Example 3: Configuration from TOML and JSON output
    println!("\n=== Example 3: Custom Configuration ===");
    let toml = "tolerances = [1.0]\nhop = 0.5\ntrim_endpoints = false";
    let config = EvaluationConfig::from_toml_str(toml)?;
    let report = Evaluator::with_config(config).evaluate(&reference, &estimate)?;
    println!("{}", report.to_json()?);

    Ok(())
}
