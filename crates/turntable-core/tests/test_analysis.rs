#[allow(dead_code)]
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;

use turntable_core::analysis::{
    analyze_sequence, analyze_sequence_with_progress, max_extent, detect_all, ScaleRule,
};
use turntable_core::detection::DetectionConfig;
use turntable_core::error::TurntableError;
use turntable_core::frame::{Frame, Point, Size};
use turntable_core::pipeline::config::{FixedTargetConfig, NormalizeConfig, SizingPolicy};

fn mixed_sequence() -> Vec<Frame> {
    vec![
        common::rect_frame(0, 400, 300, (10, 10, 100, 50)),
        common::rect_frame(1, 400, 300, (90, 60, 200, 150)),
        common::empty_frame(2, 400, 300),
        common::rect_frame(3, 400, 300, (150, 100, 120, 100)),
    ]
}

fn uniform_scale(rule: &ScaleRule) -> f64 {
    match rule {
        ScaleRule::Uniform(s) => *s,
        other => panic!("expected uniform scale, got {other:?}"),
    }
}

#[test]
fn test_global_extent_uses_largest_subject() {
    let frames = mixed_sequence();
    let geometry = analyze_sequence(&frames, &NormalizeConfig::default()).unwrap();

    assert_eq!(geometry.extent, Some(Size::new(200, 150)));
    // 800x600 canvas, 80 px padding: min(640 / 200, 440 / 150).
    assert_relative_eq!(uniform_scale(&geometry.scale), 440.0 / 150.0, epsilon = 1e-12);
    assert_eq!(geometry.anchor, Point::new(400.0, 300.0));
    assert_eq!(geometry.frames_total, 4);
    assert_eq!(geometry.frames_detected, Some(3));
    assert!(geometry.reference.is_none());
}

#[test]
fn test_global_extent_takes_max_per_axis() {
    // Widest and tallest subjects come from different frames.
    let frames = vec![
        common::rect_frame(0, 300, 300, (0, 0, 250, 20)),
        common::rect_frame(1, 300, 300, (0, 0, 30, 220)),
    ];
    let detections = detect_all(&frames, &DetectionConfig::default(), |_| {});
    assert_eq!(max_extent(&detections), Some(Size::new(250, 220)));
}

#[test]
fn test_reference_frame_scale() {
    let frames = mixed_sequence();
    let config = NormalizeConfig {
        sizing: SizingPolicy::ReferenceFrame,
        reference_frame: 0,
        ..Default::default()
    };
    let geometry = analyze_sequence(&frames, &config).unwrap();

    // min(640 / 100, 440 / 50) = 6.4
    assert_relative_eq!(uniform_scale(&geometry.scale), 6.4, epsilon = 1e-12);
    assert_eq!(geometry.extent, Some(Size::new(100, 50)));
    let reference = geometry.reference.unwrap();
    assert_eq!(reference.index, 0);
    assert_eq!(geometry.frames_detected, None);
}

#[test]
fn test_reference_index_out_of_range() {
    let frames = mixed_sequence();
    let config = NormalizeConfig {
        sizing: SizingPolicy::ReferenceFrame,
        reference_frame: 9,
        ..Default::default()
    };
    let err = analyze_sequence(&frames, &config).unwrap_err();
    assert!(matches!(
        err,
        TurntableError::ReferenceIndexOutOfRange { index: 9, total: 4 }
    ));
}

#[test]
fn test_empty_reference_frame_is_fatal() {
    let frames = mixed_sequence();
    let config = NormalizeConfig {
        sizing: SizingPolicy::ReferenceFrame,
        reference_frame: 2,
        ..Default::default()
    };
    let err = analyze_sequence(&frames, &config).unwrap_err();
    assert!(matches!(err, TurntableError::ReferenceNotFound));
}

#[test]
fn test_global_extent_without_any_subject() {
    let frames: Vec<Frame> = (0..5).map(|i| common::empty_frame(i, 50, 50)).collect();
    let err = analyze_sequence(&frames, &NormalizeConfig::default()).unwrap_err();
    assert!(matches!(err, TurntableError::ReferenceNotFound));
}

#[test]
fn test_fixed_target_skips_measurement() {
    let frames = mixed_sequence();
    let target = FixedTargetConfig {
        width: 300,
        height: 200,
        preserve_aspect: true,
    };
    let config = NormalizeConfig {
        sizing: SizingPolicy::FixedTarget(target.clone()),
        ..Default::default()
    };
    let geometry = analyze_sequence(&frames, &config).unwrap();

    assert_eq!(geometry.scale, ScaleRule::FitTarget(target));
    assert_eq!(geometry.extent, None);
    assert_eq!(geometry.frames_detected, None);
}

#[test]
fn test_custom_anchor() {
    let frames = mixed_sequence();
    let config = NormalizeConfig {
        anchor: Some(Point::new(120.0, 80.5)),
        ..Default::default()
    };
    let geometry = analyze_sequence(&frames, &config).unwrap();
    assert_eq!(geometry.anchor, Point::new(120.0, 80.5));
}

#[test]
fn test_empty_source() {
    let frames: Vec<Frame> = Vec::new();
    let err = analyze_sequence(&frames, &NormalizeConfig::default()).unwrap_err();
    assert!(matches!(err, TurntableError::EmptySequence));
}

#[test]
fn test_invalid_padding_rejected_before_analysis() {
    let frames = mixed_sequence();
    let config = NormalizeConfig {
        padding: 300,
        ..Default::default()
    };
    let err = analyze_sequence(&frames, &config).unwrap_err();
    assert!(matches!(err, TurntableError::InvalidConfig(_)));
}

#[test]
fn test_progress_reaches_frame_count() {
    let frames = mixed_sequence();
    let max_done = AtomicUsize::new(0);
    analyze_sequence_with_progress(&frames, &NormalizeConfig::default(), |done| {
        max_done.fetch_max(done, Ordering::Relaxed);
    })
    .unwrap();
    assert_eq!(max_done.load(Ordering::Relaxed), 4);
}
