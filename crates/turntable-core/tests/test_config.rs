use turntable_core::error::TurntableError;
use turntable_core::frame::Point;
use turntable_core::pipeline::config::{
    AlignmentPolicy, CanvasConfig, FixedTargetConfig, NormalizeConfig, PipelineConfig,
    ResampleFilter, SequenceConfig, SizingPolicy,
};
use turntable_core::pipeline::PipelineStage;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_alignment_policy_display() {
    assert_eq!(format!("{}", AlignmentPolicy::Centroid), "Centroid");
    assert_eq!(format!("{}", AlignmentPolicy::BboxCenter), "Bbox Center");
    assert_eq!(
        format!("{}", AlignmentPolicy::fixed_absolute_default()),
        "Fixed Absolute (160, 120)"
    );
}

#[test]
fn test_sizing_policy_display() {
    assert_eq!(format!("{}", SizingPolicy::GlobalExtent), "Global Extent");
    assert_eq!(format!("{}", SizingPolicy::ReferenceFrame), "Reference Frame");
    let stretched = SizingPolicy::FixedTarget(FixedTargetConfig::default());
    assert_eq!(format!("{stretched}"), "Fixed Target (480x360, stretched)");
    let kept = SizingPolicy::FixedTarget(FixedTargetConfig {
        preserve_aspect: true,
        ..Default::default()
    });
    assert_eq!(format!("{kept}"), "Fixed Target (480x360, aspect preserved)");
}

#[test]
fn test_resample_filter_display() {
    assert_eq!(format!("{}", ResampleFilter::CatmullRom), "Catmull-Rom");
    assert_eq!(format!("{}", ResampleFilter::default()), "Lanczos3");
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(format!("{}", PipelineStage::Analyzing), "Analyzing sequence");
    assert_eq!(format!("{}", PipelineStage::Normalizing), "Normalizing frames");
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_normalize_defaults() {
    let c = NormalizeConfig::default();
    assert_eq!(c.canvas, CanvasConfig { width: 800, height: 600 });
    assert_eq!(c.padding, 80);
    assert_eq!(c.alignment, AlignmentPolicy::Centroid);
    assert_eq!(c.sizing, SizingPolicy::GlobalExtent);
    assert_eq!(c.reference_frame, 0);
    assert_eq!(c.detection.background_threshold, 10);
    assert_eq!(c.target_anchor(), Point::new(400.0, 300.0));
    assert_eq!(c.drawable_area().unwrap().width, 640);
    assert_eq!(c.drawable_area().unwrap().height, 440);
}

#[test]
fn test_odd_canvas_center_is_integer() {
    let canvas = CanvasConfig { width: 801, height: 601 };
    assert_eq!(canvas.center(), Point::new(400.0, 300.0));
}

#[test]
fn test_sequence_defaults() {
    let s = SequenceConfig::default();
    assert_eq!(s.prefix, "frame_");
    assert_eq!(s.extension, "png");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_zero_canvas_rejected() {
    let c = NormalizeConfig {
        canvas: CanvasConfig { width: 0, height: 600 },
        ..Default::default()
    };
    assert!(matches!(
        c.validate(),
        Err(TurntableError::InvalidDimensions { width: 0, height: 600 })
    ));
}

#[test]
fn test_padding_consuming_canvas_rejected() {
    let c = NormalizeConfig {
        padding: 300,
        ..Default::default()
    };
    assert!(matches!(c.validate(), Err(TurntableError::InvalidConfig(_))));
}

#[test]
fn test_padding_irrelevant_for_fixed_target() {
    let c = NormalizeConfig {
        padding: 300,
        sizing: SizingPolicy::FixedTarget(FixedTargetConfig::default()),
        ..Default::default()
    };
    assert!(c.validate().is_ok());
}

#[test]
fn test_zero_fixed_target_rejected() {
    let c = NormalizeConfig {
        sizing: SizingPolicy::FixedTarget(FixedTargetConfig {
            width: 0,
            height: 10,
            preserve_aspect: false,
        }),
        ..Default::default()
    };
    assert!(matches!(c.validate(), Err(TurntableError::InvalidConfig(_))));
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_minimal_toml_uses_defaults() {
    let config: PipelineConfig = toml::from_str(
        r#"
        input = "frames"
        output = "out"
        "#,
    )
    .unwrap();

    assert_eq!(config.sequence.prefix, "frame_");
    assert_eq!(config.normalize.padding, 80);
    assert_eq!(config.normalize.alignment, AlignmentPolicy::Centroid);
    assert!(config.normalize.anchor.is_none());
}

#[test]
fn test_toml_roundtrip() {
    let config = PipelineConfig {
        input: "in".into(),
        output: "out".into(),
        sequence: SequenceConfig {
            prefix: "shot-".into(),
            extension: "jpg".into(),
        },
        normalize: NormalizeConfig {
            padding: 40,
            alignment: AlignmentPolicy::FixedAbsolute { x: -20, y: 35 },
            sizing: SizingPolicy::FixedTarget(FixedTargetConfig {
                width: 300,
                height: 200,
                preserve_aspect: true,
            }),
            anchor: Some(Point::new(320.0, 240.0)),
            resample: ResampleFilter::Nearest,
            ..Default::default()
        },
    };

    let text = toml::to_string_pretty(&config).unwrap();
    let back: PipelineConfig = toml::from_str(&text).unwrap();

    assert_eq!(back.sequence.prefix, "shot-");
    assert_eq!(back.normalize.padding, 40);
    assert_eq!(back.normalize.alignment, config.normalize.alignment);
    assert_eq!(back.normalize.sizing, config.normalize.sizing);
    assert_eq!(back.normalize.anchor, Some(Point::new(320.0, 240.0)));
    assert_eq!(back.normalize.resample, ResampleFilter::Nearest);
}

#[test]
fn test_json_roundtrip() {
    let config = NormalizeConfig {
        sizing: SizingPolicy::ReferenceFrame,
        reference_frame: 12,
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: NormalizeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.sizing, SizingPolicy::ReferenceFrame);
    assert_eq!(back.reference_frame, 12);
}
