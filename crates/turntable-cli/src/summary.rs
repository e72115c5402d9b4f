use console::Style;
use turntable_core::analysis::{ReferenceGeometry, ScaleRule};
use turntable_core::pipeline::config::{
    AlignmentPolicy, NormalizeConfig, PipelineConfig, SizingPolicy,
};
use turntable_core::pipeline::{FrameStatus, RunReport};
use turntable_core::verify::{AlignmentReport, Spread};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    good: Style,
    bad: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            good: Style::new().green().bold(),
            bad: Style::new().red().bold(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_pipeline_summary(config: &PipelineConfig) {
    let s = Styles::new();

    print_title(&s, "Turntable Pipeline");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(format!(
            "{}<index>.{}",
            config.sequence.prefix, config.sequence.extension
        ))
    );
    println!();

    print_normalize_section(&s, &config.normalize);
}

fn print_normalize_section(s: &Styles, config: &NormalizeConfig) {
    println!("  {}", s.header.apply_to("Canvas"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(config.canvas.size())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Padding"),
        s.value.apply_to(format!("{} px", config.padding))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Anchor"),
        s.value.apply_to(config.target_anchor())
    );
    println!();

    println!("  {}", s.header.apply_to("Alignment"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(&config.alignment)
    );
    if !matches!(config.alignment, AlignmentPolicy::FixedAbsolute { .. }) {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Threshold"),
            s.value.apply_to(config.detection.background_threshold)
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Sizing"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(&config.sizing)
    );
    if config.sizing == SizingPolicy::ReferenceFrame {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Reference"),
            s.value.apply_to(format!("#{}", config.reference_frame))
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Filter"),
        s.method.apply_to(&config.resample)
    );
    println!();
}

pub fn print_geometry(geometry: &ReferenceGeometry) {
    let s = Styles::new();

    print_title(&s, "Reference Geometry");
    print_geometry_section(&s, geometry);
}

fn print_geometry_section(s: &Styles, geometry: &ReferenceGeometry) {
    println!("  {}", s.header.apply_to("Geometry"));
    let scale_label = match geometry.scale {
        ScaleRule::Uniform(_) => "Scale",
        ScaleRule::FitTarget(_) => "Resize",
    };
    println!(
        "    {:<12}{}",
        s.label.apply_to(scale_label),
        s.value.apply_to(&geometry.scale)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Anchor"),
        s.value.apply_to(geometry.anchor)
    );
    match geometry.extent {
        Some(extent) => println!(
            "    {:<12}{}",
            s.label.apply_to("Extent"),
            s.value.apply_to(extent)
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Extent"),
            s.disabled.apply_to("not measured")
        ),
    }
    if let Some(ref reference) = geometry.reference {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Reference"),
            s.value.apply_to(format!(
                "#{} {} centroid {}",
                reference.index, reference.bbox, reference.centroid
            ))
        );
    }
    match geometry.frames_detected {
        Some(detected) => println!(
            "    {:<12}{}",
            s.label.apply_to("Detected"),
            s.value
                .apply_to(format!("{detected} / {} frames", geometry.frames_total))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Frames"),
            s.value.apply_to(geometry.frames_total)
        ),
    }
    println!();
}

pub fn print_run_report(report: &RunReport) {
    let s = Styles::new();

    print_title(&s, "Run Report");
    print_geometry_section(&s, &report.geometry);

    let summary = &report.summary;
    println!("  {}", s.header.apply_to("Frames"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Total"),
        s.value.apply_to(summary.total)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Written"),
        s.good.apply_to(summary.processed)
    );
    print_count(&s, "Clipped", summary.clipped, &s.disabled);
    print_count(&s, "Degraded", summary.degraded, &s.disabled);
    print_count(&s, "Skipped", summary.skipped, &s.bad);
    println!();

    let flagged: Vec<_> = report
        .frames
        .iter()
        .filter(|(_, status)| *status != FrameStatus::Placed)
        .collect();
    if !flagged.is_empty() {
        println!("  {}", s.header.apply_to("Flagged Frames"));
        for (position, status) in flagged {
            let style = if *status == FrameStatus::Skipped {
                &s.bad
            } else {
                &s.disabled
            };
            println!(
                "    {:<12}{}",
                s.label.apply_to(format!("#{position}")),
                style.apply_to(format!("{status:?}"))
            );
        }
        println!();
    }
}

fn print_count(s: &Styles, label: &str, count: usize, style: &Style) {
    if count == 0 {
        println!("    {:<12}{}", s.label.apply_to(label), s.value.apply_to(0));
    } else {
        println!("    {:<12}{}", s.label.apply_to(label), style.apply_to(count));
    }
}

pub fn print_alignment_report(report: &AlignmentReport) {
    let s = Styles::new();

    print_title(&s, "Alignment Check");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(format!(
            "{} detected, {} empty",
            report.detected(),
            report.empty()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tolerance"),
        s.value.apply_to(format!("{:.1} px", report.tolerance))
    );
    println!();

    println!("  {}", s.header.apply_to("Spread"));
    print_spread(&s, "Centroid X", report.centroid_x);
    print_spread(&s, "Centroid Y", report.centroid_y);
    print_spread(&s, "Width", report.width);
    print_spread(&s, "Height", report.height);
    println!();

    let verdict = if report.is_aligned() {
        s.good.apply_to("ALIGNED")
    } else {
        s.bad.apply_to("NOT ALIGNED")
    };
    println!("  {:<14}{}", s.label.apply_to("Result"), verdict);
    println!();
}

fn print_spread(s: &Styles, label: &str, spread: Option<Spread>) {
    match spread {
        Some(spread) => println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.value.apply_to(format!(
                "{:.1} .. {:.1} (range {:.1} px)",
                spread.min,
                spread.max,
                spread.range()
            ))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to(label),
            s.disabled.apply_to("no subject")
        ),
    }
}
