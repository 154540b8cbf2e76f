use std::path::Path;

use console::Style;
use starlift_core::StarliftConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(input: &Path, output: &Path, config: &StarliftConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Starlift"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();
    println!("  {:<16}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!("  {:<16}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    println!();

    println!("  {}", s.header.apply_to("Detection"));
    row(&s, "Sigma", format!("{}", config.detection_sigma));
    row(&s, "Dilation", config.dilation_kernel.to_string());
    gate(&s, "Peak ratio", config.peak_ratio_gate());
    gate(&s, "Hot pixels", config.hot_pixel_gate());
    println!();

    println!("  {}", s.header.apply_to("Background"));
    row(&s, "Kernel", format!("{}", config.background_kernel));
    row(
        &s,
        "Tiles",
        format!("{} px, {} px overlap", config.block_size, config.overlap),
    );
    let workers = if config.workers == 0 {
        "auto".to_string()
    } else {
        config.workers.to_string()
    };
    row(&s, "Workers", workers);
    gate(&s, "Intensity floor", config.intensity_gate());
    println!();

    println!("  {}", s.header.apply_to("Enhancement"));
    row(&s, "Base boost", format!("{}", config.enhance_factor));
    row(&s, "Dim boost", format!("{}", config.dim_star_boost));
    row(&s, "Bright knee", format!("{}", config.bright_star_threshold));
    row(&s, "Stretch", format!("{}", config.stretch_strength));
    println!();
}

fn row(s: &Styles, label: &str, value: String) {
    println!("    {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
}

fn gate(s: &Styles, label: &str, value: Option<f32>) {
    match value {
        Some(v) => row(s, label, format!("{v}")),
        None => println!(
            "    {:<14}{}",
            s.label.apply_to(label),
            s.disabled.apply_to("disabled")
        ),
    }
}
