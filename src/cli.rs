//! Operator-facing output for `--check`

use colored::*;
use std::collections::BTreeMap;

use crate::axis::{Axis, Direction};

/// Print every axis with its sorted partition and rates
pub fn print_partitions(axes: &BTreeMap<String, Axis>) {
    println!("\n{}", "=== Axis Partitions ===".bold().cyan());

    for (name, axis) in axes {
        println!("\n{}", render_axis(name, axis));
    }

    println!(
        "\n{} {} axes valid",
        "✓".green(),
        axes.len().to_string().green()
    );
}

/// Render one axis as a multi-line block
pub fn render_axis(name: &str, axis: &Axis) -> String {
    let bounds = axis.bounds();
    let mut lines = vec![format!(
        "  {}: domain [{}, {}]  output {}..{}  default {}",
        name.bright_white().bold(),
        bounds.min_input,
        bounds.max_input,
        bounds.min_output,
        bounds.max_output,
        axis.default_value()
    )];

    let chords = |set: &crate::input::ChordSet| {
        let rendered: Vec<String> = set.chords().map(|c| c.to_string()).collect();
        if rendered.is_empty() {
            "-".to_string()
        } else {
            rendered.join(" | ")
        }
    };
    lines.push(format!(
        "    keys: + {}   - {}",
        chords(&axis.bindings().positive).yellow(),
        chords(&axis.bindings().negative).yellow()
    ));

    for (index, region) in axis.regions().iter().enumerate() {
        let marker = if index == axis.active_region() { "*" } else { " " };
        lines.push(format!(
            "   {} {:<18} +{:>8.3}/s  ={:>8.3}/s  -{:>8.3}/s",
            marker.green(),
            region.interval().to_string(),
            region.rate_per_second(Direction::Positive),
            region.rate_per_second(Direction::Neutral),
            region.rate_per_second(Direction::Negative),
        ));
    }

    lines.join("\n")
}
