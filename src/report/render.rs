//! Report renderers

use super::types::BenchmarkReport;
use crate::error::Result;
use std::io::Write;

/// Render an improvement percentage, e.g. `+42.5%`, or `n/a`
pub fn format_improvement(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.1}%"),
        None => "n/a".to_string(),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &BenchmarkReport, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Render the report as aligned text tables
pub fn render_table(report: &BenchmarkReport, out: &mut impl Write) -> Result<()> {
    let width = report
        .endpoints
        .iter()
        .map(|e| e.name.chars().count())
        .chain(std::iter::once("Endpoint".len()))
        .max()
        .unwrap_or(0);

    writeln!(out, "Pagination benchmark")?;
    writeln!(out, "====================")?;
    writeln!(out, "Target:     {}", report.base_url)?;
    writeln!(out, "Page size:  {}", report.page_size)?;
    writeln!(
        out,
        "Requests:   {} warmup, {} measured per endpoint",
        report.warmup_requests, report.benchmark_requests
    )?;
    writeln!(out, "Generated:  {}", report.generated_at.to_rfc3339())?;

    writeln!(out)?;
    writeln!(out, "Latency (ms)")?;
    writeln!(
        out,
        "{:<width$}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}",
        "Endpoint", "min", "avg", "p50", "p95", "max"
    )?;
    for e in &report.endpoints {
        let l = &e.latency;
        writeln!(
            out,
            "{:<width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}",
            e.name, l.min, l.mean, l.p50, l.p95, l.max
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Response size")?;
    writeln!(out, "{:<width$}  {:>12}  {:>10}", "Endpoint", "bytes", "")?;
    for e in &report.endpoints {
        writeln!(
            out,
            "{:<width$}  {:>12}  {:>10}",
            e.name,
            e.size_bytes,
            format_bytes(e.size_bytes)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Full traversal")?;
    writeln!(
        out,
        "{:<width$}  {:>10}  {:>7}  {:>10}",
        "Endpoint", "items", "pages", "seconds"
    )?;
    for e in &report.endpoints {
        let t = &e.traversal;
        writeln!(
            out,
            "{:<width$}  {:>10}  {:>7}  {:>10.3}",
            e.name, t.total_items, t.page_count, t.elapsed_seconds
        )?;
    }

    if !report.comparisons.is_empty() {
        writeln!(out)?;
        writeln!(out, "Improvement (positive = candidate better)")?;
        for c in &report.comparisons {
            writeln!(
                out,
                "{} vs {}: latency {}, size {}, traversal {}",
                report.name_of(&c.candidate),
                report.name_of(&c.baseline),
                format_improvement(c.latency),
                format_improvement(c.size),
                format_improvement(c.traversal)
            )?;
        }
    }

    Ok(())
}
