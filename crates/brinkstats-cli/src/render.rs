use brinkstats_core::{AggregatedStats, Metric};

/// One line per platform: the headline metric first, then secondary metrics.
/// Placeholder values are marked with `*`.
pub(crate) fn render_table(stats: &AggregatedStats) -> String {
    let mut out = String::new();
    for (platform, entry) in stats.iter() {
        let mut line = format!(
            "{:<13} {} {}",
            platform.as_str(),
            entry.primary_name,
            cell(entry.primary)
        );
        for (name, metric) in &entry.secondary {
            line.push_str(&format!("  {name} {}", cell(*metric)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn cell(metric: Metric) -> String {
    match metric {
        Metric::Placeholder(_) => format!("{}*", metric.display()),
        Metric::Live(_) | Metric::Unavailable => metric.display(),
    }
}
