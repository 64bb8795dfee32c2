use crate::codec::Token;

const HISTOGRAM_WIDTH: usize = 40;

/// One line per bucket: its tick range, a bar scaled to the largest bucket, and the count
pub fn format_histogram(counts: &[usize], interval: u64) -> String {
    let max = counts.iter().copied().max().unwrap_or(0);
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let width = if max == 0 { 0 } else { count * HISTOGRAM_WIDTH / max };
            format!(
                "{:>6}-{:<6} {:<w$} {}",
                i as u64 * interval + 1,
                (i as u64 + 1) * interval,
                "█".repeat(width),
                count,
                w = HISTOGRAM_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tokens grouped one beat per cell, e.g. `60 60 - | - 62 62`
pub fn format_tokens(tokens: &[Token], subdivision: u32) -> String {
    tokens
        .chunks(subdivision.max(1) as usize)
        .map(|beat| {
            beat.iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
