/// Per-member average of a group total. Returns 0.0 for an empty roster.
pub fn per_member(total: u64, members: usize) -> f64 {
    if members == 0 {
        return 0.0;
    }
    total as f64 / members as f64
}

/// Renders an average as a plain integer when it has no fractional part,
/// otherwise with exactly two decimals.
pub fn format_average(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
