/// Convert a short duration such as `180s`, `15m`, `1h`, `2d` or a bare
/// `300` into whole seconds.
///
/// Surrounding whitespace is ignored and the unit is case-insensitive.
/// Anything else (fractions, compound durations like `1h30m`, signs,
/// overflowing values) yields `None`; callers keep the original value.
pub fn duration_to_seconds(input: &str) -> Option<i64> {
    let s = input.trim();
    let digits_end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    let (digits, unit) = s.split_at(digits_end);
    if digits.is_empty() {
        return None;
    }

    let multiplier = match unit {
        "" | "s" | "S" => 1,
        "m" | "M" => 60,
        "h" | "H" => 60 * 60,
        "d" | "D" => 60 * 60 * 24,
        _ => return None,
    };

    digits.parse::<i64>().ok()?.checked_mul(multiplier)
}
