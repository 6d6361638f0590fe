use tickwatch_config::DisplayUnit;

/// Most decimals rendered; an `f64` carries no more significant digits.
pub const MAX_DECIMALS: usize = 18;

/// Renders `seconds` in `unit` with a fixed number of decimals, e.g. `12.500ms`.
///
/// `decimals` is clamped to [`MAX_DECIMALS`].
pub fn format_elapsed(seconds: f64, unit: DisplayUnit, decimals: usize) -> String {
    let scaled = seconds * unit.per_second();
    let decimals = decimals.min(MAX_DECIMALS);
    format!("{scaled:.decimals$}{}", unit.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_in_each_unit() {
        assert_eq!(format_elapsed(0.0125, DisplayUnit::Seconds, 4), "0.0125s");
        assert_eq!(format_elapsed(0.0125, DisplayUnit::Millis, 1), "12.5ms");
        assert_eq!(format_elapsed(0.0125, DisplayUnit::Micros, 0), "12500us");
        assert_eq!(format_elapsed(2.0, DisplayUnit::Nanos, 0), "2000000000ns");
    }

    #[test]
    fn test_negative_values_keep_sign() {
        assert_eq!(format_elapsed(-0.5, DisplayUnit::Millis, 2), "-500.00ms");
    }

    #[test]
    fn test_decimals_are_clamped() {
        let rendered = format_elapsed(1.0, DisplayUnit::Seconds, 1_000_000_000);
        assert_eq!(rendered, format_elapsed(1.0, DisplayUnit::Seconds, MAX_DECIMALS));
        assert_eq!(rendered.len(), "1.".len() + MAX_DECIMALS + "s".len());
    }
}
