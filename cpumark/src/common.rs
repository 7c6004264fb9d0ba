/// Sentinel used for every field whose value could not be found or parsed.
/// The output table never contains empty cells, only this literal.
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of physical CPU packages a listing describes.
///
/// Multi-socket listings carry an exact marker in their display name, e.g.
/// `Intel Xeon E5-2670 v2 @ 2.50GHz [Dual CPU]`. Per-socket quantities
/// (cores, threads, TDP) are scaled by this factor. The match is an exact
/// substring match, like the site's own rendering.
pub fn physical_multiplier(name: &str) -> u32 {
    if name.contains("[Dual CPU]") {
        2
    } else if name.contains("[Quad CPU]") {
        4
    } else {
        1
    }
}

/// Parse a number that may use comma as the decimal separator and dot as the
/// thousands separator.
///
/// Some page revisions render clock speeds in a European locale ("2.900,5"),
/// others in the plain dot-decimal form ("2.9").
///
/// ## Example
/// ```txt
/// "2,900"   -> 2.9
/// "2.900,5" -> 2900.5
/// "3.60"    -> 3.6
/// ```
pub fn parse_locale_number(s: &str) -> Option<f64> {
    if s.contains(',') {
        s.replace('.', "").replace(',', ".").parse().ok()
    } else {
        s.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_locale_number, physical_multiplier};

    #[test]
    fn test_multiplier() {
        assert_eq!(physical_multiplier("Intel Core i9-9900K @ 3.60GHz"), 1);
        assert_eq!(
            physical_multiplier("Intel Xeon X5650 @ 2.67GHz [Dual CPU]"),
            2
        );
        assert_eq!(
            physical_multiplier("Intel Xeon E5-4669 v3 @ 2.10GHz [Quad CPU]"),
            4
        );
        /* exact substring only - no case folding, no partial markers */
        assert_eq!(physical_multiplier("AMD EPYC 7702 [dual cpu]"), 1);
        assert_eq!(physical_multiplier("Dual CPU"), 1);
    }

    #[test]
    fn test_parse_locale_number() {
        assert_eq!(parse_locale_number("2,900").unwrap(), 2.9);
        assert_eq!(parse_locale_number("3,60").unwrap(), 3.6);
        assert_eq!(parse_locale_number("2.900,5").unwrap(), 2900.5);
        assert_eq!(parse_locale_number("3.60").unwrap(), 3.6);
        assert_eq!(parse_locale_number("95"), Some(95.0));
        assert_eq!(parse_locale_number("GHz"), None);
    }
}
