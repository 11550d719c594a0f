//! Date normalization for D8 elements.

/// Normalize a spreadsheet date for a D8 element.
///
/// Drops anything after the first space (a time-of-day suffix), then strips
/// `-` and `/`. No calendar validation is done: `"2024-13-45"` becomes
/// `"20241345"`, and bare digit strings pass through unchanged.
///
/// ```
/// use edi834::edi::normalize_date;
///
/// assert_eq!(normalize_date("1990-05-01 00:00:00"), "19900501");
/// assert_eq!(normalize_date("01/31/2024"), "01312024");
/// assert_eq!(normalize_date("20240131"), "20240131");
/// ```
pub fn normalize_date(value: &str) -> String {
    let date_part = value.trim().split(' ').next().unwrap_or_default();
    date_part.chars().filter(|c| *c != '-' && *c != '/').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_suffix_dropped() {
        assert_eq!(normalize_date("1990-05-01 00:00:00"), "19900501");
        assert_eq!(normalize_date(" 2024/01/15 13:45 "), "20240115");
    }

    #[test]
    fn test_passthrough_and_garbage() {
        assert_eq!(normalize_date("19851002"), "19851002");
        assert_eq!(normalize_date("45292"), "45292");
        assert_eq!(normalize_date("2024-13-45"), "20241345");
        assert_eq!(normalize_date(""), "");
    }
}
