//! Composite region codes that are never ranked as countries.

/// Eurostat `geo` codes for EU, euro-area and candidate aggregates.
///
/// This is a fixed snapshot. Codes added by the provider later will show up
/// as countries until they are listed here.
pub const AGGREGATE_CODES: [&str; 9] = [
    "EU27_2020",
    "EU28",
    "EA19",
    "EA20",
    "EU27_2007",
    "EU15",
    "EA",
    "BA",
    "XK",
];

/// Whether a `geo` code names an aggregate region rather than a country.
pub fn is_aggregate(code: &str) -> bool {
    AGGREGATE_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("EU27_2020", true)]
    #[case("EA20", true)]
    #[case("XK", true)]
    #[case("DK", false)]
    #[case("DE", false)]
    #[case("eu27_2020", false)]
    fn test_is_aggregate(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(is_aggregate(code), expected);
    }
}
