//! User query times to canonical instants.
//!
//! Queries are read differently from stored slots: someone asking about
//! `"2:10"` during the college day means 2:10 PM. Explicit markers are always
//! taken at their word.

use chrono::NaiveTime;

use crate::instant::CanonicalInstant;
use crate::policy::QueryMeridiemPolicy;
use crate::time_parser::{split_clock, split_marker};

/// Parse a query time with the default [`QueryMeridiemPolicy`].
///
/// ```
/// use roomcheck_engine::query_time::parse_query;
///
/// assert_eq!(parse_query("2:10").unwrap().to_string(), "14:10");
/// assert_eq!(parse_query("2:10pm").unwrap().to_string(), "14:10");
/// assert_eq!(parse_query("14:10").unwrap().to_string(), "14:10");
/// assert!(parse_query("abc").is_none());
/// ```
pub fn parse_query(input: &str) -> Option<CanonicalInstant> {
    parse_query_with(input, &QueryMeridiemPolicy::default())
}

/// Parse a query time under an explicit policy.
///
/// Accepts `H:MM`, `H.MM` or a bare `H`, each optionally followed by am/pm.
pub fn parse_query_with(input: &str, policy: &QueryMeridiemPolicy) -> Option<CanonicalInstant> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
        .replace('.', ":");
    let (body, marker) = split_marker(&normalized);
    let (hour, minute) = split_clock(body)?;

    match marker {
        Some(marker) => {
            let reading = format!("{}:{:02}{}", hour, minute, marker.as_str());
            NaiveTime::parse_from_str(&reading, "%I:%M%p")
                .ok()
                .map(CanonicalInstant::from_naive_time)
        }
        None => CanonicalInstant::from_hm(policy.bare_hour_to_24h(hour)?, minute),
    }
}
