//! Single time tokens from stored slot data to canonical instants.
//!
//! Tokens arrive in whatever notation a timetable author used: `"8:50"`,
//! `"2.05pm"`, `"S8:50am"`, `"14:00"`, sometimes with stray whitespace or line
//! breaks. Parsing never fails loudly; anything that cannot be resolved is
//! `None` and the caller drops the owning record from matching.

use chrono::NaiveTime;
use tracing::trace;

use crate::instant::CanonicalInstant;
use crate::policy::{Meridiem, MeridiemPolicy, SlotMeridiemPolicy};

/// Parse one slot-side time token with the default [`SlotMeridiemPolicy`].
///
/// # Examples
///
/// ```
/// use roomcheck_engine::time_parser::parse_time;
///
/// assert_eq!(parse_time("2.05pm"), parse_time("S2:05pm"));
/// assert_eq!(parse_time("7:00").map(|t| t.to_string()), Some("19:00".to_string()));
/// assert_eq!(parse_time("9:00").map(|t| t.to_string()), Some("09:00".to_string()));
/// assert_eq!(parse_time("noon"), None);
/// ```
pub fn parse_time(token: &str) -> Option<CanonicalInstant> {
    parse_time_with(token, &SlotMeridiemPolicy::default())
}

/// Parse one slot-side time token under an explicit policy.
///
/// Steps, in order:
/// 1. drop whitespace, one leading `s`/`S` prefix, lowercase;
/// 2. `.` becomes `:`;
/// 3. a missing marker is inferred by the policy;
/// 4. an explicit marker may be corrected by the policy;
/// 5. read as 12-hour with marker, else as bare 24-hour `H:MM`, else `None`.
pub fn parse_time_with<P>(token: &str, policy: &P) -> Option<CanonicalInstant>
where
    P: MeridiemPolicy + ?Sized,
{
    let normalized = normalize_token(token);
    let (body, explicit) = split_marker(&normalized);
    let (hour, minute) = split_clock(body)?;

    let marker = match explicit {
        Some(marker) => policy.correct(hour, marker),
        None => policy.infer(hour),
    };

    let clock = format!("{}:{:02}", hour, minute);
    let twelve_hour = format!("{}{}", clock, marker.as_str());
    let parsed = NaiveTime::parse_from_str(&twelve_hour, "%I:%M%p")
        .or_else(|_| NaiveTime::parse_from_str(&clock, "%H:%M"));

    match parsed {
        Ok(time) => Some(CanonicalInstant::from_naive_time(time)),
        Err(_) => {
            trace!(token, "unparseable time token");
            None
        }
    }
}

/// Step 1 and 2: strip whitespace and prefix, lowercase, unify separators.
fn normalize_token(token: &str) -> String {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let unprefixed = compact.strip_prefix(['s', 'S']).unwrap_or(&compact);
    unprefixed.to_ascii_lowercase().replace('.', ":")
}

/// Split a trailing `am`/`pm` off a normalized token.
pub(crate) fn split_marker(token: &str) -> (&str, Option<Meridiem>) {
    if token.len() >= 2 && token.is_char_boundary(token.len() - 2) {
        let (body, suffix) = token.split_at(token.len() - 2);
        if let Some(marker) = Meridiem::from_marker(suffix) {
            return (body, Some(marker));
        }
    }
    (token, None)
}

/// Split `H:MM` (or a bare `H`) into its numeric parts.
///
/// The hour must be one or two digits and the minutes exactly two.
pub(crate) fn split_clock(body: &str) -> Option<(u32, u32)> {
    let (hour, minute) = match body.split_once(':') {
        Some((hour, minute)) => (hour, minute),
        None => (body, "00"),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}
