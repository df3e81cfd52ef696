//! Slot strings to canonical intervals.
//!
//! Source tables write a period's time range in several notations. Each
//! notation is one [`SlotFormat`] matcher; [`SlotResolver`] tries them in order
//! and hands both sides to the time parser independently, so a marker written
//! only on the end (`"8.50 - 9.40am"`) never leaks onto the start.
//!
//! Resolution never fails loudly. Non-class periods, unrecognized text, and
//! sides the time parser rejects all come back as `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::instant::CanonicalInterval;
use crate::policy::{MeridiemPolicy, SlotMeridiemPolicy};
use crate::time_parser::parse_time_with;

/// Slot texts that mark a period without a class.
const NON_CLASS_SLOTS: &[&str] = &["free", "break"];

static COLON_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}:\d{2})\s*(am|pm)?\s*[-–]\s*(\d{1,2}:\d{2})\s*(am|pm)?")
        .expect("colon range pattern is valid")
});

static DOT_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}\.\d{2})\s*(am|pm)?\s*[-–]\s*(\d{1,2}\.\d{2})\s*(am|pm)?")
        .expect("dot range pattern is valid")
});

static MIXED_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}[.:]\d{2})\s*(am|pm)?\s*[-–]\s*(\d{1,2}[.:]\d{2})\s*(am|pm)?")
        .expect("mixed range pattern is valid")
});

/// One slot notation: recognizes a raw slot and splits it into start and end tokens.
pub trait SlotFormat: Sync {
    fn name(&self) -> &'static str;

    /// The start and end tokens, each with its own marker if one was written.
    fn split(&self, raw: &str) -> Option<(String, String)>;
}

/// `"8:50-9:40"`, `"S1:30pm-2:20pm"`, `"14:00 - 14:50"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColonRange;

/// `"8.50 - 9.40"`, `"S2.05pm - 2.55pm"`, `"11.30 - 12.20pm"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRange;

/// One side dotted, the other colon-separated: `"8.50 - 9:40"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedRange;

impl SlotFormat for ColonRange {
    fn name(&self) -> &'static str {
        "colon-range"
    }

    fn split(&self, raw: &str) -> Option<(String, String)> {
        split_with(&COLON_RANGE, raw)
    }
}

impl SlotFormat for DotRange {
    fn name(&self) -> &'static str {
        "dot-range"
    }

    fn split(&self, raw: &str) -> Option<(String, String)> {
        split_with(&DOT_RANGE, raw)
    }
}

impl SlotFormat for MixedRange {
    fn name(&self) -> &'static str {
        "mixed-range"
    }

    fn split(&self, raw: &str) -> Option<(String, String)> {
        split_with(&MIXED_RANGE, raw)
    }
}

fn split_with(pattern: &Regex, raw: &str) -> Option<(String, String)> {
    let caps = pattern.captures(raw)?;
    let side = |time: usize, marker: usize| {
        let mut token = caps[time].to_string();
        if let Some(m) = caps.get(marker) {
            token.push_str(m.as_str());
        }
        token
    };
    Some((side(1, 2), side(3, 4)))
}

/// Formats tried by [`SlotResolver::default`], in order.
pub static DEFAULT_FORMATS: &[&dyn SlotFormat] = &[&ColonRange, &DotRange, &MixedRange];

/// How one slot string was (or was not) resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotResolution {
    /// Empty, "free" or "break": not a class period.
    NonClass,
    /// No format recognized the text.
    Unrecognized,
    /// A format recognized the text but a side did not parse, or start > end.
    Invalid { format: &'static str },
    Resolved {
        interval: CanonicalInterval,
        format: &'static str,
    },
}

impl SlotResolution {
    pub fn interval(&self) -> Option<CanonicalInterval> {
        match self {
            SlotResolution::Resolved { interval, .. } => Some(*interval),
            _ => None,
        }
    }
}

/// An ordered list of slot formats.
#[derive(Clone)]
pub struct SlotResolver {
    formats: Vec<&'static dyn SlotFormat>,
}

impl Default for SlotResolver {
    fn default() -> Self {
        Self {
            formats: DEFAULT_FORMATS.to_vec(),
        }
    }
}

impl std::fmt::Debug for SlotResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.formats.iter().map(|format| format.name()))
            .finish()
    }
}

impl SlotResolver {
    /// A resolver trying exactly `formats`, in order.
    pub fn with_formats(formats: Vec<&'static dyn SlotFormat>) -> Self {
        Self { formats }
    }

    pub fn resolve<P>(&self, raw: &str, policy: &P) -> Option<CanonicalInterval>
    where
        P: MeridiemPolicy + ?Sized,
    {
        self.explain(raw, policy).interval()
    }

    /// Resolve `raw` and report which format (if any) handled it.
    ///
    /// The first format that recognizes the text decides the outcome; later
    /// formats are not consulted even if its sides fail to parse.
    pub fn explain<P>(&self, raw: &str, policy: &P) -> SlotResolution
    where
        P: MeridiemPolicy + ?Sized,
    {
        let trimmed = raw.trim();
        if is_non_class_slot(trimmed) {
            return SlotResolution::NonClass;
        }

        for format in &self.formats {
            let Some((start, end)) = format.split(trimmed) else {
                continue;
            };
            let interval = parse_time_with(&start, policy)
                .zip(parse_time_with(&end, policy))
                .and_then(|(start, end)| CanonicalInterval::new(start, end));
            return match interval {
                Some(interval) => SlotResolution::Resolved {
                    interval,
                    format: format.name(),
                },
                None => {
                    debug!(slot = raw, format = format.name(), "slot sides did not resolve");
                    SlotResolution::Invalid {
                        format: format.name(),
                    }
                }
            };
        }

        debug!(slot = raw, "no slot format recognized");
        SlotResolution::Unrecognized
    }
}

/// Whether a slot text denotes a period without a class.
pub fn is_non_class_slot(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || NON_CLASS_SLOTS
            .iter()
            .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
}

/// Resolve a slot string with the default formats and [`SlotMeridiemPolicy`].
///
/// # Examples
///
/// ```
/// use roomcheck_engine::slot::resolve_slot;
///
/// let interval = resolve_slot("8:50-9:40").unwrap();
/// assert_eq!(interval.to_string(), "08:50-09:40");
/// assert_eq!(resolve_slot("Break"), None);
/// ```
pub fn resolve_slot(raw: &str) -> Option<CanonicalInterval> {
    resolve_slot_with(raw, &SlotMeridiemPolicy::default())
}

pub fn resolve_slot_with<P>(raw: &str, policy: &P) -> Option<CanonicalInterval>
where
    P: MeridiemPolicy + ?Sized,
{
    SlotResolver::default().resolve(raw, policy)
}
