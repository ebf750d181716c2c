//! Placeholder handling for translated strings.
//!
//! Qt strings carry two kinds of markers:
//! - `%1` .. `%99`: positional arguments, filled by the caller
//! - `%n`: the count of a plural message, filled by the translator
//!
//! Either may carry an `L` (`%L1`, `%Ln`) asking for locale-aware number
//! formatting. A `%` followed by anything else is plain text.

use std::collections::BTreeSet;

use winnow::combinator::{alt, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_while};

/// A piece of a parsed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// `%k` or `%Lk`, with `index` in `1..=99`.
    Arg { index: u8, localized: bool },
    /// `%n` or `%Ln`.
    Count { localized: bool },
}

/// Placeholders used by a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    /// Distinct argument indices, ascending.
    pub args: BTreeSet<u8>,
    /// Whether `%n` appears.
    pub count: bool,
}

/// Split a string into literal text and placeholders.
///
/// Parsing never fails: anything that is not a placeholder is literal text.
///
/// # Example
///
/// ```
/// use tscat::format::{parse_placeholders, Segment};
///
/// let segments = parse_placeholders("%1 i %L2, 100%");
/// assert_eq!(segments, vec![
///     Segment::Arg { index: 1, localized: false },
///     Segment::Literal(" i ".to_string()),
///     Segment::Arg { index: 2, localized: true },
///     Segment::Literal(", 100%".to_string()),
/// ]);
/// ```
pub fn parse_placeholders(text: &str) -> Vec<Segment> {
    let mut remaining = text;
    let parsed: ModalResult<Vec<Segment>> = repeat(0.., segment).parse_next(&mut remaining);
    match parsed {
        Ok(segments) if remaining.is_empty() => merge_literals(segments),
        _ => vec![Segment::Literal(text.to_string())],
    }
}

/// Replace every `%n` with `count`.
///
/// # Example
///
/// ```
/// use tscat::format::substitute_count;
///
/// assert_eq!(substitute_count("%n aktivnih veza", 5), "5 aktivnih veza");
/// assert_eq!(substitute_count("%1 and %n", 2), "%1 and 2");
/// ```
pub fn substitute_count(text: &str, count: i64) -> String {
    render(text, |segment| match segment {
        Segment::Count { .. } => Some(count.to_string()),
        _ => None,
    })
}

/// Replace `%k` with `args[k - 1]`.
///
/// Placeholders without a matching argument stay in the output unchanged,
/// as does `%n`.
///
/// # Example
///
/// ```
/// use tscat::format::format_args;
///
/// let text = format_args("Ukupno: %1 (Tor: %2)", &["12", "3"]);
/// assert_eq!(text, "Ukupno: 12 (Tor: 3)");
/// assert_eq!(format_args("%1 i %2", &["A"]), "A i %2");
/// ```
pub fn format_args<S: AsRef<str>>(text: &str, args: &[S]) -> String {
    render(text, |segment| match segment {
        Segment::Arg { index, .. } => args
            .get(usize::from(*index) - 1)
            .map(|arg| arg.as_ref().to_string()),
        _ => None,
    })
}

/// Collect the placeholders used by a string.
pub fn placeholders(text: &str) -> Placeholders {
    let mut found = Placeholders::default();
    for segment in parse_placeholders(text) {
        match segment {
            Segment::Arg { index, .. } => {
                found.args.insert(index);
            }
            Segment::Count { .. } => found.count = true,
            Segment::Literal(_) => {}
        }
    }
    found
}

/// Rebuild a string, replacing placeholders for which `replace` returns text.
fn render(text: &str, replace: impl Fn(&Segment) -> Option<String>) -> String {
    let mut output = String::with_capacity(text.len());
    for segment in parse_placeholders(text) {
        if let Some(replacement) = replace(&segment) {
            output.push_str(&replacement);
            continue;
        }
        match segment {
            Segment::Literal(literal) => output.push_str(&literal),
            Segment::Arg { index, localized } => {
                output.push('%');
                if localized {
                    output.push('L');
                }
                output.push_str(&index.to_string());
            }
            Segment::Count { localized } => {
                output.push_str(if localized { "%Ln" } else { "%n" });
            }
        }
    }
    output
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }
    result
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder, literal_char)).parse_next(input)
}

/// Parse `%` `L`? (`n` | index).
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    let (localized, index) = preceded(
        '%',
        (
            opt('L').map(|l| l.is_some()),
            alt(('n'.value(None), arg_index.map(Some))),
        ),
    )
    .parse_next(input)?;
    Ok(match index {
        Some(index) => Segment::Arg { index, localized },
        None => Segment::Count { localized },
    })
}

/// One or two digits without a leading zero.
fn arg_index(input: &mut &str) -> ModalResult<u8> {
    take_while(1..=2, |c: char| c.is_ascii_digit())
        .verify_map(|digits: &str| {
            if digits.starts_with('0') {
                None
            } else {
                digits.parse::<u8>().ok()
            }
        })
        .parse_next(input)
}

fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}
