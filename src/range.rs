//! # Code Ranges
//!
//! Users ask for label batches with a compact range syntax:
//!
//! ```text
//! 1-50                 → kf-0001 … kf-0050
//! 1-10,40-77,91        → three ranges, 49 labels
//! 102,205,350          → three single codes
//! ```
//!
//! [`parse`] is best-effort and silently drops tokens it cannot read.
//! [`parse_strict`] rejects the whole input on the first bad token.
//! [`parse_report`] does the lenient parse and also returns the rejected
//! tokens so a UI can point at them.
//!
//! Ranges are never merged or deduplicated: `1-3,2-4` yields six labels.

use serde::Serialize;
use tracing::debug;

use crate::code::ItemCode;
use crate::error::RangeError;

/// Inclusive interval of sequence numbers. Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeRange {
    start: u32,
    end: u32,
}

impl CodeRange {
    /// Build a range, or `None` if `start > end`.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn single(n: u32) -> Self {
        Self { start: n, end: n }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of codes covered.
    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    /// Never true: a range covers at least one code.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn codes(&self) -> impl Iterator<Item = ItemCode> + '_ {
        (self.start..=self.end).map(ItemCode::from_number)
    }
}

/// One parsed token, or the reason it was rejected.
fn parse_token(token: &str) -> Result<CodeRange, RangeError> {
    let malformed = || RangeError::Malformed(token.to_string());

    match token.split_once('-') {
        Some((a, b)) => {
            let start: u32 = a.trim().parse().map_err(|_| malformed())?;
            let end: u32 = b.trim().parse().map_err(|_| malformed())?;
            CodeRange::new(start, end).ok_or_else(|| RangeError::Reversed {
                token: token.to_string(),
                start,
                end,
            })
        }
        None => token.parse().map(CodeRange::single).map_err(|_| malformed()),
    }
}

fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Lenient parse: malformed or reversed tokens are dropped.
pub fn parse(input: &str) -> Vec<CodeRange> {
    parse_report(input).0
}

/// Lenient parse that also returns the rejected tokens.
pub fn parse_report(input: &str) -> (Vec<CodeRange>, Vec<RangeError>) {
    let mut ranges = Vec::new();
    let mut rejected = Vec::new();

    for token in tokens(input) {
        match parse_token(token) {
            Ok(range) => ranges.push(range),
            Err(e) => {
                debug!(token, error = %e, "dropping range token");
                rejected.push(e);
            }
        }
    }

    (ranges, rejected)
}

/// Strict parse: the first malformed token fails the whole input.
pub fn parse_strict(input: &str) -> Result<Vec<CodeRange>, RangeError> {
    let ranges = tokens(input).map(parse_token).collect::<Result<Vec<_>, _>>()?;
    if ranges.is_empty() {
        return Err(RangeError::Empty);
    }
    Ok(ranges)
}

/// Total number of labels the ranges expand to.
pub fn total_count(ranges: &[CodeRange]) -> u64 {
    ranges.iter().map(CodeRange::len).sum()
}

/// Expand ranges into codes, preserving input order.
pub fn expand(ranges: &[CodeRange]) -> Vec<ItemCode> {
    ranges.iter().flat_map(CodeRange::codes).collect()
}

/// Human-readable summary: `kf-0001-kf-0010, kf-0015`.
pub fn summary(ranges: &[CodeRange]) -> String {
    ranges
        .iter()
        .map(|r| {
            if r.start == r.end {
                ItemCode::from_number(r.start).to_string()
            } else {
                format!(
                    "{}-{}",
                    ItemCode::from_number(r.start),
                    ItemCode::from_number(r.end)
                )
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_mixed() {
        let ranges = parse("1-10,15,20-22");
        assert_eq!(
            ranges,
            vec![
                CodeRange { start: 1, end: 10 },
                CodeRange { start: 15, end: 15 },
                CodeRange { start: 20, end: 22 },
            ]
        );
        assert_eq!(total_count(&ranges), 14);

        let numbers: Vec<u32> = expand(&ranges).iter().map(ItemCode::number).collect();
        let expected: Vec<u32> = (1..=10).chain([15]).chain(20..=22).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_parse_drops_reversed() {
        assert!(parse("5-3").is_empty());
        assert_eq!(parse("1-2,5-3"), vec![CodeRange { start: 1, end: 2 }]);
    }

    #[test]
    fn test_parse_drops_garbage_and_tolerates_spaces() {
        let ranges = parse(" 1 - 3 , abc, ,7,x-9, 4-");
        assert_eq!(ranges, vec![CodeRange { start: 1, end: 3 }, CodeRange::single(7)]);
    }

    #[test]
    fn test_overlaps_are_not_merged() {
        let ranges = parse("1-3,2-4");
        assert_eq!(total_count(&ranges), 6);
        assert_eq!(expand(&ranges).len(), 6);
    }

    #[test]
    fn test_parse_report_lists_rejects() {
        let (ranges, rejected) = parse_report("1-10,5-3,zz");
        assert_eq!(ranges.len(), 1);
        assert_eq!(
            rejected,
            vec![
                RangeError::Reversed { token: "5-3".into(), start: 5, end: 3 },
                RangeError::Malformed("zz".into()),
            ]
        );
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(parse_strict("1-10,15").unwrap().len(), 2);
        assert_eq!(
            parse_strict("1-10,5-3").unwrap_err(),
            RangeError::Reversed { token: "5-3".into(), start: 5, end: 3 }
        );
        assert_eq!(parse_strict(" , ").unwrap_err(), RangeError::Empty);
        assert_eq!(parse_strict("-5").unwrap_err(), RangeError::Malformed("-5".into()));
    }

    #[test]
    fn test_new_rejects_reversed() {
        assert_eq!(CodeRange::new(5, 3), None);
        let full = CodeRange::new(0, u32::MAX).unwrap();
        assert_eq!(full.len(), u64::from(u32::MAX) + 1);
        assert_eq!((full.start(), full.end()), (0, u32::MAX));
    }

    #[test]
    fn test_summary() {
        let ranges = parse("1-10,15");
        assert_eq!(summary(&ranges), "kf-0001-kf-0010, kf-0015");
        assert_eq!(summary(&[]), "");
    }
}
