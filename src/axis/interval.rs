//! Bounded intervals with independently open or closed ends
//!
//! Intervals are written in the usual mathematical notation, e.g. `[-1, 0)`
//! or `(0.25, 1]`, and parsed with [`str::parse`]. Numbers are read with
//! Rust's locale-independent float parser, so `.` is always the decimal
//! separator.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{AxisError, AxisResult};

/// Absolute tolerance for comparing boundary values
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Near-equality used for every boundary comparison
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < BOUNDARY_EPSILON
}

/// Span of real numbers with configurable inclusivity at each end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
    start_inclusive: bool,
    end_inclusive: bool,
}

impl Interval {
    /// Create an interval
    ///
    /// Only a closed interval may have `start == end`; any other interval
    /// must have `start < end`.
    pub fn new(start_inclusive: bool, start: f64, end_inclusive: bool, end: f64) -> AxisResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AxisError::validation(format!(
                "bounds must be finite, got {} and {}",
                start, end
            )));
        }

        if !(start_inclusive && end_inclusive) && approx_eq(start, end) {
            return Err(AxisError::validation(format!(
                "only a closed interval may start and end at {}",
                start
            )));
        }

        if start > end {
            return Err(AxisError::validation(format!(
                "start {} is greater than end {}",
                start, end
            )));
        }

        Ok(Self {
            start,
            end,
            start_inclusive,
            end_inclusive,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn start_inclusive(&self) -> bool {
        self.start_inclusive
    }

    pub fn end_inclusive(&self) -> bool {
        self.end_inclusive
    }

    fn satisfies_start(&self, v: f64) -> bool {
        if self.start_inclusive {
            v >= self.start
        } else {
            v > self.start
        }
    }

    fn satisfies_end(&self, v: f64) -> bool {
        if self.end_inclusive {
            v <= self.end
        } else {
            v < self.end
        }
    }

    /// Whether `v` lies inside the interval
    pub fn contains(&self, v: f64) -> bool {
        self.satisfies_start(v) && self.satisfies_end(v)
    }

    /// Whether `v` has dropped below the start of the interval
    pub fn is_below(&self, v: f64) -> bool {
        !self.satisfies_start(v)
    }

    /// Whether `v` has risen past the end of the interval
    pub fn is_above(&self, v: f64) -> bool {
        !self.satisfies_end(v)
    }

    /// Clamp `v` into `[start, end]`, ignoring inclusivity
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.start, self.end)
    }

    /// Ordering used to sort the regions of an axis
    ///
    /// Intervals are ordered by start. On equal starts (within
    /// [`BOUNDARY_EPSILON`]) a closed start sorts before an open one, so a
    /// point interval `[a, a]` precedes its neighbour `(a, b]`.
    pub fn compare(&self, other: &Interval) -> Ordering {
        if approx_eq(self.start, other.start) {
            // `true > false`, reversed so that closed starts come first
            other.start_inclusive.cmp(&self.start_inclusive)
        } else {
            self.start.total_cmp(&other.start)
        }
    }
}

impl FromStr for Interval {
    type Err = AxisError;

    fn from_str(text: &str) -> AxisResult<Self> {
        let literal = text.trim();

        let start_inclusive = match literal.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(AxisError::parse(text, "interval must start with '(' or '['")),
        };

        let end_inclusive = match literal.chars().last() {
            Some(']') if literal.len() > 1 => true,
            Some(')') if literal.len() > 1 => false,
            _ => return Err(AxisError::parse(text, "interval must end with ')' or ']'")),
        };

        let inner = &literal[1..literal.len() - 1];
        let numbers: Vec<&str> = inner.split(',').map(str::trim).collect();
        if numbers.len() != 2 {
            return Err(AxisError::parse(
                text,
                format!("expected exactly two numbers, found {}", numbers.len()),
            ));
        }

        let start = parse_bound(text, numbers[0])?;
        let end = parse_bound(text, numbers[1])?;

        Interval::new(start_inclusive, start, end_inclusive, end)
    }
}

fn parse_bound(literal: &str, token: &str) -> AxisResult<f64> {
    token
        .parse::<f64>()
        .map_err(|e| AxisError::parse(literal, format!("'{}' is not a number: {}", token, e)))
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.start_inclusive { '[' } else { '(' },
            self.start,
            self.end,
            if self.end_inclusive { ']' } else { ')' }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_half_open() {
        let interval: Interval = "[-1, 0)".parse().unwrap();
        assert_eq!(interval.start(), -1.0);
        assert!(interval.start_inclusive());
        assert_eq!(interval.end(), 0.0);
        assert!(!interval.end_inclusive());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let interval: Interval = "  (0.25 ,   1.5]  ".parse().unwrap();
        assert_eq!(interval.start(), 0.25);
        assert!(!interval.start_inclusive());
        assert_eq!(interval.end(), 1.5);
        assert!(interval.end_inclusive());
    }

    #[test]
    fn test_parse_rejects_bad_brackets() {
        assert!(matches!("{0, 1]".parse::<Interval>(), Err(AxisError::Parse { .. })));
        assert!(matches!("[0, 1}".parse::<Interval>(), Err(AxisError::Parse { .. })));
        assert!(matches!("0, 1".parse::<Interval>(), Err(AxisError::Parse { .. })));
        assert!(matches!("".parse::<Interval>(), Err(AxisError::Parse { .. })));
        assert!(matches!("[".parse::<Interval>(), Err(AxisError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_wrong_token_count() {
        assert!(matches!("[0, 0,5]".parse::<Interval>(), Err(AxisError::Parse { .. })));
        assert!(matches!("[0]".parse::<Interval>(), Err(AxisError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        assert!(matches!("[zero, 1]".parse::<Interval>(), Err(AxisError::Parse { .. })));
        assert!(matches!("[0, ]".parse::<Interval>(), Err(AxisError::Parse { .. })));
    }

    #[test]
    fn test_parse_applies_validity_rule() {
        assert!(matches!("[1, 0]".parse::<Interval>(), Err(AxisError::Validation { .. })));
        assert!(matches!("[0.5, 0.5)".parse::<Interval>(), Err(AxisError::Validation { .. })));
        assert!("[0.5, 0.5]".parse::<Interval>().is_ok());
    }

    #[test]
    fn test_degenerate_requires_closed_ends() {
        assert!(Interval::new(true, 1.0, true, 1.0).is_ok());
        assert!(Interval::new(false, 1.0, true, 1.0).is_err());
        assert!(Interval::new(true, 1.0, false, 1.0).is_err());
        // Within tolerance counts as equal
        assert!(Interval::new(true, 1.0, false, 1.0 + 1e-12).is_err());
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        assert!(Interval::new(true, f64::NAN, true, 1.0).is_err());
        assert!(Interval::new(true, 0.0, true, f64::INFINITY).is_err());
    }

    #[test]
    fn test_contains_and_sides() {
        let interval = Interval::new(false, 0.0, true, 1.0).unwrap();

        assert!(!interval.contains(0.0));
        assert!(interval.contains(0.5));
        assert!(interval.contains(1.0));
        assert!(!interval.contains(1.5));

        assert!(interval.is_below(0.0));
        assert!(interval.is_below(-0.1));
        assert!(!interval.is_below(0.5));

        assert!(interval.is_above(1.1));
        assert!(!interval.is_above(1.0));
    }

    #[test]
    fn test_compare_orders_by_start() {
        let a: Interval = "[-1, 0)".parse().unwrap();
        let b: Interval = "[0, 1]".parse().unwrap();
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn test_compare_closed_start_first_on_tie() {
        let point: Interval = "[0, 0]".parse().unwrap();
        let open: Interval = "(0, 1]".parse().unwrap();
        assert_eq!(point.compare(&open), Ordering::Less);
        assert_eq!(open.compare(&point), Ordering::Greater);
        assert_eq!(point.compare(&point), Ordering::Equal);
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["[-1, 0)", "(0, 1]", "[0.125, 0.5]", "(-3.5, 2e-3)"] {
            let interval: Interval = text.parse().unwrap();
            let reparsed: Interval = interval.to_string().parse().unwrap();
            assert_eq!(interval, reparsed);
        }
    }
}
