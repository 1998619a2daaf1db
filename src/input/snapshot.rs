//! Per-tick input snapshot and direction resolution

use std::collections::HashSet;

use crate::axis::Direction;

use super::chord::ChordSet;

/// Input tokens held during one tick
///
/// Built fresh by the input source each tick and handed over by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<String>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, token: impl Into<String>) {
        self.held.insert(token.into());
    }

    pub fn is_held(&self, token: &str) -> bool {
        self.held.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Combine the two opposing inputs of an axis into one direction
///
/// Holding both sides cancels out.
pub fn resolve_direction(positive_pressed: bool, negative_pressed: bool) -> Direction {
    match (positive_pressed, negative_pressed) {
        (true, false) => Direction::Positive,
        (false, true) => Direction::Negative,
        _ => Direction::Neutral,
    }
}

/// Resolve the direction of an axis bound to `positive` and `negative`
pub fn direction_for(positive: &ChordSet, negative: &ChordSet, snapshot: &InputSnapshot) -> Direction {
    resolve_direction(positive.is_pressed(snapshot), negative.is_pressed(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direction() {
        assert_eq!(resolve_direction(true, false), Direction::Positive);
        assert_eq!(resolve_direction(false, true), Direction::Negative);
        assert_eq!(resolve_direction(true, true), Direction::Neutral);
        assert_eq!(resolve_direction(false, false), Direction::Neutral);
    }

    #[test]
    fn test_direction_for_chords() {
        let positive: ChordSet = serde_yaml::from_str("[\"D\"]").unwrap();
        let negative: ChordSet = serde_yaml::from_str("[\"A\"]").unwrap();

        let snapshot: InputSnapshot = ["D"].into_iter().collect();
        assert_eq!(direction_for(&positive, &negative, &snapshot), Direction::Positive);

        let snapshot: InputSnapshot = ["A", "D"].into_iter().collect();
        assert_eq!(direction_for(&positive, &negative, &snapshot), Direction::Neutral);

        assert_eq!(
            direction_for(&positive, &negative, &InputSnapshot::new()),
            Direction::Neutral
        );
    }

    #[test]
    fn test_snapshot_press() {
        let mut snapshot = InputSnapshot::new();
        assert!(snapshot.is_empty());
        snapshot.press("W");
        assert!(snapshot.is_held("W"));
        assert!(!snapshot.is_held("S"));
    }
}
