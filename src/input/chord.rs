//! Key chords and alternative chord sets
//!
//! A chord is written as tokens joined by `+` (e.g. `"LShift+W"`) and is
//! pressed when every token is held. A [`ChordSet`] lists alternative
//! chords; it is pressed when any of them is.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::snapshot::InputSnapshot;

/// Chord literal that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid key chord '{literal}': {reason}")]
pub struct ChordError {
    pub literal: String,
    pub reason: &'static str,
}

/// Set of input tokens that must be held together
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chord {
    tokens: BTreeSet<String>,
}

impl Chord {
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Whether every token of the chord is held in `snapshot`
    pub fn is_pressed(&self, snapshot: &InputSnapshot) -> bool {
        self.tokens.iter().all(|t| snapshot.is_held(t))
    }
}

impl FromStr for Chord {
    type Err = ChordError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let mut tokens = BTreeSet::new();
        for token in literal.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(ChordError {
                    literal: literal.to_string(),
                    reason: "empty key name",
                });
            }
            tokens.insert(token.to_string());
        }
        Ok(Self { tokens })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.tokens().collect();
        write!(f, "{}", joined.join("+"))
    }
}

/// Alternative chords bound to one action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ChordSet {
    chords: BTreeSet<Chord>,
}

impl ChordSet {
    pub fn new(chords: impl IntoIterator<Item = Chord>) -> Self {
        Self {
            chords: chords.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }

    /// Whether any chord of the set is pressed
    pub fn is_pressed(&self, snapshot: &InputSnapshot) -> bool {
        self.chords.iter().any(|c| c.is_pressed(snapshot))
    }
}

impl TryFrom<Vec<String>> for ChordSet {
    type Error = ChordError;

    fn try_from(literals: Vec<String>) -> Result<Self, Self::Error> {
        literals
            .iter()
            .map(|l| l.parse::<Chord>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|chords| Self { chords })
    }
}

impl From<ChordSet> for Vec<String> {
    fn from(set: ChordSet) -> Self {
        set.chords.iter().map(Chord::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(tokens: &[&str]) -> InputSnapshot {
        InputSnapshot::from_iter(tokens.iter().copied())
    }

    #[test]
    fn test_parse_chord() {
        let chord: Chord = "LShift + W".parse().unwrap();
        let tokens: Vec<&str> = chord.tokens().collect();
        assert_eq!(tokens, vec!["LShift", "W"]);
        assert_eq!(chord.to_string(), "LShift+W");
    }

    #[test]
    fn test_parse_rejects_empty_token() {
        assert!("".parse::<Chord>().is_err());
        assert!("A+".parse::<Chord>().is_err());
        assert!("A++B".parse::<Chord>().is_err());
    }

    #[test]
    fn test_chord_requires_all_tokens() {
        let chord: Chord = "LControl+C".parse().unwrap();
        assert!(!chord.is_pressed(&held(&["C"])));
        assert!(chord.is_pressed(&held(&["C", "LControl"])));
        assert!(chord.is_pressed(&held(&["C", "LControl", "X"])));
    }

    #[test]
    fn test_chord_set_any_alternative() {
        let set: ChordSet = serde_yaml::from_str("[\"W\", \"LShift+Up\"]").unwrap();
        assert!(set.is_pressed(&held(&["W"])));
        assert!(set.is_pressed(&held(&["Up", "LShift"])));
        assert!(!set.is_pressed(&held(&["Up"])));
        assert!(!ChordSet::default().is_pressed(&held(&["W"])));
    }

    #[test]
    fn test_chord_set_from_chords() {
        let set = ChordSet::new(["Q".parse::<Chord>().unwrap(), "LShift+E".parse().unwrap()]);
        assert_eq!(set.chords().count(), 2);
        assert!(set.is_pressed(&held(&["E", "LShift"])));

        let literals: Vec<String> = set.into();
        assert_eq!(literals, vec!["E+LShift".to_string(), "Q".to_string()]);
    }

    #[test]
    fn test_chord_set_deserialize_error() {
        let result: Result<ChordSet, _> = serde_yaml::from_str("[\"W+\"]");
        assert!(result.is_err());
    }
}
