use serde::{Deserialize, Serialize};

/// Source position within a file (1-based line/column).
///
/// Either coordinate is `-1` when the producer of the tree did not record it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number, or `-1`.
    pub line: i32,
    /// 1-based column number, or `-1`.
    pub column: i32,
}

impl Position {
    /// Sentinel for positions that were never recorded.
    pub const UNKNOWN: Position = Position {
        line: -1,
        column: -1,
    };

    pub fn new(line: i32, column: i32) -> Self {
        Self { line, column }
    }

    pub fn is_known(&self) -> bool {
        self.line >= 0 && self.column >= 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// A range in source code, from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive).
    #[serde(default)]
    pub start: Position,
    /// End position (exclusive).
    #[serde(default)]
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A span starting and ending at `line:column`.
    pub fn at(line: i32, column: i32) -> Self {
        let pos = Position::new(line, column);
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Create a dummy span for nodes built without source information.
    pub fn dummy() -> Self {
        Self::default()
    }

    /// Merge two spans into one that covers both.
    ///
    /// Unknown positions never win over known ones.
    pub fn merge(&self, other: &Span) -> Span {
        let start = match (self.start.is_known(), other.start.is_known()) {
            (true, true) => {
                if (self.start.line, self.start.column) <= (other.start.line, other.start.column) {
                    self.start
                } else {
                    other.start
                }
            }
            (true, false) => self.start,
            _ => other.start,
        };
        let end = match (self.end.is_known(), other.end.is_known()) {
            (true, true) => {
                if (self.end.line, self.end.column) >= (other.end.line, other.end.column) {
                    self.end
                } else {
                    other.end
                }
            }
            (true, false) => self.end,
            _ => other.end,
        };
        Span { start, end }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unknown() {
        let span = Span::dummy();
        assert_eq!(span.start, Position::UNKNOWN);
        assert!(!span.start.is_known());
        assert_eq!(span.to_string(), "<unknown>");
    }

    #[test]
    fn merge_covers_both() {
        let a = Span::new(Position::new(1, 5), Position::new(1, 9));
        let b = Span::new(Position::new(1, 2), Position::new(2, 1));
        let merged = a.merge(&b);
        assert_eq!(merged.start, Position::new(1, 2));
        assert_eq!(merged.end, Position::new(2, 1));
    }

    #[test]
    fn merge_prefers_known_positions() {
        let known = Span::at(3, 4);
        let merged = Span::dummy().merge(&known);
        assert_eq!(merged.start, Position::new(3, 4));
        assert_eq!(merged.end, Position::new(3, 4));
    }
}
