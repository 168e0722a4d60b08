/// Outcome of one match attempt.
///
/// A mismatch is an ordinary outcome, not an error. `Partial` means the
/// pattern ran out before the tree did: matching stopped at `tail`, and an
/// enclosing construct may resume from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<N> {
    Match { value: Option<String> },
    Partial { tail: N },
    NoMatch,
}

impl<N> MatchResult<N> {
    pub fn matched() -> Self {
        MatchResult::Match { value: None }
    }

    pub fn captured(value: impl Into<String>) -> Self {
        MatchResult::Match {
            value: Some(value.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, MatchResult::Match { .. })
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, MatchResult::Partial { .. })
    }

    pub fn tail(&self) -> Option<&N> {
        match self {
            MatchResult::Partial { tail } => Some(tail),
            _ => None,
        }
    }

    /// Text captured by a text literal or text pattern.
    pub fn value(&self) -> Option<&str> {
        match self {
            MatchResult::Match { value } => value.as_deref(),
            _ => None,
        }
    }
}
