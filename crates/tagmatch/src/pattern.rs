//! The pattern grammar.
//!
//! A pattern is a tree of [`Pattern`] nodes. Every node has an optional
//! nested pattern (`child`, what must match inside or after entering the
//! construct) and an optional continuation (`next`, what must match right
//! after the construct at the same tree depth).

use crate::error::Result;
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Retry the nested pattern at each following sibling until it matches.
    SkipUntil,
    /// Match the nested pattern in a fresh frame, resuming at partial tails.
    Repeat,
    /// Element with exactly this tag name.
    Tag(String),
    /// Text node with exactly this text.
    Text(String),
    /// Text node whose text contains a match of this expression.
    Regex(Regex),
    /// Push a fresh binding frame before the nested pattern.
    Scope,
    /// Record the nested pattern's captured text under this name.
    Bind(String),
}

impl PatternKind {
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::SkipUntil => "skip-until",
            PatternKind::Repeat => "repeat",
            PatternKind::Tag(_) => "tag",
            PatternKind::Text(_) => "text",
            PatternKind::Regex(_) => "regex",
            PatternKind::Scope => "scope",
            PatternKind::Bind(_) => "bind",
        }
    }
}

/// One node of the pattern grammar.
///
/// # Example
///
/// ```
/// use tagmatch::Pattern;
///
/// // <p>{$price /[0-9]+/}</p>
/// let pattern = Pattern::tag("p")
///     .with_child(Pattern::bind("price").with_child(Pattern::regex("[0-9]+").unwrap()));
///
/// assert_eq!(pattern.to_string(), "<p>{$price /[0-9]+/}</p>");
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    kind: PatternKind,
    child: Option<Box<Pattern>>,
    next: Option<Box<Pattern>>,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            child: None,
            next: None,
        }
    }

    pub fn skip_until() -> Self {
        Self::new(PatternKind::SkipUntil)
    }

    pub fn repeat() -> Self {
        Self::new(PatternKind::Repeat)
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(PatternKind::Tag(name.into()))
    }

    pub fn text(literal: impl Into<String>) -> Self {
        Self::new(PatternKind::Text(literal.into()))
    }

    /// Compile `expr` into a text pattern. The expression is not anchored.
    pub fn regex(expr: &str) -> Result<Self> {
        Ok(Self::from_regex(Regex::new(expr)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self::new(PatternKind::Regex(regex))
    }

    pub fn scope() -> Self {
        Self::new(PatternKind::Scope)
    }

    pub fn bind(name: impl Into<String>) -> Self {
        Self::new(PatternKind::Bind(name.into()))
    }

    pub fn with_child(mut self, child: Pattern) -> Self {
        self.child = Some(Box::new(child));
        self
    }

    pub fn with_next(mut self, next: Pattern) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    /// Link `patterns` into one sibling chain through their `next` slots,
    /// returning its head. Each pattern's existing continuation is replaced.
    pub fn sequence(patterns: impl IntoIterator<Item = Pattern>) -> Option<Pattern> {
        let patterns: Vec<Pattern> = patterns.into_iter().collect();
        patterns.into_iter().rev().fold(None, |next, mut pattern| {
            pattern.next = next.map(Box::new);
            Some(pattern)
        })
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn child(&self) -> Option<&Pattern> {
        self.child.as_deref()
    }

    pub fn next(&self) -> Option<&Pattern> {
        self.next.as_deref()
    }
}

// Long sibling chains and deep nesting would overflow the stack with the
// derived recursive drop, so links are detached and dropped one at a time.
impl Drop for Pattern {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Pattern>> = Vec::new();
        pending.extend(self.child.take());
        pending.extend(self.next.take());
        while let Some(mut pattern) = pending.pop() {
            pending.extend(pattern.child.take());
            pending.extend(pattern.next.take());
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = Some(self);
        while let Some(pattern) = current {
            pattern.fmt_node(f)?;
            current = pattern.next();
        }
        Ok(())
    }
}

impl Pattern {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match &self.kind {
            PatternKind::Tag(name) => (format!("<{}>", name), format!("</{}>", name)),
            PatternKind::Text(text) => (format!("{:?}", text), String::new()),
            PatternKind::Regex(regex) => (format!("/{}/", regex.as_str()), String::new()),
            PatternKind::SkipUntil => ("{...".to_string(), "}".to_string()),
            PatternKind::Repeat => ("{*".to_string(), "}".to_string()),
            PatternKind::Scope => ("{scope".to_string(), "}".to_string()),
            PatternKind::Bind(name) => (format!("{{${}", name), "}".to_string()),
        };
        f.write_str(&open)?;
        if let Some(child) = self.child() {
            if !matches!(self.kind, PatternKind::Tag(_)) {
                f.write_str(" ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(&close)
    }
}
