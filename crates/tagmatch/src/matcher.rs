//! The recursive matcher.

use crate::error::{Error, Result};
use crate::pattern::{Pattern, PatternKind};
use crate::result::MatchResult;
use crate::scope::ScopeChain;
use crate::stack::ensure_sufficient_stack;
use crate::tree::TreeNode;
use tracing::{debug, trace};

/// Default limit on pattern nesting before [`Error::DepthLimitExceeded`].
/// Sibling continuations do not count toward it.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

type Step<N> = (MatchResult<N>, ScopeChain);

/// Matches patterns against trees.
///
/// # Example
///
/// ```
/// use tagmatch::{Matcher, Pattern, ScopeChain};
/// # use tagmatch::TreeNode;
/// # #[derive(Clone)]
/// # struct Text(&'static str);
/// # impl TreeNode for Text {
/// #     fn tag(&self) -> Option<&str> { None }
/// #     fn is_text(&self) -> bool { true }
/// #     fn text(&self) -> Option<&str> { Some(self.0) }
/// #     fn child(&self) -> Option<Self> { None }
/// #     fn next(&self) -> Option<Self> { None }
/// # }
///
/// let pattern = Pattern::bind("n").with_child(Pattern::regex("[0-9]+").unwrap());
/// let (result, scopes) = Matcher::new()
///     .run(Some(&pattern), Some(Text("42")), &ScopeChain::new())
///     .unwrap();
///
/// assert!(result.is_valid());
/// assert_eq!(scopes.get("n"), Some("42"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    max_depth: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Match `pattern` against `tree`, starting from `scopes`.
    ///
    /// Returns the outcome and the resulting chain. `scopes` itself is never
    /// modified, and a failed outcome always comes back with an unchanged
    /// copy of it.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run<N: TreeNode>(
        &self,
        pattern: Option<&Pattern>,
        tree: Option<N>,
        scopes: &ScopeChain,
    ) -> Result<(MatchResult<N>, ScopeChain)> {
        let (result, chain) = self.walk(pattern, tree, scopes, 0)?;
        debug!(
            valid = result.is_valid(),
            partial = result.is_partial(),
            frames = chain.depth(),
            "match finished"
        );
        Ok((result, chain))
    }

    fn walk<N: TreeNode>(
        &self,
        pattern: Option<&Pattern>,
        tree: Option<N>,
        scopes: &ScopeChain,
        depth: usize,
    ) -> Result<Step<N>> {
        if depth > self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        let Some(pattern) = pattern else {
            let result = match tree {
                None => MatchResult::matched(),
                Some(tail) => MatchResult::Partial { tail },
            };
            return Ok((result, scopes.clone()));
        };

        trace!(construct = pattern.kind().name(), depth, "matching");
        ensure_sufficient_stack(|| match pattern.kind() {
            PatternKind::SkipUntil => self.skip_until(pattern, tree, scopes, depth),
            PatternKind::Repeat => self.repeat(pattern, tree, scopes, depth),
            PatternKind::Tag(name) => self.tag(name, pattern, tree, scopes, depth),
            PatternKind::Text(literal) => Ok((
                match_text(tree.as_ref(), |text| text == literal.as_str()),
                scopes.clone(),
            )),
            PatternKind::Regex(regex) => Ok((
                match_text(tree.as_ref(), |text| regex.is_match(text)),
                scopes.clone(),
            )),
            PatternKind::Scope => self.scope(pattern, tree, scopes, depth),
            PatternKind::Bind(name) => self.bind(name, pattern, tree, scopes, depth),
        })
    }

    fn skip_until<N: TreeNode>(
        &self,
        pattern: &Pattern,
        tree: Option<N>,
        scopes: &ScopeChain,
        depth: usize,
    ) -> Result<Step<N>> {
        let mut cursor = tree;
        let mut skipped = 0usize;
        loop {
            let (result, chain) = self.walk(pattern.child(), cursor.clone(), scopes, depth + 1)?;
            if result.is_valid() {
                debug!(skipped, "skip-until found a match");
                return Ok((result, chain));
            }
            match cursor {
                Some(node) => {
                    cursor = node.next();
                    skipped += 1;
                }
                None => return Ok((MatchResult::NoMatch, scopes.clone())),
            }
        }
    }

    fn repeat<N: TreeNode>(
        &self,
        pattern: &Pattern,
        tree: Option<N>,
        scopes: &ScopeChain,
        depth: usize,
    ) -> Result<Step<N>> {
        let inner = inner(pattern)?;
        let mut cursor = tree;
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let (result, chain) = self.walk(Some(inner), cursor, &scopes.with_frame(), depth + 1)?;
            match result {
                // Partial attempts are dropped along with their bindings.
                MatchResult::Partial { tail } => cursor = Some(tail),
                matched @ MatchResult::Match { .. } => {
                    debug!(attempts, "repeat matched");
                    return Ok((matched, chain));
                }
                MatchResult::NoMatch => return Ok((MatchResult::NoMatch, scopes.clone())),
            }
        }
    }

    fn tag<N: TreeNode>(
        &self,
        name: &str,
        pattern: &Pattern,
        tree: Option<N>,
        scopes: &ScopeChain,
        depth: usize,
    ) -> Result<Step<N>> {
        let Some(node) = tree.filter(|node| node.tag() == Some(name)) else {
            return Ok((MatchResult::NoMatch, scopes.clone()));
        };

        let (inner, inner_chain) = self.walk(pattern.child(), node.child(), scopes, depth + 1)?;
        if !inner.is_valid() {
            return Ok((inner, scopes.clone()));
        }

        // The continuation stays at this nesting level.
        let (rest, rest_chain) = self.walk(pattern.next(), node.next(), &inner_chain, depth)?;
        if !rest.is_valid() {
            return Ok((rest, scopes.clone()));
        }

        let mut merged = inner_chain;
        merged.merge(&rest_chain);
        Ok((MatchResult::matched(), merged))
    }

    fn scope<N: TreeNode>(
        &self,
        pattern: &Pattern,
        tree: Option<N>,
        scopes: &ScopeChain,
        depth: usize,
    ) -> Result<Step<N>> {
        let inner = inner(pattern)?;
        let (result, chain) = self.walk(Some(inner), tree, &scopes.with_frame(), depth + 1)?;
        if result.is_valid() {
            Ok((result, chain))
        } else {
            Ok((result, scopes.clone()))
        }
    }

    fn bind<N: TreeNode>(
        &self,
        name: &str,
        pattern: &Pattern,
        tree: Option<N>,
        scopes: &ScopeChain,
        depth: usize,
    ) -> Result<Step<N>> {
        let inner = inner(pattern)?;
        let (result, mut chain) = self.walk(Some(inner), tree, scopes, depth + 1)?;
        if let Some(value) = result.value() {
            trace!(variable = name, value, "bound");
            chain.set(name, value);
        }
        Ok((result, chain))
    }
}

/// Match `pattern` against `tree` with the default [`Matcher`].
pub fn match_tree<N: TreeNode>(
    pattern: Option<&Pattern>,
    tree: Option<N>,
    scopes: &ScopeChain,
) -> Result<(MatchResult<N>, ScopeChain)> {
    Matcher::default().run(pattern, tree, scopes)
}

fn inner(pattern: &Pattern) -> Result<&Pattern> {
    pattern.child().ok_or(Error::MissingInner {
        construct: pattern.kind().name(),
    })
}

fn match_text<N: TreeNode>(tree: Option<&N>, accept: impl FnOnce(&str) -> bool) -> MatchResult<N> {
    match tree.filter(|node| node.is_text()).and_then(|node| node.text()) {
        Some(text) if accept(text) => MatchResult::captured(text),
        _ => MatchResult::NoMatch,
    }
}
