//! Declarative pattern matching over ordered trees.
//!
//! A [`Pattern`] describes the expected shape of a tree (literal tags,
//! literal or regex text, wildcard skips, repetition) and names the text it
//! wants to capture. The [`Matcher`] walks any [`TreeNode`] implementation
//! against it, reporting whether the tree matched and collecting captures in
//! a [`ScopeChain`].
//!
//! # Example
//!
//! ```
//! use tagmatch::{match_tree, Pattern, ScopeChain, TreeNode};
//!
//! #[derive(Clone)]
//! struct Leaf(&'static str);
//!
//! impl TreeNode for Leaf {
//!     fn tag(&self) -> Option<&str> { None }
//!     fn is_text(&self) -> bool { true }
//!     fn text(&self) -> Option<&str> { Some(self.0) }
//!     fn child(&self) -> Option<Self> { None }
//!     fn next(&self) -> Option<Self> { None }
//! }
//!
//! let pattern = Pattern::bind("greeting").with_child(Pattern::text("hello"));
//!
//! let (result, scopes) = match_tree(Some(&pattern), Some(Leaf("hello")), &ScopeChain::new()).unwrap();
//! assert!(result.is_valid());
//! assert_eq!(scopes.get("greeting"), Some("hello"));
//!
//! let (result, _) = match_tree(Some(&pattern), Some(Leaf("bye")), &ScopeChain::new()).unwrap();
//! assert!(!result.is_valid());
//! ```

mod error;
mod matcher;
mod pattern;
mod result;
mod scope;
mod stack;
mod tree;

pub use error::{Error, Result};
pub use matcher::{match_tree, Matcher, DEFAULT_MAX_DEPTH};
pub use pattern::{Pattern, PatternKind};
pub use result::MatchResult;
pub use scope::{Frame, ScopeChain};
pub use tree::TreeNode;
