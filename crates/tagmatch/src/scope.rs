//! Capture environment: a chain of binding frames.

use std::collections::HashMap;
use std::iter;
use std::mem;

/// One binding frame, variable name to captured text.
pub type Frame = HashMap<String, String>;

/// An ordered stack of binding frames.
///
/// A chain always holds at least one frame; a fresh chain holds a single
/// empty root frame. Writes and lookups go to the innermost frame only,
/// outer frames are not searched.
///
/// Alternative match attempts each work on their own clone, so one branch
/// can never observe another's bindings except through [`merge`](Self::merge).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeChain {
    outer: Vec<Frame>,
    current: Frame,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fresh empty frame.
    pub fn push_frame(&mut self) {
        self.outer.push(mem::take(&mut self.current));
    }

    /// A copy of this chain with a fresh empty frame pushed on top.
    pub fn with_frame(&self) -> Self {
        let mut chain = self.clone();
        chain.push_frame();
        chain
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.current.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.current.insert(name.into(), value.into());
    }

    pub fn innermost(&self) -> &Frame {
        &self.current
    }

    /// Fold `other`'s innermost frame into this chain's innermost frame,
    /// overwriting on key collisions. Outer frames are left alone.
    pub fn merge(&mut self, other: &ScopeChain) {
        self.current.extend(
            other
                .current
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
    }

    /// Every frame, outermost first.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.outer.iter().chain(iter::once(&self.current))
    }

    pub fn depth(&self) -> usize {
        self.outer.len() + 1
    }
}
