//! The tree interface the matcher walks.

/// A read-only handle to one node of an ordered tree.
///
/// Handles are expected to be cheap to clone (a reference plus an index, an
/// `Rc`, and so on). The matcher never mutates the tree it walks and treats a
/// missing child or sibling as the end of input, never as an error.
pub trait TreeNode: Clone {
    /// Element tag name, `None` for text and other non-element nodes.
    fn tag(&self) -> Option<&str>;

    fn is_text(&self) -> bool;

    /// Text content, only defined when [`is_text`](TreeNode::is_text) is true.
    fn text(&self) -> Option<&str>;

    /// First child.
    fn child(&self) -> Option<Self>;

    /// Next sibling.
    fn next(&self) -> Option<Self>;
}
