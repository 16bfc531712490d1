/// Errors triggered by misuse of a [`Tree`][crate::Tree] handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Insertion was requested from a node that has a parent.
    #[error("insert must be called from the root node")]
    InvalidOperation,
    /// The handle refers to a node that has since been deleted.
    #[error("node handle refers to a deleted node")]
    StaleNode,
}
