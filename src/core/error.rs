//! Error types for the transform stack.

use thiserror::Error;

/// Contract violations on a [`TransformStack`](crate::core::stack::TransformStack).
///
/// Both mean a caller mismatched push/pop or recursed without bound; the
/// fail-fast stack operations panic with these messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// Pushing would take the stack past its depth limit.
    #[error("transform stack overflow: depth limit {limit} reached")]
    Overflow {
        /// Maximum number of frames the stack may hold.
        limit: usize,
    },

    /// Popping would remove the bottom frame.
    #[error("transform stack underflow: the bottom frame cannot be popped")]
    Underflow,
}
