use thiserror::Error;

/// Reasons a control request was rejected.
///
/// The interactive setters log these and leave the control unchanged; the
/// `try_` variants hand them back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("item index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("control has no items to select")]
    NoItems,
}
