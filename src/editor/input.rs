/// Mouse button of a pointer-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Places points and lines.
    Primary,
    /// Cancels the chain in progress.
    Secondary,
}
