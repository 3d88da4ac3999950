/// A key the scene reacts to.
///
/// Hosts translate their own key codes into these; anything that does not
/// map is simply not forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Spin slower about the Y axis.
    DpadLeft,
    /// Spin faster about the Y axis.
    DpadRight,
    /// Spin slower about the X axis.
    DpadUp,
    /// Spin faster about the X axis.
    DpadDown,
    /// Cycle the texture filter.
    DpadCenter,
    /// Switch lighting on or off.
    ToggleLighting,
}
