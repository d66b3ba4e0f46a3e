//! Events that trigger state transitions

/// Debounced result of one button poll
///
/// Buttons are checked in fixed priority order: Btn1 wins over Btn2 wins
/// over Btn3. At most one event is reported per poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// No button held, or the press did not survive the settle re-sample
    None,
    /// Stop/resume while running; increment while editing
    Btn1,
    /// Enter edit session; confirm digit while editing
    Btn2,
    /// Toggle the display mode
    Btn3,
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// User froze the display
    Stop,
    /// User released the freeze; the held block is re-persisted
    Resume,
    /// User opened the edit session (normal mode only)
    StartEdit,
    /// Edit requested while in binary mode; show the refusal notice
    RefuseEdit,
    /// Edit session finished and the block was committed
    CommitEdit,
    /// The refusal notice has been on screen long enough
    NoticeExpired,
}
