//! Remote-control input: the receiver abstraction and decoded events.

/// One decoded input, considered at most once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Nothing was decoded this tick
    None,
    /// A raw 32-bit code from the remote-control decoder
    RemoteCode(u32),
}

/// The meaning of a raw code under the configured [`KeyMap`](crate::config::KeyMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Ok,
    Red,
    Green,
    Blue,
    /// The decoder's "button still held" sentinel
    Repeat,
    /// A code with no configured meaning
    Other(u32),
}

/// An infrared (or similar) receiver that latches one code at a time.
///
/// The receiver holds a decoded code until [`resume`](InputSource::resume)
/// re-arms it, so the compositor can read at most one code per tick.
pub trait InputSource {
    /// Start listening for codes.
    fn enable(&mut self);

    /// Return the latched code, if one has been decoded since the last resume.
    fn decode(&mut self) -> Option<u32>;

    /// Acknowledge the latched code so the next one can be decoded.
    fn resume(&mut self);

    /// Decode at most one code and re-arm the receiver.
    fn poll(&mut self) -> InputEvent {
        match self.decode() {
            Some(code) => {
                self.resume();
                InputEvent::RemoteCode(code)
            }
            None => InputEvent::None,
        }
    }
}
