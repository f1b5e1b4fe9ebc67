//! Decoding raw terminal bytes into actions.
//!
//! The terminal is in raw mode, so there is no line discipline: every read hands back whatever
//! bytes the key produced. A lone `ESC` and the first byte of an arrow-key sequence look the same,
//! so classification depends on how many bytes a single read returned.

/// Longest byte sequence the decoder recognizes, and the size of the read buffer
pub const MAX_SEQUENCE_LEN: usize = 3;

const NUL: u8 = 0;
const ETX: u8 = 3;
const LF: u8 = 10;
const CR: u8 = 13;
const ESC: u8 = 27;
const DEL: u8 = 127;
const CSI: [u8; 2] = [ESC, b'['];

/// Actions the picker reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Abort and return nothing
    Abort,
    /// Accept the current selection
    Accept,
    /// Append a character to the filter
    AddChar(char),
    /// Delete the last character of the filter
    BackwardDeleteChar,
    /// Move the cursor down one match
    Down,
    /// Toggle the mark on the current match and move down
    Toggle,
    /// Move the cursor up one match
    Up,
}

/// Classifies the bytes returned by one read.
///
/// Single bytes map to control actions or printable characters; three-byte `ESC [ A` and
/// `ESC [ B` are the up and down arrows. Anything else, including unrecognized escape sequences,
/// yields `None` and must leave the state untouched.
///
/// ```
/// use qjp::tui::event::{Action, decode};
///
/// assert_eq!(decode(b"a"), Some(Action::AddChar('a')));
/// assert_eq!(decode(b"\x1b[A"), Some(Action::Up));
/// assert_eq!(decode(b"\x1b[C"), None);
/// ```
pub fn decode(bytes: &[u8]) -> Option<Action> {
    match bytes {
        [byte] => decode_byte(*byte),
        [a, b, c] if [*a, *b] == CSI => match c {
            b'A' => Some(Action::Up),
            b'B' => Some(Action::Down),
            _ => None,
        },
        _ => None,
    }
}

fn decode_byte(byte: u8) -> Option<Action> {
    match byte {
        ETX | ESC => Some(Action::Abort),
        LF | CR => Some(Action::Accept),
        DEL => Some(Action::BackwardDeleteChar),
        // ctrl-space
        NUL => Some(Action::Toggle),
        b' '..=b'~' => Some(Action::AddChar(byte as char)),
        _ => None,
    }
}
