use std::fmt;

/// Record terminator shared by the path input stream and the event output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Newline,
    Nul,
}

impl Delimiter {
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Newline => b'\n',
            Delimiter::Nul => 0,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Newline => f.write_str("newline"),
            Delimiter::Nul => f.write_str("nul"),
        }
    }
}

/// Runtime options, fixed before registration starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchOptions {
    pub delimiter: Delimiter,
    /// Arm deletion events on every watch created from now on.
    pub want_delete: bool,
    /// Drop the rest of a batch while the reader still has unread output.
    pub pipe_mode: bool,
}
