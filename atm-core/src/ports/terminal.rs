//! Terminal port - the interactive console boundary

use crate::domain::result::Result;

/// How a line of output should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Plain,
    Success,
    Warning,
    Error,
}

/// Line-oriented interactive console
///
/// Reads fail with [`crate::Error::InputClosed`] once no more input will
/// ever arrive.
pub trait Terminal {
    /// Prompt for one line of visible input
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Prompt for one line of hidden input
    fn read_secret(&mut self, prompt: &str) -> Result<String>;

    /// Print one line
    fn write_line(&mut self, tone: Tone, text: &str);
}
