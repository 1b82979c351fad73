//! Console implementation of the terminal port

use std::io::{self, BufRead, Write};

use atm_core::{Error, Result, Terminal, Tone};
use dialoguer::{Input, Password};

use crate::output::styled;

fn prompt_error(err: dialoguer::Error) -> Error {
    Error::Io(io::Error::new(io::ErrorKind::Other, err))
}

/// Reads from stdin and writes colored lines to stdout.
///
/// On a TTY prompts go through dialoguer (hidden password entry). When stdin
/// is piped, lines are read as-is so sessions can be scripted.
pub struct ConsoleTerminal {
    interactive: bool,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            interactive: atty::is(atty::Stream::Stdin),
        }
    }

    fn read_plain(&mut self, prompt: &str) -> Result<String> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

impl Terminal for ConsoleTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }

    fn write_line(&mut self, tone: Tone, text: &str) {
        println!("{}", styled(tone, text));
    }
}
