//! Free-text description input.

use std::io::{BufRead, Write};

/// Supplies an optional description; asked at most once per invocation.
pub trait DescriptionSource {
    fn read_description(&mut self) -> Option<String>;
}

impl<F> DescriptionSource for F
where
    F: FnMut() -> Option<String>,
{
    fn read_description(&mut self) -> Option<String> {
        self()
    }
}

/// Interactive prompt: writes a question, reads one line.
///
/// End of input yields an empty description rather than an error.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> DescriptionSource for LinePrompt<R, W> {
    fn read_description(&mut self) -> Option<String> {
        // Prompt failures are not fatal; the read below still decides.
        let _ = write!(self.output, "Description: ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Some(String::new()),
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}
