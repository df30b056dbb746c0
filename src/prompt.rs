// Line-oriented input. The controller asks questions through `Prompt`,
// which keeps terminal handling out of the selection logic.

use dialoguer::Input;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of user answers. `Ok(None)` means input is exhausted.
pub trait Prompt {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads from the real stdin. Uses `dialoguer` for interactive sessions and
/// plain line reads when stdin is piped.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        TerminalPrompt
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if io::stdin().is_terminal() {
            let answer: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            return Ok(Some(answer));
        }

        let mut stdout = io::stdout();
        write!(stdout, "{}: ", prompt)?;
        stdout.flush()?;

        // Bytes, not `read_line`: a line that is not UTF-8 is still an
        // answer (a bad one), not a fatal read error.
        let mut line = Vec::new();
        if io::stdin().lock().read_until(b'\n', &mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(None);
        }
        Ok(Some(decode_line(&line)))
    }
}

/// Decode one raw input line, replacing invalid UTF-8 and dropping the
/// line terminator.
fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

/// Replays prepared answers in order, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}
