//! User interaction.
//! Confirmation is injected into the pipeline through [`Prompter`] so that
//! hook execution can be driven without a terminal.

use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::Input;

use crate::constants::CONFIRM_TOKEN;
use crate::error::ThingResult;

/// Asks the operator a yes/no question.
pub trait Prompter {
    /// Returns `true` only on an explicit affirmative answer.
    fn confirm(&self, prompt: &str) -> ThingResult<bool>;
}

impl<F> Prompter for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> ThingResult<bool> {
        Ok(self(prompt))
    }
}

/// Returns true when `answer` is exactly the confirmation token.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim() == CONFIRM_TOKEN
}

/// Prints `prompt` and reads a single answer line from `reader`.
///
/// End of input counts as a decline.
pub fn confirm_from_reader<R: BufRead>(reader: &mut R, prompt: &str) -> ThingResult<bool> {
    print!("{prompt} [{CONFIRM_TOKEN}/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}

/// Prompter for the command line: dialoguer on a terminal, a plain line
/// from stdin otherwise.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }

    fn is_interactive() -> bool {
        Term::stderr().is_term() && io::stdin().is_terminal()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> ThingResult<bool> {
        if !Self::is_interactive() {
            return confirm_from_reader(&mut io::stdin().lock(), prompt);
        }

        let answer: String = Input::new()
            .with_prompt(format!("{prompt} [{CONFIRM_TOKEN}/N]"))
            .allow_empty(true)
            .interact_text()?;
        Ok(is_affirmative(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" y\n"));
        assert!(!is_affirmative("Y"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
    }

    #[test]
    fn test_closure_prompter() {
        let yes = |_: &str| true;
        let no = |_: &str| false;
        assert!(yes.confirm("run?").unwrap());
        assert!(!no.confirm("run?").unwrap());
    }
}
