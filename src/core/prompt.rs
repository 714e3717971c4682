use crate::core::{Answer, Confirm};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const MAX_PROMPT_ATTEMPTS: usize = 3;

/// Exact, case-insensitive yes/no parser. Anything else is unrecognized.
pub fn parse_answer(input: &str) -> Option<Answer> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(Answer::Yes),
        "n" | "no" => Some(Answer::No),
        _ => None,
    }
}

/// Asks on a line-oriented terminal. Blank input, EOF and repeated
/// unrecognized input all resolve to `No`.
pub struct TerminalPrompt<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    max_attempts: usize,
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            max_attempts: MAX_PROMPT_ATTEMPTS,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<Answer> {
        for _ in 0..self.max_attempts {
            write!(self.writer, "{} [y/N] ", question)?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                // 沒有輸入來源時視為拒絕
                writeln!(self.writer)?;
                return Ok(Answer::No);
            }

            if line.trim().is_empty() {
                return Ok(Answer::No);
            }

            match parse_answer(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.writer, "Please answer 'y' or 'n'.")?,
            }
        }

        tracing::warn!(
            "No recognizable answer after {} attempts, assuming no",
            self.max_attempts
        );
        Ok(Answer::No)
    }
}

/// Preset decision, used for `--yes` and non-interactive runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub Answer);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, question: &str) -> Result<Answer> {
        tracing::debug!("{} -> {:?} (preset)", question, self.0);
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (Answer, String) {
        let mut prompt = TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let answer = prompt.confirm("repeaters.db already exists. Overwrite?").unwrap();
        let output = String::from_utf8(prompt.into_writer()).unwrap();
        (answer, output)
    }

    #[test]
    fn test_parse_answer_exact_matches() {
        assert_eq!(parse_answer("y"), Some(Answer::Yes));
        assert_eq!(parse_answer("Y"), Some(Answer::Yes));
        assert_eq!(parse_answer(" yes \n"), Some(Answer::Yes));
        assert_eq!(parse_answer("YES"), Some(Answer::Yes));
        assert_eq!(parse_answer("n"), Some(Answer::No));
        assert_eq!(parse_answer("No"), Some(Answer::No));
    }

    #[test]
    fn test_parse_answer_rejects_substring_matches() {
        assert_eq!(parse_answer("xyz"), None);
        assert_eq!(parse_answer("ny"), None);
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer("yess"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn test_affirmative_answer() {
        let (answer, output) = ask("y\n");
        assert_eq!(answer, Answer::Yes);
        assert_eq!(output, "repeaters.db already exists. Overwrite? [y/N] ");
    }

    #[test]
    fn test_blank_line_defaults_to_no() {
        let (answer, _) = ask("\n");
        assert_eq!(answer, Answer::No);
    }

    #[test]
    fn test_eof_defaults_to_no() {
        let (answer, _) = ask("");
        assert_eq!(answer, Answer::No);
    }

    #[test]
    fn test_reprompts_after_unrecognized_input() {
        let (answer, output) = ask("xyz\nyes\n");
        assert_eq!(answer, Answer::Yes);
        assert_eq!(output.matches("Overwrite?").count(), 2);
        assert!(output.contains("Please answer 'y' or 'n'."));
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let (answer, output) = ask("what\nhuh\nmaybe\ny\n");
        assert_eq!(answer, Answer::No);
        assert_eq!(output.matches("Overwrite?").count(), MAX_PROMPT_ATTEMPTS);
    }

    #[test]
    fn test_fixed_answer() {
        let mut prompt = FixedAnswer(Answer::Yes);
        assert_eq!(prompt.confirm("Overwrite?").unwrap(), Answer::Yes);
    }
}
