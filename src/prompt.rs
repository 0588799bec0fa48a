//! Operator confirmation prompt

use std::io::{self, BufRead, Write};

/// Ask a yes/no question. Only `y` / `Y` (surrounding whitespace ignored)
/// counts as yes; anything else, including EOF, is no.
pub fn confirm<R, W>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{} (y/n): ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// How a workflow asks for confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Ask on stdin/stdout
    Interactive,
    /// Proceed without asking (`--yes`)
    Assume,
}

impl Confirmation {
    pub fn from_flag(yes: bool) -> Self {
        if yes {
            Confirmation::Assume
        } else {
            Confirmation::Interactive
        }
    }

    /// Ask whether to proceed with transactions sent from `sender`
    pub fn proceed_with(&self, sender: &str) -> io::Result<bool> {
        match self {
            Confirmation::Assume => Ok(true),
            Confirmation::Interactive => {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                let mut output = io::stdout();
                confirm(
                    &mut input,
                    &mut output,
                    &format!("Do you want to proceed with address {}?", sender),
                )
            }
        }
    }
}
