//! Line-oriented prompting
//!
//! `None` from any prompt means the input stream is exhausted.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Print `prompt` and read one line without its line ending.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{prompt}").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Ask until `accept` returns true, printing `rejection` after each refusal.
///
/// When `allow_empty` is set an empty answer is returned as-is.
pub fn ask_until<R, W, F>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    rejection: &str,
    allow_empty: bool,
    accept: F,
) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> bool,
{
    loop {
        let Some(answer) = ask(input, output, prompt)? else {
            return Ok(None);
        };
        if (allow_empty && answer.is_empty()) || accept(&answer) {
            return Ok(Some(answer));
        }
        tracing::debug!(prompt, "Rejected input");
        writeln!(output, "{rejection}").context("Failed to write output")?;
    }
}
