//! Validated console input
//!
//! Range-checked numeric prompts with a bounded retry count. Parsing is
//! split from the I/O so it can be tested without a terminal.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

/// Why a line of input was rejected
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("only numeric input is accepted")]
    NotNumeric,

    #[error("value out of range, must be between {min} and {max}")]
    OutOfRange { min: String, max: String },
}

/// Parse `input` as a number within `min..=max`.
pub fn parse_in_range<T>(input: &str, min: T, max: T) -> Result<T, InputError>
where
    T: FromStr + PartialOrd + Display,
{
    let value: T = input.trim().parse().map_err(|_| InputError::NotNumeric)?;
    if value < min || value > max {
        return Err(InputError::OutOfRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(value)
}

fn read_line(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line)
}

/// Prompt until the operator enters a number within `min..=max`, giving up
/// after `attempts` rejected lines.
pub fn prompt_in_range<T>(label: &str, min: T, max: T, attempts: u32) -> anyhow::Result<T>
where
    T: FromStr + PartialOrd + Display + Copy,
{
    for _ in 0..attempts {
        let line = read_line(label)?;
        match parse_in_range(&line, min, max) {
            Ok(value) => return Ok(value),
            Err(e) => println!("ERROR: {e}\n"),
        }
    }
    anyhow::bail!("no valid input after {attempts} attempt(s)")
}
