//! JSON line I/O for the `query` command
//!
//! - Input: one JSON request object per line
//! - Output: one JSON response envelope per line
//! - Blank lines are skipped

use std::io::{BufRead, Write};

use crate::api::{ApiHandler, Response};

use super::errors::CliResult;

/// Read request lines, skipping blank ones
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(Ok(line)),
        Err(e) => Some(Err(e.into())),
    })
}

/// Write one response envelope and flush
pub fn write_response<W: Write>(output: &mut W, response: &Response) -> CliResult<()> {
    writeln!(output, "{}", response.to_json())?;
    output.flush()?;
    Ok(())
}

/// Answer every request in `input`, returning the number answered
pub fn serve_lines<R: BufRead, W: Write>(
    handler: &ApiHandler,
    input: R,
    output: &mut W,
) -> CliResult<usize> {
    let mut answered = 0;
    for line in read_requests(input) {
        let response = handler.handle(&line?);
        write_response(output, &response)?;
        answered += 1;
    }
    Ok(answered)
}
