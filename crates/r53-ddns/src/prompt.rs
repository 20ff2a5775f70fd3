//! Interactive fallback for missing required arguments

use std::io::{self, BufRead, Write};

/// Ask `message` until a non-empty line is entered
///
/// The answer is trimmed. Empty or whitespace-only lines ask again; end of
/// input is an `UnexpectedEof` error so a closed stdin cannot spin forever.
pub fn prompt_until_nonempty<R, W>(input: &mut R, output: &mut W, message: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", message)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a value was entered",
            ));
        }

        let value = line.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }
}
