//! Interactive confirmation for destructive commands.

use std::io::{self, BufRead, Write};

/// Ask a yes/no question on the terminal; anything but "y" is a no.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

fn read_answer(input: &mut impl BufRead) -> anyhow::Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_answer() {
        assert!(read_answer(&mut Cursor::new("y\n")).unwrap());
        assert!(read_answer(&mut Cursor::new("YES\n")).unwrap());
        assert!(!read_answer(&mut Cursor::new("\n")).unwrap());
        assert!(!read_answer(&mut Cursor::new("nope\n")).unwrap());
        assert!(!read_answer(&mut Cursor::new("")).unwrap());
    }
}
