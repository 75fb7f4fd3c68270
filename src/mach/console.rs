use crate::lang::Error;

/// ## Console port
///
/// The interpreter writes program output, reads INPUT lines, and reports
/// recovered errors through this trait. Implementations own the output
/// column; PRINT reads it back through [`Console::hpos`] to place zones
/// and tabs.
pub trait Console {
    /// Append text to the output.
    fn out(&mut self, text: &str);

    /// Block until one line of input is available. The line terminator is
    /// not included. An error here aborts the running program.
    fn input(&mut self) -> Result<String, Error>;

    /// Report a recovered, non-fatal error.
    fn error(&mut self, text: &str);

    /// Current output column, 0 based.
    fn hpos(&self) -> usize;

    /// Width of a print zone, used by `,` in PRINT.
    fn zone(&self) -> usize {
        15
    }

    /// Width used to pad numbers followed by `;` in PRINT.
    fn compact(&self) -> usize {
        3
    }
}

/// Column after writing `text` when the cursor started at `hpos`.
pub fn advance_hpos(hpos: usize, text: &str) -> usize {
    match text.rfind('\n') {
        Some(index) => text[index + 1..].chars().count(),
        None => hpos + text.chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_hpos() {
        assert_eq!(advance_hpos(0, "HELLO"), 5);
        assert_eq!(advance_hpos(5, " WORLD\nAB"), 2);
        assert_eq!(advance_hpos(3, "\n"), 0);
    }
}
