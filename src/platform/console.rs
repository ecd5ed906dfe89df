// ARChide - platform/console.rs
//
// Interactive console helpers. Kept out of core and app so the run logic
// never blocks on a terminal.

use crate::util::constants;
use std::io::{self, BufRead, Write};

/// Print the exit prompt and block until a line (or EOF) arrives on `input`.
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", constants::EXIT_PROMPT)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// `wait_for_enter` on the process's stdin/stdout. Failures are logged, not
/// propagated: the pause is a courtesy and must not change the exit code.
pub fn pause() {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    if let Err(e) = wait_for_enter(&mut input, &mut output) {
        tracing::debug!(error = %e, "Exit pause interrupted");
    }
}
