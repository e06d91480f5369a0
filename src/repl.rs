//! Line-oriented read-eval-print loop
//!
//! Reads commands from any async line source so the loop can be driven by
//! stdin in the binary and by in-memory buffers in tests.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{clean_input, Command, Flow, Session};

/// Prompt printed before every line is read
pub const PROMPT: &str = "Pokedex > ";

/// Runs commands from `input` until `exit` or end of input
///
/// Command failures are printed to `out` and the loop carries on; only I/O
/// errors on `input` or `out` end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = Command::from_name(name) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match session
            .execute(command, args.first().map(String::as_str), &mut *out)
            .await
        {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => {
                debug!(command = command.name(), error = %err, "command failed");
                writeln!(out, "Error: {}", err)?;
            }
        }
    }

    Ok(())
}
