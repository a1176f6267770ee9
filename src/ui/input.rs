//! Line input with interrupt awareness.
//!
//! The loop owns a single buffered reader over stdin; each read races the
//! pending line against Ctrl-C so an interrupt during input restarts the
//! iteration instead of killing the process.

use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Result of reading one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// User submitted a full line.
    Line(String),
    /// The input stream ended; treated as an implicit exit.
    Eof,
    /// Ctrl-C arrived while waiting for input.
    Interrupted,
}

/// Buffered line reader; generic over the source so tests can feed scripts.
pub struct InputReader<R> {
    lines: Lines<R>,
}

impl InputReader<BufReader<Stdin>> {
    /// Reader over the process's stdin.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> InputReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Block until a line arrives, the stream ends, or Ctrl-C fires.
    pub async fn read_line(&mut self) -> io::Result<ReadOutcome> {
        tokio::select! {
            line = self.lines.next_line() => match line? {
                Some(line) => Ok(ReadOutcome::Line(line)),
                None => Ok(ReadOutcome::Eof),
            },
            signal = tokio::signal::ctrl_c() => {
                // A registration failure surfaces as a read error; only a
                // delivered signal counts as an interrupt.
                signal?;
                Ok(ReadOutcome::Interrupted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_lines_then_signals_eof() {
        let script = BufReader::new(std::io::Cursor::new(b"first\nsecond\n".to_vec()));
        let mut reader = InputReader::new(script);
        assert_eq!(
            reader.read_line().await.unwrap(),
            ReadOutcome::Line("first".to_string())
        );
        assert_eq!(
            reader.read_line().await.unwrap(),
            ReadOutcome::Line("second".to_string())
        );
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn final_line_without_newline_is_still_delivered() {
        let script = BufReader::new(std::io::Cursor::new(b"lonely".to_vec()));
        let mut reader = InputReader::new(script);
        assert_eq!(
            reader.read_line().await.unwrap(),
            ReadOutcome::Line("lonely".to_string())
        );
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Eof);
    }
}
