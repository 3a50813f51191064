//! # Input Pump
//!
//! Reads lines from the terminal on a dedicated OS thread and forwards them
//! to the screen loop as raw [`ScreenEvent::Line`]s. Whether a line is a
//! command or a scanned payload is decided by the screen, against the scan
//! state at the time it handles the line.
//!
//! Stdin reads block and cannot be cancelled, so the reader lives outside
//! the tokio runtime. When the screen exits, the receiver is dropped and the
//! next `blocking_send` fails, which ends the thread.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::intent::ScreenEvent;

/// Forwards every non-blank line of `reader` to `events`.
///
/// Sends [`ScreenEvent::InputClosed`] at end of input. Returns early when the
/// receiving side is gone.
pub fn pump_lines<R: BufRead>(reader: R, events: &mpsc::Sender<ScreenEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to read input");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        if events.blocking_send(ScreenEvent::Line(line)).is_err() {
            debug!("Screen closed, stopping input");
            return;
        }
    }

    if events.blocking_send(ScreenEvent::InputClosed).is_err() {
        debug!("Screen closed before end of input was reported");
    }
}

/// Spawns the stdin reader thread.
pub fn spawn_stdin_reader(events: mpsc::Sender<ScreenEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("shelfscan-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            pump_lines(stdin.lock(), &events);
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(rx: &mut mpsc::Receiver<ScreenEvent>) -> Vec<ScreenEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn line(text: &str) -> ScreenEvent {
        ScreenEvent::Line(text.to_string())
    }

    #[test]
    fn test_lines_are_forwarded_raw_then_closed() {
        let (tx, mut rx) = mpsc::channel(16);

        pump_lines(Cursor::new("scan\n\n4006381333931\r\nfly\n"), &tx);

        assert_eq!(
            drain(&mut rx),
            vec![
                line("scan"),
                line("4006381333931"),
                line("fly"),
                ScreenEvent::InputClosed
            ]
        );
    }

    #[test]
    fn test_empty_input_only_closes() {
        let (tx, mut rx) = mpsc::channel(4);
        pump_lines(Cursor::new(""), &tx);
        assert_eq!(drain(&mut rx), vec![ScreenEvent::InputClosed]);
    }

    #[test]
    fn test_stops_when_screen_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        // Must return instead of blocking on a closed channel.
        pump_lines(Cursor::new("list\nlist\n"), &tx);
    }
}
