//! Raw key input and in-place screen redraws
//!
//! Raw mode is entered once per run through [`RawModeGuard`] and left when
//! the guard drops, so every exit path (including `?`) restores the tty.
//! Keys are polled on a reader thread that stops and is joined before the
//! guard releases the terminal.

use crate::wizard::{Event, KeyInput};
use anyhow::Result;
use console::Term;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// How long one poll blocks before the reader rechecks its stop flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Leave raw mode and show the cursor; safe to call more than once
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = Term::stdout().show_cursor();
}

/// Holds the terminal in raw mode with a hidden cursor until dropped
pub(crate) struct RawModeGuard;

impl RawModeGuard {
    pub(crate) fn enable(term: &Term) -> Result<Self> {
        enable_raw_mode()?;
        // From here on the guard owns cleanup
        let guard = RawModeGuard;
        term.hide_cursor()?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Decode a terminal key; keys the wizard has no use for map to `None`
pub(crate) fn map_key(key: KeyEvent) -> Option<KeyInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        // Raw mode delivers Ctrl+C as a key rather than SIGINT
        KeyCode::Char('c') if ctrl => Some(KeyInput::Quit),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Enter => Some(KeyInput::Confirm),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Esc => Some(KeyInput::Quit),
        KeyCode::Char(c) if !ctrl && !c.is_control() => Some(KeyInput::Char(c)),
        _ => None,
    }
}

/// Where the reader thread gets its keys from
pub(crate) trait KeySource: Send + 'static {
    /// Wait up to `timeout` for a key; `Ok(None)` when nothing usable arrived
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>>;
}

/// Keys from the controlling terminal
pub(crate) struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            TermEvent::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Background thread forwarding keys to the event loop
///
/// The thread exits when stopped, when the loop drops its inbox, or on the
/// first read error. Dropping the reader stops and joins it.
pub(crate) struct InputReader {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    pub(crate) fn spawn<S: KeySource>(mut source: S, tx: UnboundedSender<Event>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) && !tx.is_closed() {
                match source.next_key(POLL_INTERVAL) {
                    Ok(Some(input)) => {
                        if tx.send(Event::Input(input)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(_) => break,
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Whether the thread is still reading
    pub(crate) fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Redraws a frame over the previous one
pub(crate) struct Screen {
    term: Term,
    drawn_lines: usize,
}

impl Screen {
    pub(crate) fn new(term: Term) -> Self {
        Self {
            term,
            drawn_lines: 0,
        }
    }

    pub(crate) fn draw(&mut self, frame: &str) -> Result<()> {
        if self.drawn_lines > 0 {
            self.term.clear_last_lines(self.drawn_lines)?;
        }
        // Raw mode does not turn `\n` into a carriage return
        self.term.write_str(&frame.replace('\n', "\r\n"))?;
        self.term.flush()?;
        self.drawn_lines = frame.matches('\n').count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Instant;
    use tokio::sync::mpsc;

    /// Replays keys, then idles like a quiet terminal
    struct ScriptedKeys {
        keys: VecDeque<KeyInput>,
        dropped: Arc<AtomicBool>,
    }

    impl ScriptedKeys {
        fn new(keys: &[KeyInput]) -> (Self, Arc<AtomicBool>) {
            let dropped = Arc::new(AtomicBool::new(false));
            let source = Self {
                keys: keys.iter().copied().collect(),
                dropped: Arc::clone(&dropped),
            };
            (source, dropped)
        }
    }

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>> {
            match self.keys.pop_front() {
                Some(key) => Ok(Some(key)),
                None => {
                    std::thread::sleep(timeout);
                    Ok(None)
                }
            }
        }
    }

    impl Drop for ScriptedKeys {
        fn drop(&mut self) {
            self.dropped.store(true, Ordering::SeqCst);
        }
    }

    struct BrokenTerminal;

    impl KeySource for BrokenTerminal {
        fn next_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyInput>> {
            Err(io::Error::new(io::ErrorKind::Other, "not a tty"))
        }
    }

    fn wait_until_stopped(reader: &InputReader) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while reader.is_running() {
            if Instant::now() > deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        true
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_navigation_keys() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(KeyInput::Up));
        assert_eq!(map_key(press(KeyCode::Down)), Some(KeyInput::Down));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(KeyInput::Confirm));
        assert_eq!(map_key(press(KeyCode::Backspace)), Some(KeyInput::Backspace));
    }

    #[test]
    fn test_map_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(KeyInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyInput::Quit)
        );
    }

    #[test]
    fn test_map_characters() {
        assert_eq!(map_key(press(KeyCode::Char('j'))), Some(KeyInput::Char('j')));
        assert_eq!(map_key(press(KeyCode::Char('-'))), Some(KeyInput::Char('-')));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(KeyInput::Char('A'))
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(map_key(press(KeyCode::Tab)), None);
        assert_eq!(map_key(press(KeyCode::Left)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn test_reader_forwards_keys_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (source, _) = ScriptedKeys::new(&[KeyInput::Down, KeyInput::Confirm]);
        let _reader = InputReader::spawn(source, tx);

        let first = rx.blocking_recv();
        let second = rx.blocking_recv();
        assert!(matches!(first, Some(Event::Input(KeyInput::Down))));
        assert!(matches!(second, Some(Event::Input(KeyInput::Confirm))));
    }

    #[test]
    fn test_reader_stops_when_receiver_is_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (source, _) = ScriptedKeys::new(&[]);
        let reader = InputReader::spawn(source, tx);
        assert!(reader.is_running());

        drop(rx);
        assert!(wait_until_stopped(&reader), "reader kept polling a closed inbox");
    }

    #[test]
    fn test_dropping_reader_joins_thread() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (source, dropped) = ScriptedKeys::new(&[]);
        let reader = InputReader::spawn(source, tx);

        drop(reader);
        // The source lives on the thread, so it is gone only once the thread is
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn test_read_error_stops_reader() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let reader = InputReader::spawn(BrokenTerminal, tx);
        assert!(wait_until_stopped(&reader));
    }
}
