//! Terminal display and input handling
//!
//! Frames go to a full-screen [`TerminalDisplay`] when stdout is a terminal and
//! to a newline-terminated [`StreamDisplay`] otherwise.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Surface that frames are drawn onto, one line at a time
pub trait Display {
    /// Start a new frame
    fn clear(&mut self) -> io::Result<()>;

    /// Append one line to the current frame
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Make the current frame visible
    fn present(&mut self) -> io::Result<()>;
}

/// Full-screen terminal display with buffered output
pub struct TerminalDisplay {
    buffer: BufWriter<Stdout>,
    row: u16,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        Ok(Self {
            buffer: BufWriter::new(stdout),
            row: 0,
        })
    }
}

impl Display for TerminalDisplay {
    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.buffer,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        self.row = 0;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        // Raw mode has no newline translation, so place every line explicitly
        queue!(self.buffer, cursor::MoveTo(0, self.row))?;
        self.buffer.write_all(line.as_bytes())?;
        self.row = self.row.saturating_add(1);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.buffer.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
    }
}

/// Plain line stream for when stdout is a pipe or a file.
///
/// Every frame starts with a clear-screen escape and every row ends in `\n`,
/// so line-oriented readers see 40 lines per frame.
pub struct StreamDisplay<W: Write> {
    writer: W,
}

impl<W: Write> StreamDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Display for StreamDisplay<W> {
    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.writer,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    fn present(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// In-memory display holding the most recently presented frame, for tests
#[derive(Debug, Default, Clone)]
pub struct BufferDisplay {
    pending: Vec<String>,
    presented: Vec<String>,
    clears: usize,
    presents: usize,
}

impl BufferDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of the last presented frame
    pub fn lines(&self) -> &[String] {
        &self.presented
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn presents(&self) -> usize {
        self.presents
    }
}

impl Display for BufferDisplay {
    fn clear(&mut self) -> io::Result<()> {
        self.pending.clear();
        self.clears += 1;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.pending.push(line.to_string());
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented = std::mem::take(&mut self.pending);
        self.presents += 1;
        Ok(())
    }
}

/// Shared flag asking the frame loop to stop before its next frame
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Key actions for the animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::None;
    }

    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        // Raw mode delivers Ctrl-C as a key press instead of SIGINT
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::None,
    }
}

/// Watch the keyboard on a background thread and raise `stop` on a quit key.
///
/// The thread exits once `stop` is raised, by the keyboard or anyone else.
pub fn spawn_input_watcher(stop: StopSignal) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.is_stopped() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key_event)) => {
                        if parse_key_event(key_event) == Action::Quit {
                            tracing::debug!("quit key pressed");
                            stop.stop();
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("input error: {}", e);
                        stop.stop();
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("input poll error: {}", e);
                    stop.stop();
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_event_quit() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_escape() {
        let event = KeyEvent::new(KeyCode::Esc, KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_ctrl_c() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(parse_key_event(event), Action::Quit);
    }

    #[test]
    fn test_parse_key_event_plain_c() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::None);
    }

    #[test]
    fn test_parse_key_event_release_ignored() {
        let event = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::empty(),
            KeyEventKind::Release,
        );
        assert_eq!(parse_key_event(event), Action::None);
    }

    #[test]
    fn test_parse_key_event_none() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty());
        assert_eq!(parse_key_event(event), Action::None);
    }

    #[test]
    fn test_stop_signal_shared_between_clones() {
        let stop = StopSignal::new();
        let other = stop.clone();
        assert!(!stop.is_stopped());
        other.stop();
        assert!(stop.is_stopped());
    }

    #[test]
    fn test_stream_display_terminates_lines() {
        let mut display = StreamDisplay::new(Vec::new());
        display.clear().unwrap();
        display.write_line("ab").unwrap();
        display.write_line("cd").unwrap();
        display.present().unwrap();

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert!(text.starts_with("\x1b[2J"));
        assert!(text.ends_with("ab\ncd\n"));
    }

    #[test]
    fn test_buffer_display_keeps_last_frame() {
        let mut display = BufferDisplay::new();
        display.clear().unwrap();
        display.write_line("first").unwrap();
        display.present().unwrap();

        display.clear().unwrap();
        display.write_line("second").unwrap();
        display.write_line("third").unwrap();
        assert_eq!(display.lines(), ["first".to_string()]);

        display.present().unwrap();
        assert_eq!(display.lines(), ["second".to_string(), "third".to_string()]);
        assert_eq!(display.clears(), 2);
        assert_eq!(display.presents(), 2);
    }
}
