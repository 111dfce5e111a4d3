use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::io::{BufRead, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where program input comes from.
///
/// A terminal gets a line editor with history. Anything else is read
/// line by line. A program read from stdin has no input at all.
pub enum Input {
    Interactive(Interface<DefaultTerminal>, Arc<AtomicBool>),
    Piped(std::io::Stdin),
    Closed,
}

impl Input {
    pub fn open(interrupted: Arc<AtomicBool>) -> std::io::Result<Input> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return Ok(Input::Piped(stdin));
        }
        let interface = Interface::new("charless")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(Input::Interactive(interface, interrupted))
    }

    /// `None` at end of input. A Ctrl-C at the prompt ends input and
    /// raises the interrupt flag.
    pub fn read_line(&mut self) -> std::io::Result<Option<String>> {
        match self {
            Input::Interactive(interface, interrupted) => match interface.read_line()? {
                ReadResult::Input(line) => {
                    interface.add_history_unique(line.clone());
                    Ok(Some(line))
                }
                ReadResult::Signal(Signal::Interrupt) => {
                    interface.set_buffer("")?;
                    interrupted.store(true, Ordering::SeqCst);
                    Ok(None)
                }
                ReadResult::Signal(_) | ReadResult::Eof => Ok(None),
            },
            Input::Piped(stdin) => {
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                let len = line.trim_end_matches(&['\r', '\n'][..]).len();
                line.truncate(len);
                Ok(Some(line))
            }
            Input::Closed => Ok(None),
        }
    }
}
