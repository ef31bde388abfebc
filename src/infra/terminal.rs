use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use copypasta::{ClipboardContext, ClipboardProvider};

use crate::error::{AppError, AppResult};
use crate::services::PresentationSink;

/// Where a generated message ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    Clipboard,
    Stdout,
}

/// Presents progress on stderr and delivers the message to the clipboard
/// or to stdout.
pub struct TerminalPresenter {
    target: MessageTarget,
    busy: AtomicBool,
}

impl TerminalPresenter {
    pub fn new(target: MessageTarget) -> Self {
        Self {
            target,
            busy: AtomicBool::new(false),
        }
    }
}

impl PresentationSink for TerminalPresenter {
    fn begin_busy(&self, tooltip: &str) {
        self.busy.store(true, Ordering::SeqCst);
        let mut stderr = io::stderr();
        let _ = write!(stderr, "\r… {tooltip}");
        let _ = stderr.flush();
    }

    fn end_busy(&self) {
        if self.busy.swap(false, Ordering::SeqCst) {
            let mut stderr = io::stderr();
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> AppResult<()> {
        match self.target {
            MessageTarget::Stdout => {
                let mut stdout = io::stdout();
                writeln!(stdout, "{text}")?;
                stdout.flush()?;
                Ok(())
            }
            MessageTarget::Clipboard => {
                let mut ctx = ClipboardContext::new().map_err(|err| {
                    AppError::Clipboard(format!("failed to access clipboard: {err}"))
                })?;
                ctx.set_contents(text.to_string())
                    .map_err(|err| AppError::Clipboard(format!("failed to copy: {err}")))
            }
        }
    }

    fn notify_info(&self, message: &str) {
        eprintln!("{message}");
    }

    fn notify_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn delivered_notice(&self) -> &'static str {
        match self.target {
            MessageTarget::Clipboard => "Commit message generated and copied to clipboard.",
            MessageTarget::Stdout => "Commit message generated.",
        }
    }
}
