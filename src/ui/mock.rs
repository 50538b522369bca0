//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use pyprep::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Installing dependencies...");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Installing"));
//! assert_eq!(ui.events().len(), 2);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// One captured UI interaction, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Message(String),
    Output(String),
    Success(String),
    Warning(String),
    Error(String),
    Command(String),
    Header(String),
    SpinnerSuccess(String),
    SpinnerError(String),
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    events: Rc<RefCell<Vec<UiEvent>>>,
    spinners: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// All captured events in order.
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.borrow().clone()
    }

    fn collect<F>(&self, pick: F) -> Vec<String>
    where
        F: Fn(&UiEvent) -> Option<&String>,
    {
        self.events.borrow().iter().filter_map(pick).cloned().collect()
    }

    /// Get all captured messages.
    pub fn messages(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Message(m) => Some(m),
            _ => None,
        })
    }

    /// Get all explicitly requested output (JSON, YAML, schemas).
    pub fn outputs(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Output(m) => Some(m),
            _ => None,
        })
    }

    /// Get all captured success messages, including finished spinners.
    pub fn successes(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Success(m) | UiEvent::SpinnerSuccess(m) => Some(m),
            _ => None,
        })
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Warning(m) => Some(m),
            _ => None,
        })
    }

    /// Get all captured errors, including failed spinners.
    pub fn errors(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Error(m) | UiEvent::SpinnerError(m) => Some(m),
            _ => None,
        })
    }

    /// Get all echoed commands.
    pub fn commands(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Command(m) => Some(m),
            _ => None,
        })
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages().iter().any(|m| m.contains(msg))
    }

    /// Check if a success containing `msg` was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes().iter().any(|m| m.contains(msg))
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings().iter().any(|m| m.contains(msg))
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors().iter().any(|m| m.contains(msg))
    }

    fn push(&self, event: UiEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.push(UiEvent::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.push(UiEvent::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.push(UiEvent::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.push(UiEvent::Error(msg.to_string()));
    }

    fn output(&mut self, text: &str) {
        self.push(UiEvent::Output(text.to_string()));
    }

    fn show_command(&mut self, command: &str) {
        self.push(UiEvent::Command(command.to_string()));
    }

    fn show_header(&mut self, title: &str) {
        self.push(UiEvent::Header(title.to_string()));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            events: Rc::clone(&self.events),
            status: None,
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

/// Mock spinner that records its outcome into the owning [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    events: Rc<RefCell<Vec<UiEvent>>>,
    status: Option<SpinnerStatus>,
}

impl MockSpinner {
    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.status = Some(SpinnerStatus::Success);
        self.events
            .borrow_mut()
            .push(UiEvent::SpinnerSuccess(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.status = Some(SpinnerStatus::Error);
        self.events
            .borrow_mut()
            .push(UiEvent::SpinnerError(msg.to_string()));
    }
}
