//! Page behaviors for the plant watering web UI.
//!
//! The behaviors run on [`Page`], a deterministic in-process page model with a
//! virtual clock, so every timer-driven effect can be stepped and asserted from
//! plain Rust tests.
//!
//! ```no_run
//! use watering_ui::{Result, boot};
//!
//! fn main() -> Result<()> {
//!     let mut page = boot("<body><div class='alert'>Saved</div></body>")?;
//!     page.advance_time(5_300)?;
//!     page.assert_missing(".alert")?;
//!     Ok(())
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

mod behaviors;
mod config;
mod dom;
mod events;
mod html;
mod page;
mod platform;
mod scheduler;
mod selector;
mod style;

pub use behaviors::debounce::{Debounced, debounce};
pub use behaviors::notifications::{Severity, show_notification};
pub use behaviors::{Registration, UiBehaviors, boot, boot_with};
pub use config::UiConfig;
pub use dom::NodeId;
pub use events::{EventState, EventTarget, ListenerId, ListenerOptions};
pub use page::Page;
pub use platform::{FormSubmission, MockFile, ScrollBehavior, ScrollBlock, ScrollRequest};
pub use scheduler::{PendingTimer, TimerId};
pub use style::{STYLESHEET, STYLESHEET_ID};

pub(crate) use dom::{Dom, has_class, is_void_tag, truncate_chars};
pub(crate) use events::ListenerStore;
pub(crate) use html::parse_html;
pub(crate) use platform::PlatformMockState;
pub(crate) use scheduler::{ScheduledTask, SchedulerState};
pub(crate) use selector::*;
pub(crate) use style::*;

/// The reusable surface other page scripts call into.
pub mod plant_watering {
    pub use crate::behaviors::debounce::{Debounced, debounce};
    pub use crate::behaviors::notifications::{Severity, show_notification};
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Runtime(String),
    Config(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}
