//! Error provenance and reconciliation
//!
//! A form group can show errors from two places: the server, rendered into the
//! page, and client-side validation. Client re-validation may replace or clear
//! its own messages but must leave server messages alone until the form is
//! submitted again.
//!
//! Provenance is decided by looking at the message text: anything containing a
//! server marker (`"already exists"`, `"Invalid"` by default) is a server message.
//! A client message authored with one of those words would be misclassified.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Markers used when no policy is configured
pub const DEFAULT_SERVER_MARKERS: &[&str] = &["already exists", "Invalid"];

/// Where a displayed error message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageProvenance {
    Client,
    Server,
}

impl MessageProvenance {
    /// Classify `text` with the default markers
    pub fn of(text: &str) -> Self {
        if DEFAULT_SERVER_MARKERS.iter().any(|marker| text.contains(marker)) {
            MessageProvenance::Server
        } else {
            MessageProvenance::Client
        }
    }
}

/// Substrings that mark a message as server-originated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenancePolicy {
    #[serde(default = "default_server_markers")]
    pub server_markers: Vec<String>,
}

fn default_server_markers() -> Vec<String> {
    DEFAULT_SERVER_MARKERS.iter().map(|m| m.to_string()).collect()
}

impl Default for ProvenancePolicy {
    fn default() -> Self {
        Self {
            server_markers: default_server_markers(),
        }
    }
}

impl ProvenancePolicy {
    pub fn classify(&self, text: &str) -> MessageProvenance {
        let is_server = self
            .server_markers
            .iter()
            .any(|marker| !marker.is_empty() && text.contains(marker.as_str()));

        if is_server {
            MessageProvenance::Server
        } else {
            MessageProvenance::Client
        }
    }

    pub fn is_server(&self, text: &str) -> bool {
        self.classify(text) == MessageProvenance::Server
    }
}

/// What [`ErrorSlot::show`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    /// No client message was showing; the new one was added
    Added,
    /// An existing client message had its text replaced
    Replaced,
    /// A message with that text is already showing
    Unchanged,
}

/// Error messages displayed for one form group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSlot {
    messages: Vec<String>,
    /// Field is styled as erroneous
    marked: bool,
}

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a server-rendered message
    pub fn push_server(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        self.marked = true;
    }

    /// Show a client-side message
    ///
    /// Replaces the text of the first client message if it differs, otherwise
    /// appends. Server messages are never touched.
    pub fn show(&mut self, message: &str, policy: &ProvenancePolicy) -> SlotChange {
        self.marked = true;

        if self.messages.iter().any(|m| m.contains(message)) {
            return SlotChange::Unchanged;
        }

        match self.messages.iter_mut().find(|m| !policy.is_server(m)) {
            Some(existing) => {
                trace!(from = %existing, to = message, "replacing client error");
                *existing = message.to_string();
                SlotChange::Replaced
            }
            None => {
                self.messages.push(message.to_string());
                SlotChange::Added
            }
        }
    }

    /// Remove every client message, keeping server ones
    ///
    /// Returns how many messages were removed.
    pub fn clear_client(&mut self, policy: &ProvenancePolicy) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| policy.is_server(m));
        self.marked = false;
        before - self.messages.len()
    }

    /// Remove everything, server messages included
    pub fn clear_all(&mut self) {
        self.messages.clear();
        self.marked = false;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn first(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the input itself should carry error styling
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}
