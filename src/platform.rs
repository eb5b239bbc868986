use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::*;

/// A local file handed to a file input, as the user would pick it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub last_modified: i64,
    /// `false` makes the asynchronous reader fail for this file.
    pub readable: bool,
}

impl MockFile {
    /// Builds a readable, empty file whose MIME type is guessed from the extension.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mime_type: guess_mime_type(name).to_string(),
            bytes: Vec::new(),
            last_modified: 0,
            readable: true,
        }
    }

    pub fn with_type(mut self, mime_type: &str) -> Self {
        self.mime_type = mime_type.to_string();
        self
    }

    pub fn with_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.bytes = bytes.into();
        self
    }

    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn file_name(&self) -> &str {
        self.name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.name.as_str())
    }

    pub(crate) fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub(crate) fn to_data_url(&self) -> String {
        let mime = if self.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            self.mime_type.as_str()
        };
        format!("data:{mime};base64,{}", BASE64.encode(&self.bytes))
    }
}

fn guess_mime_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "json" => "application/json",
        _ => "",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: NodeId,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// A form submission that no listener cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form: NodeId,
    pub action: String,
    pub method: String,
}

#[derive(Debug)]
pub(crate) struct PlatformMockState {
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
    pub(crate) confirm_messages: Vec<String>,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
    pub(crate) submissions: Vec<FormSubmission>,
    pub(crate) navigations: Vec<String>,
    pub(crate) online: bool,
}

impl Default for PlatformMockState {
    fn default() -> Self {
        Self {
            confirm_responses: VecDeque::new(),
            default_confirm_response: false,
            confirm_messages: Vec::new(),
            scroll_requests: Vec::new(),
            submissions: Vec::new(),
            navigations: Vec::new(),
            online: true,
        }
    }
}
