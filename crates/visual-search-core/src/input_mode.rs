//! File/URL probe input with mutual exclusivity.
//!
//! The controller holds the editable state of both input controls. While one
//! control holds a value the other is disabled: attempts to set it are
//! refused, never silently overwritten.

use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::types::{ProbeFile, ProbeInput};

/// What the caller must do with derived session state after an input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// The probe was edited; cached results stay as they are.
    Updated,
    /// The probe was cleared; cached results, view and message must be reset.
    Reset,
}

/// Enforces that at most one of file and URL input is active.
#[derive(Debug, Clone, Default)]
pub struct InputModeController {
    file: Option<ProbeFile>,
    url: String,
}

impl InputModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a file probe. Refused while the URL field holds text.
    pub fn set_file(&mut self, file: ProbeFile) -> SessionResult<ModeChange> {
        if !self.is_file_enabled() {
            return Err(SessionError::validation("url input is active"));
        }
        debug!(file_name = file.file_name(), bytes = file.len(), "Probe file selected");
        self.file = Some(file);
        Ok(ModeChange::Updated)
    }

    /// Edit the URL field. Refused while a file is selected.
    ///
    /// Text that trims to empty clears the probe and asks for a full reset.
    pub fn set_url(&mut self, text: &str) -> SessionResult<ModeChange> {
        if !self.is_url_enabled() {
            return Err(SessionError::validation("file input is active"));
        }
        self.url = text.to_string();
        if self.url.trim().is_empty() {
            debug!("Probe URL cleared");
            Ok(ModeChange::Reset)
        } else {
            Ok(ModeChange::Updated)
        }
    }

    /// Drop the selected file, re-enabling the URL field.
    pub fn remove_file(&mut self) -> ModeChange {
        self.file = None;
        ModeChange::Reset
    }

    /// Clear both controls.
    pub fn clear(&mut self) -> ModeChange {
        self.file = None;
        self.url.clear();
        ModeChange::Reset
    }

    /// The file control accepts input only while the URL field is blank.
    pub fn is_file_enabled(&self) -> bool {
        self.url.trim().is_empty()
    }

    /// The URL field accepts input only while no file is selected.
    pub fn is_url_enabled(&self) -> bool {
        self.file.is_none()
    }

    pub fn file(&self) -> Option<&ProbeFile> {
        self.file.as_ref()
    }

    /// Raw text of the URL field, untrimmed.
    pub fn url_text(&self) -> &str {
        &self.url
    }

    /// The active probe. Whitespace-only URL text counts as no probe.
    pub fn probe(&self) -> ProbeInput {
        match &self.file {
            Some(file) => ProbeInput::File(file.clone()),
            None if !self.url.trim().is_empty() => ProbeInput::Url(self.url.clone()),
            None => ProbeInput::None,
        }
    }

    pub fn has_probe(&self) -> bool {
        self.file.is_some() || !self.url.trim().is_empty()
    }
}
