use tracing::debug;

use crate::models::ValidationError;
use crate::upload::SelectedFile;

/// State machine for the upload dialog.
///
/// Holds at most one selection at a time, for the dialog's open span only.
/// Every transition is a synchronous method on the single UI task; the
/// asynchronous part of a submission lives in the reconciliation flow,
/// which brackets it with [`UploadDialog::begin_submit`] and one of the two
/// terminal calls.
#[derive(Debug)]
pub struct UploadDialog {
    open: bool,
    selection: Option<SelectedFile>,
    validation_error: Option<ValidationError>,
    upload_failure: Option<String>,
    drag_over: bool,
    submitting: bool
}

impl UploadDialog {
    pub fn new() -> Self {
        Self {
            open: false,
            selection: None,
            validation_error: None,
            upload_failure: None,
            drag_over: false,
            submitting: false
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn selection(&self) -> Option<&SelectedFile> {
        self.selection.as_ref()
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation_error
    }

    pub fn upload_failure(&self) -> Option<&str> {
        self.upload_failure.as_deref()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close via cancel, escape, or overlay. Ignored while a submission is
    /// in flight. Returns whether the dialog actually closed.
    pub fn close(&mut self) -> bool {
        if self.submitting {
            debug!("Ignoring close while a submission is in flight");
            return false;
        }

        self.reset();
        true
    }

    /// Captures a file from the picker, discarding any previously held one,
    /// and validates it. An invalid file is still held; it only blocks
    /// submission.
    pub fn choose(&mut self, file: SelectedFile) {
        if self.submitting {
            return;
        }

        self.validation_error = file.validate().err();
        self.upload_failure = None;
        self.selection = Some(file);
    }

    /// Drop events funnel into the same validation path as the picker.
    pub fn drop_file(&mut self, file: SelectedFile) {
        self.drag_over = false;
        self.choose(file);
    }

    pub fn drag_over(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Remove control in the file preview row. Disabled while submitting.
    pub fn remove_file(&mut self) {
        if self.submitting {
            return;
        }

        self.selection = None;
        self.validation_error = None;
        self.upload_failure = None;
    }

    /// Submit is enabled iff a file is held, it passed validation, and no
    /// submission is already in flight.
    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && self.validation_error.is_none() && !self.submitting
    }

    /// Begins a submission, handing back the file to upload.
    /// Returns `None` when submission is not currently allowed.
    pub fn begin_submit(&mut self) -> Option<SelectedFile> {
        if !self.can_submit() {
            return None;
        }

        self.upload_failure = None;
        self.submitting = true;
        self.selection.clone()
    }

    /// Terminal success: the dependent queries have been invalidated; the
    /// selection resets and the dialog closes.
    pub fn submit_succeeded(&mut self) {
        self.submitting = false;
        self.reset();
    }

    /// Terminal failure: the selection is retained so the operator can
    /// retry without re-selecting, and the envelope message is surfaced
    /// inline. The failure does not block a retry.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.upload_failure = Some(message.into());
    }

    fn reset(&mut self) {
        self.open = false;
        self.selection = None;
        self.validation_error = None;
        self.upload_failure = None;
        self.drag_over = false;
    }
}
