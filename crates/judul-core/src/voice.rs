//! Speech capabilities supplied by the host platform.
//!
//! Browsers expose speech recognition and synthesis; other targets do not.
//! Callers receive these as trait objects and default to [`NoopVoice`].

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VoiceError {
    #[error("voice capability is not supported on this platform")]
    Unsupported,
    #[error("voice backend error: {0}")]
    Backend(String),
}

/// Speech-to-text input.
pub trait VoiceInput {
    fn is_supported(&self) -> bool;

    /// Begin listening.
    fn start(&mut self) -> Result<(), VoiceError>;

    fn stop(&mut self);

    /// Final transcript of the last utterance, if one is ready.
    fn take_transcript(&mut self) -> Option<String>;
}

/// Text-to-speech output.
pub trait VoiceOutput {
    fn is_supported(&self) -> bool;

    fn speak(&mut self, text: &str) -> Result<(), VoiceError>;

    /// Stop any utterance in progress.
    fn cancel(&mut self);
}

/// Voice capability for targets without speech APIs.
///
/// Input reports itself unsupported; output silently discards text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVoice;

impl VoiceInput for NoopVoice {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }

    fn stop(&mut self) {}

    fn take_transcript(&mut self) -> Option<String> {
        None
    }
}

impl VoiceOutput for NoopVoice {
    fn is_supported(&self) -> bool {
        false
    }

    fn speak(&mut self, _text: &str) -> Result<(), VoiceError> {
        Ok(())
    }

    fn cancel(&mut self) {}
}
