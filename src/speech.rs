//! Speech capture seam
//!
//! Recognition itself belongs to the platform. The assistant only sees the
//! finished transcript, never audio.

/// A platform speech recognizer
pub trait SpeechRecognizer {
    fn is_listening(&self) -> bool;

    /// Text recognised so far; empty when nothing was heard
    fn transcript(&self) -> &str;

    /// Last recognition error, if any
    fn error(&self) -> Option<&str>;

    fn start(&mut self);

    fn stop(&mut self);

    /// Clear transcript and error
    fn reset(&mut self);

    /// A transcript is ready once listening stopped with something heard
    fn finished_transcript(&self) -> Option<&str> {
        let text = self.transcript().trim();
        if self.is_listening() || text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
