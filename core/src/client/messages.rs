use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_ERROR_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_SUCCESS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub kind: MessageKind,
    pub text: String,
    hide_at: Instant,
}

impl Flash {
    pub fn hide_at(&self) -> Instant {
        self.hide_at
    }
}

/// The error and success message regions.
///
/// Only one message is visible at a time. Showing a message replaces the
/// current one together with its pending hide deadline, so an older
/// message can never hide a newer one.
#[derive(Debug, Clone)]
pub struct Messages {
    error_ttl: Duration,
    success_ttl: Duration,
    current: Option<Flash>,
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_TTL, DEFAULT_SUCCESS_TTL)
    }
}

impl Messages {
    pub fn new(error_ttl: Duration, success_ttl: Duration) -> Self {
        Self {
            error_ttl,
            success_ttl,
            current: None,
        }
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.show(MessageKind::Error, text.into());
    }

    pub fn show_success(&mut self, text: impl Into<String>) {
        self.show(MessageKind::Success, text.into());
    }

    fn show(&mut self, kind: MessageKind, text: String) {
        let ttl = match kind {
            MessageKind::Error => self.error_ttl,
            MessageKind::Success => self.success_ttl,
        };
        self.current = Some(Flash {
            kind,
            text,
            hide_at: Instant::now() + ttl,
        });
    }

    /// Hides the current message once its deadline has passed.
    pub fn expire(&mut self) {
        self.expire_at(Instant::now());
    }

    pub fn expire_at(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|flash| flash.hide_at <= now) {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Flash> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.text_of(MessageKind::Error)
    }

    pub fn success(&self) -> Option<&str> {
        self.text_of(MessageKind::Success)
    }

    fn text_of(&self, kind: MessageKind) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|flash| flash.kind == kind)
            .map(|flash| flash.text.as_str())
    }
}
