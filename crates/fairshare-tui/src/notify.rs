//! Toast notifications with a fixed display lifetime.

use std::time::{Duration, Instant};

use ratatui::style::Color;

use crate::theme;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    pub fn color(self) -> Color {
        match self {
            Self::Info => theme::ACCENT_BLUE,
            Self::Success => theme::SUCCESS_GREEN,
            Self::Error => theme::ERROR_RED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

/// Stacked toasts, newest at the bottom. Expired entries are removed
/// on the next prune; an error toast is never replaced early by a
/// later success.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    toasts: Vec<Toast>,
}

impl NotificationCenter {
    pub fn push(&mut self, message: impl Into<String>, level: ToastLevel, now: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            level,
            expires_at: now + TOAST_TTL,
        });
    }

    /// Drop toasts whose lifetime has elapsed.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();
        center.push("saved", ToastLevel::Success, t0);
        assert_eq!(center.visible().len(), 1);

        center.prune(t0 + Duration::from_millis(2999));
        assert_eq!(center.visible().len(), 1);

        center.prune(t0 + Duration::from_millis(3001));
        assert!(center.is_empty());
    }

    #[test]
    fn toasts_stack_and_expire_independently() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();
        center.push("first", ToastLevel::Info, t0);
        center.push("second", ToastLevel::Error, t0 + Duration::from_secs(2));
        assert_eq!(center.visible().len(), 2);

        // First expires at t0+3s, second at t0+5s.
        center.prune(t0 + Duration::from_millis(3500));
        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].message, "second");
    }

    #[test]
    fn a_burst_keeps_every_toast_until_its_ttl() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();
        for i in 0..8 {
            center.push(format!("toast {i}"), ToastLevel::Info, t0);
        }
        // Only expiry removes a toast; count alone never does.
        center.prune(t0 + Duration::from_millis(2999));
        assert_eq!(center.visible().len(), 8);
        assert_eq!(center.visible()[0].message, "toast 0");

        center.prune(t0 + Duration::from_millis(3001));
        assert!(center.is_empty());
    }
}
