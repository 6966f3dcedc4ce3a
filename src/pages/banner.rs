// 📣 Status banner - transient feedback line for admin actions

use crate::api::MutationResponse;
use crate::validation::ValidationError;
use std::time::{Duration, Instant};

/// Lifetime for quick notices (reset, cap reached)
pub const SHORT_BANNER: Duration = Duration::from_secs(3);
/// Lifetime for server outcomes and validation errors
pub const LONG_BANNER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
    Info,
}

impl BannerKind {
    fn classify(message: &str) -> Self {
        if message.starts_with("Error") {
            BannerKind::Error
        } else if message.starts_with("Éxito") {
            BannerKind::Success
        } else {
            BannerKind::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    message: String,
    kind: BannerKind,
    expires_at: Instant,
}

impl StatusBanner {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self::new_at(message, ttl, Instant::now())
    }

    pub fn new_at(message: impl Into<String>, ttl: Duration, now: Instant) -> Self {
        let message = message.into();
        StatusBanner {
            kind: BannerKind::classify(&message),
            message,
            expires_at: now + ttl,
        }
    }

    pub fn from_mutation(response: &MutationResponse) -> Self {
        let message = if response.success {
            format!("Éxito: {}", response.message)
        } else {
            format!("Error: {}", response.message)
        };
        Self::new(message, LONG_BANNER)
    }

    pub fn from_validation(error: &ValidationError) -> Self {
        let ttl = match error {
            ValidationError::TooManyPosts => SHORT_BANNER,
            _ => LONG_BANNER,
        };
        Self::new(error.to_string(), ttl)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> BannerKind {
        self.kind
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Drop `banner` once its lifetime has passed
pub fn dismiss_expired(banner: &mut Option<StatusBanner>, now: Instant) {
    if banner.as_ref().is_some_and(|b| b.is_expired_at(now)) {
        *banner = None;
    }
}
