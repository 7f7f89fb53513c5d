//! Error types used by event channels, subscriptions and handlers.
//!
//! This module defines three error enums:
//!
//! - [`SubscribeError`] — a registration was rejected (the channel is left unmodified).
//! - [`HandlerError`] — a fallible handler rejected a payload.
//! - [`PublishError`] — delivery was aborted because a handler failed.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//!
//! A dead target during delivery is **not** an error: it is counted in
//! [`Delivery::skipped`](crate::Delivery::skipped) and otherwise ignored.

use thiserror::Error;

use crate::events::SubscriptionId;

/// # Errors produced while registering a subscriber.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    /// The weak target passed to the channel no longer resolves.
    #[error("subscription target is no longer alive")]
    DeadTarget,
}

impl SubscribeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::SubscribeError;
    ///
    /// assert_eq!(SubscribeError::DeadTarget.as_label(), "subscribe_dead_target");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscribeError::DeadTarget => "subscribe_dead_target",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SubscribeError::DeadTarget => "dead target: weak reference did not resolve".to_string(),
        }
    }
}

/// # Errors returned by fallible handlers.
///
/// Registered with [`EventChannel::try_subscribe`](crate::EventChannel::try_subscribe).
/// The first error raised during a publish aborts delivery to the remaining subscribers.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Handler could not process the payload.
    #[error("handler failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        HandlerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { error } => format!("error: {error}"),
        }
    }
}

/// # Errors produced by [`EventChannel::publish`](crate::EventChannel::publish).
///
/// Delivery is fail-fast: the first failing handler stops the publish and
/// subscribers registered after it do not see the payload.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// A handler returned an error.
    #[error("delivery aborted by subscription {subscription}: {source}")]
    Handler {
        /// Registration whose handler failed.
        subscription: SubscriptionId,
        /// The error returned by the handler.
        #[source]
        source: HandlerError,
    },
}

impl PublishError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::{HandlerError, PublishError, SubscriptionId};
    ///
    /// let err = PublishError::Handler {
    ///     subscription: SubscriptionId::from_raw(7),
    ///     source: HandlerError::failed("boom"),
    /// };
    /// assert_eq!(err.as_label(), "publish_handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PublishError::Handler { .. } => "publish_handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            PublishError::Handler {
                subscription,
                source,
            } => format!("subscription={subscription} {}", source.as_message()),
        }
    }

    /// Registration whose handler aborted the delivery.
    pub fn subscription(&self) -> SubscriptionId {
        match self {
            PublishError::Handler { subscription, .. } => *subscription,
        }
    }
}
