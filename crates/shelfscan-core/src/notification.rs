//! # Notifications
//!
//! One-shot messages the presenter shows after an operation (an alert on a
//! phone, a status line in the terminal).

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// A scan produced a new product.
    pub fn product_added(code: &str) -> Self {
        Self::success("Success", format!("Product added: {code}"))
    }

    /// A scan could not be turned into a product.
    pub fn add_failed() -> Self {
        Self::error("Error", "Could not add the product")
    }

    pub fn product_updated() -> Self {
        Self::success("Success", "Product updated")
    }

    pub fn product_deleted() -> Self {
        Self::success("Success", "Product deleted")
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
