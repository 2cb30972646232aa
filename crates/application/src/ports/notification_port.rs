//! User notification port

use std::fmt;

#[cfg(test)]
use mockall::automock;
use serde::Serialize;

/// A blocking, user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Short headline
    pub title: String,
    /// Explanation in plain language
    pub message: String,
}

impl Alert {
    /// Create a new alert
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Port for presenting alerts to the user
#[cfg_attr(test, automock)]
pub trait NotificationPort: Send + Sync {
    /// Show an alert
    fn alert(&self, alert: &Alert);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_display() {
        let alert = Alert::new("Location not found", "Please try a different place name.");
        assert_eq!(
            alert.to_string(),
            "Location not found: Please try a different place name."
        );
    }
}
