//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Sales order production status.
///
/// Only [`OrderStatus::Pending`] and [`OrderStatus::InProgress`] orders
/// compete for fibre stock. Statuses the order API sends that this crate does
/// not know about map to [`OrderStatus::Unknown`] and never compete either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Dispatched,
    Unknown,
}

impl OrderStatus {
    /// Parse a status string as the order API sends it.
    ///
    /// Matching ignores case and treats spaces and hyphens like underscores,
    /// so `"In Progress"`, `"in-progress"` and `"in_progress"` are the same.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "dispatched" => Self::Dispatched,
            _ => Self::Unknown,
        }
    }

    /// Whether orders in this status draw on fibre stock.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Dispatched => "dispatched",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour band for how much of the available stock a requirement consumes.
///
/// Derived from `required / available` with strict cut-offs at `0.8` and
/// `1.0`; a ratio of exactly `0.8` is still [`UsageBand::Ok`] and exactly
/// `1.0` is still [`UsageBand::Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UsageBand {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl UsageBand {
    /// The wire representation of this band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for UsageBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
