//! Scan requests and gate decisions.

use serde::{Deserialize, Serialize};

/// Where the receipt image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanSource {
    /// Photo taken with the camera.
    #[default]
    Camera,
    /// Image picked from the photo library.
    PhotoLibrary,
    /// Entry typed in by hand.
    Manual,
}

impl std::fmt::Display for ScanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::PhotoLibrary => write!(f, "photo_library"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// A request to run the receipt scan pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    /// Image origin.
    pub source: ScanSource,
}

impl ScanRequest {
    /// Creates a request for the given source.
    pub fn new(source: ScanSource) -> Self {
        Self { source }
    }
}

/// Why a scan was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// Today's free quota is used up.
    DailyLimitReached,
}

impl BlockReason {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::DailyLimitReached => "daily_limit_reached",
        }
    }

    /// Message suitable for an upgrade prompt.
    pub fn upgrade_prompt(self) -> &'static str {
        match self {
            Self::DailyLimitReached => {
                concat!(
                    "You've used all of today's free scans. ",
                    "Upgrade to Premium or add your own OpenAI API key to keep scanning."
                )
            }
        }
    }
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DailyLimitReached => write!(f, "Daily scan limit reached"),
        }
    }
}

/// Consequence of a scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum ScanDecision {
    /// Run the pipeline.
    Proceed,
    /// Do not run it.
    Block(BlockReason),
}

impl ScanDecision {
    /// Returns true for [`ScanDecision::Proceed`].
    pub fn is_proceed(self) -> bool {
        matches!(self, Self::Proceed)
    }
}
