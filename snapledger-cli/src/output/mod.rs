//! Output formatting for CLI.

mod json;
mod text;

pub use json::{CredentialOutput, JsonFormatter, ResetOutput, ScanOutput, StatusOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
