// vsix-backup - editor extension backup and restore
// Core library functionality

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::extension::ExtensionId;
pub use utils::error::{Result, VsixError};
