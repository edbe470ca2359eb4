// Models module for data structures
pub mod extension;
pub mod gallery;
pub mod report;
pub mod settings;
