// Services module for business logic
pub mod backup;
pub mod editor_cli;
pub mod extension_scanner;
pub mod installer;
pub mod marketplace_client;
