//! Core functionality for the tab session, document import, and configuration

pub mod config;
pub mod document;
pub mod import;
pub mod render;
pub mod session;
