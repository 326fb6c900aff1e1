//! Command handlers

pub mod category;
pub mod config;
pub mod note;
pub mod shell;
pub mod status;
