//! Command handlers

pub mod category;
pub mod config;
pub mod site;
pub mod status;
