//! Bulletin model, edits, image embedding, share links and configuration

pub mod bulletin;
pub mod config;
pub mod edit;
pub mod error;
pub mod image;
pub mod share;
pub mod state;
