//! UI components for the bulletin editor

pub mod display;
pub mod edit_form;
pub mod notice;
