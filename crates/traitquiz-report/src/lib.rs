//! Markdown and HTML rendering of feedback reports.

pub mod html;
pub mod markdown;
