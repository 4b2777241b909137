//! # Cubatrice cards
//!
//! Renders the technology cards of every race: a fitted title and an
//! `input -> output` cost line drawn on each race's card template.

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compose;
pub mod cost;
pub mod error;
pub mod geometry;
pub mod image;
pub mod layer;
pub mod layout;
#[cfg(feature = "cli")]
pub mod logs;
pub mod pipeline;
pub mod store;
pub mod text;

pub use error::{Error, Result};
