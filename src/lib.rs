//! wadtext - render text as Doom wall geometry
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  atlas image ──► LookUp                  │
//! │  glyph images ──► matcher ──► ranges     │
//! │                          ↓               │
//! │  word list ──► phrase layout             │
//! │                          ↓               │
//! │              map assembler ──► PWAD      │
//! └──────────────────────────────────────────┘
//! ```

pub mod atlas;
pub mod config;
pub mod error;
pub mod glyph;
pub mod layout;
pub mod map;
pub mod pipeline;
pub mod words;

pub use error::GenerateError;
