//! Display abstraction for the Kestrel transmitter
//!
//! The transmitters in this family carry a 128x64 monochrome LCD
//! (ST7565-class controller). This crate provides:
//!
//! - A page-organized 1bpp [`FrameBuffer`] matching the controller's
//!   memory layout
//! - Bitmap font data and text rendering ([`FONT_5X7`], with a
//!   double-size mode standing in for a second table)
//! - The [`DisplayBackend`] trait the LCD driver implements
//!
//! Rendering is pure buffer manipulation and runs on the host; only
//! `flush` touches hardware.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod font;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use font::{Font, FONT_5X7};
pub use screen::{FrameBuffer, TextStyle, HEIGHT, PAGES, WIDTH};
