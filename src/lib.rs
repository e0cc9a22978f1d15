// SPDX-License-Identifier: MPL-2.0
//! `iced_cover` is a cover preview editor built with the Iced GUI framework.
//!
//! It pairs an image with an audio track: the panel derives a color palette
//! from the image (editable by hand, re-derivable on demand), holds a target
//! duration, and previews the result while the track plays.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod palette;
pub mod preview;
pub mod ui;
