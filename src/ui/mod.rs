// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! owns its state, consumes its own `Message` type, and reports side
//! effects to the application root through an `Event` enum.

pub mod editor;
