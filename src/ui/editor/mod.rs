// SPDX-License-Identifier: MPL-2.0
//! Editor state coordinator for the preview panel.
//!
//! This module owns the seven pieces of interdependent panel state (image
//! source, three palette colors, duration, audio source, playing flag) and
//! every rule for mutating them. It follows the "state down, messages up"
//! pattern: the form and the collaborators send [`Message`]s, the
//! coordinator answers with an [`Event`] the application root turns into
//! side effects. Collaborators never touch the state directly.

use crate::config::defaults::{
    DEFAULT_AUDIO_SRC, DEFAULT_DURATION_MS, DEFAULT_IMAGE_SRC, MIN_DURATION_MS,
};
use crate::palette::Palette;
use iced::Element;

mod messages;
mod view;

pub use messages::{Event, Message};

/// Width of the form column, in logical pixels.
pub const PANEL_WIDTH: f32 = 280.0;

/// Fixed initial values, assembled once by the application root from the
/// config file and CLI overrides and injected at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub image_src: String,
    pub music_src: String,
    pub palette: Palette,
    pub duration_ms: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            image_src: DEFAULT_IMAGE_SRC.to_string(),
            music_src: DEFAULT_AUDIO_SRC.to_string(),
            palette: Palette::default(),
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Mutable editor state. Created once, owned by the panel for its whole
/// lifetime.
#[derive(Debug, Clone)]
pub struct State {
    image_src: String,
    music_src: String,
    color: String,
    background_color: String,
    alternative_color: String,
    duration_ms: u64,
    /// Text mirror of `duration_ms`, kept in sync on every commit so a
    /// rejected edit leaves the displayed value unchanged.
    duration_input: String,
    playing: bool,
}

impl State {
    pub fn new(defaults: Defaults) -> Self {
        let duration_ms = defaults.duration_ms.max(MIN_DURATION_MS);
        Self {
            image_src: defaults.image_src,
            music_src: defaults.music_src,
            color: defaults.palette.color,
            background_color: defaults.palette.background_color,
            alternative_color: defaults.palette.alternative_color,
            duration_ms,
            duration_input: duration_ms.to_string(),
            playing: false,
        }
    }

    /// Update the state and emit an [`Event`] for the parent when needed.
    ///
    /// Every handler is total: invalid input is normalized to a no-op or to
    /// the empty sentinel, never an error.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ImageSrcChanged(src) => {
                self.image_src = src;
                Event::None
            }
            Message::DurationChanged(input) => self.handle_duration_change(&input),
            Message::ColorChanged(value) => {
                self.color = value;
                Event::None
            }
            Message::BackgroundColorChanged(value) => {
                self.background_color = value;
                Event::None
            }
            Message::AlternativeColorChanged(value) => {
                self.alternative_color = value;
                Event::None
            }
            Message::UploadMusicPressed => Event::MusicFilePickRequested,
            Message::ResetPalettePressed => self.reset_palette(),
            Message::PaletteExtracted(palette) => self.handle_palette_change(palette),
            Message::MusicSourceDerived(source) => self.handle_music_src_change(source),
            Message::ImageSrcRestored(src) => {
                self.image_src = src;
                Event::None
            }
            Message::PlaybackStarted => {
                self.playing = true;
                Event::None
            }
            Message::PlaybackStopped => {
                self.playing = false;
                Event::None
            }
        }
    }

    /// The duration widget reports text. Anything that does not parse as an
    /// integer of at least [`MIN_DURATION_MS`] leaves the previous value in
    /// place.
    fn handle_duration_change(&mut self, input: &str) -> Event {
        let Ok(next) = input.trim().parse::<u64>() else {
            return Event::None;
        };
        if next < MIN_DURATION_MS {
            return Event::None;
        }
        self.duration_ms = next;
        self.duration_input = next.to_string();
        Event::DurationCommitted(next)
    }

    /// Replaces all three colors from one reported palette in a single
    /// update; the form never observes a partially applied palette.
    fn handle_palette_change(&mut self, palette: Palette) -> Event {
        self.color = palette.color;
        self.background_color = palette.background_color;
        self.alternative_color = palette.alternative_color;
        Event::None
    }

    /// A failed upload degrades to "no audio" instead of leaving a stale or
    /// invalid source wired into the player.
    fn handle_music_src_change(&mut self, source: Option<String>) -> Event {
        self.music_src = source.unwrap_or_default();
        Event::MusicSourceReplaced
    }

    /// First phase of the forced re-extraction: clear the source now and
    /// hand the prior value to the parent, which schedules
    /// [`Message::ImageSrcRestored`] for a later runtime turn. The preview
    /// observes the empty sentinel and then the restored value, so it
    /// re-runs even though the source ends up unchanged.
    fn reset_palette(&mut self) -> Event {
        let restore = std::mem::take(&mut self.image_src);
        Event::PaletteResetScheduled { restore }
    }

    /// Render the form.
    pub fn view(&self) -> Element<'_, Message> {
        view::render(self)
    }

    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    pub fn music_src(&self) -> &str {
        &self.music_src
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn alternative_color(&self) -> &str {
        &self.alternative_color
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// While true the form layer withholds every other input.
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Defaults::default())
    }
}
