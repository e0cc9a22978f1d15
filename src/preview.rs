// SPDX-License-Identifier: MPL-2.0
//! Image preview collaborator.
//!
//! The preview is a pure function of its input source: every change,
//! including into and out of the empty reset sentinel, re-runs the load and
//! the palette extraction. Completions for a source that is no longer
//! current are dropped, so the reported palette always matches the source
//! the coordinator currently holds.

use crate::error::Result;
use crate::palette::{self, Palette};
use iced::widget::image::{Handle, Image};
use iced::widget::{container, text};
use iced::{Element, Length, Task};

/// Height of the preview surface, in logical pixels.
const PREVIEW_HEIGHT: f32 = 420.0;

/// A finished load: the decoded image ready for display plus the palette
/// extracted from its pixels.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub handle: Handle,
    pub palette: Palette,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        source: String,
        result: Result<Loaded>,
    },
}

/// Events propagated to the application root.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// An extraction completed for the current source.
    PaletteExtracted(Palette),
}

#[derive(Debug, Default)]
pub struct State {
    source: String,
    image: Option<Handle>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Re-keys the preview to a new source and kicks off the load. The
    /// empty sentinel clears the surface without loading anything.
    pub fn set_source(&mut self, source: &str) -> Task<Message> {
        self.source = source.to_string();
        self.image = None;
        if self.source.is_empty() {
            return Task::none();
        }

        let source = self.source.clone();
        let key = self.source.clone();
        Task::perform(async move { load(&source) }, move |result| Message::Loaded {
            source: key.clone(),
            result,
        })
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Loaded { source, result } => {
                if source != self.source {
                    // Stale completion: the source changed while loading.
                    return Event::None;
                }
                match result {
                    Ok(loaded) => {
                        self.image = Some(loaded.handle);
                        Event::PaletteExtracted(loaded.palette)
                    }
                    Err(err) => {
                        eprintln!("Failed to load preview image {:?}: {err}", self.source);
                        self.image = None;
                        Event::None
                    }
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.image {
            Some(handle) => Image::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT))
                .into(),
            None => container(text("no preview").size(13))
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT))
                .padding(24)
                .into(),
        }
    }
}

/// Decodes the image named by `source` and extracts its palette.
pub fn load(source: &str) -> Result<Loaded> {
    let decoded = image_rs::open(source)?;
    let palette = palette::extract(&decoded);
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Loaded {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        palette,
    })
}
