// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the editor panel and
//! its collaborators.
//!
//! The `App` struct wires the editor state coordinator to the preview
//! surface and the audio player, and translates coordinator events into
//! side effects: file dialogs, the scheduled palette-reset restore, and
//! config persistence. Collaborator inputs are re-derived from coordinator
//! state after every editor update, which is what makes the reset
//! perturbation observable downstream.

use crate::audio::{self, Player, Transition};
use crate::config;
use crate::palette::Palette;
use crate::preview;
use crate::ui::editor::{self, Event as EditorEvent};
use iced::widget::{container, Column, Row};
use iced::{time, window, Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;

pub struct App {
    editor: editor::State,
    preview: preview::State,
    player: Player,
}

/// Top-level messages consumed by [`App::update`]. The component variants
/// forward lower-level messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Editor(editor::Message),
    Preview(preview::Message),
    Audio(audio::Message),
    MusicFileChosen(Option<PathBuf>),
    Tick(std::time::Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional image path to preload into the panel.
    pub image_path: Option<String>,
    /// Optional audio path overriding the configured default track.
    pub audio_path: Option<String>,
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(move || App::new(flags.clone()), App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes the panel from the config file and CLI overrides, then
    /// brings the collaborators in line with the initial sources.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();

        let defaults = editor::Defaults {
            image_src: flags
                .image_path
                .or(config.image_src)
                .unwrap_or_else(|| config::DEFAULT_IMAGE_SRC.to_string()),
            music_src: flags
                .audio_path
                .or(config.audio_src)
                .unwrap_or_else(|| config::DEFAULT_AUDIO_SRC.to_string()),
            palette: Palette::default(),
            duration_ms: config.duration_ms.unwrap_or(config::DEFAULT_DURATION_MS),
        };

        let mut app = App {
            editor: editor::State::new(defaults),
            preview: preview::State::new(),
            player: Player::new(),
        };
        let task = app.sync_collaborators();
        (app, task)
    }

    fn title(&self) -> String {
        String::from("Cover Preview")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Editor(message) => self.handle_editor_message(message),
            Message::Preview(message) => match self.preview.update(message) {
                preview::Event::PaletteExtracted(palette) => {
                    self.handle_editor_message(editor::Message::PaletteExtracted(palette))
                }
                preview::Event::None => Task::none(),
            },
            Message::Audio(message) => {
                let transition = self.player.update(message);
                self.apply_transition(transition);
                Task::none()
            }
            Message::MusicFileChosen(None) => Task::none(),
            Message::MusicFileChosen(Some(path)) => {
                let source = match audio::derive_source(&path) {
                    Ok(source) => Some(source),
                    Err(err) => {
                        eprintln!("Rejected uploaded audio {:?}: {err}", path);
                        None
                    }
                };
                self.handle_editor_message(editor::Message::MusicSourceDerived(source))
            }
            Message::Tick(_) => {
                let transition = self.player.poll_finished();
                self.apply_transition(transition);
                Task::none()
            }
        }
    }

    /// Routes a message through the coordinator, maps its event to a side
    /// effect, and re-synchronizes the collaborators with whatever state
    /// came out of the update.
    fn handle_editor_message(&mut self, message: editor::Message) -> Task<Message> {
        let side_effect = match self.editor.update(message) {
            EditorEvent::None => Task::none(),
            EditorEvent::MusicFilePickRequested => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .add_filter("Audio Files", &["aac", "flac", "m4a", "mp3", "ogg", "wav"])
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::MusicFileChosen,
            ),
            // The restore travels as task output, so the runtime hands it
            // back on a later turn, strictly after the cleared source below
            // has been pushed into the preview.
            EditorEvent::PaletteResetScheduled { restore } => Task::done(Message::Editor(
                editor::Message::ImageSrcRestored(restore),
            )),
            EditorEvent::DurationCommitted(_) => {
                self.persist_defaults();
                Task::none()
            }
            EditorEvent::MusicSourceReplaced => {
                self.persist_defaults();
                Task::none()
            }
        };

        Task::batch([side_effect, self.sync_collaborators()])
    }

    /// Pushes coordinator state down into the collaborators. The preview is
    /// a pure function of the image source: any difference re-keys it,
    /// including into and out of the empty reset sentinel.
    fn sync_collaborators(&mut self) -> Task<Message> {
        let mut tasks = Vec::new();

        if self.editor.image_src() != self.preview.source() {
            tasks.push(
                self.preview
                    .set_source(self.editor.image_src())
                    .map(Message::Preview),
            );
        }

        if self.editor.music_src() != self.player.source() {
            let transition = self.player.set_source(self.editor.music_src());
            self.apply_transition(transition);
        }

        Task::batch(tasks)
    }

    /// Reflects a real player transition into the coordinator's playing
    /// flag. Transitions only flip the flag, so the returned event is
    /// always empty.
    fn apply_transition(&mut self, transition: Transition) {
        let message = match transition {
            Transition::Started => editor::Message::PlaybackStarted,
            Transition::Stopped => editor::Message::PlaybackStopped,
            Transition::None => return,
        };
        let _ = self.editor.update(message);
    }

    fn persist_defaults(&self) {
        let config = config::Config {
            image_src: Some(self.editor.image_src().to_string()),
            audio_src: Some(self.editor.music_src().to_string()),
            duration_ms: Some(self.editor.duration_ms()),
        };
        if let Err(err) = config::save(&config) {
            eprintln!("Failed to save settings: {err}");
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        // Poll the sink while audio plays so reaching the end of the track
        // surfaces as a real stop transition.
        if self.player.is_active() {
            time::every(std::time::Duration::from_millis(250)).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let form = self.editor.view().map(Message::Editor);

        let stage = Column::new()
            .spacing(16)
            .push(self.preview.view().map(Message::Preview))
            .push(self.player.view().map(Message::Audio));

        Row::new()
            .spacing(24)
            .padding(12)
            .push(form)
            .push(container(stage).width(Length::Fill))
            .into()
    }
}
