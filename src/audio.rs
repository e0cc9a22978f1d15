// SPDX-License-Identifier: MPL-2.0
//! Audio playback collaborator.
//!
//! [`Player`] owns the rodio output stream and the sink for the current
//! track. The editor coordinator never commands playback; the transport
//! buttons here do, and the resulting *real* transitions are reported back
//! as [`Transition`] values the root translates into coordinator messages.
//! When no output device exists the player runs in silent mode and every
//! operation degrades to a no-op.

use crate::error::{Error, Result};
use iced::widget::{button, text, Row};
use iced::{alignment::Vertical, Element};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Transport messages emitted by the player's own view.
#[derive(Debug, Clone)]
pub enum Message {
    PlayPressed,
    PausePressed,
}

/// A real playback transition observed by the panel. Only genuine state
/// changes are reported; redundant presses yield [`Transition::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Started,
    Stopped,
}

pub struct Player {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    source: String,
}

impl Player {
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, stream_handle)) => Self {
                _stream: Some(stream),
                stream_handle: Some(stream_handle),
                sink: None,
                source: String::new(),
            },
            Err(err) => {
                eprintln!("No audio output device ({err}); running in silent mode");
                Self {
                    _stream: None,
                    stream_handle: None,
                    sink: None,
                    source: String::new(),
                }
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Adopts a new source, stopping and dropping whatever sink the
    /// previous source had. Replacing a source always releases its decoder
    /// and device slot.
    pub fn set_source(&mut self, source: &str) -> Transition {
        if self.source == source {
            return Transition::None;
        }
        self.source = source.to_string();
        self.unload()
    }

    pub fn update(&mut self, message: Message) -> Transition {
        match message {
            Message::PlayPressed => self.play(),
            Message::PausePressed => self.pause(),
        }
    }

    /// Converts sink exhaustion into a stop transition. Driven by the tick
    /// subscription while playback is active.
    pub fn poll_finished(&mut self) -> Transition {
        let finished = self.sink.as_ref().is_some_and(|sink| sink.empty());
        if !finished {
            return Transition::None;
        }
        self.unload()
    }

    /// True while the sink is actually producing audio.
    pub fn is_active(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }

    fn play(&mut self) -> Transition {
        if self.source.is_empty() {
            return Transition::None;
        }
        if self.sink.is_none() {
            match self.load() {
                Ok(sink) => self.sink = Some(sink),
                Err(err) => {
                    eprintln!("Cannot start playback of {:?}: {err}", self.source);
                    return Transition::None;
                }
            }
        }
        let Some(sink) = &self.sink else {
            return Transition::None;
        };
        if !sink.is_paused() {
            return Transition::None;
        }
        sink.play();
        Transition::Started
    }

    fn pause(&mut self) -> Transition {
        let Some(sink) = &self.sink else {
            return Transition::None;
        };
        if sink.is_paused() {
            return Transition::None;
        }
        sink.pause();
        Transition::Stopped
    }

    fn unload(&mut self) -> Transition {
        let was_playing = self
            .sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && !sink.empty());
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        if was_playing {
            Transition::Stopped
        } else {
            Transition::None
        }
    }

    /// Opens and decodes the current source into a fresh, paused sink.
    fn load(&self) -> Result<Sink> {
        let Some(stream_handle) = &self.stream_handle else {
            return Err(Error::Audio("no output device".to_string()));
        };
        let file = File::open(&self.source)?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|err| Error::Audio(err.to_string()))?;
        let sink = Sink::try_new(stream_handle).map_err(|err| Error::Audio(err.to_string()))?;
        sink.append(decoder);
        sink.pause();
        Ok(sink)
    }

    /// Transport row: play/pause plus the current track name.
    pub fn view(&self) -> Element<'_, Message> {
        let playing = self.is_active();

        let mut play_button = button(text("play").size(14))
            .padding(8)
            .style(button::primary);
        if !playing && !self.source.is_empty() {
            play_button = play_button.on_press(Message::PlayPressed);
        }

        let mut pause_button = button(text("pause").size(14))
            .padding(8)
            .style(button::secondary);
        if playing {
            pause_button = pause_button.on_press(Message::PausePressed);
        }

        let track = if self.source.is_empty() {
            text("no audio").size(13)
        } else {
            text(
                Path::new(&self.source)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| self.source.clone()),
            )
            .size(13)
        };

        Row::new()
            .spacing(8)
            .align_y(Vertical::Center)
            .push(play_button)
            .push(pause_button)
            .push(track)
            .into()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Probes an uploaded file by opening it and decoding its header. Only a
/// readable, decodable file yields a playable source string.
pub fn derive_source(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    Decoder::new(BufReader::new(file)).map_err(|err| Error::Audio(err.to_string()))?;
    Ok(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Minimal mono 16-bit PCM WAV: RIFF header plus a short ramp.
    fn write_test_wav(path: &Path) {
        let sample_rate: u32 = 8_000;
        let samples: Vec<i16> = (0..800).map(|i| ((i % 64) * 512) as i16).collect();
        let data_len = (samples.len() * 2) as u32;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        fs::write(path, bytes).expect("write wav");
    }

    #[test]
    fn derive_source_accepts_a_decodable_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("track.wav");
        write_test_wav(&path);

        let source = derive_source(&path).expect("wav should decode");
        assert!(source.ends_with("track.wav"));
    }

    #[test]
    fn derive_source_rejects_a_missing_file() {
        let dir = tempdir().expect("temp dir");
        let err = derive_source(&dir.path().join("absent.m4a")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn derive_source_rejects_a_non_audio_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not audio").expect("write file");

        let err = derive_source(&path).unwrap_err();
        assert!(matches!(err, Error::Audio(_)));
    }

    #[test]
    fn play_without_a_source_is_a_no_op() {
        let mut player = Player::new();
        assert_eq!(player.update(Message::PlayPressed), Transition::None);
    }

    #[test]
    fn play_with_an_unreadable_source_is_a_no_op() {
        let mut player = Player::new();
        player.set_source("missing.m4a");
        assert_eq!(player.update(Message::PlayPressed), Transition::None);
        assert!(!player.is_active());
    }

    #[test]
    fn pause_without_a_sink_is_a_no_op() {
        let mut player = Player::new();
        assert_eq!(player.update(Message::PausePressed), Transition::None);
    }

    #[test]
    fn setting_the_same_source_twice_changes_nothing() {
        let mut player = Player::new();
        assert_eq!(player.set_source("a.wav"), Transition::None);
        assert_eq!(player.set_source("a.wav"), Transition::None);
        assert_eq!(player.source(), "a.wav");
    }

    #[test]
    fn clearing_the_source_releases_it() {
        let mut player = Player::new();
        player.set_source("a.wav");
        player.set_source("");
        assert_eq!(player.source(), "");
        assert!(!player.is_active());
    }

    #[test]
    fn view_renders_with_and_without_a_source() {
        let mut player = Player::new();
        let _element = player.view();
        drop(_element);
        player.set_source("a.wav");
        let _element = player.view();
    }
}
