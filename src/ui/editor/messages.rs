// SPDX-License-Identifier: MPL-2.0
//! Editor message/event types re-exported by the facade.

use crate::palette::Palette;

/// Messages consumed by [`super::State::update`].
///
/// The first group comes from the form widgets; the second group is the
/// callback surface reserved for the collaborators and the scheduled reset
/// step. The form never sends messages from the second group.
#[derive(Debug, Clone)]
pub enum Message {
    ImageSrcChanged(String),
    DurationChanged(String),
    ColorChanged(String),
    BackgroundColorChanged(String),
    AlternativeColorChanged(String),
    UploadMusicPressed,
    ResetPalettePressed,

    /// The preview finished an extraction for the current image source.
    PaletteExtracted(Palette),
    /// The upload intake finished; `None` means the file could not be
    /// turned into a playable source.
    MusicSourceDerived(Option<String>),
    /// Second phase of the palette reset: put the remembered source back.
    ImageSrcRestored(String),
    /// The audio player actually started playing.
    PlaybackStarted,
    /// The audio player actually stopped or paused.
    PlaybackStopped,
}

/// Events propagated to the application root for side effects.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// Open the audio file picker.
    MusicFilePickRequested,
    /// The image source was cleared; deliver `ImageSrcRestored(restore)`
    /// on a later runtime turn, after the cleared source has been observed
    /// by the preview.
    PaletteResetScheduled { restore: String },
    /// A valid duration was committed.
    DurationCommitted(u64),
    /// The music source was replaced (possibly by the empty sentinel).
    MusicSourceReplaced,
}
