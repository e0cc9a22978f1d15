// SPDX-License-Identifier: MPL-2.0
use iced_cover::config::{self, Config, DEFAULT_DURATION_MS};
use iced_cover::palette::{self, Palette};
use iced_cover::preview;
use iced_cover::ui::editor::{self, Defaults, Event, Message};
use image_rs::{Rgba, RgbaImage};
use tempfile::tempdir;

#[test]
fn config_file_seeds_the_editor_defaults() {
    let dir = tempdir().expect("failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let saved = Config {
        image_src: Some("sleeve.png".to_string()),
        audio_src: Some("track.m4a".to_string()),
        duration_ms: Some(30_000),
    };
    config::save_to_path(&saved, &config_path).expect("failed to write config");

    let loaded = config::load_from_path(&config_path).expect("failed to load config");
    let defaults = Defaults {
        image_src: loaded.image_src.expect("image source"),
        music_src: loaded.audio_src.expect("audio source"),
        palette: Palette::default(),
        duration_ms: loaded.duration_ms.expect("duration"),
    };
    let state = editor::State::new(defaults);

    assert_eq!(state.image_src(), "sleeve.png");
    assert_eq!(state.music_src(), "track.m4a");
    assert_eq!(state.duration_ms(), 30_000);
    assert!(!state.is_playing());
}

#[test]
fn missing_config_fields_fall_back_to_fixed_defaults() {
    let dir = tempdir().expect("failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");
    std::fs::write(&config_path, "image_src = \"sleeve.png\"\n").expect("failed to write config");

    let loaded = config::load_from_path(&config_path).expect("failed to load config");
    assert_eq!(loaded.image_src.as_deref(), Some("sleeve.png"));
    assert_eq!(loaded.duration_ms.unwrap_or(DEFAULT_DURATION_MS), DEFAULT_DURATION_MS);
}

#[test]
fn extracted_palette_flows_into_the_coordinator() {
    let dir = tempdir().expect("failed to create temporary directory");
    let image_path = dir.path().join("cover.png");
    RgbaImage::from_pixel(16, 16, Rgba([200, 40, 40, 255]))
        .save(&image_path)
        .expect("failed to write png");
    let source = image_path.to_string_lossy().into_owned();

    // Drive the collaborator contract by hand: key the preview to the
    // coordinator's source, complete the load, and hand the palette back.
    let mut state = editor::State::default();
    state.update(Message::ImageSrcChanged(source.clone()));

    let mut surface = preview::State::new();
    let _task = surface.set_source(state.image_src());
    let event = surface.update(preview::Message::Loaded {
        source: source.clone(),
        result: preview::load(&source),
    });

    let preview::Event::PaletteExtracted(reported) = event else {
        panic!("expected an extraction for the current source");
    };
    state.update(Message::PaletteExtracted(reported));

    assert_eq!(
        palette::parse_hex(state.background_color()),
        Some([200, 40, 40])
    );
    assert!(!state.color().is_empty());
    assert!(!state.alternative_color().is_empty());
}

#[test]
fn palette_reset_perturbs_and_restores_the_source() {
    let mut state = editor::State::default();
    state.update(Message::ImageSrcChanged("photo.jpg".to_string()));

    let mut surface = preview::State::new();
    let _task = surface.set_source(state.image_src());
    assert_eq!(surface.source(), "photo.jpg");

    // Phase one: the coordinator clears the source synchronously and the
    // preview observes the empty sentinel.
    let Event::PaletteResetScheduled { restore } = state.update(Message::ResetPalettePressed)
    else {
        panic!("expected a scheduled restore");
    };
    assert_eq!(state.image_src(), "");
    let _task = surface.set_source(state.image_src());
    assert_eq!(surface.source(), "");

    // Phase two, a runtime turn later: the source comes back and the
    // preview is re-keyed to the identical value it started from.
    state.update(Message::ImageSrcRestored(restore));
    assert_eq!(state.image_src(), "photo.jpg");
    let _task = surface.set_source(state.image_src());
    assert_eq!(surface.source(), "photo.jpg");
}
