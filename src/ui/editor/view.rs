// SPDX-License-Identifier: MPL-2.0
//! Form layout for the editor panel.
//!
//! The coordinator only exposes the `playing` flag; enforcing disablement
//! happens here, by withholding `on_input`/`on_press` from every control
//! while audio plays.

use iced::widget::{button, container, rule, text, text_input, Column};
use iced::{Background, Border, Color, Element, Length};

use super::{Message, State, PANEL_WIDTH};
use crate::palette;

pub fn render(state: &State) -> Element<'_, Message> {
    let editing = !state.playing;

    let mut src_input = text_input("path or URL", &state.image_src).padding(6).size(14);
    if editing {
        src_input = src_input.on_input(Message::ImageSrcChanged);
    }

    let mut duration_input = text_input("60000", &state.duration_input).padding(6).size(14);
    if editing {
        duration_input = duration_input.on_input(Message::DurationChanged);
    }

    let mut upload_button = button(text("upload music").size(14))
        .padding(8)
        .style(button::secondary);
    if editing {
        upload_button = upload_button.on_press(Message::UploadMusicPressed);
    }
    let track_label = if state.music_src.is_empty() {
        text("no audio").size(12)
    } else {
        text(file_name(&state.music_src)).size(12)
    };

    let mut reset_button = button(text("reset palette").size(14))
        .padding(8)
        .style(button::secondary);
    if editing {
        reset_button = reset_button.on_press(Message::ResetPalettePressed);
    }

    Column::new()
        .spacing(12)
        .padding(12)
        .width(Length::Fixed(PANEL_WIDTH))
        .push(labeled("img src", src_input.into()))
        .push(labeled("time ms", duration_input.into()))
        .push(upload_button)
        .push(track_label)
        .push(rule::horizontal(1))
        .push(color_field(
            "color",
            &state.color,
            editing,
            Message::ColorChanged,
        ))
        .push(color_field(
            "background color",
            &state.background_color,
            editing,
            Message::BackgroundColorChanged,
        ))
        .push(color_field(
            "alternative color",
            &state.alternative_color,
            editing,
            Message::AlternativeColorChanged,
        ))
        .push(reset_button)
        .into()
}

fn labeled<'a>(label: &'static str, input: Element<'a, Message>) -> Column<'a, Message> {
    Column::new()
        .spacing(4)
        .push(text(label).size(13))
        .push(input)
}

fn color_field<'a>(
    label: &'static str,
    value: &'a str,
    editing: bool,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    let mut input = text_input("#rrggbb", value).padding(6).size(14);
    if editing {
        input = input.on_input(on_input);
    }

    labeled(label, input.into()).push(swatch(value)).into()
}

/// Color box under each palette input. Unparseable values render as an
/// empty outlined box; the coordinator does not validate color syntax.
fn swatch(value: &str) -> Element<'_, Message> {
    let fill = palette::parse_hex(value).map(|[r, g, b]| Color::from_rgb8(r, g, b));

    container(text(""))
        .width(Length::Fill)
        .height(Length::Fixed(16.0))
        .style(move |_theme: &iced::Theme| container::Style {
            background: fill.map(Background::Color),
            border: Border {
                color: Color::BLACK,
                width: 1.0,
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn file_name(source: &str) -> String {
    std::path::Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}
