// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme};

pub mod palette {
    use iced::Color;

    pub const SKY: Color = Color::from_rgb(0.04, 0.06, 0.11); // #0a0f1c
    pub const SURFACE: Color = Color::from_rgba(0.1, 0.13, 0.2, 0.92);
    pub const ACCENT_BLUE: Color = Color::from_rgb(0.23, 0.51, 0.96); // #3b82f6
    pub const DANGER: Color = Color::from_rgb(0.94, 0.27, 0.27); // #ef4444
    pub const SAFE: Color = Color::from_rgb(0.13, 0.77, 0.37); // #22c55e
    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.9, 0.9, 0.9);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.6, 0.6, 0.6);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.3);
}

pub fn container_card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SURFACE)),
        border: Border {
            color: palette::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
        ..Default::default()
    }
}

pub fn container_suggestions(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgb(0.14, 0.17, 0.24))),
        border: Border {
            color: palette::BORDER,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

fn container_result(accent: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color { a: 0.15, ..accent })),
        border: Border {
            color: accent,
            width: 2.0,
            radius: 8.0.into(),
        },
        text_color: Some(palette::TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn container_result_danger(_theme: &Theme) -> container::Style {
    container_result(palette::DANGER)
}

pub fn container_result_safe(_theme: &Theme) -> container::Style {
    container_result(palette::SAFE)
}

pub fn button_primary(_theme: &Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: Some(Background::Color(palette::ACCENT_BLUE)),
        text_color: Color::WHITE,
        border: Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: Color::from_rgba(0.23, 0.51, 0.96, 0.4),
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color::from_rgb(0.3, 0.6, 1.0))),
            shadow: Shadow {
                color: Color::from_rgba(0.23, 0.51, 0.96, 0.6),
                offset: iced::Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(palette::BORDER)),
            text_color: palette::TEXT_SECONDARY,
            shadow: Shadow::default(),
            ..base
        },
        _ => base,
    }
}

pub fn button_suggestion(_theme: &Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: None,
        text_color: palette::TEXT_PRIMARY,
        border: Border::default(),
        shadow: Shadow::default(),
    };

    match status {
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(Background::Color(Color::from_rgba(0.23, 0.51, 0.96, 0.3))),
            ..base
        },
        _ => base,
    }
}
