// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use crate::style::{self, palette};
use crate::Message;
use fot_core::{AutocompleteField, FormState, ResultPanel, SubmissionController, Tone};
use iced::font::{self, Font};
use iced::widget::{button, column, container, row, text, text_input, Column, Row};
use iced::{Element, Length, Point, Rectangle};

/// The two autocomplete inputs, for hit-testing clicks against their layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Carrier,
    Airport,
}

impl FieldId {
    pub const ALL: [FieldId; 2] = [FieldId::Carrier, FieldId::Airport];

    /// Container wrapping the input and its suggestion list.
    pub fn container_id(self) -> container::Id {
        match self {
            FieldId::Carrier => container::Id::new("carrier-field"),
            FieldId::Airport => container::Id::new("airport-field"),
        }
    }
}

/// A press dismisses a field's suggestions unless it lands on the input or
/// its list. Fields that are not laid out count as missed.
pub fn pressed_outside(bounds: Option<Rectangle>, point: Point) -> bool {
    bounds.map_or(true, |b| !b.contains(point))
}

const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

fn suggestion_list<'a>(
    field: &'a AutocompleteField,
    on_pick: fn(usize) -> Message,
) -> Option<Element<'a, Message>> {
    if field.suggestions().is_empty() {
        return None;
    }

    let rows = field
        .suggestions()
        .iter()
        .enumerate()
        .map(|(position, suggestion)| {
            let label = Row::with_children(suggestion.segments.iter().map(|segment| {
                let t = text(segment.text.as_str()).size(14);
                let t = if segment.highlighted { t.font(BOLD) } else { t };
                Element::from(t)
            }));
            Element::from(
                button(label)
                    .on_press(on_pick(position))
                    .style(style::button_suggestion)
                    .width(Length::Fill)
                    .padding([6, 10]),
            )
        });

    Some(
        container(Column::with_children(rows))
            .style(style::container_suggestions)
            .width(Length::Fill)
            .into(),
    )
}

fn autocomplete<'a>(
    id: FieldId,
    label: &'a str,
    placeholder: &'a str,
    field: &'a AutocompleteField,
    on_input: fn(String) -> Message,
    on_pick: fn(usize) -> Message,
) -> Element<'a, Message> {
    let mut col = column![
        text(label).size(13).color(palette::TEXT_SECONDARY),
        text_input(placeholder, field.text())
            .on_input(on_input)
            .padding(10),
    ]
    .spacing(4);

    if let Some(list) = suggestion_list(field, on_pick) {
        col = col.push(list);
    }
    container(col).id(id.container_id()).into()
}

fn result_box(panel: &ResultPanel) -> Element<'_, Message> {
    let style = match panel.tone {
        Tone::Danger => style::container_result_danger,
        Tone::Safe => style::container_result_safe,
    };

    container(
        column![
            text(panel.title.as_str()).size(20).font(BOLD),
            text(panel.percent.as_str()).size(36).font(BOLD),
            text(panel.message.as_str()).size(14),
        ]
        .spacing(6),
    )
    .style(style)
    .padding(16)
    .width(Length::Fill)
    .into()
}

pub fn view<'a>(form: &'a FormState, submission: &'a SubmissionController) -> Element<'a, Message> {
    let ui = submission.ui();

    let when = row![
        column![
            text("Date").size(13).color(palette::TEXT_SECONDARY),
            text_input("YYYY-MM-DD", &form.date)
                .on_input(Message::DateChanged)
                .padding(10),
        ]
        .spacing(4)
        .width(Length::Fill),
        column![
            text("Time").size(13).color(palette::TEXT_SECONDARY),
            text_input("HH:MM", &form.time)
                .on_input(Message::TimeChanged)
                .on_submit(Message::Submit)
                .padding(10),
        ]
        .spacing(4)
        .width(Length::Fill),
    ]
    .spacing(12);

    let mut content = column![
        text("FlightOnTime").size(28).font(BOLD),
        text("Will your flight leave on time?")
            .size(14)
            .color(palette::TEXT_SECONDARY),
        autocomplete(
            FieldId::Carrier,
            "Airline",
            "Type a carrier name or code",
            &form.carrier,
            Message::CarrierInput,
            Message::CarrierPicked,
        ),
        autocomplete(
            FieldId::Airport,
            "Departure airport",
            "Type an airport name or code",
            &form.airport,
            Message::AirportInput,
            Message::AirportPicked,
        ),
        when,
    ]
    .spacing(14);

    if ui.submit_visible {
        content = content.push(
            button(text("Predict delay").size(16))
                .on_press(Message::Submit)
                .style(style::button_primary)
                .padding([10, 20])
                .width(Length::Fill),
        );
    }
    if ui.loader_visible {
        content = content.push(text("Calculating...").color(palette::TEXT_SECONDARY));
    }
    if let Some(panel) = submission.panel() {
        content = content.push(result_box(panel));
    }

    container(content)
        .style(style::container_card)
        .padding(24)
        .max_width(460.0)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_hit_testing() {
        let field = Rectangle::new(Point::new(100.0, 200.0), iced::Size::new(300.0, 160.0));
        assert!(!pressed_outside(Some(field), Point::new(150.0, 220.0)));
        assert!(!pressed_outside(Some(field), Point::new(390.0, 350.0)));
        assert!(pressed_outside(Some(field), Point::new(150.0, 420.0)));
        assert!(pressed_outside(Some(field), Point::new(20.0, 220.0)));
        assert!(pressed_outside(None, Point::new(150.0, 220.0)));
    }

    #[test]
    fn test_field_containers_are_distinct() {
        assert_ne!(
            FieldId::Carrier.container_id(),
            FieldId::Airport.container_id()
        );
    }
}
