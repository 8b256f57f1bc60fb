// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use crate::style::palette;
use fot_core::scene::render::render;
use fot_core::scene::Scene;
use iced::widget::canvas::{self, Geometry, Path};
use iced::{mouse, Color, Point, Rectangle, Renderer, Theme};

/// Paints the scene's projected triangles behind the form.
pub struct SceneCanvas<'a> {
    pub scene: &'a Scene,
}

impl<'a, Message> canvas::Program<Message> for SceneCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), palette::SKY);

        for triangle in render(self.scene, bounds.width, bounds.height) {
            let [a, b, c] = triangle.points;
            let path = Path::new(|p| {
                p.move_to(Point::new(a.x, a.y));
                p.line_to(Point::new(b.x, b.y));
                p.line_to(Point::new(c.x, c.y));
                p.close();
            });
            let color = triangle.color;
            frame.fill(&path, Color::from_rgb(color.r, color.g, color.b));
        }

        vec![frame.into_geometry()]
    }
}
