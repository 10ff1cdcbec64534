use crate::geometry::{Placement, SurfaceSize};
use crate::particle::Rgba;
use glam::Vec2;

/// Drawing surface the engine paints into once per frame.
pub trait Renderer {
    fn clear(&mut self, surface: SurfaceSize);
    /// Filled circle; `alpha` multiplies the color's own alpha.
    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32);
    fn logo(&mut self, placement: &Placement, alpha: f32);
    /// Caption text horizontally centred on `anchor`.
    fn caption(&mut self, text: &str, anchor: Vec2);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(SurfaceSize),
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        alpha: f32,
    },
    Logo {
        placement: Placement,
        alpha: f32,
    },
    Caption {
        text: String,
        anchor: Vec2,
    },
}

/// Keeps every draw call; used by tests and the headless runner.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Commands issued since the most recent clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn circles_in_last_frame(&self) -> usize {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn last_caption(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Caption { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_logo_alpha(&self) -> Option<f32> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Logo { alpha, .. } => Some(*alpha),
            _ => None,
        })
    }

    pub fn clear_history(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, surface: SurfaceSize) {
        self.commands.push(DrawCommand::Clear(surface));
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn logo(&mut self, placement: &Placement, alpha: f32) {
        self.commands.push(DrawCommand::Logo {
            placement: *placement,
            alpha,
        });
    }

    fn caption(&mut self, text: &str, anchor: Vec2) {
        self.commands.push(DrawCommand::Caption {
            text: text.to_string(),
            anchor,
        });
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self, _surface: SurfaceSize) {}
    fn circle(&mut self, _center: Vec2, _radius: f32, _color: Rgba, _alpha: f32) {}
    fn logo(&mut self, _placement: &Placement, _alpha: f32) {}
    fn caption(&mut self, _text: &str, _anchor: Vec2) {}
}
