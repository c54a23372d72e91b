//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Horizontal anchoring of a text position.
pub enum HAlign {
    /// Text starts at the anchor.
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Vertical anchoring of a text position.
pub enum VAlign {
    /// Text hangs below the anchor.
    Top,
    /// Text is centered on the anchor.
    Center,
    /// Text sits above the anchor.
    Bottom,
}

#[derive(Clone)]
/// Placement and colors of a text draw.
pub struct TextParams {
    /// Anchor position in screen space.
    pub pos: Vec2f,
    /// Horizontal anchoring.
    pub h_align: HAlign,
    /// Vertical anchoring.
    pub v_align: VAlign,
    /// Glyph color.
    pub color: Color,
    /// Drop shadow color.
    pub shadow: Color,
    /// Clip region applied to the text, if any.
    pub clip: Option<ScissorRect>,
}

#[derive(Copy, Clone)]
/// Placement of a vertex buffer: rotation about the screen normal, then translation.
pub struct PrimitiveTransform {
    /// Screen space translation.
    pub translation: Vec2f,
    /// Counter-clockwise rotation in radians (in a y-down screen this turns x towards y).
    pub rotation: f32,
}

impl PrimitiveTransform {
    /// Translation without rotation.
    pub fn at(translation: Vec2f) -> Self { Self { translation, rotation: 0.0 } }

    /// Applies the transform to a local point.
    pub fn apply(&self, p: Vec2f) -> Vec2f {
        let (s, c) = self.rotation.sin_cos();
        vec2f(self.translation.x + p.x * c - p.y * s, self.translation.y + p.x * s + p.y * c)
    }
}

#[derive(Clone)]
/// Recorded draw operation replayed by [`Canvas::submit`].
pub enum Command {
    /// Sets or clears the scissor rectangle.
    Scissor {
        /// Clip region, `None` for the full viewport.
        rect: Option<ScissorRect>,
    },
    /// Draws a solid rectangle.
    Rect {
        /// Target rectangle.
        rect: Rectf,
        /// Fill color.
        color: Color,
    },
    /// Draws text.
    Text {
        /// UTF-8 string to render.
        text: String,
        /// Placement and colors.
        params: TextParams,
    },
    /// Draws a vertex buffer as a triangle strip.
    Primitives {
        /// Buffer to draw.
        buffer: BufferId,
        /// Placement of the buffer.
        transform: PrimitiveTransform,
        /// Color multiplied with every vertex.
        tint: Color,
    },
}

/// Creates and refreshes GPU geometry on behalf of widgets that draw custom primitives.
pub trait ResourceFactory {
    /// Uploads `vertices` and returns the new buffer's id.
    fn create_vertex_buffer(&mut self, vertices: &[ColorVertex], usage: BufferUsage) -> BufferId;
    /// Replaces the contents of a dynamic buffer.
    fn update_vertex_buffer(&mut self, id: BufferId, vertices: &[ColorVertex]);
}

/// Records the draw list for one frame.
pub struct DrawCtx<'a> {
    commands: &'a mut Vec<Command>,
    style: &'a Style,
    factory: &'a mut dyn ResourceFactory,
    pointer: Vec2f,
    screen: Dimensioni,
    active: Option<WidgetHandle>,
}

impl<'a> DrawCtx<'a> {
    pub(crate) fn new(
        commands: &'a mut Vec<Command>,
        style: &'a Style,
        factory: &'a mut dyn ResourceFactory,
        pointer: Vec2f,
        screen: Dimensioni,
        active: Option<WidgetHandle>,
    ) -> Self {
        Self { commands, style, factory, pointer, screen, active }
    }

    /// Style of the owning GUI.
    pub fn style(&self) -> &Style { self.style }

    /// Factory for custom geometry.
    pub fn factory(&mut self) -> &mut dyn ResourceFactory { &mut *self.factory }

    /// Pointer position of the last update.
    pub fn pointer(&self) -> Vec2f { self.pointer }

    /// Height of the viewport.
    pub fn screen_height(&self) -> f32 { self.screen.height as f32 }

    /// Widget that currently owns the pointer; it is drawn last by the GUI.
    pub fn active(&self) -> Option<WidgetHandle> { self.active }

    /// Estimates the extent of `text` from the style's fixed glyph metrics.
    pub fn text_size(&self, text: &str) -> Vec2f {
        let lines = text.split('\n');
        let (mut width, mut count) = (0usize, 0usize);
        for line in lines {
            width = width.max(line.chars().count());
            count += 1;
        }
        vec2f(width as f32 * self.style.glyph_width, count as f32 * self.style.line_height)
    }

    pub(crate) fn push_command(&mut self, cmd: Command) { self.commands.push(cmd); }

    /// Clips everything drawn afterwards to `rect`.
    pub fn set_scissor(&mut self, rect: ScissorRect) { self.push_command(Command::Scissor { rect: Some(rect) }); }

    /// Lifts the current clip region.
    pub fn clear_scissor(&mut self) { self.push_command(Command::Scissor { rect: None }); }

    /// Fills a rectangle; empty rectangles are dropped.
    pub fn draw_rect(&mut self, rect: Rectf, color: Color) {
        if rect.width > 0.0 && rect.height > 0.0 {
            self.push_command(Command::Rect { rect, color });
        }
    }

    /// Queues a text draw; empty strings are dropped.
    pub fn draw_text(&mut self, text: &str, params: TextParams) {
        if !text.is_empty() {
            self.push_command(Command::Text { text: String::from(text), params });
        }
    }

    /// Queues a vertex buffer draw.
    pub fn draw_primitives(&mut self, buffer: BufferId, transform: PrimitiveTransform, tint: Color) {
        self.push_command(Command::Primitives { buffer, transform, tint });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Hands out sequential ids and remembers every upload.
    #[derive(Default)]
    pub(crate) struct NullFactory {
        pub created: Vec<(BufferId, usize, BufferUsage)>,
        pub updated: Vec<BufferId>,
    }

    impl ResourceFactory for NullFactory {
        fn create_vertex_buffer(&mut self, vertices: &[ColorVertex], usage: BufferUsage) -> BufferId {
            let id = BufferId::new(self.created.len() as u32 + 1);
            self.created.push((id, vertices.len(), usage));
            id
        }

        fn update_vertex_buffer(&mut self, id: BufferId, _vertices: &[ColorVertex]) { self.updated.push(id); }
    }

    #[test]
    fn text_size_uses_longest_line() {
        let style = Style::default();
        let mut factory = NullFactory::default();
        let mut commands = Vec::new();
        let ctx = DrawCtx::new(&mut commands, &style, &mut factory, Vec2f::default(), Dimensioni::new(800, 600), None);
        let size = ctx.text_size("ab\nabcd");
        assert_eq!((size.x, size.y), (32.0, 32.0));
    }

    #[test]
    fn empty_draws_are_dropped() {
        let style = Style::default();
        let mut factory = NullFactory::default();
        let mut commands = Vec::new();
        {
            let mut ctx = DrawCtx::new(&mut commands, &style, &mut factory, Vec2f::default(), Dimensioni::new(800, 600), None);
            ctx.draw_rect(rectf(0.0, 0.0, 0.0, 10.0), Color::WHITE);
            ctx.draw_text("", TextParams {
                pos: Vec2f::default(),
                h_align: HAlign::Left,
                v_align: VAlign::Top,
                color: Color::WHITE,
                shadow: Color::BLACK,
                clip: None,
            });
            ctx.draw_rect(rectf(0.0, 0.0, 5.0, 5.0), Color::WHITE);
        }
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn primitive_transform_rotates_then_translates() {
        let t = PrimitiveTransform { translation: vec2f(10.0, 10.0), rotation: std::f32::consts::FRAC_PI_2 };
        let p = t.apply(vec2f(1.0, 0.0));
        assert!((p.x - 10.0).abs() < 1e-5 && (p.y - 11.0).abs() < 1e-5);
    }
}
