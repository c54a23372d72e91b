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
#![deny(missing_docs)]
//! `stategui` is a retained widget layer meant to live inside a real-time render loop.
//! Every widget runs a small per-frame state machine (idle, focus, active, deactivating) fed by
//! pointer input, and the [`Gui`] registry arbitrates which single widget owns the pointer.
//! Drawing is recorded into a [`Command`] list and replayed on any [`Renderer`] implementation
//! through a [`Canvas`], so the crate stays agnostic of the graphics backend and font engine.

use std::sync::{Arc, RwLock};

mod canvas;
mod draw_context;
mod error;
mod gui;
mod hitbox;
mod registry;
mod transform;
mod widgets;

pub use canvas::*;
pub use draw_context::*;
pub use error::*;
pub use gui::*;
pub use hitbox::*;
pub use registry::WidgetHandle;
pub use rs_math3d::*;
pub use transform::*;
pub use widgets::*;

use bitflags::*;

/// Axis aligned rectangle in floating point screen units.
pub type Rectf = Rect<f32>;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// Numeric identifier value.
pub struct Id(usize);

impl Id {
    /// Creates an ID from a caller-supplied numeric value.
    /// On 32-bit platforms the value is truncated to fit in a `usize`.
    pub fn new(value: u64) -> Self { Self(value as usize) }

    /// Creates a stable ID from a string label using FNV-1a hashing.
    pub fn from_str(label: &str) -> Self {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;
        let mut hash = FNV_OFFSET_BASIS;
        for byte in label.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self::new(hash)
    }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> usize { self.0 }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };
    /// Opaque black.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    /// Opaque mid gray.
    pub const GRAY: Self = Self { r: 127, g: 127, b: 127, a: 255 };
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };
    /// Half transparent gray used for idle widget backgrounds.
    pub const MARKER: Self = Self { r: 127, g: 127, b: 127, a: 127 };
    /// Off-white background used by the color picker.
    pub const GHOST: Self = Self { r: 248, g: 248, b: 255, a: 255 };

    /// Linearly interpolates every channel from `a` towards `b`.
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round().clamp(0.0, 255.0) as u8;
        Color { r: mix(a.r, b.r), g: mix(a.g, b.g), b: mix(a.b, b.b), a: mix(a.a, b.a) }
    }

    /// Converts a normalized `[0, 1]` color vector, saturating out of range channels.
    pub fn from_vec4(v: Vec4f) -> Color {
        let unorm = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color { r: unorm(v.x), g: unorm(v.y), b: unorm(v.z), a: unorm(v.w) }
    }

    /// Returns the color as a normalized `[0, 1]` vector.
    pub fn to_vec4(self) -> Vec4f {
        Vec4f { x: self.r as f32 / 255.0, y: self.g as f32 / 255.0, z: self.b as f32 / 255.0, w: self.a as f32 / 255.0 }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is pressed.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

#[derive(Copy, Clone, Debug)]
/// Snapshot of the pointer state widgets read during one update pass.
pub struct InputSnapshot {
    /// Pointer position in screen coordinates.
    pub pointer: Vec2f,
    /// Buttons held down this frame.
    pub down: MouseButton,
    /// Buttons whose press edge happened since the previous frame.
    pub pressed: MouseButton,
    /// Vertical wheel movement since the previous frame (positive is away from the user).
    pub scroll: i32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            pointer: Vec2f::default(),
            down: MouseButton::NONE,
            pressed: MouseButton::NONE,
            scroll: 0,
        }
    }
}

impl InputSnapshot {
    /// Returns `true` when the primary button went down this frame.
    pub fn primary_pressed(&self) -> bool { self.pressed.is_left() }
    /// Returns `true` while the primary button is held.
    pub fn primary_down(&self) -> bool { self.down.is_left() }
}

#[derive(Clone, Debug)]
/// Aggregates raw input collected during the current frame.
pub struct Input {
    mouse_pos: Vec2i,
    scroll_delta: Vec2i,
    mouse_down: MouseButton,
    mouse_pressed: MouseButton,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            scroll_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
        }
    }
}

impl Input {
    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = Vec2i { x, y }; }

    /// Returns the last reported pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Returns the currently held mouse buttons.
    pub fn get_mouse_buttons(&self) -> MouseButton { self.mouse_down }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
    }

    /// Accumulates scroll wheel movement.
    pub fn scroll(&mut self, x: i32, y: i32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    pub(crate) fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: vec2f(self.mouse_pos.x as f32, self.mouse_pos.y as f32),
            down: self.mouse_down,
            pressed: self.mouse_pressed,
            scroll: self.scroll_delta.y,
        }
    }

    pub(crate) fn epilogue(&mut self) {
        self.mouse_pressed = MouseButton::NONE;
        self.scroll_delta = Vec2i { x: 0, y: 0 };
    }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
/// Integer clip rectangle expressed by its four edges, in pixels.
pub struct ScissorRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl ScissorRect {
    /// Creates a scissor rectangle from its edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self { Self { left, top, right, bottom } }

    /// Truncates a floating point box to pixel edges.
    pub fn from_bounds(pos: Vec2f, size: Vec2f) -> Self {
        Self {
            left: pos.x as i32,
            top: pos.y as i32,
            right: (pos.x + size.x) as i32,
            bottom: (pos.y + size.y) as i32,
        }
    }

    /// Pulls every positive edge one pixel inwards.
    /// Edges sitting at zero or below are left untouched.
    pub fn shrunk(self) -> Self {
        let inward = |v: i32, d: i32| if v > 0 { v + d } else { v };
        Self {
            left: inward(self.left, 1),
            top: inward(self.top, 1),
            right: inward(self.right, -1),
            bottom: inward(self.bottom, -1),
        }
    }

    /// Width in pixels, never negative.
    pub fn width(&self) -> i32 { (self.right - self.left).max(0) }

    /// Height in pixels, never negative.
    pub fn height(&self) -> i32 { (self.bottom - self.top).max(0) }

    /// Returns `true` for the all-zero rectangle of a widget that was never clipped.
    pub fn is_unset(&self) -> bool { *self == Self::default() }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
/// Collection of constants that drive widget layout and tooltip appearance.
pub struct Style {
    /// Edge length of the window chrome buttons and draggers.
    pub window_control_size: f32,
    /// Smallest width a window can be resized to.
    pub window_min_width: f32,
    /// Smallest height a window can be resized to.
    pub window_min_height: f32,
    /// Number of consecutive focus frames a tooltip waits before showing.
    pub tooltip_delay: u32,
    /// Tooltip background fill.
    pub tooltip_background: Color,
    /// Tooltip text color.
    pub tooltip_text: Color,
    /// Color of the secondary script line under a tooltip.
    pub tooltip_script_text: Color,
    /// Padding around the tooltip text.
    pub tooltip_border: f32,
    /// Vertical distance from the pointer when the tooltip is drawn above it.
    pub tooltip_offset_above: f32,
    /// Vertical distance from the pointer when the tooltip is drawn below it.
    pub tooltip_offset_below: f32,
    /// Fraction of the screen height past which tooltips flip above the pointer.
    pub tooltip_flip_threshold: f32,
    /// Advance used to estimate text width.
    pub glyph_width: f32,
    /// Line height used to estimate text height.
    pub line_height: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            window_control_size: 20.0,
            window_min_width: 80.0,
            window_min_height: 40.0,
            tooltip_delay: 25,
            tooltip_background: color(255, 234, 165, 255),
            tooltip_text: color(25, 25, 25, 255),
            tooltip_script_text: color(25, 25, 25, 110),
            tooltip_border: 2.0,
            tooltip_offset_above: 30.0,
            tooltip_offset_below: 40.0,
            tooltip_flip_threshold: 0.8,
            glyph_width: 8.0,
            line_height: 16.0,
        }
    }
}

/// Trait implemented by render backends that consume the recorded draw list.
pub trait Renderer {
    /// Begins a new frame with the viewport size and clear color.
    fn begin(&mut self, width: i32, height: i32, clr: Color);
    /// Restricts subsequent drawing to `rect`, or lifts the restriction with `None`.
    fn set_scissor(&mut self, rect: Option<ScissorRect>);
    /// Fills a rectangle with a solid color.
    fn draw_rect(&mut self, rect: Rectf, color: Color);
    /// Draws a string with its drop shadow.
    fn draw_text(&mut self, text: &str, params: &TextParams);
    /// Creates a vertex buffer owned by the renderer.
    fn create_vertex_buffer(&mut self, id: BufferId, vertices: &[ColorVertex], usage: BufferUsage);
    /// Replaces the contents of a dynamic vertex buffer.
    fn update_vertex_buffer(&mut self, id: BufferId, vertices: &[ColorVertex]);
    /// Destroys a previously created vertex buffer.
    fn destroy_vertex_buffer(&mut self, id: BufferId);
    /// Draws a buffer as a triangle strip, placed by `transform` and multiplied by `tint`.
    fn draw_primitives(&mut self, id: BufferId, transform: &PrimitiveTransform, tint: Color);
    /// Ends the frame, finalizing any outstanding GPU work.
    fn end(&mut self);
}

/// Thread-safe handle that shares ownership of a [`Renderer`].
pub struct RendererHandle<R: Renderer> {
    handle: Arc<RwLock<R>>,
}

// seems there's a bug in #[derive(Clone)] as it's unable to induce that Arc is sufficient
impl<R: Renderer> Clone for RendererHandle<R> {
    fn clone(&self) -> Self { Self { handle: self.handle.clone() } }
}

impl<R: Renderer> RendererHandle<R> {
    /// Wraps a renderer inside an [`Arc<RwLock<...>>`] so it can be shared.
    pub fn new(renderer: R) -> Self { Self { handle: Arc::new(RwLock::new(renderer)) } }

    /// Executes the provided closure with a shared reference to the renderer.
    pub fn scope<Res, F: Fn(&R) -> Res>(&self, f: F) -> Res {
        match self.handle.read() {
            Ok(guard) => f(&*guard),
            // a poisoned lock still holds a usable renderer for reading
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Executes the provided closure with a mutable reference to the renderer.
    pub fn scope_mut<Res, F: FnMut(&mut R) -> Res>(&mut self, mut f: F) -> Res {
        match self.handle.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

/// Convenience constructor for [`Vec2f`].
pub fn vec2f(x: f32, y: f32) -> Vec2f { Vec2f { x, y } }

/// Convenience constructor for [`Rectf`].
pub fn rectf(x: f32, y: f32, w: f32, h: f32) -> Rectf { Rectf { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scissor_shrinks_only_positive_edges() {
        let r = ScissorRect::new(0, 10, 100, 0).shrunk();
        assert_eq!(r, ScissorRect::new(0, 11, 99, 0));
    }

    #[test]
    fn color_lerp_halves_towards_transparent() {
        let c = Color::lerp(Color::TRANSPARENT, Color::WHITE, 0.5);
        assert_eq!(c, color(128, 128, 128, 128));
        assert_eq!(Color::lerp(Color::BLACK, Color::WHITE, 0.0), Color::BLACK);
    }

    #[test]
    fn input_press_edge_lasts_one_frame() {
        let mut input = Input::default();
        input.mousedown(5, 6, MouseButton::LEFT);
        let snap = input.snapshot();
        assert!(snap.primary_pressed() && snap.primary_down());
        assert_eq!((snap.pointer.x, snap.pointer.y), (5.0, 6.0));
        input.epilogue();
        let snap = input.snapshot();
        assert!(!snap.primary_pressed());
        assert!(snap.primary_down());
    }

    #[test]
    fn scroll_accumulates_until_epilogue() {
        let mut input = Input::default();
        input.scroll(0, 2);
        input.scroll(0, 3);
        assert_eq!(input.snapshot().scroll, 5);
        input.epilogue();
        assert_eq!(input.snapshot().scroll, 0);
    }

    #[test]
    fn name_hash_is_stable() {
        assert_eq!(Id::from_str("widget_0"), Id::from_str("widget_0"));
        assert_ne!(Id::from_str("a"), Id::from_str("b"));
    }
}
