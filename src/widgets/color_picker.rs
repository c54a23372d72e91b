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
use super::*;
use std::f32::consts::TAU;

const CENTER: f32 = 120.0;
const TRIANGLE_RADIUS: f32 = 75.0;
const RING_RADIUS: f32 = 80.0;
const RING_WIDTH: f32 = 16.0;
const RING_STEPS: usize = 100;
const MARKER_RADIUS: f32 = 3.0;
const MARKER_WIDTH: f32 = 3.0;
const SWATCH_HALF: f32 = 20.0;
const SWATCH_OFFSET: (f32, f32) = (260.0, 40.0);
const READOUT_OFFSET: (f32, f32) = (200.0, 200.0);

/// Fully saturated color for a hue in `[0, 1)`; 0 is red, 1/3 green, 2/3 blue.
pub fn hue_to_rgb(hue: f32) -> Vec3f {
    let r = (hue * 6.0 - 3.0).abs() - 1.0;
    let g = 2.0 - (hue * 6.0 - 2.0).abs();
    let b = 2.0 - (hue * 6.0 - 4.0).abs();
    Vec3f { x: r.clamp(0.0, 1.0), y: g.clamp(0.0, 1.0), z: b.clamp(0.0, 1.0) }
}

/// Vertices of an equilateral triangle centered on the origin, the first one on the +x axis.
pub fn equilateral_triangle(radius: f32) -> [Vec2f; 3] {
    let corner = |i: f32| {
        let a = TAU * i / 3.0;
        vec2f(radius * a.cos(), radius * a.sin())
    };
    [corner(0.0), corner(1.0), corner(2.0)]
}

/// Counter-clockwise angle of `v` on screen (y grows downwards), in `[0, 2pi)`.
pub fn screen_angle(v: Vec2f) -> f32 {
    let a = (-v.y).atan2(v.x);
    if a < 0.0 { a + TAU } else { a }
}

/// Moller-Trumbore ray/triangle test. Returns the distance along `dir` to the hit.
pub fn ray_triangle_intersect(origin: Vec3f, dir: Vec3f, tri: [Vec3f; 3]) -> Option<f32> {
    const EPSILON: f32 = 1e-6;
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = Vec3f::cross(&dir, &e2);
    let det = Vec3f::dot(&e1, &p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv = 1.0 / det;
    let s = origin - tri[0];
    let u = Vec3f::dot(&s, &p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = Vec3f::cross(&s, &e1);
    let v = Vec3f::dot(&dir, &q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = Vec3f::dot(&e2, &q) * inv;
    if t >= 0.0 { Some(t) } else { None }
}

/// Barycentric weights of `p` against `tri`. With `clamp`, points outside are projected onto
/// the nearest edge so the weights stay a convex combination.
pub fn barycentric(p: Vec2f, tri: [Vec2f; 3], clamp: bool) -> Vec3f {
    let [a, b, c] = tri;
    let (v0, v1, v2) = (b - a, c - a, p - a);
    let (d00, d01, d11) = (Vec2f::dot(&v0, &v0), Vec2f::dot(&v0, &v1), Vec2f::dot(&v1, &v1));
    let (d20, d21) = (Vec2f::dot(&v2, &v0), Vec2f::dot(&v2, &v1));
    let denom = d00 * d11 - d01 * d01;
    if denom == 0.0 {
        return Vec3f { x: 1.0, y: 0.0, z: 0.0 };
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;
    if !clamp {
        return Vec3f { x: u, y: v, z: w };
    }
    let along = |from: Vec2f, to: Vec2f| {
        let edge = to - from;
        (Vec2f::dot(&(p - from), &edge) / Vec2f::dot(&edge, &edge)).clamp(0.0, 1.0)
    };
    if u < 0.0 {
        let t = along(b, c);
        Vec3f { x: 0.0, y: 1.0 - t, z: t }
    } else if v < 0.0 {
        let t = along(c, a);
        Vec3f { x: t, y: 0.0, z: 1.0 - t }
    } else if w < 0.0 {
        let t = along(a, b);
        Vec3f { x: 1.0 - t, y: t, z: 0.0 }
    } else {
        Vec3f { x: u, y: v, z: w }
    }
}

fn rgba(c: Vec3f) -> Vec4f { Vec4f { x: c.x, y: c.y, z: c.z, w: 1.0 } }

fn complement(c: Vec4f) -> Color { Color::from_vec4(Vec4f { x: 1.0 - c.x, y: 1.0 - c.y, z: 1.0 - c.z, w: 1.0 }) }

/// Annulus as a strip of alternating inner and outer points, either white or hue-shaded.
fn ring_vertices(radius: f32, width: f32, rainbow: bool) -> Vec<ColorVertex> {
    let mut vertices = Vec::with_capacity((RING_STEPS + 1) * 2);
    for i in 0..=RING_STEPS {
        let t = i as f32 / RING_STEPS as f32;
        let a = t * TAU;
        let color = if rainbow { rgba(hue_to_rgb(t % 1.0)) } else { Vec4f { x: 1.0, y: 1.0, z: 1.0, w: 1.0 } };
        let (s, c) = a.sin_cos();
        vertices.push(ColorVertex::new(vec2f(radius * c, -radius * s), color));
        vertices.push(ColorVertex::new(vec2f((radius + width) * c, -(radius + width) * s), color));
    }
    vertices
}

fn swatch_vertices() -> Vec<ColorVertex> {
    let white = Vec4f { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };
    let h = SWATCH_HALF;
    [vec2f(-h, -h), vec2f(h, -h), vec2f(-h, h), vec2f(h, h)]
        .into_iter()
        .map(|p| ColorVertex::new(p, white))
        .collect()
}

#[derive(Copy, Clone)]
struct PickerBuffers {
    saturation: BufferId,
    hue: BufferId,
    marker: BufferId,
    swatch: BufferId,
}

/// Fixed-size window picking a color from a hue ring and a rotating
/// hue/white/black triangle.
pub struct ColorPicker {
    window: Window,
    angle: f32,
    hue_color: Vec4f,
    barycentric: Vec3f,
    final_color: Vec4f,
    hue_picker: Vec2f,
    saturation_picker: Vec2f,
    hue_focus: bool,
    buffers: Option<PickerBuffers>,
    triangle_dirty: bool,
    response: WidgetResponse,
    on_color_changed: Option<Callback>,
}

impl ColorPicker {
    /// Creates a 300x260 picker set to white on a red hue.
    pub fn new(name: &str) -> Self {
        let mut window = Window::with_opt(name, ContainerOption::NO_RESIZE);
        window.base_mut().set_size(vec2f(300.0, 260.0));
        window.base_mut().set_color(Color::GHOST, None);
        let mut picker = Self {
            window,
            angle: 0.0,
            hue_color: rgba(hue_to_rgb(0.0)),
            barycentric: Vec3f { x: 0.0, y: 1.0, z: 0.0 },
            final_color: Vec4f { x: 1.0, y: 1.0, z: 1.0, w: 1.0 },
            hue_picker: Vec2f::default(),
            saturation_picker: Vec2f::default(),
            hue_focus: false,
            buffers: None,
            triangle_dirty: true,
            response: WidgetResponse::NONE,
            on_color_changed: None,
        };
        picker.refresh();
        picker
    }

    /// The window part.
    pub fn window(&self) -> &Window { &self.window }

    /// The window part, mutably.
    pub fn window_mut(&mut self) -> &mut Window { &mut self.window }

    /// Shared widget state.
    pub fn base(&self) -> &WidgetBase { self.window.base() }

    /// Shared widget state, mutably.
    pub fn base_mut(&mut self) -> &mut WidgetBase { self.window.base_mut() }

    /// Hue angle in radians.
    pub fn angle(&self) -> f32 { self.angle }

    /// Rotates the hue to `angle` radians.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.rem_euclid(TAU);
        self.hue_color = rgba(hue_to_rgb(self.angle / TAU));
        self.triangle_dirty = true;
        self.refresh();
    }

    /// Weights of the hue, white and black corners.
    pub fn barycentric(&self) -> Vec3f { self.barycentric }

    /// Places the triangle pick by its corner weights (hue, white, black).
    /// Negative weights are dropped and the rest rescaled to sum to one; all-zero weights pick the hue corner.
    pub fn set_barycentric(&mut self, weights: Vec3f) {
        let clamped = Vec3f::new(weights.x.max(0.0), weights.y.max(0.0), weights.z.max(0.0));
        let sum = clamped.x + clamped.y + clamped.z;
        self.barycentric = if sum > 0.0 && sum.is_finite() { clamped / sum } else { Vec3f::new(1.0, 0.0, 0.0) };
        self.refresh();
    }

    /// Fully saturated color of the current hue.
    pub fn hue_color(&self) -> Vec4f { self.hue_color }

    /// Color currently picked.
    pub fn pick_color(&self) -> Vec4f { self.final_color }

    /// Moves both pickers so that [`ColorPicker::pick_color`] returns `color`.
    /// Gray inputs keep the current hue. The alpha channel is ignored.
    pub fn set_pick_color(&mut self, color: Vec4f) {
        let (r, g, b) = (color.x.clamp(0.0, 1.0), color.y.clamp(0.0, 1.0), color.z.clamp(0.0, 1.0));
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let chroma = max - min;
        if chroma > 0.0 {
            let sector = if max == r {
                ((g - b) / chroma).rem_euclid(6.0)
            } else if max == g {
                (b - r) / chroma + 2.0
            } else {
                (r - g) / chroma + 4.0
            };
            self.set_angle(sector / 6.0 * TAU);
        }
        self.set_barycentric(Vec3f { x: chroma, y: min, z: 1.0 - max });
    }

    /// Fires on every frame the hue or the triangle pick is dragged, with the angle and color.
    pub fn on_color_changed(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_color_changed = Some(Box::new(f)); }

    /// Events fired by the last update.
    pub fn response(&self) -> WidgetResponse { self.response }

    /// Screen position of the ring marker.
    pub fn hue_picker(&self) -> Vec2f { self.hue_picker }

    /// Screen position of the triangle marker.
    pub fn saturation_picker(&self) -> Vec2f { self.saturation_picker }

    fn center(&self) -> Vec2f {
        let pos = self.window.base().pos();
        pos + vec2f(CENTER, CENTER)
    }

    fn triangle_transform(&self) -> PrimitiveTransform { PrimitiveTransform { translation: self.center(), rotation: -self.angle } }

    fn world_triangle(&self) -> [Vec2f; 3] {
        let transform = self.triangle_transform();
        equilateral_triangle(TRIANGLE_RADIUS).map(|p| transform.apply(p))
    }

    fn triangle_vertices(&self) -> Vec<ColorVertex> {
        let colors = [self.hue_color, Vec4f { x: 1.0, y: 1.0, z: 1.0, w: 1.0 }, Vec4f { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }];
        equilateral_triangle(TRIANGLE_RADIUS)
            .into_iter()
            .zip(colors)
            .map(|(p, c)| ColorVertex::new(p, c))
            .collect()
    }

    /// Recomputes the marker positions and the final color from the angle and weights.
    fn refresh(&mut self) {
        let center = self.center();
        let mid = RING_RADIUS + RING_WIDTH * 0.5;
        let (s, c) = self.angle.sin_cos();
        self.hue_picker = vec2f(center.x + mid * c, center.y - mid * s);

        let [a, b, cv] = self.world_triangle();
        let (u, v, w) = (self.barycentric.x, self.barycentric.y, self.barycentric.z);
        self.saturation_picker = a * u + b * v + cv * w;

        // hue, white and black corners; every corner is opaque
        let white = Vec4f::new(1.0, 1.0, 1.0, 1.0);
        let black = Vec4f::new(0.0, 0.0, 0.0, 1.0);
        self.final_color = self.hue_color * u + white * v + black * w;
    }

    pub(crate) fn update(&mut self, gui: &mut Gui) {
        self.window.update(gui);
        self.response = WidgetResponse::NONE;
        if !self.window.base().is_enabled() || self.window.is_minimized() {
            return;
        }

        let snap = *gui.snapshot();
        let base = self.window.base_mut();
        if matches!(base.state, WidgetState::Focus | WidgetState::Deactivating) {
            base.state = WidgetState::Idle;
        }

        let center = self.center();
        let offset = snap.pointer - center;
        let distance = Vec2f::length(&offset);
        let over_ring = distance > RING_RADIUS && distance < RING_RADIUS + RING_WIDTH;
        let tri = self.world_triangle().map(|p| Vec3f { x: p.x, y: p.y, z: 0.0 });
        let ray = Vec3f { x: snap.pointer.x, y: snap.pointer.y, z: -1.0 };
        let over_triangle = ray_triangle_intersect(ray, Vec3f { x: 0.0, y: 0.0, z: 1.0 }, tri).is_some();

        let base = self.window.base_mut();
        if base.state == WidgetState::Idle {
            if over_ring {
                self.hue_focus = true;
                base.state = WidgetState::Focus;
            } else if over_triangle {
                self.hue_focus = false;
                base.state = WidgetState::Focus;
            }
        }

        let dragged = (snap.primary_pressed() && base.state == WidgetState::Focus) || (snap.primary_down() && base.state == WidgetState::Active);
        let dragged = dragged && !gui.interaction_blocked(base);
        if dragged {
            gui.activate_widget(base);
        } else if base.state == WidgetState::Active {
            gui.deactivate_widget(base);
        }

        if dragged && self.hue_focus {
            self.set_angle(screen_angle(offset));
            log::trace!("{} hue {}", self.window.base().name(), self.angle);
        } else if dragged {
            let corners = self.world_triangle();
            self.barycentric = barycentric(snap.pointer, corners, true);
            log::trace!("{} weights {:?}", self.window.base().name(), (self.barycentric.x, self.barycentric.y, self.barycentric.z));
        }
        self.refresh();

        if dragged {
            let args = EventArgs {
                click_pos: snap.pointer,
                f_value: self.angle,
                color: self.final_color,
                ..EventArgs::default()
            };
            fire(&mut self.on_color_changed, &args);
            self.response |= WidgetResponse::CHANGE;
        }
    }

    fn ensure_buffers(&mut self, factory: &mut dyn ResourceFactory) -> PickerBuffers {
        if let Some(buffers) = self.buffers {
            return buffers;
        }
        let buffers = PickerBuffers {
            saturation: factory.create_vertex_buffer(&self.triangle_vertices(), BufferUsage::Dynamic),
            hue: factory.create_vertex_buffer(&ring_vertices(RING_RADIUS, RING_WIDTH, true), BufferUsage::Immutable),
            marker: factory.create_vertex_buffer(&ring_vertices(MARKER_RADIUS, MARKER_WIDTH, false), BufferUsage::Immutable),
            swatch: factory.create_vertex_buffer(&swatch_vertices(), BufferUsage::Immutable),
        };
        log::debug!("{} created its picker geometry", self.window.base().name());
        self.buffers = Some(buffers);
        self.triangle_dirty = false;
        buffers
    }

    pub(crate) fn render(&mut self, ctx: &mut DrawCtx<'_>, pool: &mut Pool) {
        self.window.render(ctx, pool);
        if self.window.is_minimized() {
            return;
        }

        let buffers = self.ensure_buffers(ctx.factory());
        if self.triangle_dirty {
            let vertices = self.triangle_vertices();
            ctx.factory().update_vertex_buffer(buffers.saturation, &vertices);
            self.triangle_dirty = false;
        }

        let center = self.center();
        ctx.draw_primitives(buffers.saturation, self.triangle_transform(), Color::WHITE);
        ctx.draw_primitives(buffers.hue, PrimitiveTransform::at(center), Color::WHITE);
        ctx.draw_primitives(buffers.marker, PrimitiveTransform::at(self.hue_picker), complement(self.hue_color));
        ctx.draw_primitives(buffers.marker, PrimitiveTransform::at(self.saturation_picker), complement(self.final_color));
        let pos = self.window.base().pos();
        let swatch = pos + vec2f(SWATCH_OFFSET.0, SWATCH_OFFSET.1);
        ctx.draw_primitives(buffers.swatch, PrimitiveTransform::at(swatch), Color::from_vec4(self.final_color));

        let c = self.final_color;
        let readout = format!("R: {}\nG: {}\nB: {}", (c.x * 255.0) as i32, (c.y * 255.0) as i32, (c.z * 255.0) as i32);
        let base = self.window.base();
        let params = base.text_params(pos + vec2f(READOUT_OFFSET.0, READOUT_OFFSET.1), HAlign::Left, VAlign::Top, Some(base.scissor_rect()));
        ctx.draw_text(&readout, params);
    }
}
