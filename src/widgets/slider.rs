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

/// Maps a `[0, 1]` fraction onto `start..=end`, snapped to `step` equal intervals.
/// Out of range fractions are clamped first.
pub fn quantize(start: f32, end: f32, step: f32, fraction: f32) -> f32 {
    let t = fraction.clamp(0.0, 1.0);
    let t = (t * step).floor() / step;
    start + (end - start) * t
}

/// Horizontal slider over a quantized range.
pub struct Slider {
    base: WidgetBase,
    start: f32,
    end: f32,
    value: f32,
    step: f32,
    response: WidgetResponse,
    on_slide: Option<Callback>,
}

impl Slider {
    /// Creates a 200x40 slider. `step` is the number of intervals and is raised to at least 1.
    pub fn new(name: &str, start: f32, end: f32, value: f32, step: f32) -> Self {
        Self {
            base: WidgetBase::new(name, vec2f(200.0, 40.0)),
            start,
            end,
            value,
            step: step.max(1.0),
            response: WidgetResponse::NONE,
            on_slide: None,
        }
    }

    /// Shared widget state.
    pub fn base(&self) -> &WidgetBase { &self.base }

    /// Shared widget state, mutably.
    pub fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    /// Current value.
    pub fn value(&self) -> f32 { self.value }

    /// Sets the value without firing the callback.
    pub fn set_value(&mut self, value: f32) { self.value = value; }

    /// Lower and upper ends of the range.
    pub fn range(&self) -> (f32, f32) { (self.start, self.end) }

    /// Changes the range; the value is left alone.
    pub fn set_range(&mut self, start: f32, end: f32) {
        self.start = start;
        self.end = end;
    }

    /// Number of intervals the range is split into.
    pub fn step(&self) -> f32 { self.step }

    /// Fires on every frame the head is dragged, with the new value.
    pub fn on_slide(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_slide = Some(Box::new(f)); }

    /// Events fired by the last update.
    pub fn response(&self) -> WidgetResponse { self.response }

    fn head_width(&self) -> f32 { self.base.size().x * 0.05 }

    pub(crate) fn update(&mut self, gui: &mut Gui) {
        self.base.update_lifecycle();
        self.response = WidgetResponse::NONE;
        if !self.base.is_enabled() || gui.interaction_blocked(&mut self.base) {
            return;
        }

        let snap = *gui.snapshot();
        let mut dragged = false;
        if matches!(self.base.state, WidgetState::Focus | WidgetState::Deactivating) {
            self.base.state = WidgetState::Idle;
        }
        if self.base.state == WidgetState::Active {
            if snap.primary_down() {
                dragged = true;
            } else {
                gui.deactivate_widget(&mut self.base);
            }
        }

        // the head may stick out half its width past either end
        let (pos, size) = (self.base.pos(), self.base.size());
        let head = self.head_width();
        let hitbox = Hitbox2D::new(vec2f(pos.x - head * 0.5, pos.y), vec2f(size.x + head, size.y));
        if Hitbox2D::pointer(snap.pointer).intersects(&hitbox) && self.base.state == WidgetState::Idle {
            self.base.state = WidgetState::Focus;
        }
        if snap.primary_pressed() && self.base.state == WidgetState::Focus {
            dragged = true;
        }

        if dragged {
            let fraction = if size.x > 0.0 { (snap.pointer.x - pos.x) / size.x } else { 0.0 };
            self.value = quantize(self.start, self.end, self.step, fraction);
            log::trace!("{} slid to {}", self.base.name(), self.value);
            let args = EventArgs {
                click_pos: snap.pointer,
                f_value: self.value,
                i_value: self.value as i32,
                ..EventArgs::default()
            };
            fire(&mut self.on_slide, &args);
            self.response |= WidgetResponse::CHANGE;
            gui.activate_widget(&mut self.base);
        }
    }

    pub(crate) fn render(&mut self, ctx: &mut DrawCtx<'_>, _pool: &mut Pool) {
        self.base.begin_render(ctx);
        let color = self.base.color();
        let (pos, size) = (self.base.pos(), self.base.size());
        let head = self.head_width();
        let span = self.end - self.start;
        let t = if span != 0.0 { ((self.value - self.start) / span).clamp(0.0, 1.0) } else { 0.0 };
        let head_x = pos.x + size.x * t - head * 0.5;

        ctx.draw_rect(rectf(pos.x, pos.y + size.y * 0.5 - size.y * 0.05, size.x, size.y * 0.1), color);
        ctx.draw_rect(rectf(head_x, pos.y, head, size.y), color);

        let clip = self.base.container_clip();
        let mid = pos.y + size.y * 0.5;
        let label = self.base.text_params(vec2f(pos.x - head * 0.5, mid), HAlign::Right, VAlign::Center, clip);
        ctx.draw_text(self.base.text(), label);
        let readout = self.base.text_params(vec2f(pos.x + size.x + head, mid), HAlign::Left, VAlign::Center, clip);
        ctx.draw_text(&format!("{}", self.value), readout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_context::tests::NullFactory;

    fn readout_clip(gui: &mut Gui) -> Option<Option<ScissorRect>> {
        gui.update();
        let commands = gui.build_commands(&mut NullFactory::default());
        commands.iter().find_map(|c| match c {
            Command::Text { text, params } if text == "25" => Some(params.clip),
            _ => None,
        })
    }

    #[test]
    fn quantize_snaps_down_to_intervals() {
        assert_eq!(quantize(0.0, 100.0, 10.0, 0.53), 50.0);
        assert_eq!(quantize(0.0, 100.0, 10.0, 1.0), 100.0);
        assert_eq!(quantize(0.0, 100.0, 1.0, 0.99), 0.0);
        assert_eq!(quantize(-1.0, 1.0, 2.0, 0.75), 0.0);
    }

    #[test]
    fn quantize_clamps_fraction() {
        assert_eq!(quantize(0.0, 100.0, 10.0, -0.3), 0.0);
        assert_eq!(quantize(0.0, 100.0, 10.0, 1.7), 100.0);
    }

    #[test]
    fn step_is_at_least_one() {
        let s = Slider::new("s", 0.0, 1.0, 0.0, 0.0);
        assert_eq!(s.step(), 1.0);
    }

    #[test]
    fn press_sets_value_and_drag_follows() {
        let mut gui = Gui::default();
        let mut slider = Slider::new("volume", 0.0, 100.0, 0.0, 10.0);
        slider.base_mut().set_pos(vec2f(100.0, 100.0));
        let h = gui.add_widget(slider);
        let value = |gui: &Gui| gui.widget(h).unwrap().as_slider().unwrap().value();

        gui.input_mut().mousemove(206, 110);
        gui.update();
        gui.input_mut().mousedown(206, 110, MouseButton::LEFT);
        gui.update();
        assert_eq!(value(&gui), 50.0);
        assert_eq!(gui.active_widget(), Some(h));

        // dragging past the end clamps
        gui.input_mut().mousemove(500, 300);
        gui.update();
        assert_eq!(value(&gui), 100.0);

        gui.input_mut().mouseup(500, 300, MouseButton::LEFT);
        gui.update();
        assert_eq!(gui.active_widget(), None);
        assert_eq!(value(&gui), 100.0);
    }

    #[test]
    fn value_text_is_clipped_only_inside_a_window() {
        let mut gui = Gui::default();
        gui.add_widget(Slider::new("loose", 0.0, 100.0, 25.0, 10.0));
        assert_eq!(readout_clip(&mut gui), Some(None));

        let mut gui = Gui::default();
        let mut window = Window::new("tools");
        window.base_mut().set_pos(vec2f(100.0, 100.0));
        window.base_mut().set_size(vec2f(300.0, 200.0));
        let window = gui.add_widget(window);
        let mut slider = Slider::new("docked", 0.0, 100.0, 25.0, 10.0);
        slider.base_mut().set_pos(vec2f(10.0, 30.0));
        gui.add_to_window(window, slider).unwrap();
        assert_eq!(readout_clip(&mut gui), Some(Some(ScissorRect::new(101, 101, 399, 299))));
    }
}
