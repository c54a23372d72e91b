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

/// Two-state toggle drawn as a square with an inset mark.
pub struct CheckBox {
    base: WidgetBase,
    checked: bool,
    response: WidgetResponse,
    on_click: Option<Callback>,
}

impl CheckBox {
    /// Creates an unchecked 20x20 check box.
    pub fn new(name: &str) -> Self {
        Self {
            base: WidgetBase::new(name, vec2f(20.0, 20.0)),
            checked: false,
            response: WidgetResponse::NONE,
            on_click: None,
        }
    }

    /// Shared widget state.
    pub fn base(&self) -> &WidgetBase { &self.base }

    /// Shared widget state, mutably.
    pub fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    /// Current check state.
    pub fn is_checked(&self) -> bool { self.checked }

    /// Sets the check state without firing the callback.
    pub fn set_check(&mut self, value: bool) { self.checked = value; }

    /// Fires when a click toggles the box, with the new state.
    pub fn on_click(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_click = Some(Box::new(f)); }

    /// Events fired by the last update.
    pub fn response(&self) -> WidgetResponse { self.response }

    pub(crate) fn update(&mut self, gui: &mut Gui) {
        self.base.update_lifecycle();
        self.response = WidgetResponse::NONE;
        if !self.base.is_enabled() || gui.interaction_blocked(&mut self.base) {
            return;
        }

        let snap = *gui.snapshot();
        let inside = Hitbox2D::pointer(snap.pointer).intersects(&self.base.hitbox());

        if matches!(self.base.state, WidgetState::Focus | WidgetState::Deactivating) {
            self.base.state = WidgetState::Idle;
        }
        if self.base.state == WidgetState::Active {
            gui.deactivate_widget(&mut self.base);
        }

        if inside && self.base.state == WidgetState::Idle {
            self.base.state = WidgetState::Focus;
        }
        if snap.primary_pressed() && self.base.state == WidgetState::Focus {
            self.checked = !self.checked;
            let args = EventArgs { click_pos: snap.pointer, b_value: self.checked, ..EventArgs::default() };
            fire(&mut self.on_click, &args);
            self.response |= WidgetResponse::CLICK;
            gui.activate_widget(&mut self.base);
        }
    }

    pub(crate) fn render(&mut self, ctx: &mut DrawCtx<'_>, _pool: &mut Pool) {
        self.base.begin_render(ctx);
        let color = self.base.color();
        let (pos, size) = (self.base.pos(), self.base.size());
        ctx.draw_rect(self.base.bounds(), color);
        if self.checked {
            let inset = rectf(pos.x + size.x * 0.25, pos.y + size.y * 0.25, size.x * 0.5, size.y * 0.5);
            ctx.draw_rect(inset, Color::lerp(color, Color::WHITE, 0.8));
        }
        let params = self.base.text_params(vec2f(pos.x, pos.y + size.y * 0.5), HAlign::Right, VAlign::Center, self.base.container_clip());
        ctx.draw_text(self.base.text(), params);
    }
}
