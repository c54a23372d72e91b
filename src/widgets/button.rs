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

/// Push button. Also serves as the draggable chrome of windows.
///
/// A press inside starts a drag and activates the button; every held frame reports a drag
/// step. After the release the GUI hands the button back as deactivating, and on the next
/// update the drag ends and, if the pointer is still inside, a click fires.
pub struct Button {
    base: WidgetBase,
    prev_pos: Vec2f,
    drag_start: Vec2f,
    response: WidgetResponse,
    last_event: EventArgs,
    on_click: Option<Callback>,
    on_drag_start: Option<Callback>,
    on_drag: Option<Callback>,
    on_drag_end: Option<Callback>,
}

impl Button {
    /// Creates a 100x30 button labelled with its name.
    pub fn new(name: &str) -> Self {
        Self {
            base: WidgetBase::new(name, vec2f(100.0, 30.0)),
            prev_pos: Vec2f::default(),
            drag_start: Vec2f::default(),
            response: WidgetResponse::NONE,
            last_event: EventArgs::default(),
            on_click: None,
            on_drag_start: None,
            on_drag: None,
            on_drag_end: None,
        }
    }

    /// Shared widget state.
    pub fn base(&self) -> &WidgetBase { &self.base }

    /// Shared widget state, mutably.
    pub fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    /// Fires when the button is released with the pointer inside.
    pub fn on_click(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_click = Some(Box::new(f)); }

    /// Fires on the press that starts a drag.
    pub fn on_drag_start(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_drag_start = Some(Box::new(f)); }

    /// Fires every held frame with the pointer delta.
    pub fn on_drag(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_drag = Some(Box::new(f)); }

    /// Fires once the drag is over.
    pub fn on_drag_end(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_drag_end = Some(Box::new(f)); }

    /// Events fired by the last update.
    pub fn response(&self) -> WidgetResponse { self.response }

    /// Payload of the last event fired.
    pub fn last_event(&self) -> &EventArgs { &self.last_event }

    fn emit(&mut self, kind: WidgetResponse, args: EventArgs) {
        let callback = if kind == WidgetResponse::CLICK {
            &mut self.on_click
        } else if kind == WidgetResponse::DRAG_START {
            &mut self.on_drag_start
        } else if kind == WidgetResponse::DRAG {
            &mut self.on_drag
        } else {
            &mut self.on_drag_end
        };
        fire(callback, &args);
        self.response |= kind;
        self.last_event = args;
    }

    pub(crate) fn update(&mut self, gui: &mut Gui) {
        self.base.update_lifecycle();
        self.response = WidgetResponse::NONE;
        if !self.base.is_enabled() || gui.interaction_blocked(&mut self.base) {
            return;
        }

        let snap = *gui.snapshot();
        let inside = Hitbox2D::pointer(snap.pointer).intersects(&self.base.hitbox());

        if self.base.state == WidgetState::Focus {
            self.base.state = WidgetState::Idle;
        }
        if self.base.state == WidgetState::Deactivating {
            let args = EventArgs { click_pos: snap.pointer, start_pos: self.drag_start, ..EventArgs::default() };
            self.emit(WidgetResponse::DRAG_END, args.clone());
            if inside {
                self.emit(WidgetResponse::CLICK, args);
            }
            self.base.state = WidgetState::Idle;
        }
        if self.base.state == WidgetState::Active {
            gui.deactivate_widget(&mut self.base);
        }

        if inside && self.base.state == WidgetState::Idle {
            self.base.state = WidgetState::Focus;
        }
        let clicked = snap.primary_pressed() && self.base.state == WidgetState::Focus;

        if snap.primary_down() && self.base.state == WidgetState::Deactivating {
            // still held: reclaim the slot released above and report the step
            gui.activate_widget(&mut self.base);
            let delta = snap.pointer - self.prev_pos;
            log::trace!("{} dragged by ({}, {})", self.base.name(), delta.x, delta.y);
            self.emit(WidgetResponse::DRAG, EventArgs {
                click_pos: snap.pointer,
                start_pos: self.drag_start,
                delta_pos: delta,
                ..EventArgs::default()
            });
        }

        if clicked {
            self.drag_start = snap.pointer;
            self.emit(WidgetResponse::DRAG_START, EventArgs {
                click_pos: snap.pointer,
                start_pos: snap.pointer,
                ..EventArgs::default()
            });
            gui.activate_widget(&mut self.base);
        }

        self.prev_pos = snap.pointer;
    }

    pub(crate) fn render(&mut self, ctx: &mut DrawCtx<'_>, _pool: &mut Pool) {
        self.base.begin_render(ctx);
        ctx.draw_rect(self.base.bounds(), self.base.color());

        self.base.scissor = self.base.bounds_scissor();
        ctx.set_scissor(self.base.scissor);
        let (pos, size) = (self.base.pos(), self.base.size());
        let center = vec2f(pos.x + size.x * 0.5, pos.y + size.y * 0.5);
        let params = self.base.text_params(center, HAlign::Center, VAlign::Center, Some(self.base.scissor));
        ctx.draw_text(self.base.text(), params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn held_drag_reports_deltas() {
        let mut gui = Gui::default();
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let ends = Rc::new(RefCell::new(0));
        let mut button = Button::new("drag");
        let sink = deltas.clone();
        button.on_drag(move |e| sink.borrow_mut().push((e.delta_pos.x, e.delta_pos.y)));
        let end_sink = ends.clone();
        button.on_drag_end(move |_| *end_sink.borrow_mut() += 1);
        let h = gui.add_widget(button);

        gui.input_mut().mousemove(10, 10);
        gui.update();
        gui.input_mut().mousedown(10, 10, MouseButton::LEFT);
        gui.update();
        gui.input_mut().mousemove(14, 13);
        gui.update();
        gui.input_mut().mousemove(20, 13);
        gui.update();
        assert_eq!(*deltas.borrow(), vec![(4.0, 3.0), (6.0, 0.0)]);
        assert_eq!(gui.active_widget(), Some(h));

        gui.input_mut().mouseup(20, 13, MouseButton::LEFT);
        gui.update();
        assert_eq!(*ends.borrow(), 0);
        gui.update();
        assert_eq!(*ends.borrow(), 1);
    }

    #[test]
    fn press_starts_a_drag_at_the_pointer() {
        let mut gui = Gui::default();
        let starts = Rc::new(RefCell::new(Vec::new()));
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut button = Button::new("ok");
        button.base_mut().set_pos(vec2f(10.0, 10.0));
        let sink = starts.clone();
        button.on_drag_start(move |e| sink.borrow_mut().push((e.click_pos.x, e.click_pos.y)));
        let sink = clicks.clone();
        button.on_click(move |e| sink.borrow_mut().push((e.click_pos.x, e.click_pos.y)));
        let h = gui.add_widget(button);
        let state = |gui: &Gui| gui.widget(h).unwrap().base().state();

        gui.input_mut().mousemove(50, 25);
        gui.update();
        assert_eq!(state(&gui), WidgetState::Focus);
        gui.input_mut().mousedown(50, 25, MouseButton::LEFT);
        gui.update();
        assert_eq!(gui.active_widget(), Some(h));
        assert_eq!(*starts.borrow(), vec![(50.0, 25.0)]);

        gui.input_mut().mouseup(50, 25, MouseButton::LEFT);
        gui.update();
        assert_eq!(state(&gui), WidgetState::Deactivating);
        gui.update();
        assert_eq!(*clicks.borrow(), vec![(50.0, 25.0)]);
        // idle again, then immediately re-focused by the hovering pointer
        assert_eq!(state(&gui), WidgetState::Focus);
    }

    #[test]
    fn disabled_button_ignores_input() {
        let mut gui = Gui::default();
        let mut button = Button::new("off");
        button.base_mut().set_enabled(false);
        let h = gui.add_widget(button);
        gui.input_mut().mousedown(10, 10, MouseButton::LEFT);
        gui.update();
        assert_eq!(gui.active_widget(), None);
        assert_eq!(gui.widget(h).unwrap().base().state(), WidgetState::Idle);
    }
}
