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
use crate::registry::Pool;
use crate::*;

/// Registry of widgets plus the exclusive activation slot.
///
/// Widgets are owned by the GUI and addressed through [`WidgetHandle`]s. Every frame the host
/// feeds [`Gui::input_mut`], calls [`Gui::update`] and then [`Gui::render`]. Only one widget may
/// own the pointer at a time: the first to call [`Gui::activate_widget`] in a frame keeps the
/// slot until it releases it, and every other widget reads as disabled meanwhile.
pub struct Gui {
    pool: Pool,
    active: Option<WidgetHandle>,
    exclusive: Option<WidgetHandle>,
    input: Input,
    snapshot: InputSnapshot,
    screen: Dimensioni,
    style: Style,
}

impl Default for Gui {
    fn default() -> Self { Self::new(Dimensioni::new(1280, 720)) }
}

impl Gui {
    /// Creates an empty GUI for a viewport of the given size.
    pub fn new(screen: Dimensioni) -> Self {
        Self {
            pool: Pool::default(),
            active: None,
            exclusive: None,
            input: Input::default(),
            snapshot: InputSnapshot::default(),
            screen,
            style: Style::default(),
        }
    }

    /// Layout and tooltip constants.
    pub fn style(&self) -> &Style { &self.style }

    /// Replaces the style; takes effect on the next update.
    pub fn set_style(&mut self, style: Style) { self.style = style; }

    /// Viewport size used for tooltip placement.
    pub fn screen(&self) -> Dimensioni { self.screen }

    /// Updates the viewport size.
    pub fn set_screen(&mut self, screen: Dimensioni) { self.screen = screen; }

    /// Input collector for the frame being assembled.
    pub fn input_mut(&mut self) -> &mut Input { &mut self.input }

    /// Input state frozen for the current update pass.
    pub fn snapshot(&self) -> &InputSnapshot { &self.snapshot }

    /// Pointer position of the current update pass.
    pub fn pointer_pos(&self) -> Vec2f { self.snapshot.pointer }

    /// Widget that currently owns the pointer.
    pub fn active_widget(&self) -> Option<WidgetHandle> { self.active }

    /// Widget (usually a window) confining interaction to its own subtree.
    pub fn exclusive(&self) -> Option<WidgetHandle> { self.exclusive }

    /// Restricts interaction to `handle` and its children, or lifts the restriction.
    /// An active widget outside the new scope is released on the next update.
    pub fn set_exclusive(&mut self, handle: Option<WidgetHandle>) {
        log::debug!("exclusive scope set to {:?}", handle);
        self.exclusive = handle;
    }

    /// Number of registered widgets, window chrome included.
    pub fn widget_count(&self) -> usize { self.pool.len() }

    /// Borrows a widget. Returns `None` for unknown handles.
    pub fn widget(&self, handle: WidgetHandle) -> Option<&Widget> { self.pool.get(handle) }

    /// Borrows a widget mutably.
    pub fn widget_mut(&mut self, handle: WidgetHandle) -> Option<&mut Widget> { self.pool.get_mut(handle) }

    /// Looks a widget up by its unique name.
    pub fn find_widget(&self, name: &str) -> Option<WidgetHandle> {
        let id = Id::from_str(name);
        self.pool.handles().iter().copied().find(|h| {
            self.pool
                .get(*h)
                .map(|w| w.base().name_id() == id && w.base().name() == name)
                .unwrap_or(false)
        })
    }

    /// Registers a top level widget. Windows get their chrome created here.
    pub fn add_widget<W: Into<Widget>>(&mut self, widget: W) -> WidgetHandle { self.register(widget.into(), None) }

    /// Adds `widget` to a window. Its position becomes relative to the window and it inherits
    /// the window's enabled and visible flags.
    pub fn add_to_window<W: Into<Widget>>(&mut self, window: WidgetHandle, widget: W) -> Result<WidgetHandle, WidgetError> {
        let (enabled, visible, origin) = {
            let w = self.pool.get(window).ok_or(WidgetError::UnknownWidget(window))?;
            if w.as_window().is_none() {
                return Err(WidgetError::NotAContainer(window));
            }
            let base = w.base();
            (base.is_enabled(), base.is_visible(), base.pos())
        };
        let mut widget = widget.into();
        {
            let base = widget.base_mut();
            base.set_enabled(enabled);
            base.set_visible(visible);
            base.transform.attach_to(origin);
        }
        let handle = self.register(widget, Some(window));
        if let Some(w) = self.pool.get_mut(window).and_then(Widget::as_window_mut) {
            w.push_child(handle);
        }
        Ok(handle)
    }

    pub(crate) fn register(&mut self, mut widget: Widget, parent: Option<WidgetHandle>) -> WidgetHandle {
        let handle = self.pool.reserve(parent);
        widget.base_mut().handle = Some(handle);
        widget.base_mut().container = parent;
        if let Some(window) = widget.as_window_mut() {
            window.attach_chrome(self, handle);
        }
        log::debug!("registered widget {} as {:?}", widget.base().name(), handle);
        self.pool.restore(handle, widget);
        handle
    }

    /// Unregisters a widget. Removing a window removes its chrome and children as well.
    pub fn remove_widget(&mut self, handle: WidgetHandle) -> Result<(), WidgetError> {
        if !self.pool.contains(handle) {
            return Err(WidgetError::UnknownWidget(handle));
        }
        if let Some(parent) = self.pool.parent(handle) {
            if let Some(w) = self.pool.get_mut(parent).and_then(Widget::as_window_mut) {
                w.remove_child(handle);
            }
        }
        let mut pending = vec![handle];
        while let Some(h) = pending.pop() {
            if self.active == Some(h) {
                self.active = None;
            }
            if self.exclusive == Some(h) {
                self.exclusive = None;
            }
            if let Some(widget) = self.pool.remove(h) {
                if let Some(w) = widget.as_window() {
                    pending.extend_from_slice(w.children());
                }
                log::debug!("removed widget {}", widget.base().name());
            }
        }
        Ok(())
    }

    /// Claims the activation slot for `base`. Fails if another widget holds it this frame.
    pub fn activate_widget(&mut self, base: &mut WidgetBase) -> bool {
        let Some(handle) = base.handle else {
            return false;
        };
        match self.active {
            Some(current) if current != handle => {
                log::trace!("{:?} cannot activate, {:?} owns the pointer", handle, current);
                false
            }
            current => {
                if current.is_none() {
                    log::trace!("{} activated", base.name());
                }
                self.active = Some(handle);
                base.state = WidgetState::Active;
                true
            }
        }
    }

    /// Releases the slot held by `base`; the widget settles to idle on its next update.
    pub fn deactivate_widget(&mut self, base: &mut WidgetBase) {
        base.state = WidgetState::Deactivating;
        if self.active.is_some() && self.active == base.handle {
            log::trace!("{} deactivated", base.name());
            self.active = None;
        }
    }

    /// Returns `true` if interaction is blocked for `base` by the active widget or the
    /// exclusive scope.
    pub fn is_widget_disabled(&self, base: &WidgetBase) -> bool {
        let Some(handle) = base.handle else {
            return false;
        };
        if let Some(active) = self.active {
            if active != handle {
                return true;
            }
        }
        match self.exclusive {
            Some(scope) => !self.pool.is_within(handle, scope),
            None => false,
        }
    }

    /// Like [`Gui::is_widget_disabled`], additionally settling a pending deactivation to idle
    /// so a blocked widget never lingers in between states.
    pub(crate) fn interaction_blocked(&self, base: &mut WidgetBase) -> bool {
        let blocked = self.is_widget_disabled(base);
        if blocked && base.state == WidgetState::Deactivating {
            base.state = WidgetState::Idle;
        }
        blocked
    }

    /// Sets the enabled flag; on a window it cascades to every child except the chrome.
    pub fn set_enabled(&mut self, handle: WidgetHandle, value: bool) -> Result<(), WidgetError> {
        let mut widget = self.pool.take(handle).ok_or(WidgetError::UnknownWidget(handle))?;
        match widget.as_window_mut() {
            Some(w) => w.set_enabled(self, value),
            None => widget.base_mut().set_enabled(value),
        }
        self.pool.restore(handle, widget);
        Ok(())
    }

    /// Sets the visible flag; on a window it also minimizes or restores it and cascades to all
    /// children.
    pub fn set_visible(&mut self, handle: WidgetHandle, value: bool) -> Result<(), WidgetError> {
        let mut widget = self.pool.take(handle).ok_or(WidgetError::UnknownWidget(handle))?;
        match widget.as_window_mut() {
            Some(w) => w.set_visible(self, value),
            None => widget.base_mut().set_visible(value),
        }
        self.pool.restore(handle, widget);
        Ok(())
    }

    /// Collapses a window to its title bar, or restores it.
    pub fn set_minimized(&mut self, handle: WidgetHandle, value: bool) -> Result<(), WidgetError> {
        let mut widget = self.pool.take(handle).ok_or(WidgetError::UnknownWidget(handle))?;
        let res = match widget.as_window_mut() {
            Some(w) => {
                w.set_minimized(self, value);
                Ok(())
            }
            None => Err(WidgetError::NotAContainer(handle)),
        };
        self.pool.restore(handle, widget);
        res
    }

    /// Runs one frame of input handling over every widget, in registration order.
    pub fn update(&mut self) {
        self.snapshot = self.input.snapshot();
        self.release_stale_active();
        for handle in self.pool.roots() {
            self.update_widget(handle);
        }
        self.input.epilogue();
    }

    fn release_stale_active(&mut self) {
        let Some(handle) = self.active else {
            return;
        };
        let outside_scope = self.exclusive.map(|scope| !self.pool.is_within(handle, scope)).unwrap_or(false);
        match self.pool.get_mut(handle) {
            Some(widget) if outside_scope || !widget.base().is_enabled() => {
                log::debug!("releasing {} from the activation slot", widget.base().name());
                widget.base_mut().state = WidgetState::Deactivating;
                self.active = None;
            }
            Some(_) => {}
            None => self.active = None,
        }
    }

    pub(crate) fn update_widget(&mut self, handle: WidgetHandle) {
        if let Some(mut widget) = self.pool.take(handle) {
            widget.update(self);
            self.pool.restore(handle, widget);
        }
    }

    /// Records the draw list of the current frame. The active widget is drawn after every
    /// other widget, and tooltips after everything.
    pub fn build_commands(&mut self, factory: &mut dyn ResourceFactory) -> Vec<Command> {
        let mut commands = Vec::new();
        let Gui { pool, style, active, snapshot, screen, .. } = self;
        let active = *active;
        let mut ctx = DrawCtx::new(&mut commands, &*style, factory, snapshot.pointer, *screen, active);
        for handle in pool.roots() {
            if Some(handle) != active {
                pool.render_widget(handle, &mut ctx);
            }
        }
        if let Some(handle) = active {
            pool.render_widget(handle, &mut ctx);
        }
        for handle in pool.handles() {
            if let Some(widget) = pool.get(*handle) {
                if widget.base().is_visible() {
                    widget.base().render_tooltip(&mut ctx);
                }
            }
        }
        drop(ctx);
        commands
    }

    /// Draws the GUI onto `canvas`.
    pub fn render<R: Renderer>(&mut self, canvas: &mut Canvas<R>) {
        let commands = self.build_commands(canvas);
        canvas.submit(&commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_context::tests::NullFactory;
    use std::cell::Cell;
    use std::rc::Rc;

    fn frame(gui: &mut Gui, x: i32, y: i32, press: bool, release: bool) {
        let input = gui.input_mut();
        input.mousemove(x, y);
        if press {
            input.mousedown(x, y, MouseButton::LEFT);
        }
        if release {
            input.mouseup(x, y, MouseButton::LEFT);
        }
        gui.update();
    }

    fn state_of(gui: &Gui, h: WidgetHandle) -> WidgetState { gui.widget(h).unwrap().base().state() }

    #[test]
    fn button_clicks_after_release() {
        let mut gui = Gui::default();
        let clicks = Rc::new(Cell::new(0));
        let mut button = Button::new("ok");
        button.base_mut().set_size(vec2f(100.0, 50.0));
        let counter = clicks.clone();
        button.on_click(move |_| counter.set(counter.get() + 1));
        let h = gui.add_widget(button);

        frame(&mut gui, 50, 25, false, false);
        assert_eq!(state_of(&gui, h), WidgetState::Focus);
        frame(&mut gui, 50, 25, true, false);
        assert_eq!(state_of(&gui, h), WidgetState::Active);
        assert_eq!(gui.active_widget(), Some(h));
        frame(&mut gui, 50, 25, false, true);
        assert_eq!(gui.active_widget(), None);
        frame(&mut gui, 50, 25, false, false);
        assert_eq!(clicks.get(), 1);
        assert_ne!(state_of(&gui, h), WidgetState::Active);
        assert!(gui.widget(h).unwrap().as_button().unwrap().response().is_click());
    }

    #[test]
    fn release_outside_does_not_click() {
        let mut gui = Gui::default();
        let clicks = Rc::new(Cell::new(0));
        let mut button = Button::new("ok");
        let counter = clicks.clone();
        button.on_click(move |_| counter.set(counter.get() + 1));
        let h = gui.add_widget(button);
        frame(&mut gui, 10, 10, false, false);
        frame(&mut gui, 10, 10, true, false);
        frame(&mut gui, 300, 300, false, true);
        frame(&mut gui, 300, 300, false, false);
        assert_eq!(clicks.get(), 0);
        assert_eq!(state_of(&gui, h), WidgetState::Idle);
    }

    #[test]
    fn first_activation_wins() {
        let mut gui = Gui::default();
        let a = gui.add_widget(Label::new("a"));
        let b = gui.add_widget(Label::new("b"));
        let mut wa = gui.pool.take(a).unwrap();
        let mut wb = gui.pool.take(b).unwrap();
        assert!(gui.activate_widget(wa.base_mut()));
        assert!(!gui.activate_widget(wb.base_mut()));
        assert_eq!(gui.active_widget(), Some(a));
        assert!(gui.is_widget_disabled(wb.base()));
        assert!(!gui.is_widget_disabled(wa.base()));
        gui.deactivate_widget(wb.base_mut());
        assert_eq!(gui.active_widget(), Some(a));
        gui.deactivate_widget(wa.base_mut());
        assert_eq!(gui.active_widget(), None);
        assert_eq!(wa.base().state(), WidgetState::Deactivating);
        gui.pool.restore(a, wa);
        gui.pool.restore(b, wb);
    }

    #[test]
    fn held_button_blocks_others() {
        let mut gui = Gui::default();
        let first = gui.add_widget(Button::new("first"));
        let mut other = Button::new("other");
        other.base_mut().set_pos(vec2f(200.0, 0.0));
        let second = gui.add_widget(other);
        frame(&mut gui, 10, 10, false, false);
        frame(&mut gui, 10, 10, true, false);
        frame(&mut gui, 210, 10, false, false);
        assert_eq!(gui.active_widget(), Some(first));
        assert_eq!(state_of(&gui, second), WidgetState::Idle);
    }

    #[test]
    fn minimize_hides_children_but_not_chrome() {
        let mut gui = Gui::default();
        let window = gui.add_widget(Window::new("tools"));
        let label = gui.add_to_window(window, Label::new("caption")).unwrap();
        gui.set_minimized(window, true).unwrap();
        assert!(!gui.widget(label).unwrap().base().is_visible());
        let w = gui.widget(window).unwrap().as_window().unwrap();
        for role in [ChromeRole::MoveDragger, ChromeRole::Close, ChromeRole::Minimize, ChromeRole::ResizeUpperLeft] {
            let chrome = w.chrome(role).unwrap();
            assert!(gui.widget(chrome).unwrap().base().is_visible(), "{:?} hidden", role);
        }
        let resize = w.chrome(ChromeRole::ResizeBottomRight).unwrap();
        assert!(!gui.widget(resize).unwrap().base().is_visible());
        gui.set_minimized(window, false).unwrap();
        assert!(gui.widget(label).unwrap().base().is_visible());
        assert!(gui.widget(resize).unwrap().base().is_visible());
    }

    #[test]
    fn set_minimized_rejects_plain_widgets() {
        let mut gui = Gui::default();
        let label = gui.add_widget(Label::new("caption"));
        assert!(matches!(gui.set_minimized(label, true), Err(WidgetError::NotAContainer(_))));
        assert!(gui.add_to_window(label, Label::new("x")).is_err());
    }

    #[test]
    fn tooltip_shows_after_delay() {
        let mut gui = Gui::default();
        let mut button = Button::new("tip");
        button.base_mut().set_tooltip("hello");
        gui.add_widget(button);
        let mut factory = NullFactory::default();
        let has_tip = |commands: &[Command]| commands.iter().any(|c| matches!(c, Command::Text { text, .. } if text == "hello"));
        for _ in 0..26 {
            frame(&mut gui, 5, 5, false, false);
        }
        assert!(!has_tip(&gui.build_commands(&mut factory)));
        frame(&mut gui, 5, 5, false, false);
        assert!(has_tip(&gui.build_commands(&mut factory)));
    }

    #[test]
    fn exclusive_scope_blocks_outsiders() {
        let mut gui = Gui::default();
        let outsider = gui.add_widget(Button::new("outside"));
        let mut modal = Window::new("modal");
        modal.base_mut().set_pos(vec2f(400.0, 0.0));
        let modal = gui.add_widget(modal);
        let mut button = Button::new("inside");
        button.base_mut().set_pos(vec2f(10.0, 40.0));
        let inside = gui.add_to_window(modal, button).unwrap();
        gui.set_exclusive(Some(modal));

        frame(&mut gui, 10, 10, false, false);
        frame(&mut gui, 10, 10, true, false);
        assert_eq!(gui.active_widget(), None);
        assert_eq!(state_of(&gui, outsider), WidgetState::Idle);
        frame(&mut gui, 10, 10, false, true);

        let pos = gui.widget(inside).unwrap().base().pos();
        let (x, y) = (pos.x as i32 + 5, pos.y as i32 + 5);
        frame(&mut gui, x, y, false, false);
        frame(&mut gui, x, y, true, false);
        assert_eq!(gui.active_widget(), Some(inside));
    }

    #[test]
    fn hiding_the_active_widget_releases_it() {
        let mut gui = Gui::default();
        let h = gui.add_widget(Button::new("b"));
        frame(&mut gui, 10, 10, false, false);
        frame(&mut gui, 10, 10, true, false);
        assert_eq!(gui.active_widget(), Some(h));
        gui.set_visible(h, false).unwrap();
        frame(&mut gui, 10, 10, false, false);
        assert_eq!(gui.active_widget(), None);
        assert_ne!(state_of(&gui, h), WidgetState::Active);
    }

    #[test]
    fn removing_a_window_removes_its_subtree() {
        let mut gui = Gui::default();
        let window = gui.add_widget(Window::new("w"));
        let label = gui.add_to_window(window, Label::new("l")).unwrap();
        assert_eq!(gui.widget_count(), 7);
        gui.remove_widget(window).unwrap();
        assert_eq!(gui.widget_count(), 0);
        assert!(gui.widget(label).is_none());
        assert!(matches!(gui.remove_widget(window), Err(WidgetError::UnknownWidget(_))));
    }

    #[test]
    fn removing_a_child_detaches_it() {
        let mut gui = Gui::default();
        let window = gui.add_widget(Window::new("w"));
        let label = gui.add_to_window(window, Label::new("l")).unwrap();
        gui.remove_widget(label).unwrap();
        let w = gui.widget(window).unwrap().as_window().unwrap();
        assert!(!w.children().contains(&label));
        frame(&mut gui, 0, 0, false, false);
    }

    #[test]
    fn find_widget_by_name() {
        let mut gui = Gui::default();
        let window = gui.add_widget(Window::new("main"));
        assert_eq!(gui.find_widget("main"), Some(window));
        let close = gui.find_widget("main_close_button");
        assert_eq!(close, gui.widget(window).unwrap().as_window().unwrap().chrome(ChromeRole::Close));
        assert_eq!(gui.find_widget("missing"), None);
    }

    #[test]
    fn active_widget_is_drawn_last() {
        let mut gui = Gui::default();
        let first = gui.add_widget(Button::new("first"));
        let mut second = Button::new("second");
        second.base_mut().set_pos(vec2f(0.0, 100.0));
        gui.add_widget(second);
        frame(&mut gui, 10, 10, false, false);
        frame(&mut gui, 10, 10, true, false);
        assert_eq!(gui.active_widget(), Some(first));
        let mut factory = NullFactory::default();
        let commands = gui.build_commands(&mut factory);
        let texts: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["second", "first"]);
    }
}
