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

bitflags::bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Options applied when a window creates its chrome.
    pub struct ContainerOption : u32 {
        /// Skip the two resize draggers.
        const NO_RESIZE = 1;
        /// Full chrome.
        const NONE = 0;
    }
}

impl ContainerOption {
    /// Returns `true` if the window cannot be resized.
    pub fn is_no_resize(&self) -> bool { self.intersects(Self::NO_RESIZE) }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Part a chrome button plays for its window.
pub enum ChromeRole {
    /// Title bar strip; dragging it moves the window.
    MoveDragger,
    /// Hides the window.
    Close,
    /// Collapses the window to its title bar.
    Minimize,
    /// Upper-left corner handle; resizes while keeping the lower-right corner fixed.
    ResizeUpperLeft,
    /// Lower-right corner handle.
    ResizeBottomRight,
}

impl ChromeRole {
    /// Every role in creation order.
    pub const ALL: [ChromeRole; 5] = [
        ChromeRole::MoveDragger,
        ChromeRole::Close,
        ChromeRole::Minimize,
        ChromeRole::ResizeUpperLeft,
        ChromeRole::ResizeBottomRight,
    ];

    fn suffix(self) -> &'static str {
        match self {
            ChromeRole::MoveDragger => "_move_dragger",
            ChromeRole::Close => "_close_button",
            ChromeRole::Minimize => "_minimize_button",
            ChromeRole::ResizeUpperLeft => "_resize_dragger_upper_left",
            ChromeRole::ResizeBottomRight => "_resize_dragger_bottom_right",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ChromeRole::Close => "x",
            ChromeRole::Minimize => "-",
            _ => "",
        }
    }

    fn tooltip(self) -> &'static str {
        match self {
            ChromeRole::Close => "Close window",
            ChromeRole::Minimize => "Minimize window",
            _ => "",
        }
    }

    fn is_resizer(self) -> bool { matches!(self, ChromeRole::ResizeUpperLeft | ChromeRole::ResizeBottomRight) }
}

/// Movable, resizable, minimizable container.
///
/// Children are placed relative to the window's top-left corner and clipped to its bounds.
/// The chrome (title bar dragger, close and minimize buttons, two resize corners) are ordinary
/// [`Button`]s registered as the first children; they are laid out again every frame.
pub struct Window {
    base: WidgetBase,
    opt: ContainerOption,
    children: Vec<WidgetHandle>,
    chrome: Vec<(ChromeRole, WidgetHandle)>,
    minimized: bool,
}

impl Window {
    /// Creates a 640x480 window with full chrome.
    pub fn new(name: &str) -> Self { Self::with_opt(name, ContainerOption::NONE) }

    /// Creates a 640x480 window with the given chrome options.
    pub fn with_opt(name: &str, opt: ContainerOption) -> Self {
        Self {
            base: WidgetBase::new(name, vec2f(640.0, 480.0)),
            opt,
            children: Vec::new(),
            chrome: Vec::new(),
            minimized: false,
        }
    }

    /// Shared widget state.
    pub fn base(&self) -> &WidgetBase { &self.base }

    /// Shared widget state, mutably.
    pub fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    /// Chrome options.
    pub fn options(&self) -> ContainerOption { self.opt }

    /// Every child, chrome first.
    pub fn children(&self) -> &[WidgetHandle] { &self.children }

    /// Handle of the chrome button playing `role`, if it was created.
    pub fn chrome(&self, role: ChromeRole) -> Option<WidgetHandle> { self.chrome.iter().find(|(r, _)| *r == role).map(|(_, h)| *h) }

    /// Returns `true` while collapsed to the title bar.
    pub fn is_minimized(&self) -> bool { self.minimized }

    fn role_of(&self, handle: WidgetHandle) -> Option<ChromeRole> { self.chrome.iter().find(|(_, h)| *h == handle).map(|(r, _)| *r) }

    fn user_children(&self) -> Vec<WidgetHandle> { self.children.iter().copied().filter(|h| self.role_of(*h).is_none()).collect() }

    pub(crate) fn push_child(&mut self, handle: WidgetHandle) { self.children.push(handle); }

    pub(crate) fn remove_child(&mut self, handle: WidgetHandle) {
        self.children.retain(|h| *h != handle);
        self.chrome.retain(|(_, h)| *h != handle);
    }

    fn chrome_layout(&self, role: ChromeRole, cs: f32) -> (Vec2f, Vec2f) {
        let size = self.base.size();
        let square = vec2f(cs, cs);
        match role {
            ChromeRole::MoveDragger => (vec2f(cs, 0.0), vec2f(size.x - cs * 3.0, cs)),
            ChromeRole::Close => (vec2f(size.x - cs, 0.0), square),
            ChromeRole::Minimize => (vec2f(size.x - cs * 2.0, 0.0), square),
            ChromeRole::ResizeUpperLeft => (Vec2f::default(), square),
            ChromeRole::ResizeBottomRight => (vec2f(size.x - cs, size.y - cs), square),
        }
    }

    pub(crate) fn attach_chrome(&mut self, gui: &mut Gui, handle: WidgetHandle) {
        let cs = gui.style().window_control_size;
        let origin = self.base.pos();
        for role in ChromeRole::ALL {
            if role.is_resizer() && self.opt.is_no_resize() {
                continue;
            }
            let mut button = Button::new(&format!("{}{}", self.base.name(), role.suffix()));
            let (pos, size) = self.chrome_layout(role, cs);
            let b = button.base_mut();
            b.set_text(role.label());
            b.set_tooltip(role.tooltip());
            b.set_enabled(self.base.is_enabled());
            b.set_visible(self.base.is_visible());
            b.set_pos(pos);
            b.set_size(size);
            b.transform.attach_to(origin);
            let child = gui.register(button.into(), Some(handle));
            self.chrome.push((role, child));
            self.children.push(child);
        }
    }

    /// Shows or hides the window and everything in it. Showing also restores a minimized window.
    pub(crate) fn set_visible(&mut self, gui: &mut Gui, value: bool) {
        self.base.set_visible(value);
        self.set_minimized(gui, !value);
        for child in self.children.clone() {
            let _ = gui.set_visible(child, value);
        }
    }

    /// Cascades to the children but not to the chrome, which stays operable.
    pub(crate) fn set_enabled(&mut self, gui: &mut Gui, value: bool) {
        for child in self.user_children() {
            let _ = gui.set_enabled(child, value);
        }
    }

    pub(crate) fn set_minimized(&mut self, gui: &mut Gui, value: bool) {
        self.minimized = value;
        if let Some(resizer) = self.chrome(ChromeRole::ResizeBottomRight) {
            let _ = gui.set_visible(resizer, !value);
        }
        for child in self.user_children() {
            let _ = gui.set_visible(child, !value);
        }
    }

    fn resize(&mut self, delta: Vec2f, from_upper_left: bool, style: &Style) {
        let size = self.base.size();
        let (dx, dy) = if from_upper_left { (-delta.x, -delta.y) } else { (delta.x, delta.y) };
        let target = vec2f((size.x + dx).max(style.window_min_width), (size.y + dy).max(style.window_min_height));
        if from_upper_left {
            // keep the lower-right corner where it is
            self.base.transform.translate(size - target);
        }
        self.base.transform.set_scale(target);
    }

    fn apply_chrome(&mut self, gui: &mut Gui, role: ChromeRole, handle: WidgetHandle) {
        let (response, delta) = match gui.widget(handle).and_then(Widget::as_button) {
            Some(button) => (button.response(), button.last_event().delta_pos),
            None => return,
        };
        let style = *gui.style();
        match role {
            ChromeRole::MoveDragger if response.is_drag() => self.base.transform.translate(delta),
            ChromeRole::Close if response.is_click() => {
                log::debug!("closing window {}", self.base.name());
                self.set_visible(gui, false);
            }
            ChromeRole::Minimize if response.is_click() => {
                let value = !self.minimized;
                self.set_minimized(gui, value);
            }
            ChromeRole::ResizeUpperLeft if response.is_drag() => self.resize(delta, true, &style),
            ChromeRole::ResizeBottomRight if response.is_drag() => self.resize(delta, false, &style),
            _ => {}
        }
    }

    pub(crate) fn update(&mut self, gui: &mut Gui) {
        self.base.update_lifecycle();
        if !self.base.is_enabled() {
            return;
        }
        let cs = gui.style().window_control_size;
        for child in self.children.clone() {
            // chrome may have moved or resized the window earlier in this loop
            let origin = self.base.pos();
            let clip = self.base.bounds_scissor();
            let role = self.role_of(child);
            let layout = role.map(|r| self.chrome_layout(r, cs));
            if let Some(w) = gui.widget_mut(child) {
                let b = w.base_mut();
                if let Some((pos, size)) = layout {
                    b.set_pos(pos);
                    b.set_size(size);
                }
                b.transform.update_transform_parented(origin);
                b.set_scissor_rect(clip);
            }
            gui.update_widget(child);
            if let Some(role) = role {
                self.apply_chrome(gui, role, child);
            }
        }
    }

    pub(crate) fn render(&mut self, ctx: &mut DrawCtx<'_>, pool: &mut Pool) {
        self.base.begin_render(ctx);
        if !self.minimized {
            ctx.draw_rect(self.base.bounds(), self.base.color());
        }
        for child in &self.children {
            if Some(*child) != ctx.active() {
                pool.render_widget(*child, ctx);
            }
        }

        self.base.scissor = self.base.bounds_scissor();
        ctx.set_scissor(self.base.scissor);
        let pos = self.base.pos();
        let title = vec2f(pos.x + ctx.style().window_control_size + 2.0, pos.y);
        let params = self.base.text_params(title, HAlign::Left, VAlign::Top, Some(self.base.scissor));
        ctx.draw_text(self.base.text(), params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(gui: &mut Gui, x: i32, y: i32) {
        gui.input_mut().mousemove(x, y);
        gui.update();
    }

    fn press(gui: &mut Gui, x: i32, y: i32) {
        gui.input_mut().mousedown(x, y, MouseButton::LEFT);
        gui.update();
    }

    fn release(gui: &mut Gui, x: i32, y: i32) {
        gui.input_mut().mouseup(x, y, MouseButton::LEFT);
        gui.update();
    }

    fn setup() -> (Gui, WidgetHandle, WidgetHandle) {
        let mut gui = Gui::default();
        let mut window = Window::new("tools");
        window.base_mut().set_pos(vec2f(100.0, 100.0));
        window.base_mut().set_size(vec2f(300.0, 200.0));
        let window = gui.add_widget(window);
        let mut label = Label::new("caption");
        label.base_mut().set_pos(vec2f(10.0, 30.0));
        let label = gui.add_to_window(window, label).unwrap();
        (gui, window, label)
    }

    fn pos_of(gui: &Gui, h: WidgetHandle) -> (f32, f32) {
        let p = gui.widget(h).unwrap().base().pos();
        (p.x, p.y)
    }

    fn click(gui: &mut Gui, x: i32, y: i32) {
        frame(gui, x, y);
        press(gui, x, y);
        release(gui, x, y);
        frame(gui, x, y);
    }

    #[test]
    fn chrome_is_created_and_named() {
        let (gui, window, _) = setup();
        let w = gui.widget(window).unwrap().as_window().unwrap();
        assert_eq!(w.children().len(), 6);
        for role in ChromeRole::ALL {
            assert!(w.chrome(role).is_some());
        }
        let close = w.chrome(ChromeRole::Close).unwrap();
        assert_eq!(gui.widget(close).unwrap().base().text(), "x");
        assert_eq!(gui.widget(close).unwrap().base().tooltip(), "Close window");
    }

    #[test]
    fn no_resize_skips_corners() {
        let mut gui = Gui::default();
        let window = gui.add_widget(Window::with_opt("fixed", ContainerOption::NO_RESIZE));
        let w = gui.widget(window).unwrap().as_window().unwrap();
        assert_eq!(w.children().len(), 3);
        assert!(w.chrome(ChromeRole::ResizeUpperLeft).is_none());
    }

    #[test]
    fn dragging_the_title_bar_moves_children() {
        let (mut gui, window, label) = setup();
        frame(&mut gui, 150, 110);
        assert_eq!(pos_of(&gui, label), (110.0, 130.0));
        press(&mut gui, 150, 110);
        frame(&mut gui, 170, 120);
        assert_eq!(pos_of(&gui, window), (120.0, 110.0));
        assert_eq!(pos_of(&gui, label), (130.0, 140.0));
        release(&mut gui, 170, 120);
        frame(&mut gui, 170, 120);
        assert_eq!(pos_of(&gui, window), (120.0, 110.0));
    }

    #[test]
    fn resizing_is_clamped_to_the_minimum() {
        let (mut gui, window, _) = setup();
        frame(&mut gui, 385, 285);
        press(&mut gui, 385, 285);
        frame(&mut gui, 0, 0);
        let size = gui.widget(window).unwrap().base().size();
        assert_eq!((size.x, size.y), (80.0, 40.0));
    }

    #[test]
    fn upper_left_resize_keeps_the_opposite_corner() {
        let (mut gui, window, _) = setup();
        frame(&mut gui, 105, 105);
        press(&mut gui, 105, 105);
        frame(&mut gui, 125, 115);
        let base = gui.widget(window).unwrap().base();
        assert_eq!((base.pos().x, base.pos().y), (120.0, 110.0));
        assert_eq!((base.size().x, base.size().y), (280.0, 190.0));
    }

    #[test]
    fn close_hides_the_window_and_its_children() {
        let (mut gui, window, label) = setup();
        click(&mut gui, 385, 105);
        assert!(!gui.widget(window).unwrap().base().is_visible());
        assert!(!gui.widget(label).unwrap().base().is_visible());
        gui.set_visible(window, true).unwrap();
        assert!(gui.widget(label).unwrap().base().is_visible());
        assert!(!gui.widget(window).unwrap().as_window().unwrap().is_minimized());
    }

    #[test]
    fn minimize_button_toggles() {
        let (mut gui, window, label) = setup();
        click(&mut gui, 365, 105);
        assert!(gui.widget(window).unwrap().as_window().unwrap().is_minimized());
        assert!(!gui.widget(label).unwrap().base().is_visible());
        click(&mut gui, 365, 105);
        assert!(!gui.widget(window).unwrap().as_window().unwrap().is_minimized());
        assert!(gui.widget(label).unwrap().base().is_visible());
    }

    #[test]
    fn disabling_spares_the_chrome() {
        let (mut gui, window, label) = setup();
        gui.set_enabled(window, false).unwrap();
        assert!(!gui.widget(label).unwrap().base().is_enabled());
        let close = gui.widget(window).unwrap().as_window().unwrap().chrome(ChromeRole::Close).unwrap();
        assert!(gui.widget(close).unwrap().base().is_enabled());
    }

    #[test]
    fn children_are_clipped_to_the_window() {
        let (mut gui, _, label) = setup();
        frame(&mut gui, 0, 0);
        let clip = gui.widget(label).unwrap().base().scissor_rect();
        assert_eq!(clip, ScissorRect::new(101, 101, 399, 299));
    }
}
