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
use std::ops::Range;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Phase of the drop-down list.
pub enum ComboState {
    /// List closed.
    Inactive,
    /// List open, rows follow the pointer.
    Hover,
    /// A click landed; the list closes on the next update.
    Selecting,
}

/// Drop-down list of strings with a scrollable window of visible rows.
pub struct ComboBox {
    base: WidgetBase,
    items: Vec<String>,
    selected: Option<usize>,
    hovered: Option<usize>,
    first_visible: usize,
    max_visible: usize,
    combo_state: ComboState,
    response: WidgetResponse,
    on_select: Option<Callback>,
}

impl ComboBox {
    /// Creates an empty 100x20 combo box showing up to eight rows at once.
    pub fn new(name: &str) -> Self {
        Self {
            base: WidgetBase::new(name, vec2f(100.0, 20.0)),
            items: Vec::new(),
            selected: None,
            hovered: None,
            first_visible: 0,
            max_visible: 8,
            combo_state: ComboState::Inactive,
            response: WidgetResponse::NONE,
            on_select: None,
        }
    }

    /// Shared widget state.
    pub fn base(&self) -> &WidgetBase { &self.base }

    /// Shared widget state, mutably.
    pub fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    /// Appends an item. The first item added to an unselected box becomes the selection.
    pub fn add_item(&mut self, item: &str) {
        self.items.push(item.to_string());
        if self.selected.is_none() {
            self.selected = Some(self.items.len() - 1);
        }
    }

    /// Removes an item. A selection at or after the removed index moves down by one.
    pub fn remove_item(&mut self, index: usize) -> Result<(), WidgetError> {
        if index >= self.items.len() {
            return Err(WidgetError::ItemOutOfRange { index, len: self.items.len() });
        }
        self.items.remove(index);
        self.selected = match self.selected {
            _ if self.items.is_empty() => None,
            Some(s) if index <= s && s > 0 => Some(s - 1),
            other => other,
        };
        self.hovered = None;
        self.first_visible = self.clamp_first(self.first_visible as i64);
        Ok(())
    }

    /// Removes every item and the selection.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.selected = None;
        self.hovered = None;
        self.first_visible = 0;
    }

    /// Limits the number of rows shown at once (at least one).
    pub fn set_max_visible_item_count(&mut self, value: usize) {
        self.max_visible = value.max(1);
        self.first_visible = self.clamp_first(self.first_visible as i64);
    }

    /// Number of rows shown at once.
    pub fn max_visible_item_count(&self) -> usize { self.max_visible }

    /// Selects an item and fires the select callback.
    pub fn set_selected(&mut self, index: usize) -> Result<(), WidgetError> {
        if index >= self.items.len() {
            return Err(WidgetError::ItemOutOfRange { index, len: self.items.len() });
        }
        self.select(index, Vec2f::default());
        Ok(())
    }

    /// Index of the selected item.
    pub fn selected(&self) -> Option<usize> { self.selected }

    /// Text of an item.
    pub fn item_text(&self, index: usize) -> Option<&str> { self.items.get(index).map(String::as_str) }

    /// Every item in order.
    pub fn items(&self) -> &[String] { &self.items }

    /// Index of the topmost visible row.
    pub fn first_visible(&self) -> usize { self.first_visible }

    /// Row under the pointer while the list is open.
    pub fn hovered(&self) -> Option<usize> { self.hovered }

    /// Phase of the drop-down list.
    pub fn combo_state(&self) -> ComboState { self.combo_state }

    /// Fires when an item is selected, with its index and text.
    pub fn on_select(&mut self, f: impl FnMut(&EventArgs) + 'static) { self.on_select = Some(Box::new(f)); }

    /// Events fired by the last update.
    pub fn response(&self) -> WidgetResponse { self.response }

    fn select(&mut self, index: usize, pointer: Vec2f) {
        self.selected = Some(index);
        let args = EventArgs {
            click_pos: pointer,
            i_value: index as i32,
            s_value: self.items[index].clone(),
            ..EventArgs::default()
        };
        log::debug!("{} selected item {}", self.base.name(), index);
        fire(&mut self.on_select, &args);
        self.response |= WidgetResponse::CHANGE;
    }

    fn clamp_first(&self, first: i64) -> usize {
        let last = self.items.len().saturating_sub(self.max_visible) as i64;
        first.clamp(0, last) as usize
    }

    fn visible_range(&self) -> Range<usize> { self.first_visible..(self.first_visible + self.max_visible).min(self.items.len()) }

    /// Vertical distance from the box's top to the row showing `index`.
    fn item_offset(&self, index: usize) -> f32 {
        let row = index.saturating_sub(self.first_visible);
        self.base.size().y * (row + 1) as f32 + 1.0
    }

    fn item_box(&self, index: usize) -> Hitbox2D {
        let (pos, size) = (self.base.pos(), self.base.size());
        Hitbox2D::new(vec2f(pos.x, pos.y + self.item_offset(index)), size)
    }

    pub(crate) fn update(&mut self, gui: &mut Gui) {
        self.base.update_lifecycle();
        self.response = WidgetResponse::NONE;
        if self.base.state != WidgetState::Active {
            self.combo_state = ComboState::Inactive;
        }
        if !self.base.is_enabled() || gui.interaction_blocked(&mut self.base) {
            return;
        }

        let snap = *gui.snapshot();
        if matches!(self.base.state, WidgetState::Focus | WidgetState::Deactivating) {
            self.base.state = WidgetState::Idle;
        }
        if self.base.state == WidgetState::Active {
            match self.combo_state {
                ComboState::Inactive => self.combo_state = ComboState::Hover,
                ComboState::Selecting => {
                    self.hovered = None;
                    gui.deactivate_widget(&mut self.base);
                }
                ComboState::Hover => {}
            }
        }

        // the arrow box right of the field is part of the hit area
        let (pos, size) = (self.base.pos(), self.base.size());
        let hitbox = Hitbox2D::new(pos, vec2f(size.x + size.y + 1.0, size.y));
        let pointer = Hitbox2D::pointer(snap.pointer);
        if pointer.intersects(&hitbox) && self.base.state == WidgetState::Idle {
            self.base.state = WidgetState::Focus;
        }
        if snap.primary_pressed() && self.base.state == WidgetState::Focus {
            gui.activate_widget(&mut self.base);
        }

        if self.base.state == WidgetState::Active && self.combo_state == ComboState::Hover {
            if snap.scroll != 0 {
                self.first_visible = self.clamp_first(self.first_visible as i64 - snap.scroll as i64);
            }
            self.hovered = self.visible_range().find(|i| pointer.intersects(&self.item_box(*i)));
            if snap.primary_pressed() {
                self.combo_state = ComboState::Selecting;
                if let Some(index) = self.hovered {
                    self.select(index, snap.pointer);
                }
            }
        }
    }

    pub(crate) fn render(&mut self, ctx: &mut DrawCtx<'_>, _pool: &mut Pool) {
        self.base.begin_render(ctx);
        let color = if self.combo_state != ComboState::Inactive { self.base.state_color(WidgetState::Focus) } else { self.base.color() };
        let (pos, size) = (self.base.pos(), self.base.size());

        ctx.draw_rect(self.base.bounds(), color);
        let arrow_x = pos.x + size.x + 1.0;
        ctx.draw_rect(rectf(arrow_x, pos.y, size.y, size.y), color);
        let arrow = self.base.text_params(vec2f(arrow_x + size.y * 0.5, pos.y + size.y * 0.5), HAlign::Center, VAlign::Center, None);
        ctx.draw_text("V", arrow);

        let clip = self.base.container_clip();
        let mid = pos.y + size.y * 0.5;
        let label = self.base.text_params(vec2f(pos.x, mid), HAlign::Right, VAlign::Center, clip);
        ctx.draw_text(self.base.text(), label);
        if let Some(text) = self.selected.and_then(|i| self.item_text(i)) {
            let value = self.base.text_params(vec2f(pos.x + size.x * 0.5, mid), HAlign::Center, VAlign::Center, clip);
            ctx.draw_text(text, value);
        }

        if self.base.state == WidgetState::Active {
            // the open list may hang outside its window
            ctx.clear_scissor();
            for i in self.visible_range() {
                let row_color = match (self.hovered == Some(i), self.combo_state) {
                    (true, ComboState::Hover) => self.base.state_color(WidgetState::Focus),
                    (true, ComboState::Selecting) => self.base.state_color(WidgetState::Active),
                    _ => self.base.state_color(WidgetState::Idle),
                };
                let offset = self.item_offset(i);
                ctx.draw_rect(rectf(pos.x, pos.y + offset, size.x, size.y), row_color);
                let params = self.base.text_params(vec2f(pos.x + size.x * 0.5, mid + offset), HAlign::Center, VAlign::Center, None);
                ctx.draw_text(&self.items[i], params);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn letters(n: usize) -> ComboBox {
        let mut combo = ComboBox::new("letters");
        for i in 0..n {
            combo.add_item(&((b'a' + i as u8) as char).to_string());
        }
        combo
    }

    fn step(gui: &mut Gui, x: i32, y: i32, press: bool) {
        gui.input_mut().mousemove(x, y);
        if press {
            gui.input_mut().mousedown(x, y, MouseButton::LEFT);
            gui.input_mut().mouseup(x, y, MouseButton::LEFT);
        }
        gui.update();
    }

    #[test]
    fn removal_shifts_selection() {
        let mut combo = letters(3);
        combo.set_selected(2).unwrap();
        combo.remove_item(1).unwrap();
        assert_eq!(combo.selected(), Some(1));
        assert_eq!(combo.item_text(1), Some("c"));
        combo.remove_item(1).unwrap();
        assert_eq!(combo.selected(), Some(0));
        combo.remove_item(0).unwrap();
        assert_eq!(combo.selected(), None);
    }

    #[test]
    fn out_of_range_calls_fail() {
        let mut combo = letters(2);
        assert_eq!(combo.set_selected(2), Err(WidgetError::ItemOutOfRange { index: 2, len: 2 }));
        assert!(combo.remove_item(7).is_err());
        assert_eq!(combo.selected(), Some(0));
        assert_eq!(combo.items().len(), 2);
    }

    #[test]
    fn open_scroll_and_pick() {
        let mut gui = Gui::default();
        let picked = Rc::new(RefCell::new(String::new()));
        let mut combo = letters(10);
        let sink = picked.clone();
        combo.on_select(move |e| *sink.borrow_mut() = e.s_value.clone());
        let h = gui.add_widget(combo);
        let combo = |gui: &Gui| -> (ComboState, usize, Option<usize>) {
            let c = gui.widget(h).unwrap().as_combo_box().unwrap();
            (c.combo_state(), c.first_visible(), c.selected())
        };

        step(&mut gui, 10, 10, false);
        step(&mut gui, 10, 10, true);
        assert_eq!(gui.active_widget(), Some(h));
        step(&mut gui, 10, 10, false);
        assert_eq!(combo(&gui).0, ComboState::Hover);

        // scrolling towards the user moves the list down, clamped to len - max_visible
        gui.input_mut().scroll(0, -5);
        step(&mut gui, 10, 10, false);
        assert_eq!(combo(&gui).1, 2);
        gui.input_mut().scroll(0, 3);
        step(&mut gui, 10, 10, false);
        assert_eq!(combo(&gui).1, 0);

        // second row sits one box height plus one pixel below the first
        step(&mut gui, 10, 50, true);
        assert_eq!(combo(&gui), (ComboState::Selecting, 0, Some(1)));
        assert_eq!(*picked.borrow(), "b");
        step(&mut gui, 10, 50, false);
        assert_eq!(gui.active_widget(), None);
        step(&mut gui, 10, 50, false);
        assert_eq!(combo(&gui).0, ComboState::Inactive);
    }

    #[test]
    fn first_item_is_selected_until_cleared() {
        let mut combo = ComboBox::new("modes");
        assert_eq!(combo.selected(), None);
        combo.add_item("fill");
        combo.add_item("wire");
        assert_eq!(combo.selected(), Some(0));
        combo.clear_items();
        assert_eq!(combo.selected(), None);
        combo.add_item("points");
        assert_eq!(combo.selected(), Some(0));
    }

    #[test]
    fn click_outside_closes_without_selection() {
        let mut gui = Gui::default();
        let h = gui.add_widget(letters(3));
        step(&mut gui, 10, 10, false);
        step(&mut gui, 10, 10, true);
        step(&mut gui, 10, 10, false);
        step(&mut gui, 500, 500, true);
        step(&mut gui, 500, 500, false);
        step(&mut gui, 500, 500, false);
        let c = gui.widget(h).unwrap().as_combo_box().unwrap();
        assert_eq!(c.selected(), Some(0));
        assert_eq!(c.response(), WidgetResponse::NONE);
        assert_eq!(c.combo_state(), ComboState::Inactive);
        assert_eq!(gui.active_widget(), None);
    }
}
