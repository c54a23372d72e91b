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
macro_rules! implement_widget {
    ($($variant:ident => $as_ref:ident, $as_mut:ident;)*) => {
        /// Every widget kind the GUI can hold, dispatched exhaustively.
        pub enum Widget {
            $(
                #[doc = concat!("A [`", stringify!($variant), "`].")]
                $variant($variant),
            )*
        }

        $(
            impl From<$variant> for Widget {
                fn from(w: $variant) -> Self { Widget::$variant(w) }
            }
        )*

        impl Widget {
            $(
                #[doc = concat!("Returns the inner [`", stringify!($variant), "`], if this is one.")]
                pub fn $as_ref(&self) -> Option<&$variant> {
                    match self {
                        Widget::$variant(w) => Some(w),
                        _ => None,
                    }
                }

                #[doc = concat!("Returns the inner [`", stringify!($variant), "`] mutably, if this is one.")]
                pub fn $as_mut(&mut self) -> Option<&mut $variant> {
                    match self {
                        Widget::$variant(w) => Some(w),
                        _ => None,
                    }
                }
            )*

            /// Shared widget state.
            pub fn base(&self) -> &WidgetBase {
                match self {
                    $(Widget::$variant(w) => w.base(),)*
                }
            }

            /// Shared widget state, mutably.
            pub fn base_mut(&mut self) -> &mut WidgetBase {
                match self {
                    $(Widget::$variant(w) => w.base_mut(),)*
                }
            }

            pub(crate) fn update(&mut self, gui: &mut Gui) {
                match self {
                    $(Widget::$variant(w) => w.update(gui),)*
                }
            }

            pub(crate) fn render(&mut self, ctx: &mut DrawCtx<'_>, pool: &mut Pool) {
                match self {
                    $(Widget::$variant(w) => w.render(ctx, pool),)*
                }
            }
        }
    };
}

mod button;
mod checkbox;
mod color_picker;
mod combo_box;
mod label;
mod slider;
mod window;

pub use button::*;
pub use checkbox::*;
pub use color_picker::*;
pub use combo_box::*;
pub use label::*;
pub use slider::*;
pub use window::*;

use crate::registry::Pool;
use crate::*;
use std::sync::atomic::{AtomicUsize, Ordering};

implement_widget! {
    Button => as_button, as_button_mut;
    Label => as_label, as_label_mut;
    Slider => as_slider, as_slider_mut;
    CheckBox => as_checkbox, as_checkbox_mut;
    ComboBox => as_combo_box, as_combo_box_mut;
    Window => as_plain_window, as_plain_window_mut;
    ColorPicker => as_color_picker, as_color_picker_mut;
}

impl Widget {
    /// Returns the window part of a window or color picker.
    pub fn as_window(&self) -> Option<&Window> {
        match self {
            Widget::Window(w) => Some(w),
            Widget::ColorPicker(p) => Some(p.window()),
            _ => None,
        }
    }

    /// Returns the window part of a window or color picker, mutably.
    pub fn as_window_mut(&mut self) -> Option<&mut Window> {
        match self {
            Widget::Window(w) => Some(w),
            Widget::ColorPicker(p) => Some(p.window_mut()),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(usize)]
/// Interaction state shared by every widget.
pub enum WidgetState {
    /// Not interacting.
    Idle = 0,
    /// The pointer hovers the widget.
    Focus = 1,
    /// The widget owns the pointer.
    Active = 2,
    /// Released by the GUI; resolves to idle on the next update.
    Deactivating = 3,
}

bitflags::bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Events a widget fired during its last update.
    pub struct WidgetResponse : u32 {
        /// Released inside the widget.
        const CLICK = 1;
        /// A drag gesture began.
        const DRAG_START = 2;
        /// The pointer moved while dragging.
        const DRAG = 4;
        /// A drag gesture ended.
        const DRAG_END = 8;
        /// The widget's value changed.
        const CHANGE = 16;
        /// Nothing happened.
        const NONE = 0;
    }
}

impl WidgetResponse {
    /// Returns `true` if a click fired.
    pub fn is_click(&self) -> bool { self.intersects(Self::CLICK) }
    /// Returns `true` if a drag step fired.
    pub fn is_drag(&self) -> bool { self.intersects(Self::DRAG) }
    /// Returns `true` if the value changed.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if nothing fired.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

#[derive(Clone, Default)]
/// Payload handed to event callbacks. Fields a given event does not use keep their defaults.
pub struct EventArgs {
    /// Pointer position when the event fired.
    pub click_pos: Vec2f,
    /// Pointer position where the drag started.
    pub start_pos: Vec2f,
    /// Pointer movement since the previous frame.
    pub delta_pos: Vec2f,
    /// Float payload (slider value, hue angle).
    pub f_value: f32,
    /// Integer payload (truncated slider value, item index).
    pub i_value: i32,
    /// Boolean payload (check state).
    pub b_value: bool,
    /// String payload (item text).
    pub s_value: String,
    /// Color payload, normalized.
    pub color: Vec4f,
}

/// Event handler stored by widgets.
pub type Callback = Box<dyn FnMut(&EventArgs)>;

pub(crate) fn fire(callback: &mut Option<Callback>, args: &EventArgs) {
    if let Some(f) = callback.as_mut() {
        f(args);
    }
}

static WIDGET_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn resolve_name(name: &str) -> String {
    if name.is_empty() {
        format!("widget_{}", WIDGET_COUNTER.fetch_add(1, Ordering::Relaxed))
    } else {
        name.to_string()
    }
}

/// State every widget carries: identity, placement, flags, colors, texts and clipping.
pub struct WidgetBase {
    name: String,
    name_id: Id,
    pub(crate) handle: Option<WidgetHandle>,
    pub(crate) container: Option<WidgetHandle>,
    pub(crate) transform: Transform,
    enabled: bool,
    visible: bool,
    pub(crate) state: WidgetState,
    colors: [Color; 4],
    text: String,
    tooltip: String,
    script_tip: String,
    tooltip_timer: u32,
    text_color: Color,
    text_shadow_color: Color,
    pub(crate) scissor: ScissorRect,
}

impl WidgetBase {
    /// Creates the shared state; an empty `name` is replaced by `widget_<n>`.
    /// The display text starts out equal to the name.
    pub fn new(name: &str, size: Vec2f) -> Self {
        let name = resolve_name(name);
        Self {
            name_id: Id::from_str(&name),
            text: name.clone(),
            name,
            handle: None,
            container: None,
            transform: Transform::new(Vec2f::default(), size),
            enabled: true,
            visible: true,
            state: WidgetState::Idle,
            colors: [Color::MARKER, Color::GRAY, Color::WHITE, Color::GRAY],
            tooltip: String::new(),
            script_tip: String::new(),
            tooltip_timer: 0,
            text_color: Color::WHITE,
            text_shadow_color: Color::BLACK,
            scissor: ScissorRect::default(),
        }
    }

    /// Unique name of the widget.
    pub fn name(&self) -> &str { &self.name }

    /// Hash of the name, used for fast lookups.
    pub fn name_id(&self) -> Id { self.name_id }

    /// Registry handle, once the widget is added to a GUI.
    pub fn handle(&self) -> Option<WidgetHandle> { self.handle }

    /// Window this widget lives in, if any.
    pub fn container(&self) -> Option<WidgetHandle> { self.container }

    /// Display text.
    pub fn text(&self) -> &str { &self.text }

    /// Replaces the display text.
    pub fn set_text(&mut self, value: &str) { self.text = value.to_string(); }

    /// Tooltip shown after hovering.
    pub fn tooltip(&self) -> &str { &self.tooltip }

    /// Replaces the tooltip.
    pub fn set_tooltip(&mut self, value: &str) { self.tooltip = value.to_string(); }

    /// Secondary line shown faded under the tooltip.
    pub fn script_tip(&self) -> &str { &self.script_tip }

    /// Replaces the secondary tooltip line.
    pub fn set_script_tip(&mut self, value: &str) { self.script_tip = value.to_string(); }

    /// Resolved top-left corner.
    pub fn pos(&self) -> Vec2f { self.transform.translation() }

    /// Resolved size.
    pub fn size(&self) -> Vec2f { self.transform.scale() }

    /// Moves the widget; inside a window the position is relative to the window.
    pub fn set_pos(&mut self, value: Vec2f) { self.transform.set_translation(value); }

    /// Resizes the widget.
    pub fn set_size(&mut self, value: Vec2f) { self.transform.set_scale(value); }

    /// Placement of the widget.
    pub fn transform(&self) -> &Transform { &self.transform }

    /// Current interaction state.
    pub fn state(&self) -> WidgetState { self.state }

    /// Effective interactivity: enabled and visible.
    pub fn is_enabled(&self) -> bool { self.enabled && self.visible }

    /// Visibility flag.
    pub fn is_visible(&self) -> bool { self.visible }

    /// Sets this widget's own enabled flag. Use [`Gui::set_enabled`] to cascade into windows.
    pub fn set_enabled(&mut self, value: bool) { self.enabled = value; }

    /// Sets this widget's own visible flag. Use [`Gui::set_visible`] to cascade into windows.
    pub fn set_visible(&mut self, value: bool) { self.visible = value; }

    /// Color for the current state, dimmed halfway to transparent when disabled.
    pub fn color(&self) -> Color {
        let c = self.colors[self.state as usize];
        if self.is_enabled() { c } else { Color::lerp(Color::TRANSPARENT, c, 0.5) }
    }

    /// Color configured for `state`.
    pub fn state_color(&self, state: WidgetState) -> Color { self.colors[state as usize] }

    /// Sets the color of one state, or of every state when `state` is `None`.
    pub fn set_color(&mut self, color: Color, state: Option<WidgetState>) {
        match state {
            Some(s) => self.colors[s as usize] = color,
            None => self.colors = [color; 4],
        }
    }

    /// Text color.
    pub fn text_color(&self) -> Color { self.text_color }

    /// Replaces the text color.
    pub fn set_text_color(&mut self, value: Color) { self.text_color = value; }

    /// Text shadow color.
    pub fn text_shadow_color(&self) -> Color { self.text_shadow_color }

    /// Replaces the text shadow color.
    pub fn set_text_shadow_color(&mut self, value: Color) { self.text_shadow_color = value; }

    /// Current clip rectangle.
    pub fn scissor_rect(&self) -> ScissorRect { self.scissor }

    /// Sets the clip rectangle, pulled one pixel inwards on every positive edge.
    pub fn set_scissor_rect(&mut self, rect: ScissorRect) { self.scissor = rect.shrunk(); }

    /// Consecutive focus frames with a tooltip set.
    pub fn tooltip_timer(&self) -> u32 { self.tooltip_timer }

    /// Returns `true` once the tooltip waited longer than the style's delay.
    pub fn is_tooltip_shown(&self, style: &Style) -> bool { self.tooltip_timer > style.tooltip_delay }

    /// Bookkeeping every widget runs first in its update.
    pub(crate) fn update_lifecycle(&mut self) {
        if self.state == WidgetState::Focus && !self.tooltip.is_empty() {
            self.tooltip_timer += 1;
        } else {
            self.tooltip_timer = 0;
        }
        // attached transforms are resolved by their window
        if !self.transform.has_parent() {
            self.transform.update_transform();
        }
    }

    pub(crate) fn hitbox(&self) -> Hitbox2D { Hitbox2D::new(self.pos(), self.size()) }

    pub(crate) fn bounds(&self) -> Rectf {
        let (p, s) = (self.pos(), self.size());
        rectf(p.x, p.y, s.x, s.y)
    }

    pub(crate) fn bounds_scissor(&self) -> ScissorRect { ScissorRect::from_bounds(self.pos(), self.size()) }

    pub(crate) fn text_params(&self, pos: Vec2f, h_align: HAlign, v_align: VAlign, clip: Option<ScissorRect>) -> TextParams {
        TextParams {
            pos,
            h_align,
            v_align,
            color: self.text_color,
            shadow: self.text_shadow_color,
            clip,
        }
    }

    /// Restores the clip state a widget starts drawing with: its window's region, or none.
    pub(crate) fn begin_render(&self, ctx: &mut DrawCtx<'_>) {
        match self.container {
            Some(_) => ctx.set_scissor(self.scissor),
            None => ctx.clear_scissor(),
        }
    }

    /// Clip applied to secondary texts: the widget's scissor when it lives in a window.
    pub(crate) fn container_clip(&self) -> Option<ScissorRect> { self.container.map(|_| self.scissor) }

    pub(crate) fn render_tooltip(&self, ctx: &mut DrawCtx<'_>) {
        let style = *ctx.style();
        if !self.is_tooltip_shown(&style) {
            return;
        }
        let mut pos = ctx.pointer();
        if pos.y > ctx.screen_height() * style.tooltip_flip_threshold {
            pos.y -= style.tooltip_offset_above;
        } else {
            pos.y += style.tooltip_offset_below;
        }
        let full = if self.script_tip.is_empty() { self.tooltip.clone() } else { format!("{}\n{}", self.tooltip, self.script_tip) };
        let extent = ctx.text_size(&full);
        let border = style.tooltip_border;
        let (width, height) = (extent.x + border * 2.0, extent.y + border * 2.0);
        ctx.clear_scissor();
        ctx.draw_rect(rectf(pos.x - border, pos.y - border, width, height), style.tooltip_background);
        let mut params = TextParams {
            pos,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
            color: style.tooltip_text,
            shadow: Color::TRANSPARENT,
            clip: None,
        };
        ctx.draw_text(&self.tooltip, params.clone());
        if !self.script_tip.is_empty() {
            params.pos.y += (height / 2.0).trunc();
            params.color = style.tooltip_script_text;
            ctx.draw_text(&self.script_tip, params);
        }
    }
}
