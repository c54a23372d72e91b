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
use crate::{DrawCtx, Widget};
use std::collections::HashMap;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
/// Stable key of a widget registered with a [`crate::Gui`].
pub struct WidgetHandle(usize);

impl WidgetHandle {
    /// Returns the raw numeric value wrapped by this handle.
    pub fn raw(self) -> usize { self.0 }
}

struct PoolItem {
    // empty while the widget is checked out for update or render
    object: Option<Widget>,
    parent: Option<WidgetHandle>,
}

/// Widget arena keyed by handle, remembering registration order and parent links.
pub(crate) struct Pool {
    items: HashMap<WidgetHandle, PoolItem>,
    order: Vec<WidgetHandle>,
    next: usize,
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            items: HashMap::default(),
            order: Vec::new(),
            next: 0,
        }
    }
}

impl Pool {
    /// Allocates a handle with an empty slot; fill it with [`Pool::restore`].
    pub fn reserve(&mut self, parent: Option<WidgetHandle>) -> WidgetHandle {
        let handle = WidgetHandle(self.next);
        self.next += 1;
        self.items.insert(handle, PoolItem { object: None, parent });
        self.order.push(handle);
        handle
    }

    /// Checks a widget out of its slot.
    pub fn take(&mut self, handle: WidgetHandle) -> Option<Widget> { self.items.get_mut(&handle).and_then(|item| item.object.take()) }

    /// Puts a checked out widget back. A widget whose slot was removed meanwhile is dropped.
    pub fn restore(&mut self, handle: WidgetHandle, widget: Widget) {
        match self.items.get_mut(&handle) {
            Some(item) => {
                debug_assert!(item.object.is_none(), "slot {:?} is already occupied", handle);
                item.object = Some(widget);
            }
            None => log::debug!("dropping widget {:?} removed while checked out", handle),
        }
    }

    pub fn contains(&self, handle: WidgetHandle) -> bool { self.items.contains_key(&handle) }

    pub fn get(&self, handle: WidgetHandle) -> Option<&Widget> { self.items.get(&handle).and_then(|item| item.object.as_ref()) }

    pub fn get_mut(&mut self, handle: WidgetHandle) -> Option<&mut Widget> {
        self.items.get_mut(&handle).and_then(|item| item.object.as_mut())
    }

    /// Unregisters a handle, returning the widget if it was not checked out.
    pub fn remove(&mut self, handle: WidgetHandle) -> Option<Widget> {
        let item = self.items.remove(&handle)?;
        self.order.retain(|h| *h != handle);
        item.object
    }

    pub fn parent(&self, handle: WidgetHandle) -> Option<WidgetHandle> { self.items.get(&handle).and_then(|item| item.parent) }

    /// Every live handle in registration order.
    pub fn handles(&self) -> &[WidgetHandle] { &self.order }

    /// Handles without a parent, in registration order.
    pub fn roots(&self) -> Vec<WidgetHandle> { self.order.iter().copied().filter(|h| self.parent(*h).is_none()).collect() }

    /// Returns `true` when `handle` is `ancestor` or sits anywhere below it.
    pub fn is_within(&self, handle: WidgetHandle, ancestor: WidgetHandle) -> bool {
        let mut cursor = Some(handle);
        while let Some(h) = cursor {
            if h == ancestor {
                return true;
            }
            cursor = self.parent(h);
        }
        false
    }

    pub fn len(&self) -> usize { self.items.len() }

    /// Draws a visible widget (and, for windows, its children) into `ctx`.
    pub fn render_widget(&mut self, handle: WidgetHandle, ctx: &mut DrawCtx<'_>) {
        if let Some(mut widget) = self.take(handle) {
            if widget.base().is_visible() {
                widget.render(ctx, self);
            }
            self.restore(handle, widget);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    #[test]
    fn handles_keep_registration_order() {
        let mut pool = Pool::default();
        let a = pool.reserve(None);
        let b = pool.reserve(Some(a));
        let c = pool.reserve(None);
        assert_eq!(pool.handles(), &[a, b, c]);
        assert_eq!(pool.roots(), vec![a, c]);
        pool.remove(a);
        assert_eq!(pool.handles(), &[b, c]);
        assert!(!pool.contains(a));
    }

    #[test]
    fn take_and_restore() {
        let mut pool = Pool::default();
        let a = pool.reserve(None);
        pool.restore(a, Label::new("caption").into());
        let w = pool.take(a);
        assert!(w.is_some());
        assert!(pool.get(a).is_none());
        pool.restore(a, w.unwrap());
        assert!(pool.get(a).is_some());
    }

    #[test]
    fn restore_after_remove_drops_widget() {
        let mut pool = Pool::default();
        let a = pool.reserve(None);
        pool.restore(a, Label::new("x").into());
        let w = pool.take(a).unwrap();
        pool.remove(a);
        pool.restore(a, w);
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn subtree_membership() {
        let mut pool = Pool::default();
        let window = pool.reserve(None);
        let child = pool.reserve(Some(window));
        let grandchild = pool.reserve(Some(child));
        let other = pool.reserve(None);
        assert!(pool.is_within(grandchild, window));
        assert!(pool.is_within(window, window));
        assert!(!pool.is_within(other, window));
    }
}
