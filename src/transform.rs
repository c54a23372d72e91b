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
use crate::*;

#[derive(Copy, Clone)]
/// 2D placement of a widget: a local translation and size, plus the resolved world values.
///
/// A root transform resolves against the screen origin. A transform attached to a parent
/// treats its local translation as an offset from the parent's world translation and is
/// resolved by the parent, never on its own. Sizes are not inherited.
pub struct Transform {
    translation_local: Vec2f,
    scale_local: Vec2f,
    translation: Vec2f,
    scale: Vec2f,
    parent: Option<Vec2f>,
}

impl Default for Transform {
    fn default() -> Self { Self::new(Vec2f::default(), vec2f(1.0, 1.0)) }
}

impl Transform {
    /// Creates a root transform at `translation` with the given size.
    pub fn new(translation: Vec2f, scale: Vec2f) -> Self {
        Self {
            translation_local: translation,
            scale_local: scale,
            translation,
            scale,
            parent: None,
        }
    }

    /// Resolved top-left corner in screen space.
    pub fn translation(&self) -> Vec2f { self.translation }

    /// Resolved size.
    pub fn scale(&self) -> Vec2f { self.scale }

    /// Local translation (an offset from the parent when attached).
    pub fn local_translation(&self) -> Vec2f { self.translation_local }

    /// Local size.
    pub fn local_scale(&self) -> Vec2f { self.scale_local }

    /// Returns `true` when a parent resolves this transform.
    pub fn has_parent(&self) -> bool { self.parent.is_some() }

    /// Moves the transform to a new local translation.
    pub fn set_translation(&mut self, value: Vec2f) {
        self.translation_local = value;
        self.update_transform();
    }

    /// Shifts the local translation by `delta`.
    pub fn translate(&mut self, delta: Vec2f) {
        self.translation_local = self.translation_local + delta;
        self.update_transform();
    }

    /// Replaces the local size.
    pub fn set_scale(&mut self, value: Vec2f) {
        self.scale_local = value;
        self.update_transform();
    }

    /// Recomputes the world values from the local ones and the cached parent translation.
    pub fn update_transform(&mut self) {
        let origin = self.parent.unwrap_or_default();
        self.translation = origin + self.translation_local;
        self.scale = self.scale_local;
    }

    /// Resolves this transform below a parent positioned at `parent_translation`.
    pub fn update_transform_parented(&mut self, parent_translation: Vec2f) {
        self.parent = Some(parent_translation);
        self.update_transform();
    }

    /// Attaches to a parent; the local translation becomes an offset from it.
    pub fn attach_to(&mut self, parent_translation: Vec2f) { self.update_transform_parented(parent_translation); }

    /// Detaches from the parent while keeping the current world placement.
    pub fn detach(&mut self) {
        self.translation_local = self.translation;
        self.parent = None;
        self.update_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_offsets_from_parent() {
        let mut t = Transform::new(vec2f(20.0, 0.0), vec2f(10.0, 10.0));
        t.attach_to(vec2f(100.0, 50.0));
        assert_eq!((t.translation().x, t.translation().y), (120.0, 50.0));
        t.update_transform_parented(vec2f(110.0, 60.0));
        assert_eq!((t.translation().x, t.translation().y), (130.0, 60.0));
        assert_eq!(t.scale().x, 10.0);
    }

    #[test]
    fn detach_keeps_world_placement() {
        let mut t = Transform::new(vec2f(5.0, 5.0), vec2f(1.0, 1.0));
        t.attach_to(vec2f(10.0, 10.0));
        t.detach();
        assert!(!t.has_parent());
        assert_eq!((t.local_translation().x, t.translation().y), (15.0, 15.0));
    }
}
