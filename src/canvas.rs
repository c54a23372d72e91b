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
use std::collections::HashMap;

#[derive(Default, Copy, Clone)]
#[repr(C)]
/// Vertex of a custom primitive batch.
pub struct ColorVertex {
    pos: Vec2f,
    color: Vec4f,
}

impl ColorVertex {
    /// Creates a vertex with a local position and a normalized color.
    pub fn new(pos: Vec2f, color: Vec4f) -> Self { Self { pos, color } }

    /// Returns the position local to the batch transform.
    pub fn position(&self) -> Vec2f { self.pos }

    /// Returns the vertex color.
    pub fn color(&self) -> Vec4f { self.color }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// Handle to a vertex buffer owned by the renderer.
pub struct BufferId(u32);

impl BufferId {
    /// Wraps a raw buffer number.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Update policy of a vertex buffer.
pub enum BufferUsage {
    /// Contents may be replaced after creation.
    Dynamic,
    /// Contents are fixed at creation.
    Immutable,
}

#[derive(Clone, Copy)]
struct BufferInfo {
    usage: BufferUsage,
    len: usize,
}

/// Replays recorded draw lists on a renderer and owns the vertex buffers created through it.
pub struct Canvas<R: Renderer> {
    current_dim: Dimensioni,
    renderer: RendererHandle<R>,
    next_buffer_id: u32,
    buffers: HashMap<BufferId, BufferInfo>,
}

impl<R: Renderer> Canvas<R> {
    /// Creates a canvas around the provided renderer handle.
    pub fn from(renderer: RendererHandle<R>, dim: Dimensioni) -> Self {
        Self {
            current_dim: dim,
            renderer,
            next_buffer_id: 1,
            buffers: HashMap::new(),
        }
    }

    /// Begins a new drawing pass.
    pub fn begin(&mut self, width: i32, height: i32, clr: Color) {
        self.current_dim = Dimensioni::new(width, height);
        self.renderer.scope_mut(move |r| r.begin(width, height, clr));
    }

    /// Ends the current drawing pass.
    pub fn end(&mut self) { self.renderer.scope_mut(|r| r.end()) }

    /// Returns the last viewport dimensions passed to [`Canvas::begin`].
    pub fn current_dimension(&self) -> Dimensioni { self.current_dim }

    /// Returns a clone of the underlying renderer handle.
    pub fn renderer_handle(&self) -> RendererHandle<R> { self.renderer.clone() }

    /// Number of vertices in a live buffer.
    pub fn buffer_len(&self, id: BufferId) -> Option<usize> { self.buffers.get(&id).map(|b| b.len) }

    /// Replays a draw list in order; commands naming unknown buffers are skipped.
    pub fn submit(&mut self, commands: &[Command]) {
        let buffers = &self.buffers;
        self.renderer.scope_mut(|r| {
            for cmd in commands {
                match cmd {
                    Command::Scissor { rect } => r.set_scissor(*rect),
                    Command::Rect { rect, color } => r.draw_rect(*rect, *color),
                    Command::Text { text, params } => r.draw_text(text, params),
                    Command::Primitives { buffer, transform, tint } => {
                        if buffers.contains_key(buffer) {
                            r.draw_primitives(*buffer, transform, *tint)
                        }
                    }
                }
            }
        })
    }

    /// Destroys a buffer allocated through [`ResourceFactory::create_vertex_buffer`].
    pub fn free_buffer(&mut self, id: BufferId) {
        if self.buffers.remove(&id).is_some() {
            self.renderer.scope_mut(|r| r.destroy_vertex_buffer(id));
        }
    }
}

impl<R: Renderer> ResourceFactory for Canvas<R> {
    fn create_vertex_buffer(&mut self, vertices: &[ColorVertex], usage: BufferUsage) -> BufferId {
        let id = BufferId(self.next_buffer_id);
        self.next_buffer_id += 1;
        self.buffers.insert(id, BufferInfo { usage, len: vertices.len() });
        self.renderer.scope_mut(|r| r.create_vertex_buffer(id, vertices, usage));
        id
    }

    fn update_vertex_buffer(&mut self, id: BufferId, vertices: &[ColorVertex]) {
        match self.buffers.get_mut(&id) {
            Some(info) if info.usage == BufferUsage::Dynamic => {
                info.len = vertices.len();
                self.renderer.scope_mut(|r| r.update_vertex_buffer(id, vertices));
            }
            Some(_) => log::debug!("ignoring update of immutable buffer {:?}", id),
            None => log::debug!("ignoring update of unknown buffer {:?}", id),
        }
    }
}

impl<R: Renderer> Drop for Canvas<R> {
    fn drop(&mut self) {
        let ids: Vec<_> = self.buffers.keys().copied().collect();
        self.renderer.scope_mut(|r| {
            for id in &ids {
                r.destroy_vertex_buffer(*id);
            }
        });
        self.buffers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        rects: usize,
        texts: Vec<String>,
        scissors: Vec<Option<ScissorRect>>,
        created: Vec<BufferId>,
        updated: Vec<BufferId>,
        destroyed: Vec<BufferId>,
        primitives: Vec<BufferId>,
    }

    impl Renderer for RecordingRenderer {
        fn begin(&mut self, _width: i32, _height: i32, _clr: Color) {}
        fn set_scissor(&mut self, rect: Option<ScissorRect>) { self.scissors.push(rect); }
        fn draw_rect(&mut self, _rect: Rectf, _color: Color) { self.rects += 1; }
        fn draw_text(&mut self, text: &str, _params: &TextParams) { self.texts.push(text.to_string()); }
        fn create_vertex_buffer(&mut self, id: BufferId, _vertices: &[ColorVertex], _usage: BufferUsage) { self.created.push(id); }
        fn update_vertex_buffer(&mut self, id: BufferId, _vertices: &[ColorVertex]) { self.updated.push(id); }
        fn destroy_vertex_buffer(&mut self, id: BufferId) { self.destroyed.push(id); }
        fn draw_primitives(&mut self, id: BufferId, _transform: &PrimitiveTransform, _tint: Color) { self.primitives.push(id); }
        fn end(&mut self) {}
    }

    fn quad() -> Vec<ColorVertex> { vec![ColorVertex::default(); 4] }

    #[test]
    fn buffer_ids_are_sequential_and_freed_on_drop() {
        let handle = RendererHandle::new(RecordingRenderer::default());
        {
            let mut canvas = Canvas::from(handle.clone(), Dimensioni::new(100, 100));
            let a = canvas.create_vertex_buffer(&quad(), BufferUsage::Immutable);
            let b = canvas.create_vertex_buffer(&quad(), BufferUsage::Dynamic);
            assert_eq!((a.raw(), b.raw()), (1, 2));
            assert_eq!(canvas.buffer_len(b), Some(4));
        }
        handle.scope(|r| {
            assert_eq!(r.created.len(), 2);
            assert_eq!(r.destroyed.len(), 2);
        });
    }

    #[test]
    fn immutable_buffers_reject_updates() {
        let handle = RendererHandle::new(RecordingRenderer::default());
        let mut canvas = Canvas::from(handle.clone(), Dimensioni::new(100, 100));
        let fixed = canvas.create_vertex_buffer(&quad(), BufferUsage::Immutable);
        let dynamic = canvas.create_vertex_buffer(&quad(), BufferUsage::Dynamic);
        canvas.update_vertex_buffer(fixed, &quad());
        canvas.update_vertex_buffer(dynamic, &quad()[..3]);
        assert_eq!(canvas.buffer_len(dynamic), Some(3));
        handle.scope(|r| assert_eq!(r.updated, vec![dynamic]));
    }

    #[test]
    fn submit_replays_in_order_and_skips_stale_buffers() {
        let handle = RendererHandle::new(RecordingRenderer::default());
        let mut canvas = Canvas::from(handle.clone(), Dimensioni::new(100, 100));
        let live = canvas.create_vertex_buffer(&quad(), BufferUsage::Immutable);
        let commands = vec![
            Command::Scissor { rect: Some(ScissorRect::new(0, 0, 10, 10)) },
            Command::Rect { rect: rectf(0.0, 0.0, 1.0, 1.0), color: Color::WHITE },
            Command::Text {
                text: "hi".to_string(),
                params: TextParams {
                    pos: Vec2f::default(),
                    h_align: HAlign::Left,
                    v_align: VAlign::Top,
                    color: Color::WHITE,
                    shadow: Color::BLACK,
                    clip: None,
                },
            },
            Command::Primitives { buffer: live, transform: PrimitiveTransform::at(Vec2f::default()), tint: Color::WHITE },
            Command::Primitives { buffer: BufferId::new(99), transform: PrimitiveTransform::at(Vec2f::default()), tint: Color::WHITE },
            Command::Scissor { rect: None },
        ];
        canvas.submit(&commands);
        handle.scope(|r| {
            assert_eq!(r.rects, 1);
            assert_eq!(r.texts, vec!["hi".to_string()]);
            assert_eq!(r.scissors, vec![Some(ScissorRect::new(0, 0, 10, 10)), None]);
            assert_eq!(r.primitives, vec![live]);
        });
    }
}
