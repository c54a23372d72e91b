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

#[derive(Default, Copy, Clone)]
/// Axis aligned box used for pointer hit testing.
pub struct Hitbox2D {
    /// Top-left corner.
    pub pos: Vec2f,
    /// Extent along both axes.
    pub size: Vec2f,
}

impl Hitbox2D {
    /// Creates a hitbox from its corner and extent.
    pub fn new(pos: Vec2f, size: Vec2f) -> Self { Self { pos, size } }

    /// Returns the 1x1 box the pointer occupies.
    pub fn pointer(pos: Vec2f) -> Self { Self { pos, size: vec2f(1.0, 1.0) } }

    /// Returns `true` when the two boxes overlap or touch.
    pub fn intersects(&self, other: &Hitbox2D) -> bool {
        !(self.pos.x + self.size.x < other.pos.x
            || self.pos.x > other.pos.x + other.size.x
            || self.pos.y + self.size.y < other.pos.y
            || self.pos.y > other.pos.y + other.size.y)
    }

    /// Returns the box as a float rectangle.
    pub fn rect(&self) -> Rectf { rectf(self.pos.x, self.pos.y, self.size.x, self.size.y) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_inside_and_on_edge() {
        let b = Hitbox2D::new(vec2f(10.0, 10.0), vec2f(100.0, 30.0));
        assert!(Hitbox2D::pointer(vec2f(50.0, 25.0)).intersects(&b));
        assert!(Hitbox2D::pointer(vec2f(110.0, 40.0)).intersects(&b));
        // the pointer box is 1x1 so it reaches one unit back
        assert!(Hitbox2D::pointer(vec2f(9.0, 9.0)).intersects(&b));
    }

    #[test]
    fn pointer_outside() {
        let b = Hitbox2D::new(vec2f(10.0, 10.0), vec2f(100.0, 30.0));
        assert!(!Hitbox2D::pointer(vec2f(8.5, 20.0)).intersects(&b));
        assert!(!Hitbox2D::pointer(vec2f(50.0, 41.0)).intersects(&b));
    }
}
