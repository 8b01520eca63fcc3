use std::time::Duration;

/// Pointer-driven 3D tilt of a card, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl Tilt {
    pub const FLAT: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Tilt toward a pointer at `(px, py)` inside a rect at `(left, top)` sized `width x height`.
    pub fn toward(
        (left, top): (f32, f32),
        (width, height): (f32, f32),
        (px, py): (f32, f32),
        max_deg: f32,
    ) -> Tilt {
        if width <= 0.0 || height <= 0.0 {
            return Tilt::FLAT;
        }
        let x = ((px - left) / width).clamp(0.0, 1.0);
        let y = ((py - top) / height).clamp(0.0, 1.0);
        Tilt {
            rotate_x: (0.5 - y) * max_deg,
            rotate_y: (x - 0.5) * max_deg,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.rotate_x.abs() < 0.01 && self.rotate_y.abs() < 0.01
    }
}

/// Eases the rendered tilt toward the pointer target each frame.
#[derive(Debug, Clone)]
pub struct TiltTracker {
    current: Tilt,
    target: Tilt,
    /// Fraction of the remaining distance closed per second
    rate: f32,
    max_deg: f32,
}

impl TiltTracker {
    pub fn new(max_deg: f32) -> Self {
        Self {
            current: Tilt::FLAT,
            target: Tilt::FLAT,
            rate: 12.0,
            max_deg,
        }
    }

    pub fn current(&self) -> Tilt {
        self.current
    }

    pub fn point(&mut self, origin: (f32, f32), size: (f32, f32), pointer: (f32, f32)) {
        self.target = Tilt::toward(origin, size, pointer, self.max_deg);
    }

    pub fn leave(&mut self) {
        self.target = Tilt::FLAT;
    }

    pub fn smooth(&mut self, dt: Duration) {
        let t = dt.as_secs_f32() * self.rate;
        if t >= 1.0 {
            self.current = self.target;
            return;
        }
        self.current.rotate_x += (self.target.rotate_x - self.current.rotate_x) * t;
        self.current.rotate_y += (self.target.rotate_y - self.current.rotate_y) * t;
    }
}
