use glam::Vec2;

/// Drawable area of a canvas in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width as f32 && p.y < self.height as f32
    }

    /// Pull a point onto the last addressable pixel when it falls outside.
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let max_x = (self.width as f32 - 1.0).max(0.0);
        let max_y = (self.height as f32 - 1.0).max(0.0);
        Vec2::new(p.x.clamp(0.0, max_x), p.y.clamp(0.0, max_y))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// Where the logo sits on the intro surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Placement {
    /// Fit an image of `natural` size at `target_width`, keeping its aspect
    /// ratio, centred so that the logo plus `caption_gap` below it is centred
    /// vertically. Origin and size are whole pixels and the rectangle never
    /// leaves the surface.
    pub fn for_logo(
        surface: SurfaceSize,
        natural: (u32, u32),
        target_width: f32,
        caption_gap: f32,
    ) -> Option<Self> {
        let (nw, nh) = natural;
        if surface.is_empty() || nw == 0 || nh == 0 || target_width <= 0.0 {
            return None;
        }
        let sw = surface.width as f32;
        let sh = surface.height as f32;
        let aspect = nh as f32 / nw as f32;

        let mut width = target_width.min(sw);
        let mut height = width * aspect;
        if height > sh {
            height = sh;
            width = height / aspect;
        }
        let width = width.floor().max(1.0);
        let height = height.floor().max(1.0);

        let x = ((sw - width) * 0.5).floor().max(0.0);
        let y = ((sh - height - caption_gap) * 0.5)
            .floor()
            .clamp(0.0, (sh - height).max(0.0));
        Some(Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        })
    }

    #[inline]
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.size.x.max(0.0) as u32, self.size.y.max(0.0) as u32)
    }

    #[inline]
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y)
    }
}
