use palette::{IntoColor, Oklch, Srgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

impl Color {
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Self::Rgb { r, g, b } => Rgb::new(r, g, b),
            Self::Oklch { l, c, h } => {
                let srgb: Srgb = Oklch::new(l, c, h).into_color();
                let (r, g, b) = srgb.into_format::<u8>().into_components();
                Rgb::new(r, g, b)
            }
        }
    }

    /// Lightness, chroma and hue (degrees).
    pub fn to_oklch(&self) -> (f32, f32, f32) {
        match *self {
            Self::Oklch { l, c, h } => (l, c, h),
            Self::Rgb { r, g, b } => {
                let srgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
                let oklch: Oklch = srgb.into_color();
                (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
            }
        }
    }

    /// Interpolate toward `to` in OKLCH space, taking the short way around the hue circle.
    pub fn lerp(&self, to: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let (from_l, from_c, from_h) = self.to_oklch();
        let (to_l, to_c, to_h) = to.to_oklch();

        let l = from_l + (to_l - from_l) * t;
        let c = from_c + (to_c - from_c) * t;

        let mut dh = to_h - from_h;
        if dh > 180.0 {
            dh -= 360.0;
        } else if dh < -180.0 {
            dh += 360.0;
        }
        let h = (from_h + dh * t).rem_euclid(360.0);

        Color::oklch(l, c, h)
    }
}
