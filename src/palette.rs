// Copyright (c) 2026 glyphfall contributors

use crossterm::style::Color;

use crate::runtime::{ColorMode, ColorScheme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Move one fade step toward `to`. Channels with a remaining delta always
    /// move by at least 1, so repeated steps converge instead of stalling on
    /// rounding.
    pub fn toward(self, to: Rgb, alpha: f32) -> Rgb {
        fn step(a: u8, b: u8, alpha: f32) -> u8 {
            let d = (b as i32) - (a as i32);
            if d == 0 {
                return a;
            }
            let mut n = ((d.abs() as f32) * alpha).round() as i32;
            if n == 0 {
                n = 1;
            }
            (a as i32 + n * d.signum()) as u8
        }
        Rgb {
            r: step(self.r, to.r, alpha),
            g: step(self.g, to.g, alpha),
            b: step(self.b, to.b, alpha),
        }
    }

    pub fn near(self, other: Rgb, tolerance: u8) -> bool {
        let d = |a: u8, b: u8| (a as i32 - b as i32).unsigned_abs();
        d(self.r, other.r) <= tolerance as u32
            && d(self.g, other.g) <= tolerance as u32
            && d(self.b, other.b) <= tolerance as u32
    }
}

/// What a stream asked to be painted with, decoupled from concrete colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorToken {
    /// Index into the palette's ordered list of normal rain shades.
    Shade(u8),
    /// The fixed hidden-message reveal color.
    Message,
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub shades: Vec<Rgb>,
    pub message: Rgb,
    pub bg: Rgb,
}

const SHADE_STEPS: usize = 4;

impl Palette {
    pub fn new(scheme: ColorScheme) -> Self {
        let (stops, message): (&[(u8, u8, u8)], (u8, u8, u8)) = match scheme {
            ColorScheme::Green => (
                &[(0x00, 0x44, 0x11), (0x00, 0x88, 0x22), (0x00, 0xff, 0x41)],
                (0xd0, 0xff, 0xd8),
            ),
            ColorScheme::Cyan => (
                &[(0x00, 0x3c, 0x46), (0x00, 0x96, 0xa0), (0x00, 0xe6, 0xf0)],
                (0xdc, 0xff, 0xff),
            ),
            ColorScheme::Amber => (
                &[(0x50, 0x32, 0x00), (0xb4, 0x78, 0x00), (0xff, 0xb4, 0x00)],
                (0xff, 0xf0, 0xc8),
            ),
            ColorScheme::Purple => (
                &[(0x3c, 0x00, 0x5a), (0x8c, 0x28, 0xbe), (0xd2, 0x78, 0xff)],
                (0xf0, 0xdc, 0xff),
            ),
            ColorScheme::Red => (
                &[(0x50, 0x00, 0x00), (0xaa, 0x14, 0x14), (0xff, 0x3c, 0x3c)],
                (0xff, 0xdc, 0xdc),
            ),
            ColorScheme::Snow => (
                &[(0x5a, 0x5a, 0x64), (0xaa, 0xaa, 0xb4), (0xf0, 0xf0, 0xf5)],
                (0xff, 0xff, 0xff),
            ),
        };

        Self {
            shades: gradient_from_stops(stops, SHADE_STEPS),
            message: Rgb::new(message.0, message.1, message.2),
            bg: Rgb::new(0, 0, 0),
        }
    }

    pub fn shade_count(&self) -> u8 {
        self.shades.len() as u8
    }

    pub fn resolve(&self, token: ColorToken) -> Rgb {
        match token {
            ColorToken::Message => self.message,
            ColorToken::Shade(i) => {
                let last = self.shades.len().saturating_sub(1);
                self.shades[(i as usize).min(last)]
            }
        }
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

fn gradient_from_stops(stops: &[(u8, u8, u8)], steps: usize) -> Vec<Rgb> {
    if steps == 0 || stops.is_empty() {
        return Vec::new();
    }
    if stops.len() == 1 || steps == 1 {
        let (r, g, b) = stops[0];
        return vec![Rgb::new(r, g, b); steps];
    }

    let segs = stops.len() - 1;
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        let t = (i as f32) / ((steps - 1) as f32);
        let pos = t * (segs as f32);
        let seg = (pos.floor() as usize).min(segs - 1);
        let local = pos - (seg as f32);
        let (r0, g0, b0) = stops[seg];
        let (r1, g1, b1) = stops[seg + 1];
        out.push(Rgb::new(
            lerp_u8(r0, r1, local),
            lerp_u8(g0, g1, local),
            lerp_u8(b0, b1, local),
        ));
    }
    out
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cr = CUBE_LEVELS[r6 as usize];
    let cg = CUBE_LEVELS[g6 as usize];
    let cb = CUBE_LEVELS[b6 as usize];
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(r, g, b, cr, cg, cb);

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = if avg < 8 {
        16
    } else if avg > 238 {
        231
    } else {
        232 + ((avg - 8) / 10)
    };
    let (gr, gg, gb) = if gray_idx == 16 {
        (0, 0, 0)
    } else if gray_idx == 231 {
        (255, 255, 255)
    } else {
        let v = 8 + 10 * (gray_idx - 232);
        (v, v, v)
    };
    let gray_dist = dist2(r, g, b, gr, gg, gb);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

fn rgb_to_color16(r: u8, g: u8, b: u8) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::DarkGrey, (128, 128, 128)),
        (Color::Grey, (192, 192, 192)),
        (Color::White, (255, 255, 255)),
        (Color::DarkRed, (128, 0, 0)),
        (Color::Red, (255, 0, 0)),
        (Color::DarkGreen, (0, 128, 0)),
        (Color::Green, (0, 255, 0)),
        (Color::DarkBlue, (0, 0, 128)),
        (Color::Blue, (0, 0, 255)),
        (Color::DarkCyan, (0, 128, 128)),
        (Color::Cyan, (0, 255, 255)),
        (Color::DarkMagenta, (128, 0, 128)),
        (Color::Magenta, (255, 0, 255)),
        (Color::DarkYellow, (128, 128, 0)),
        (Color::Yellow, (255, 255, 0)),
    ];

    let mut best = Color::White;
    let mut best_d = i32::MAX;
    for (c, (cr, cg, cb)) in TABLE {
        let d = dist2(r, g, b, cr, cg, cb);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

pub fn to_terminal_color(rgb: Rgb, mode: ColorMode) -> Color {
    match mode {
        ColorMode::Mono => Color::Reset,
        ColorMode::TrueColor => Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        },
        ColorMode::Color256 => Color::AnsiValue(rgb_to_ansi256(rgb.r, rgb.g, rgb.b)),
        ColorMode::Color16 => rgb_to_color16(rgb.r, rgb.g, rgb.b),
    }
}
