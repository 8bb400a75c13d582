// Copyright (c) 2026 glyphfall contributors

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::alphabet::GlyphSource;
use crate::palette::Palette;
use crate::runtime::ColorScheme;
use crate::stream::Stream;
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct FieldOptions {
    pub scheme: ColorScheme,
    pub message: String,
    /// Per-tick chance a falling stream starts typing the message, 0..1.
    pub message_start_pct: f32,
    /// Per-tick chance an off-screen stream restarts at the top, 0..1.
    pub reset_pct: f32,
    /// Background overpaint strength per render, 0..1.
    pub fade_alpha: f32,
    pub ascii_only: bool,
    /// Fixed seed for reproducible rain; seeded from the OS otherwise.
    pub seed: Option<u64>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            scheme: ColorScheme::Green,
            message: "WAKE UP, NEO".to_string(),
            message_start_pct: 0.008,
            reset_pct: 0.025,
            fade_alpha: 0.06,
            ascii_only: false,
            seed: None,
        }
    }
}

/// The whole rain: one stream per column plus everything the streams
/// consult while ticking. `tick()` and `render()` are the only entry
/// points; the scheduler calls them in that order.
pub struct RainField {
    cols: u16,
    rows: u16,
    cell: u16,
    streams: Vec<Stream>,
    glyphs: GlyphSource,
    palette: Palette,
    message: Vec<char>,
    message_start_pct: f32,
    reset_pct: f32,
    fade_alpha: f32,
    rng: StdRng,
}

impl RainField {
    /// Builds the field for a surface of `width` x `height` units with the
    /// given cell size. A zero cell size or a surface smaller than one cell
    /// yields an empty field that ticks and renders as a no-op.
    pub fn new(width: u16, height: u16, cell: u16, opts: FieldOptions) -> Self {
        let (cols, rows) = if cell == 0 {
            (0, 0)
        } else {
            (width / cell, height / cell)
        };

        let mut rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let glyphs = GlyphSource::new(opts.ascii_only);

        // Stagger the starting rows so the first frames are not one
        // synchronized curtain.
        let streams = (0..cols)
            .map(|col| {
                let start = if rows > 0 { rng.random_range(0..rows) } else { 0 };
                Stream::new(col, start, glyphs.next(&mut rng))
            })
            .collect();

        Self {
            cols,
            rows,
            cell,
            streams,
            glyphs,
            palette: Palette::new(opts.scheme),
            message: opts.message.chars().collect(),
            message_start_pct: opts.message_start_pct,
            reset_pct: opts.reset_pct,
            fade_alpha: opts.fade_alpha,
            rng,
        }
    }

    #[allow(dead_code)]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[allow(dead_code)]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[allow(dead_code)]
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// One logical step: every stream falls one cell (or resets) and picks
    /// the glyph and color it will show until the next tick. Glyph
    /// selection lives here rather than in `render` so that rendering stays
    /// read-only and one tick reveals at most one message character.
    pub fn tick(&mut self) {
        if self.rows == 0 {
            return;
        }
        let shade_count = self.palette.shade_count();
        for stream in &mut self.streams {
            stream.advance(self.rows, self.reset_pct, &mut self.rng);
            stream.next_glyph(
                &self.message,
                self.message_start_pct,
                shade_count,
                &self.glyphs,
                &mut self.rng,
            );
        }
    }

    /// Draws the current state: a translucent background pass that dims
    /// earlier glyphs, then one glyph per stream at its quantized cell
    /// position. Mutates nothing; calling it twice paints the same glyphs
    /// (only the trail fades further).
    pub fn render<S: Surface>(&self, surface: &mut S) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        surface.fade(self.fade_alpha);
        for stream in &self.streams {
            let (ch, tone) = stream.glyph();
            surface.put(
                stream.col() * self.cell,
                stream.row().saturating_mul(self.cell),
                ch,
                self.palette.resolve(tone),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::palette::Rgb;
    use crate::surface::Frame;

    use super::*;

    fn opts(seed: u64) -> FieldOptions {
        FieldOptions {
            seed: Some(seed),
            ..FieldOptions::default()
        }
    }

    #[test]
    fn column_count_is_floor_of_width_over_cell() {
        let f = RainField::new(160, 80, 16, opts(1));
        assert_eq!(f.cols(), 10);
        assert_eq!(f.rows(), 5);

        let f = RainField::new(165, 83, 16, opts(1));
        assert_eq!(f.cols(), 10);
        assert_eq!(f.rows(), 5);
    }

    #[test]
    fn initial_positions_are_staggered_within_the_rows() {
        let f = RainField::new(200, 50, 1, opts(2));
        assert_eq!(f.streams().len(), 200);
        for s in f.streams() {
            assert!(s.pos() >= 0.0);
            assert!(s.pos() < f.rows() as f32);
        }
    }

    #[test]
    fn thousand_ticks_without_resets_advance_each_stream_exactly() {
        let mut o = opts(3);
        o.reset_pct = 0.0;
        o.message_start_pct = 0.0;
        let mut f = RainField::new(160, 160, 16, o);

        let initial: Vec<f32> = f.streams().iter().map(|s| s.pos()).collect();
        for _ in 0..1000 {
            f.tick();
        }
        for (s, start) in f.streams().iter().zip(initial) {
            assert_eq!(s.pos(), start + 1000.0);
        }
    }

    #[test]
    fn degenerate_geometry_is_a_permanent_noop() {
        for (w, h, cell) in [(0, 24, 1), (80, 0, 1), (80, 24, 0), (3, 3, 16)] {
            let mut f = RainField::new(w, h, cell, opts(4));
            assert_eq!(f.streams().len(), f.cols() as usize);
            let mut frame = Frame::new(w, h, f.palette().bg);
            for _ in 0..10 {
                f.tick();
                f.render(&mut frame);
            }
        }
    }

    #[test]
    fn render_never_mutates_field_state() {
        let mut f = RainField::new(40, 20, 1, opts(5));
        f.tick();

        let positions: Vec<f32> = f.streams().iter().map(|s| s.pos()).collect();
        let glyphs: Vec<char> = f.streams().iter().map(|s| s.glyph().0).collect();
        let cursors: Vec<bool> = f.streams().iter().map(|s| s.messaging()).collect();

        let mut frame = Frame::new(40, 20, f.palette().bg);
        for _ in 0..5 {
            f.render(&mut frame);
        }

        let after_pos: Vec<f32> = f.streams().iter().map(|s| s.pos()).collect();
        let after_glyph: Vec<char> = f.streams().iter().map(|s| s.glyph().0).collect();
        let after_cursor: Vec<bool> = f.streams().iter().map(|s| s.messaging()).collect();
        assert_eq!(positions, after_pos);
        assert_eq!(glyphs, after_glyph);
        assert_eq!(cursors, after_cursor);
    }

    #[test]
    fn render_paints_each_stream_at_its_cell_position() {
        let mut o = opts(6);
        o.message_start_pct = 0.0;
        o.reset_pct = 0.0;
        let mut f = RainField::new(8, 12, 2, o);
        f.tick();

        let mut frame = Frame::new(8, 12, f.palette().bg);
        f.render(&mut frame);

        for s in f.streams() {
            let y = s.row() * 2;
            if y >= frame.height() {
                continue;
            }
            let cell = frame.get(s.col() * 2, y).unwrap();
            assert_eq!(cell.ch, s.glyph().0);
        }
    }

    #[test]
    fn same_seed_produces_identical_rain() {
        let run = || {
            let mut f = RainField::new(60, 30, 1, opts(0xDECAF));
            let mut frame = Frame::new(60, 30, Rgb::new(0, 0, 0));
            for _ in 0..50 {
                f.tick();
                f.render(&mut frame);
            }
            let glyphs: Vec<char> = f.streams().iter().map(|s| s.glyph().0).collect();
            (glyphs, frame.cells().to_vec())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn message_cursor_invariant_holds_across_many_ticks() {
        let mut o = opts(7);
        o.message = "TRINITY".to_string();
        o.message_start_pct = 0.3;
        let mut f = RainField::new(30, 10, 1, o);
        for _ in 0..500 {
            f.tick();
            // A stream showing a message glyph is mid-playback or just
            // finished; either way the cursor stays in range by
            // construction. Exercise tick+render together to make sure the
            // pair never panics on a stale cursor.
            let mut frame = Frame::new(30, 10, f.palette().bg);
            f.render(&mut frame);
        }
    }
}
