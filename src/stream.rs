// Copyright (c) 2026 glyphfall contributors

use rand::{rngs::StdRng, Rng};

use crate::alphabet::GlyphSource;
use crate::palette::ColorToken;

/// One vertical lane of falling glyphs, bound to a fixed column.
///
/// The stream is either FALLING (`cursor == None`) or MESSAGING
/// (`cursor == Some(i)` with `i` always a valid index into the shared
/// message text). Every transition between the two happens inside this
/// type; nothing else touches the cursor.
#[derive(Clone, Debug)]
pub struct Stream {
    col: u16,
    pos: f32,
    cursor: Option<usize>,
    glyph: char,
    tone: ColorToken,
}

impl Stream {
    pub fn new(col: u16, start_row: u16, glyph: char) -> Self {
        Self {
            col,
            pos: start_row as f32,
            cursor: None,
            glyph,
            tone: ColorToken::Shade(0),
        }
    }

    pub fn col(&self) -> u16 {
        self.col
    }

    #[allow(dead_code)]
    pub fn pos(&self) -> f32 {
        self.pos
    }

    /// Fall position quantized to a cell row.
    pub fn row(&self) -> u16 {
        self.pos as u16
    }

    #[allow(dead_code)]
    pub fn messaging(&self) -> bool {
        self.cursor.is_some()
    }

    /// The glyph and color chosen by the last tick.
    pub fn glyph(&self) -> (char, ColorToken) {
        (self.glyph, self.tone)
    }

    /// One logical step of falling. Streams past the bottom edge restart at
    /// the top only when the reset trial passes, so restarts stay staggered;
    /// until then they keep falling out of view.
    pub fn advance(&mut self, rows: u16, reset_pct: f32, rng: &mut StdRng) {
        if self.pos > rows as f32 && rng.random::<f32>() < reset_pct {
            self.pos = 0.0;
            self.cursor = None;
        } else {
            self.pos += 1.0;
        }
    }

    /// Pick the glyph and color for this tick. Mutates message state, so it
    /// is called exactly once per stream per tick (from `RainField::tick`).
    ///
    /// While MESSAGING the configured text is emitted one character per
    /// tick; the cursor clears in the same call that emits the final
    /// character, so a one-character message starts and finishes in a
    /// single invocation.
    pub fn next_glyph(
        &mut self,
        message: &[char],
        start_pct: f32,
        shade_count: u8,
        glyphs: &GlyphSource,
        rng: &mut StdRng,
    ) -> (char, ColorToken) {
        let (glyph, tone) = if let Some(i) = self.cursor.take() {
            if i + 1 < message.len() {
                self.cursor = Some(i + 1);
            }
            (message[i], ColorToken::Message)
        } else if !message.is_empty() && rng.random::<f32>() < start_pct {
            if message.len() > 1 {
                self.cursor = Some(1);
            }
            (message[0], ColorToken::Message)
        } else {
            let shade = if shade_count > 1 {
                rng.random_range(0..shade_count)
            } else {
                0
            };
            (glyphs.next(rng), ColorToken::Shade(shade))
        };

        self.glyph = glyph;
        self.tone = tone;
        (glyph, tone)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn glyphs() -> GlyphSource {
        GlyphSource::new(false)
    }

    #[test]
    fn advance_moves_exactly_one_row_while_on_screen() {
        let mut rng = rng();
        let mut s = Stream::new(0, 3, 'A');
        for i in 0..20 {
            s.advance(100, 1.0, &mut rng);
            assert_eq!(s.pos(), 3.0 + (i + 1) as f32);
        }
    }

    #[test]
    fn advance_never_resets_with_zero_probability() {
        let mut rng = rng();
        let mut s = Stream::new(0, 0, 'A');
        for _ in 0..1000 {
            s.advance(10, 0.0, &mut rng);
        }
        assert_eq!(s.pos(), 1000.0);
    }

    #[test]
    fn advance_resets_to_top_once_off_screen_with_certain_trial() {
        let mut rng = rng();
        let mut s = Stream::new(0, 9, 'A');
        s.advance(10, 1.0, &mut rng); // 10: not yet past the edge
        s.advance(10, 1.0, &mut rng); // 11: past the edge, still advances
        assert_eq!(s.pos(), 11.0);
        s.advance(10, 1.0, &mut rng);
        assert_eq!(s.pos(), 0.0);
    }

    #[test]
    fn reset_clears_an_active_message() {
        let mut rng = rng();
        let g = glyphs();
        let msg: Vec<char> = "HELLO".chars().collect();
        let mut s = Stream::new(0, 50, 'A');
        s.next_glyph(&msg, 1.0, 4, &g, &mut rng);
        assert!(s.messaging());
        s.advance(10, 1.0, &mut rng);
        assert_eq!(s.pos(), 0.0);
        assert!(!s.messaging());
    }

    #[test]
    fn message_plays_in_order_then_stream_returns_to_falling() {
        let mut rng = rng();
        let g = glyphs();
        let msg: Vec<char> = "RAIN".chars().collect();
        let mut s = Stream::new(0, 0, 'A');

        let mut emitted = Vec::new();
        for _ in 0..msg.len() {
            let (ch, tone) = s.next_glyph(&msg, 1.0, 4, &g, &mut rng);
            assert_eq!(tone, ColorToken::Message);
            emitted.push(ch);
        }
        assert_eq!(emitted, msg);
        assert!(!s.messaging());
    }

    #[test]
    fn messaging_ignores_further_start_trials_until_done() {
        let mut rng = rng();
        let g = glyphs();
        let msg: Vec<char> = "ABC".chars().collect();
        let mut s = Stream::new(0, 0, 'A');

        // start_pct 1.0 on every call; the playback must still take exactly
        // len(message) ticks, not restart mid-way.
        let ticks: Vec<char> = (0..3).map(|_| s.next_glyph(&msg, 1.0, 4, &g, &mut rng).0).collect();
        assert_eq!(ticks, msg);
        assert!(!s.messaging());
    }

    #[test]
    fn single_char_message_starts_and_completes_in_one_call() {
        let mut rng = rng();
        let g = glyphs();
        let msg: Vec<char> = vec!['X'];
        let mut s = Stream::new(0, 0, 'A');

        let (ch, tone) = s.next_glyph(&msg, 1.0, 4, &g, &mut rng);
        assert_eq!(ch, 'X');
        assert_eq!(tone, ColorToken::Message);
        assert!(!s.messaging());
    }

    #[test]
    fn empty_message_never_enters_messaging() {
        let mut rng = rng();
        let g = glyphs();
        let mut s = Stream::new(0, 0, 'A');
        for _ in 0..100 {
            let (_, tone) = s.next_glyph(&[], 1.0, 4, &g, &mut rng);
            assert!(matches!(tone, ColorToken::Shade(_)));
            assert!(!s.messaging());
        }
    }

    #[test]
    fn falling_streams_emit_shade_tokens_within_palette() {
        let mut rng = rng();
        let g = glyphs();
        let mut s = Stream::new(0, 0, 'A');
        for _ in 0..200 {
            let (_, tone) = s.next_glyph(&[], 0.0, 4, &g, &mut rng);
            match tone {
                ColorToken::Shade(i) => assert!(i < 4),
                ColorToken::Message => panic!("message token with zero start probability"),
            }
        }
    }
}
