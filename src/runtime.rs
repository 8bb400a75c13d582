// Copyright (c) 2026 glyphfall contributors

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    #[allow(dead_code)]
    Color16,
    Color256,
    TrueColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Green,
    Cyan,
    Amber,
    Purple,
    Red,
    Snow,
}
