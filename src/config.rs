// Copyright (c) 2026 glyphfall contributors

use std::io::IsTerminal;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::Parser;

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphfall", version, disable_version_flag = true, styles = clap_styles())]
pub struct Args {
    #[arg(
        short = 'c',
        long = "color",
        default_value = "green",
        help_heading = "APPEARANCE",
        help = "Color scheme (see --list-colors)"
    )]
    pub color: String,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8,24). Default: 24-bit if supported (COLORTERM), else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "cell",
        default_value_t = 1,
        help_heading = "APPEARANCE",
        help = "Cell size in terminal cells (min 1 max 8)"
    )]
    pub cell: u16,

    #[arg(
        long = "fade-pct",
        default_value_t = 6.0,
        help_heading = "APPEARANCE",
        help = "Trail fade strength per step in percent (min 1 max 60)"
    )]
    pub fade_pct: f32,

    #[arg(
        short = 'm',
        long = "message",
        default_value = "WAKE UP, NEO",
        help_heading = "MESSAGE",
        help = "Hidden message occasionally typed out by a stream (empty disables)"
    )]
    pub message: String,

    #[arg(
        long = "message-pct",
        default_value_t = 0.8,
        help_heading = "MESSAGE",
        help = "Per-tick chance a stream starts the message, in percent (min 0 max 100)"
    )]
    pub message_pct: f32,

    #[arg(
        long = "reset-pct",
        default_value_t = 2.5,
        help_heading = "RAIN",
        help = "Per-tick chance an off-screen stream restarts, in percent (min 0 max 100)"
    )]
    pub reset_pct: f32,

    #[arg(
        long = "step-ms",
        default_value_t = 100,
        help_heading = "RAIN",
        help = "Logical step interval in ms (min 10 max 5000)"
    )]
    pub step_ms: u64,

    #[arg(
        long = "ascii",
        help_heading = "RAIN",
        help = "Latin letters and digits only (default when LANG is not UTF-8)"
    )]
    pub ascii: bool,

    #[arg(
        long = "seed",
        help_heading = "RAIN",
        help = "Seed the random source for reproducible rain"
    )]
    pub seed: Option<u64>,

    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 30.0,
        help_heading = "PERFORMANCE",
        help = "Repaint rate (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on any keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available color schemes and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLOR SCHEMES:\x1b[0m");
    } else {
        println!("AVAILABLE COLOR SCHEMES:");
    }
    println!();
    println!("VALUE     DESCRIPTION");
    println!("green     Classic green rain (default)");
    println!("cyan      Cyan rain");
    println!("amber     Amber / old-phosphor rain");
    println!("purple    Purple rain");
    println!("red       Red rain");
    println!("snow      Gray-white rain (alias: gray, grey)");
}
