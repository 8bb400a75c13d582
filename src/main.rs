// Copyright (c) 2026 glyphfall contributors

mod alphabet;
mod config;
mod field;
mod palette;
mod runtime;
mod scheduler;
mod stream;
mod surface;
mod terminal;

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{print_list_colors, Args};
use crate::field::{FieldOptions, RainField};
use crate::runtime::{ColorMode, ColorScheme};
use crate::scheduler::FrameScheduler;
use crate::surface::Frame;
use crate::terminal::{restore_terminal_best_effort, Terminal};

fn build_info() -> &'static str {
    env!("GLYPHFALL_BUILD")
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_f32_range(name: &str, v: f32, min: f32, max: f32) -> f32 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u64_range(name: &str, v: u64, min: u64, max: u64) -> u64 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn default_to_ascii() -> bool {
    let lang = env::var("LANG").unwrap_or_default();
    !lang.to_ascii_uppercase().contains("UTF")
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }

    ColorMode::Color256
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn parse_color_scheme(s: &str) -> Result<ColorScheme, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "green" => Ok(ColorScheme::Green),
        "cyan" => Ok(ColorScheme::Cyan),
        "amber" => Ok(ColorScheme::Amber),
        "purple" => Ok(ColorScheme::Purple),
        "red" => Ok(ColorScheme::Red),
        "snow" | "gray" | "grey" => Ok(ColorScheme::Snow),
        _ => Err(format!("invalid color: {} (see --list-colors)", s)),
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let args = Args::parse();

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        return Ok(());
    }

    let color_mode = detect_color_mode(&args);
    let scheme = match parse_color_scheme(&args.color) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let target_fps = require_f64_range("--fps", args.fps, 1.0, 240.0);
    let step_ms = require_u64_range("--step-ms", args.step_ms, 10, 5000);
    let cell = require_u16_range("--cell", args.cell, 1, 8);
    let fade_pct = require_f32_range("--fade-pct", args.fade_pct, 1.0, 60.0);
    let message_pct = require_f32_range("--message-pct", args.message_pct, 0.0, 100.0);
    let reset_pct = require_f32_range("--reset-pct", args.reset_pct, 0.0, 100.0);
    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });

    let opts = FieldOptions {
        scheme,
        message: args.message.clone(),
        message_start_pct: message_pct / 100.0,
        reset_pct: reset_pct / 100.0,
        fade_alpha: fade_pct / 100.0,
        ascii_only: args.ascii || default_to_ascii(),
        seed: args.seed,
    };

    let mut term = Terminal::new(color_mode)?;
    let (w, h) = term.size()?;

    let mut field = RainField::new(w, h, cell, opts.clone());
    let mut frame = Frame::new(w, h, field.palette().bg);
    let mut scheduler = FrameScheduler::new(Duration::from_millis(step_ms));

    let start_time = Instant::now();
    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    let target_period = Duration::from_secs_f64(1.0 / target_fps);
    let mut next_frame = Instant::now();
    let mut running = true;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            running = false;
                            break;
                        }
                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => running = false,
                            KeyCode::Char(' ') => {
                                field = RainField::new(frame.width(), frame.height(), cell, opts.clone());
                                frame = Frame::new(frame.width(), frame.height(), field.palette().bg);
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !running || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_frame {
                break;
            }

            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            field = RainField::new(nw, nh, cell, opts.clone());
            frame = Frame::new(nw, nh, field.palette().bg);
        }

        // The repaint signal: one arrival per target frame period. The
        // scheduler decides whether this repaint crosses a logical step.
        if scheduler.on_repaint(Instant::now()) {
            field.tick();
            field.render(&mut frame);
            term.draw(&frame)?;
        }

        next_frame += target_period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    drop(term);
    Ok(())
}
