//! Trail Example - Cursor trails and magnetic boxes
//!
//! This example demonstrates everything working together:
//! - Smoothed cursor ring and slower follower
//! - Two magnetic boxes that pull toward the pointer
//! - Capability detection (try REDUCED_MOTION=1 to see it go inert)
//!
//! Move the mouse around, hover the boxes, press `q` or Esc to quit.
//!
//! Run with: cargo run --example trail

use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use pointer_fx::input::convert_event;
use pointer_fx::{EffectsConfig, EffectsSession, Environment, MagneticTarget, Rect};

fn main() -> std::io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;

    let result = run();

    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run() -> std::io::Result<()> {
    let boxes = [
        MagneticTarget::new(0, Rect::new(10, 5, 20, 5)),
        MagneticTarget::new(1, Rect::new(45, 12, 20, 5)),
    ];
    let session = EffectsSession::start(
        Environment::capture(),
        &boxes,
        EffectsConfig::default(),
    )?;

    loop {
        // ~60fps poll, same cadence as the frame pump.
        if poll(Duration::from_millis(16))? {
            let event = read()?;
            if should_quit(&event) {
                break;
            }
            session.handle_event(&convert_event(event))?;
        }
        session.advance_frame();
        draw(&session, &boxes)?;
    }

    session.stop();
    Ok(())
}

fn should_quit(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn draw(session: &EffectsSession, boxes: &[MagneticTarget]) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;

    for target in boxes {
        let offset = session.magnetic_offset(target.id);
        draw_box(&mut out, target.rect, offset.x, offset.y)?;
    }

    if let Some(frame) = session.compose() {
        queue!(
            out,
            MoveTo(frame.follower.0, frame.follower.1),
            Print("·"),
            MoveTo(frame.ring.0, frame.ring.1),
            Print("○"),
        )?;
    } else {
        queue!(
            out,
            MoveTo(2, 1),
            Print("effects inert on this terminal (press q to quit)"),
        )?;
    }

    out.flush()
}

fn draw_box(out: &mut impl Write, rect: Rect, dx: f32, dy: f32) -> std::io::Result<()> {
    let x = (rect.x as f32 + dx).round().max(0.0) as u16;
    let y = (rect.y as f32 + dy).round().max(0.0) as u16;
    let w = rect.width as usize;

    queue!(out, MoveTo(x, y), Print(format!("╭{}╮", "─".repeat(w - 2))))?;
    for row in 1..rect.height - 1 {
        queue!(
            out,
            MoveTo(x, y + row),
            Print(format!("│{}│", " ".repeat(w - 2)))
        )?;
    }
    queue!(
        out,
        MoveTo(x, y + rect.height - 1),
        Print(format!("╰{}╯", "─".repeat(w - 2)))
    )?;
    Ok(())
}
