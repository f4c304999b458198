use std::fs::File;
use std::time::{Duration, Instant};

use crossterm::event::EventStream;
use expando::event::convert_event;
use expando::{
    Buffer, Color, ControlStyle, Easing, Event, EventResult, ExpandableSegmentedControl, Font, Key,
    Point, Rect, SegmentValue, SegmentView, Size, Terminal, TextLabel,
};
use futures::StreamExt;
use log::{debug, info, trace};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::time::sleep_until;

const ANIMATION_FPS: u64 = 60;

/// A solid dot; shows that items need not be text.
#[derive(Debug)]
struct Dot {
    color: Color,
}

impl SegmentView for Dot {
    fn default_size(&self) -> Size {
        Size::new(1, 1)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, opacity: f32) {
        if area.is_empty() {
            return;
        }
        let bg = buf.get(area.x, area.y).map(|c| c.bg).unwrap_or_default();
        let fg = expando::segment::blend(self.color, bg, opacity);
        buf.set_char(area.x + area.width / 2, area.y, '●', fg);
    }
}

fn dot(color: Color) -> SegmentValue {
    SegmentValue::View(Box::new(Dot { color }))
}

fn controls() -> Vec<ExpandableSegmentedControl> {
    let flash = ExpandableSegmentedControl::new(
        Point::new(2, 2),
        Some("Flash".into()),
        vec!["Auto".into(), "On".into(), "Off".into()],
    );

    let hdr = ExpandableSegmentedControl::with_style(
        Point::new(2, 6),
        Some("HDR".into()),
        vec!["On".into(), "Off".into()],
        ControlStyle::new().toggle_mode(true),
    );

    let timer = ExpandableSegmentedControl::with_style(
        Point::new(2, 10),
        Some(SegmentValue::View(Box::new(TextLabel::new("Timer")))),
        vec!["Off".into(), "2s".into(), "10s".into()],
        ControlStyle::new()
            .border_width(2)
            .inner_border_width(2)
            .border_color(Color::oklch(0.7, 0.15, 250.0))
            .unselected_label_font(Font::new().dim())
            .transition(Duration::from_millis(350), Easing::EaseOut),
    );

    let swatch = ExpandableSegmentedControl::with_style(
        Point::new(2, 14),
        None,
        vec![
            dot(Color::oklch(0.65, 0.2, 25.0)),
            dot(Color::oklch(0.75, 0.18, 145.0)),
            dot(Color::oklch(0.65, 0.18, 255.0)),
        ],
        ControlStyle::new().no_timeout(),
    );

    vec![flash, hdr, timer, swatch]
}

/// Wait until `deadline`, or forever when there is none.
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

fn is_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Quit
            | Event::Key {
                key: Key::Char('q'),
                ..
            }
    )
}

/// Move keyboard focus to the next control.
fn cycle_focus(controls: &mut [ExpandableSegmentedControl]) {
    let current = controls.iter().position(|c| c.is_focused());
    let next = current.map_or(0, |index| (index + 1) % controls.len());
    for (index, control) in controls.iter_mut().enumerate() {
        control.set_focused(index == next);
    }
}

fn draw(terminal: &mut Terminal, controls: &mut [ExpandableSegmentedControl]) -> std::io::Result<()> {
    let now = Instant::now();
    terminal.draw(|buf| {
        let hint = "click or Tab + Enter/Space/Arrows, q to quit";
        for (offset, ch) in hint.chars().enumerate() {
            buf.set_char(2 + offset as u16, 0, ch, Color::oklch(0.6, 0.0, 0.0).to_rgb());
        }
        for control in controls.iter() {
            control.render(buf, now);
        }
    })?;
    for control in controls.iter_mut() {
        control.clear_dirty();
    }
    Ok(())
}

async fn run(terminal: &mut Terminal) -> std::io::Result<()> {
    let mut controls = controls();
    let mut events = EventStream::new();

    let frame_duration = Duration::from_millis(1000 / ANIMATION_FPS);
    let mut animation_interval = tokio::time::interval(frame_duration);
    animation_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    draw(terminal, &mut controls)?;

    loop {
        let next_deadline = controls.iter().filter_map(|c| c.next_deadline()).min();
        let animating = controls.iter().any(|c| c.is_animating());

        let received: Option<Event> = tokio::select! {
            Some(event_result) = events.next() => {
                match event_result {
                    Ok(crossterm_event) => convert_event(crossterm_event),
                    Err(e) => {
                        log::error!("event stream error: {}", e);
                        None
                    }
                }
            }
            _ = sleep_until_optional(next_deadline) => {
                debug!("deadline reached");
                None
            }
            _ = animation_interval.tick(), if animating => {
                trace!("animation tick");
                None
            }
        };

        if let Some(event) = received {
            if is_quit(&event) {
                info!("quit requested");
                return Ok(());
            }
            if event == Event::key(Key::Tab) {
                cycle_focus(&mut controls);
            } else {
                let mut handled = false;
                for control in controls.iter_mut() {
                    if control.handle_event(&event) == EventResult::Consumed {
                        handled = true;
                    }
                }
                if !handled && event == Event::key(Key::Escape) {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        let mut needs_render = false;
        for (index, control) in controls.iter_mut().enumerate() {
            needs_render |= control.tick(now);
            for change in control.drain_events() {
                info!("control {}: {:?}", index, change);
            }
        }

        if needs_render || received.is_some() {
            draw(terminal, &mut controls)?;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log_file = match File::create("expando-demo.log") {
        Ok(file) => file,
        Err(e) => {
            eprintln!("failed to create log file: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
        eprintln!("failed to initialize logger: {}", e);
    }

    let result = match Terminal::new() {
        Ok(mut terminal) => run(&mut terminal).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("expando-demo: {}", e);
        std::process::exit(1);
    }
}
