//! Headless year view demo.
//!
//! Loads `yearview.toml` (or `--config <path>`), applies `YEARVIEW_*`
//! environment overrides, lays the year out, replays pointer gestures given
//! on the command line and prints what the widget reported and drew.
//!
//!   yearview --tap 120,200 --long-press 400,90 --select 2025-03-14 --dump

use anyhow::{bail, Context, Result};
use chrono::Local;
use engine_core::{Command, Viewport};
use year_config::YearViewConfig;
use year_scene::{
    DayEvent, EventHandler, EventResult, MonthEvent, PointerEvent, YearView, YearViewListener,
};

struct PrintListener;

impl YearViewListener for PrintListener {
    fn on_day_click(&mut self, day: &DayEvent) {
        println!("day click: {} ({} ms)", day.key, day.millis);
    }

    fn on_day_long_click(&mut self, day: &DayEvent) {
        println!("day long click: {} ({} ms)", day.key, day.millis);
    }

    fn on_month_click(&mut self, month: &MonthEvent) {
        println!("month click: {}-{:02} ({} ms)", month.year, month.month_index + 1, month.millis);
    }

    fn on_month_long_click(&mut self, month: &MonthEvent) {
        println!("month long click: {}-{:02} ({} ms)", month.year, month.month_index + 1, month.millis);
    }

    fn on_range_selected(&mut self, start: &DayEvent, end: &DayEvent) {
        println!("range: {} .. {}", start.key, end.key);
    }
}

enum Gesture {
    Tap(f32, f32),
    LongPress(f32, f32),
}

struct Args {
    config: Option<String>,
    gestures: Vec<Gesture>,
    select: Option<String>,
    dump: bool,
}

fn parse_point(flag: &str, value: Option<String>) -> Result<(f32, f32)> {
    let value = value.with_context(|| format!("{flag} needs an x,y argument"))?;
    let (x, y) = value
        .split_once(',')
        .with_context(|| format!("{flag} expects x,y, got {value:?}"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

fn parse_args() -> Result<Args> {
    let mut args = Args { config: None, gestures: Vec::new(), select: None, dump: false };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().context("--config needs a path")?),
            "--tap" => {
                let (x, y) = parse_point("--tap", it.next())?;
                args.gestures.push(Gesture::Tap(x, y));
            }
            "--long-press" => {
                let (x, y) = parse_point("--long-press", it.next())?;
                args.gestures.push(Gesture::LongPress(x, y));
            }
            "--select" => args.select = Some(it.next().context("--select needs a date key")?),
            "--dump" => args.dump = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => YearViewConfig::load_from_file(path)?,
        None => YearViewConfig::load_or_default(),
    };
    config.merge_with_env();
    config.validate()?;

    let today = Local::now().date_naive();
    let mut view = YearView::from_config(&config, today)?;
    view.set_listener(Box::new(PrintListener));

    let (width, height) = (config.surface.width, config.surface.height);
    let snapshot = view.layout(width, height)?;
    log::info!(
        "laid out {} months of {} on {}x{} (generation {})",
        snapshot.months.len(),
        snapshot.year,
        width,
        height,
        snapshot.generation
    );

    if let Some(key) = &args.select {
        view.set_selected_day(key)?;
    }

    for gesture in &args.gestures {
        let event = match *gesture {
            Gesture::Tap(x, y) => PointerEvent::tap(x, y),
            Gesture::LongPress(x, y) => PointerEvent::long_press(x, y),
        };
        if view.handle_pointer(event) == EventResult::Ignored {
            println!("nothing at {},{}", event.x, event.y);
        }
    }

    if let Some(key) = view.selected_day() {
        println!("selected: {key}");
    }
    if let Some(month) = view.highlighted_month() {
        println!("highlighted month: {}", month + 1);
    }

    let list = view.render_display_list(Viewport { width: width as u32, height: height as u32 });
    println!("{} draw commands, {} text runs", list.commands.len(), list.text_runs().count());
    if args.dump {
        for cmd in &list.commands {
            match cmd {
                Command::DrawText { run, z } => {
                    println!(
                        "text z={z} {:?} at ({:.1}, {:.1}) {}",
                        run.text,
                        run.pos[0],
                        run.pos[1],
                        run.color.to_hex()
                    )
                }
                other => println!("{other:?}"),
            }
        }
    }
    Ok(())
}
