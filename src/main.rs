// SPDX-License-Identifier: MIT
//
// n-canvas — demo scenes for the animated terminal canvas.
//
// Wires the two crates together:
//
//   n-anim → percentage layout, easing, UserInterface draw calls
//   n-term → screen buffer, frame composition, background draw loop
//
// Every scene draws into the shared screen buffer from the main thread (and,
// for `bars`, from worker threads); the draw loop started up front flushes
// whatever changed. Diagnostics go to stderr through tracing so they never
// interleave with frames on stdout:
//
//   RUST_LOG=debug n-canvas --scene all 2> canvas.log

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use n_anim::{Animation, AnimationKind, Direction, Gradient, Position, UserInterface};
use n_term::ColorCode;

const BANNER: &str = "\
 _ __         ___ __ _ _ ____   ____ _ ___
| '_ \\ _____ / __/ _` | '_ \\ \\ / / _` / __|
| | | |_____| (_| (_| | | | \\ V / (_| \\__ \\
|_| |_|      \\___\\__,_|_| |_|\\_/ \\__,_|___/
";

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scene {
    /// A banner sliding across the screen.
    Move,
    /// Bars growing from the top and bottom edges, one thread each.
    Bars,
    /// A small table with per-column colors.
    Table,
    /// Everything, in order.
    All,
}

/// Animated, percentage-addressed terminal canvas.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Which scene to play.
    #[arg(long, value_enum, default_value_t = Scene::All)]
    scene: Scene,

    /// Rendered share of the terminal height, in percent.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(i32).range(0..=100))]
    height: i32,

    /// Border on every side, in percent of the terminal.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..=50))]
    border: i32,

    /// Base animation length in milliseconds.
    #[arg(long, default_value_t = 1600)]
    duration: i64,

    /// Easing curve: 0 ease-in, 1 ease-out, 2 ease-in-out, 3 custom, 4 bouncy.
    #[arg(long, default_value_t = 4)]
    kind: i32,
}

impl Scene {
    /// The concrete scenes to play, in order.
    const fn expand(self) -> &'static [Self] {
        match self {
            Self::Move => &[Self::Move],
            Self::Bars => &[Self::Bars],
            Self::Table => &[Self::Table],
            Self::All => &[Self::Move, Self::Bars, Self::Table],
        }
    }
}

// ─── Scenes ─────────────────────────────────────────────────────────────────

fn scene_move(ui: &UserInterface, animation: &Animation) -> Result<()> {
    info!("scene: move");
    ui.move_element(
        Position::new(70, 15),
        Position::new(35, 15),
        BANNER,
        ColorCode::PATTERN_MEADOWS1,
        animation,
    )?;
    ui.move_element(
        Position::new(35, 15),
        Position::new(5, 60),
        BANNER,
        ColorCode::PATTERN_LIME,
        &animation.with_gradient(Gradient::VERTICAL),
    )?;
    Ok(())
}

fn scene_bars(ui: &Arc<UserInterface>, animation: &Animation) -> Result<()> {
    info!("scene: bars");
    let gradient = Gradient::VERTICAL | Gradient::HORIZONTAL;

    let mut workers = Vec::new();
    for i in (10..=100).step_by(10) {
        let scaled = Animation {
            duration_ms: animation.duration_ms * i64::from(i) / 100,
            ..*animation
        };
        for (start, direction) in [
            (Position::new(i - 10, 0), Direction::Down),
            (Position::new(i - 8, 100), Direction::Up),
        ] {
            let ui = Arc::clone(ui);
            let anim = scaled.with_direction(direction).with_gradient(gradient);
            let worker = thread::Builder::new()
                .name(format!("bar-{i}-{direction:?}"))
                .spawn(move || ui.draw_pattern(start, 50, "█", ColorCode::PATTERN_NEON1, &anim))
                .context("failed to spawn bar thread")?;
            workers.push(worker);
        }
        for y in [0, 50, 100] {
            ui.draw_element(&mut Position::new(i - 12, y), &i.to_string(), ColorCode::PATTERN_NEON1);
        }
    }

    join_workers(workers)?;

    ui.draw_pattern(
        Position::new(100, 50),
        100,
        "█\n█\n█\n",
        ColorCode::PATTERN_MEADOWS1,
        &animation
            .with_direction(Direction::Left)
            .with_gradient(gradient),
    );
    Ok(())
}

/// Wait for every worker, failing if any of them panicked.
fn join_workers<T>(workers: Vec<JoinHandle<T>>) -> Result<()> {
    let mut panicked = Vec::new();
    for worker in workers {
        let name = worker.thread().name().unwrap_or("<unnamed>").to_owned();
        if worker.join().is_err() {
            panicked.push(name);
        }
    }
    if panicked.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("worker threads panicked: {}", panicked.join(", ")))
    }
}

fn scene_table(ui: &UserInterface) {
    info!("scene: table");
    let rows = [
        ["kind", "curve", "feel"],
        ["0", "ease-in", "slow start"],
        ["1", "ease-out", "slow end"],
        ["2", "ease-in-out", "slow both"],
        ["3", "custom", "jump, stall"],
        ["4", "bouncy", "rush, coast"],
    ];
    let colors = [
        ColorCode::PATTERN_LIME,
        ColorCode::PATTERN_SKYLIGHT,
        ColorCode::PINK,
    ];
    let mut pos = Position::new(20, 30);
    ui.draw_table(&mut pos, &rows, &[0, 15, 40], &colors);
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let animation = Animation::new(AnimationKind::from_index(cli.kind), cli.duration);

    let mut ui = UserInterface::new();
    ui.set_border(cli.border)?;
    ui.clear_screen();
    let ui = Arc::new(ui);

    let draw = ui.start_draw_loop(cli.height);

    let mut result = Ok(());
    for (i, &scene) in cli.scene.expand().iter().enumerate() {
        if i > 0 {
            ui.clear_screen();
        }
        result = match scene {
            Scene::Move => scene_move(&ui, &animation),
            Scene::Bars => scene_bars(&ui, &animation),
            _ => {
                scene_table(&ui);
                Ok(())
            }
        };
        if result.is_err() {
            break;
        }
        // Let the loop flush the last frame.
        thread::sleep(Duration::from_millis(500));
    }

    draw.shutdown();
    result
}

// ─── Tests ──────────────────────────────────────────────────────────────────
