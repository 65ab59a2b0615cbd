#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots a Crossing session.

mod config;
mod headless;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossing_core::{Command, GridGeometry};
use crossing_rendering::{BoardPresentation, Color, Presentation, RenderingBackend};
use crossing_rendering_macroquad::MacroquadBackend;
use crossing_system_input::InputRouter;
use crossing_world::{apply, query, render, World};
use glam::Vec2;
use log::info;

use self::config::SessionConfig;

/// Command-line arguments for the Crossing binary.
#[derive(Debug, Parser)]
#[command(name = "crossing", version, about = "Guide the player across three lanes of bugs.")]
struct Args {
    /// TOML file providing the seed and board geometry.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for enemy speeds, overriding the config file.
    #[arg(long)]
    seed: Option<u64>,
    /// Runs the given number of frames without opening a window.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,
    /// Comma-separated moves fed one per frame in headless mode.
    #[arg(long, value_name = "DIRS", value_delimiter = ',')]
    script: Vec<String>,
    /// Draws flat shapes instead of loading sprite textures.
    #[arg(long)]
    no_sprites: bool,
    /// Sprite manifest location.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,
    /// Synchronises presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
    /// Logs the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Enables debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Crossing command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let session = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let mut world = World::with_config(session.world_config(args.seed));
    println!("{}", query::welcome_banner(&world));

    match args.headless {
        Some(frames) => run_headless(&mut world, frames, &args.script),
        None => run_windowed(world, &args),
    }
}

fn run_headless(world: &mut World, frames: u32, script: &[String]) -> Result<()> {
    let steps = headless::parse_script(script);
    let summary = headless::run(world, frames, &steps);
    println!(
        "frames: {} events: {} moves: {} rejected: {} recycles: {}",
        summary.frames,
        summary.events.len(),
        summary.moves,
        summary.rejected_moves,
        summary.recycles
    );
    println!(
        "player: ({}, {}) draws per frame: {}",
        summary.final_position.x, summary.final_position.y, summary.last_frame_draws
    );
    Ok(())
}

fn run_windowed(mut world: World, args: &Args) -> Result<()> {
    if !args.script.is_empty() {
        info!("ignoring --script outside headless mode");
    }

    let presentation = presentation_for(query::geometry(&world))?;
    let mut backend = MacroquadBackend::new()
        .with_sprite_loading(!args.no_sprites)
        .with_show_fps(args.show_fps);
    if let Some(path) = &args.manifest {
        backend = backend.with_manifest_path(path.clone());
    }
    if let Some(enabled) = args.vsync {
        backend = backend.with_vsync(enabled);
    }

    let router = InputRouter;
    let mut commands = Vec::new();
    let mut events = Vec::new();

    backend.run(presentation, move |dt, input, canvas| {
        router.handle(&input.released_keys, &mut commands);
        commands.push(Command::Tick { dt });
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }
        events.clear();

        render(&world, canvas);
    })
}

fn presentation_for(geometry: &GridGeometry) -> Result<Presentation> {
    let board = BoardPresentation::classic(geometry).context("board geometry cannot be drawn")?;
    Ok(Presentation::new(
        "Crossing",
        Color::from_rgb_u8(255, 255, 255),
        Vec2::new(geometry.canvas_width, geometry.canvas_height),
        board,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_definitions_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn headless_flags_parse() {
        let args = Args::try_parse_from([
            "crossing",
            "--headless",
            "120",
            "--script",
            "up,left,restart",
            "--seed",
            "7",
            "--vsync",
            "false",
        ])
        .expect("arguments should parse");

        assert_eq!(args.headless, Some(120));
        assert_eq!(args.script, vec!["up", "left", "restart"]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.vsync, Some(false));
        assert!(!args.no_sprites);
    }

    #[test]
    fn classic_presentation_matches_board_size() {
        let presentation =
            presentation_for(&GridGeometry::CLASSIC).expect("classic board is drawable");
        assert_eq!(presentation.canvas_size, Vec2::new(505.0, 606.0));
        assert_eq!(presentation.board.tiles().count(), 30);
    }

    #[test]
    fn headless_run_reports_success() {
        let mut world = World::new();
        let script = vec!["up".to_owned(), "bogus".to_owned()];
        assert!(run_headless(&mut world, 5, &script).is_ok());
        assert_eq!(
            query::player_position(&world),
            crossing_core::Position::new(200.0, 318.0)
        );
    }
}
