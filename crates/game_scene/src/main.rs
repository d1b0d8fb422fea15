//! Game scene demo
//!
//! Runs one of the three scenes headlessly for a number of frames, driven by
//! an optional input script, and logs what the last frame drew.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use game_scene::{CameraScene, RigScene, SceneConfig, SpriteScene};
use scene_engine::config::Config;
use scene_engine::core::ApplicationConfig;
use scene_engine::foundation::logging;
use scene_engine::input::InputScript;
use scene_engine::{Engine, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    /// Moving sprite, looping sound, frame counter
    Sprite,
    /// Free camera over a cloud of cubes
    Camera,
    /// Parent-child character rig
    Rig,
}

#[derive(Debug, Parser)]
#[command(name = "game_scene", about = "Run a tutorial game scene headlessly")]
struct Args {
    /// Scene to run
    #[arg(long, value_enum, default_value_t = SceneKind::Sprite)]
    scene: SceneKind,

    /// Number of frames to run (overrides the engine config)
    #[arg(long)]
    frames: Option<u64>,

    /// Engine config file (.toml or .ron)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scene tuning file (.toml or .ron)
    #[arg(long, value_name = "FILE")]
    scene_config: Option<PathBuf>,

    /// Scripted key events (.toml or .ron)
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Log level (overrides the engine config)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut app_config = match &args.config {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::new("Game Scene"),
    };
    if let Some(level) = &args.log_level {
        app_config.engine.log_level = level.clone();
    }
    if args.frames.is_some() {
        app_config.engine.max_frames = args.frames;
    }

    logging::init(&app_config.engine.log_level);
    log::info!("Starting game scene demo ({:?})", args.scene);

    let scene_config = match &args.scene_config {
        Some(path) => SceneConfig::load_from_file(path)?,
        None => SceneConfig::default(),
    };
    scene_config.validate()?;

    let script = match &args.script {
        Some(path) => InputScript::load_from_file(path)?,
        None => InputScript::new(),
    };
    log::info!("Input script has {} events", script.events.len());

    let mut engine = Engine::new(app_config)?;

    match args.scene {
        SceneKind::Sprite => run_scene(&mut engine, &mut SpriteScene::new(scene_config.sprite), &script)?,
        SceneKind::Camera => run_scene(&mut engine, &mut CameraScene::new(scene_config.camera), &script)?,
        SceneKind::Rig => run_scene(&mut engine, &mut RigScene::new(scene_config.rig)?, &script)?,
    }

    log::info!("Game scene demo finished");
    Ok(())
}

fn run_scene<S: Scene>(engine: &mut Engine, scene: &mut S, script: &InputScript) -> Result<(), Box<dyn std::error::Error>> {
    engine.run(scene, script)?;

    let recorder = engine.recorder();
    if let Some(frame) = recorder.last_frame() {
        log::info!(
            "Frame {}: {} commands ({} sprites, {} models, {} glyphs)",
            frame.number,
            frame.commands.len(),
            frame.sprite_count(),
            frame.model_count(),
            frame.glyph_count()
        );
    }
    for line in recorder.debug_lines() {
        log::info!("  {}", line);
    }
    log::info!("Active voices: {}", engine.audio.active_voices());
    Ok(())
}
