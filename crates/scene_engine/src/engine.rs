//! Core engine implementation

use crate::{
    application::Scene,
    assets::TextureManager,
    audio::Audio,
    config::ConfigError,
    core::ApplicationConfig,
    foundation::time::Timer,
    input::{InputManager, InputScript, KeyCode},
    render::{CommandList, DebugText, FrameRecorder, RenderError},
};
use std::path::Path;
use thiserror::Error;

/// Main engine struct
///
/// The engine owns every subsystem a scene touches and drives the headless
/// frame loop. Frames are recorded instead of presented.
pub struct Engine {
    /// Keyboard state
    pub input: InputManager,

    /// Audio system
    pub audio: Audio,

    /// Texture manager
    pub textures: TextureManager,

    /// Debug text queue
    pub debug_text: DebugText,

    timer: Timer,
    config: ApplicationConfig,
    recorder: FrameRecorder,
    frame_number: u64,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(mut config: ApplicationConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let resource_dir = Path::new(&config.assets.resource_dir);
        if !resource_dir.is_dir() {
            log::warn!("Resource directory {} does not exist", resource_dir.display());
        }

        let textures = TextureManager::new(resource_dir);
        let audio = Audio::silent(&config.audio, resource_dir);
        let timer = Timer::fixed(config.engine.fixed_timestep);

        log::info!(
            "Engine ready: \"{}\" {}x{}",
            config.window.title,
            config.window.width,
            config.window.height
        );

        Ok(Self {
            input: InputManager::new(),
            audio,
            textures,
            debug_text: DebugText::new(),
            timer,
            config,
            recorder: FrameRecorder::new(),
            frame_number: 0,
            running: true,
        })
    }

    /// Initialize `scene` and run frames until the frame limit or `quit`
    ///
    /// Scripted key events are applied at the start of the frame they name.
    /// Without `max_frames` the run ends one frame after the script's last
    /// event.
    pub fn run<S: Scene>(&mut self, scene: &mut S, script: &InputScript) -> Result<(), EngineError> {
        let frame_limit = self
            .config
            .engine
            .max_frames
            .or_else(|| script.last_frame().map(|frame| frame + 1))
            .ok_or_else(|| {
                EngineError::InitializationFailed(
                    "headless run needs max_frames or a non-empty input script".to_string(),
                )
            })?;

        self.initialize(scene)?;

        log::info!("Starting main loop ({} frames max)...", frame_limit);

        while self.running && self.frame_number < frame_limit {
            script.apply(self.frame_number, &mut self.input);
            self.step(scene)?;
        }

        scene.cleanup(self);

        log::info!(
            "Main loop finished after {} frames ({:.2}s simulated)",
            self.frame_number,
            self.timer.total_time()
        );
        Ok(())
    }

    /// Initialize `scene` against this engine
    pub fn initialize<S: Scene>(&mut self, scene: &mut S) -> Result<(), EngineError> {
        scene
            .initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("Scene initialization: {}", e)))
    }

    /// Run one frame: update, draw, record
    ///
    /// Key events for the frame must already be in `input`.
    pub fn step<S: Scene>(&mut self, scene: &mut S) -> Result<(), EngineError> {
        self.timer.update();

        if self.input.trigger_key(KeyCode::Escape) {
            self.quit();
        }

        scene
            .update(self)
            .map_err(|e| EngineError::ApplicationError(format!("Scene update: {}", e)))?;

        self.audio.update(self.timer.delta_time());

        let debug_lines = self.debug_text.lines().to_vec();
        let mut cmd = CommandList::new(self.frame_number);
        scene
            .draw(self, &mut cmd)
            .map_err(|e| EngineError::ApplicationError(format!("Scene draw: {}", e)))?;
        let frame = cmd.finish()?;

        if self.debug_text.queued() > 0 || !self.debug_text.lines().is_empty() {
            log::debug!(
                "Dropping {} debug lines ({} glyphs) that were never drawn",
                self.debug_text.lines().len(),
                self.debug_text.queued()
            );
            self.debug_text.clear();
        }

        self.recorder.record(frame, debug_lines);
        self.input.update();
        self.frame_number += 1;
        Ok(())
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop will keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames completed so far
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Active configuration
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Finished frames
    pub fn recorder(&self) -> &FrameRecorder {
        &self.recorder
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// A frame's command list was malformed
    #[error("Rendering error: {0}")]
    RenderError(#[from] RenderError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;

    #[derive(Default)]
    struct CountingScene {
        initialized: bool,
        updates: u32,
        space_triggers: u32,
        leave_batch_open: bool,
        blank_text_only: bool,
    }

    impl Scene for CountingScene {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            self.initialized = true;
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            self.updates += 1;
            if engine.input.trigger_key(KeyCode::Space) {
                self.space_triggers += 1;
            }
            if self.blank_text_only {
                engine.debug_text.print("", 50.0, 50.0, 1.0);
            } else {
                engine.debug_text.print_fmt(format_args!("Value:{}", self.updates), 50.0, 50.0, 1.0);
            }
            Ok(())
        }

        fn draw(&mut self, engine: &mut Engine, cmd: &mut CommandList) -> Result<(), AppError> {
            cmd.begin_sprites()?;
            if !self.blank_text_only {
                engine.debug_text.draw_all(cmd)?;
            }
            if !self.leave_batch_open {
                cmd.end_sprites()?;
            }
            Ok(())
        }
    }

    fn test_engine(max_frames: Option<u64>) -> Engine {
        let mut config = ApplicationConfig::new("Engine Test");
        config.engine.max_frames = max_frames;
        Engine::new(config).unwrap()
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut engine = test_engine(Some(5));
        let mut scene = CountingScene::default();
        engine.run(&mut scene, &InputScript::new()).unwrap();

        assert!(scene.initialized);
        assert_eq!(scene.updates, 5);
        assert_eq!(engine.frame_number(), 5);
        assert_eq!(engine.recorder().frames_recorded(), 5);
        assert_eq!(engine.recorder().debug_lines(), ["Value:5".to_string()]);
        assert_eq!(engine.recorder().last_frame().map(|f| f.glyph_count()), Some(7));
    }

    #[test]
    fn test_held_key_triggers_once() {
        let mut engine = test_engine(Some(10));
        let mut scene = CountingScene::default();
        let script = InputScript::new().hold(KeyCode::Space, 2, 4).press(8, KeyCode::Space);
        engine.run(&mut scene, &script).unwrap();

        assert_eq!(scene.space_triggers, 2);
    }

    #[test]
    fn test_escape_quits_after_current_frame() {
        let mut engine = test_engine(Some(100));
        let mut scene = CountingScene::default();
        engine.run(&mut scene, &InputScript::new().press(3, KeyCode::Escape)).unwrap();

        assert!(!engine.is_running());
        assert_eq!(scene.updates, 4);
    }

    #[test]
    fn test_script_bounds_run_without_frame_limit() {
        let mut engine = test_engine(None);
        let mut scene = CountingScene::default();
        engine.run(&mut scene, &InputScript::new().press(6, KeyCode::A)).unwrap();
        assert_eq!(engine.frame_number(), 7);

        let mut engine = test_engine(None);
        assert!(matches!(
            engine.run(&mut CountingScene::default(), &InputScript::new()),
            Err(EngineError::InitializationFailed(_))
        ));
    }

    #[test]
    fn test_unbalanced_frame_is_an_error() {
        let mut engine = test_engine(Some(1));
        let mut scene = CountingScene {
            leave_batch_open: true,
            ..CountingScene::default()
        };
        assert!(matches!(engine.step(&mut scene), Err(EngineError::RenderError(_))));
    }

    #[test]
    fn test_undrawn_empty_text_does_not_pile_up() {
        let mut engine = test_engine(Some(4));
        let mut scene = CountingScene {
            blank_text_only: true,
            ..CountingScene::default()
        };
        engine.run(&mut scene, &InputScript::new()).unwrap();

        assert!(engine.debug_text.lines().is_empty());
        assert_eq!(engine.recorder().debug_lines(), [String::new()]);
        assert_eq!(engine.recorder().last_frame().map(|f| f.glyph_count()), Some(0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ApplicationConfig::new("Engine Test");
        config.audio.max_voices = 0;
        assert!(matches!(Engine::new(config), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut engine = test_engine(Some(60));
        engine.run(&mut CountingScene::default(), &InputScript::new()).unwrap();
        assert!((engine.timer().total_time() - 1.0).abs() < 1e-3);
    }
}
