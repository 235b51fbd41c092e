pub mod core;
pub mod renderer;
pub mod scene;

use anyhow::Result;
use self::core::{EngineConfig, FixedTimestep, FrameTiming};
use self::renderer::Renderer;
use self::scene::Scene;

use crate::control::{CommandQueue, CommandSender};

/// Headless frame driver: owns the scene and renderer and advances them on a
/// fixed timestep. Input collaborators feed it through [`sender`](Self::sender).
pub struct EngineApp {
    config: EngineConfig,
    scene: Scene,
    renderer: Renderer,
    commands: CommandQueue,
    sender: CommandSender,
    clock: f64,
}

impl EngineApp {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let (commands, sender) = CommandQueue::new();
        Ok(Self {
            scene: Scene::from_config(&config)?,
            renderer: Renderer::new(),
            commands,
            sender,
            config,
            clock: 0.0,
        })
    }

    pub fn sender(&self) -> CommandSender {
        self.sender.clone()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn run(&mut self) -> Result<()> {
        tracing::info!(
            target: "engine",
            app = %self.config.app_name,
            frames = self.config.frames,
            "Engine starting"
        );

        for key in self.config.startup_keys.chars() {
            self.sender.send_key(key);
        }

        let mut timestep = FixedTimestep::from_fps(self.config.target_fps);
        let step = timestep.frame_duration();
        let mut rendered = 0;
        while rendered < self.config.frames {
            timestep.accumulate(step);
            while timestep.should_step() {
                self.tick(FrameTiming {
                    delta_seconds: step,
                    fps: 1.0 / step,
                });
                rendered += 1;
            }
        }

        tracing::info!(
            target: "engine",
            frames = self.renderer.frame_count(),
            draws = self.renderer.total_draws(),
            walking = self.scene.is_walking(),
            "Engine shutdown complete"
        );
        Ok(())
    }

    /// Runs one frame: apply pending edits, advance animation, render.
    pub fn tick(&mut self, timing: FrameTiming) {
        let applied = self.scene.drain(&self.commands);
        self.clock += timing.delta_seconds as f64;
        self.scene.tick(self.clock);

        self.renderer.begin_frame();
        self.scene.render(self.config.aspect(), &mut self.renderer);
        self.renderer.end_frame();

        tracing::debug!(
            target: "engine",
            frame_delta_ms = %(timing.delta_seconds * 1000.0),
            fps = timing.fps,
            applied,
            draws = self.renderer.draw_calls().len(),
            "frame tick"
        );
    }
}
