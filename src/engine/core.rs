use std::path::Path;

use anyhow::{Context, Result, ensure};
use glam::Vec3;
use serde::Deserialize;

use crate::camera::Camera;
use crate::core::stack::DEFAULT_DEPTH_LIMIT;
use crate::engine::scene::Scene;
use crate::rig::Robot;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub app_name: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub target_fps: u32,
    /// Frames the headless driver renders before exiting.
    pub frames: u32,
    pub stack_depth_limit: usize,
    pub projection: ProjectionConfig,
    pub camera: CameraConfig,
    pub walk: WalkConfig,
    /// Scale factor marking the selected segment; 1.0 disables it.
    pub highlight_scale: f32,
    /// Keystrokes replayed into the editor before the first frame.
    pub startup_keys: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Marionette".to_string(),
            viewport_width: 800,
            viewport_height: 800,
            target_fps: 60,
            frames: 120,
            stack_depth_limit: DEFAULT_DEPTH_LIMIT,
            projection: ProjectionConfig::default(),
            camera: CameraConfig::default(),
            walk: WalkConfig::default(),
            highlight_scale: 1.1,
            startup_keys: String::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source).context("failed to parse engine config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_ron_str(&source)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(target: "engine", path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.viewport_width > 0 && self.viewport_height > 0,
            "viewport must be non-empty"
        );
        let needed = Scene::render_depth(&Robot::build().figure);
        ensure!(
            self.stack_depth_limit >= needed,
            "stack_depth_limit {} is below the {needed} frames a robot frame needs",
            self.stack_depth_limit
        );
        ensure!(self.highlight_scale > 0.0, "highlight_scale must be positive");
        let projection = &self.projection;
        ensure!(
            projection.near > 0.0 && projection.far > projection.near,
            "projection needs 0 < near < far"
        );
        ensure!(
            projection.fov_y_degrees > 0.0 && projection.fov_y_degrees < 180.0,
            "fov_y_degrees must lie in (0, 180)"
        );
        self.camera.validate()?;
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.viewport_width as f32 / self.viewport_height as f32
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub center: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 20.0],
            center: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraConfig {
    /// Rejects views with no defined basis: eye on the center, or `up`
    /// parallel to the line of sight.
    pub fn validate(&self) -> Result<()> {
        let camera = self.camera();
        let sight = camera.eye - camera.center;
        ensure!(
            sight.length_squared() > f32::EPSILON,
            "camera eye and center must differ"
        );
        ensure!(
            camera.up.cross(sight).length_squared() > f32::EPSILON,
            "camera up must not be parallel to the line of sight"
        );
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        Camera::new(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.center),
            Vec3::from_array(self.up),
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub frequency: f32,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self { frequency: 6.0 }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameTiming {
    pub delta_seconds: f32,
    pub fps: f32,
}

pub struct FixedTimestep {
    frame_duration: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn from_fps(fps: u32) -> Self {
        let frame_duration = 1.0 / fps.max(1) as f32;
        Self {
            frame_duration,
            accumulator: 0.0,
        }
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.frame_duration {
            self.accumulator -= self.frame_duration;
            true
        } else {
            false
        }
    }
}
