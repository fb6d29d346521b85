/// Frame driver: event polling, update and render on a single thread
use std::time::{Duration, Instant};

use crate::error::SurfaceError;
use crate::surface::{DrawSurface, SurfaceEvent};

/// Something the driver advances and draws once per frame
pub trait Scene {
    /// Called for every non-quit event drained at the start of a frame
    fn handle_event(&mut self, _event: &SurfaceEvent) {}

    /// Advance the simulation by one tick
    fn update(&mut self);

    /// Draw the current state, including the clear and the present
    fn render<S: DrawSurface>(&self, surface: &mut S) -> Result<(), SurfaceError>;
}

/// Lifecycle of a driver. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Owns a surface and a scene and runs the frame loop over them
///
/// The surface is released when the driver is dropped, which `run` does on
/// every exit path. Hosts that own their own loop (a browser animation
/// callback, say) call `step` instead of `run`.
pub struct FrameDriver<S: DrawSurface, Sc: Scene> {
    surface: S,
    scene: Sc,
    state: DriverState,
    frame_delay: Duration,
    frames: u64,
}

impl<S: DrawSurface, Sc: Scene> FrameDriver<S, Sc> {
    pub fn new(surface: S, scene: Sc) -> Self {
        Self {
            surface,
            scene,
            state: DriverState::Running,
            frame_delay: Duration::ZERO,
            frames: 0,
        }
    }

    /// Minimum wall time per frame in `run`; the remainder is slept away
    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn scene(&self) -> &Sc {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one outer-loop iteration
    ///
    /// Drains pending events first. A quit event stops the driver and skips
    /// the rest of the frame; events queued behind it are left unread.
    /// Surface errors are returned as-is.
    pub fn step(&mut self) -> Result<DriverState, SurfaceError> {
        if self.state == DriverState::Stopped {
            return Ok(self.state);
        }

        while let Some(event) = self.surface.poll_event()? {
            match event {
                SurfaceEvent::Quit => {
                    log::info!("quit requested after {} frames", self.frames);
                    self.state = DriverState::Stopped;
                    return Ok(self.state);
                }
                other => self.scene.handle_event(&other),
            }
        }

        self.scene.update();
        self.scene.render(&mut self.surface)?;
        self.frames += 1;

        Ok(self.state)
    }

    /// Loop until a quit event arrives or the surface fails
    ///
    /// Consumes the driver, so the surface is dropped exactly once whichever
    /// way the loop ends. Returns the number of rendered frames.
    pub fn run(self) -> Result<u64, SurfaceError> {
        self.run_to_completion().map(|(frames, _)| frames)
    }

    /// Like `run`, but hands the scene back once the surface is released
    pub fn run_to_completion(mut self) -> Result<(u64, Sc), SurfaceError> {
        log::info!("frame driver started (frame delay {:?})", self.frame_delay);

        let mut fps_window_start = Instant::now();
        let mut fps_window_frames = 0u32;

        while self.state == DriverState::Running {
            let frame_start = Instant::now();

            if let Err(err) = self.step() {
                log::error!("frame {} failed: {err}", self.frames + 1);
                return Err(err);
            }

            let elapsed = frame_start.elapsed();
            log::trace!("frame {} took {:?}", self.frames, elapsed);
            if self.state == DriverState::Stopped {
                break;
            }

            fps_window_frames += 1;
            let window = fps_window_start.elapsed();
            if window >= Duration::from_secs(1) {
                log::debug!("{:.1} fps", fps_window_frames as f32 / window.as_secs_f32());
                fps_window_frames = 0;
                fps_window_start = Instant::now();
            }

            if elapsed < self.frame_delay {
                std::thread::sleep(self.frame_delay - elapsed);
            }
        }

        log::info!("frame driver stopped after {} frames", self.frames);
        let Self {
            surface,
            scene,
            frames,
            ..
        } = self;
        drop(surface);
        Ok((frames, scene))
    }
}
