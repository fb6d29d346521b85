/// Terminal front end: renders the wirecube scenes with crossterm
use wirecube_core::{CubeConfig, FrameDriver, PongConfig, PongScene, SurfaceError, WireframeScene};

pub mod cli;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod surface;

pub use cli::{Command, Mode, Options};
pub use renderer::Canvas;
pub use surface::{TerminalContext, TerminalSurface};

const TITLE: &str = "Wirecube";

/// What a finished session leaves behind, printed once the terminal is restored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    /// Final (player one, player two) score of a pong session
    pub score: Option<(u32, u32)>,
}

impl RunSummary {
    pub fn report(&self) -> String {
        let mut report = format!("Rendered {} frames.", self.frames);
        if let Some((one, two)) = self.score {
            report.push_str(&format!(" Final score {one}:{two}."));
        }
        report
    }
}

/// Runs one scene in the terminal until the user quits
pub struct TerminalApp {
    mode: Mode,
}

impl TerminalApp {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn run(&self) -> Result<RunSummary, SurfaceError> {
        let context = TerminalContext::init()?;

        match &self.mode {
            Mode::Cube(config) => run_cube(&context, config),
            Mode::Pong(config) => run_pong(&context, config),
        }
    }
}

fn run_cube(context: &TerminalContext, config: &CubeConfig) -> Result<RunSummary, SurfaceError> {
    let title = format!("{TITLE} | rotating cube | q/Esc to quit");
    let surface = context.create_surface(&title, config.viewport)?;

    let frames = FrameDriver::new(surface, WireframeScene::new(config))
        .with_frame_delay(config.frame_delay)
        .run()?;
    Ok(RunSummary {
        frames,
        score: None,
    })
}

fn run_pong(context: &TerminalContext, config: &PongConfig) -> Result<RunSummary, SurfaceError> {
    let title = format!("{TITLE} | pong | W/S and Up/Down to move, q/Esc to quit");
    let surface = context.create_surface(&title, PongScene::viewport())?;

    let (frames, scene) = FrameDriver::new(surface, PongScene::new())
        .with_frame_delay(config.frame_delay)
        .run_to_completion()?;
    Ok(RunSummary {
        frames,
        score: Some(scene.score()),
    })
}
