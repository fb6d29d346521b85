/// Example: Spin the cube under a tilted camera
///
/// Usage: cargo run --example tilted_camera -- [X,Y,Z]

use std::env;
use std::time::Duration;

use anyhow::Context;
use wirecube_core::config::parse_vector3;
use wirecube_core::CubeConfig;
use wirecube_terminal::{Mode, TerminalApp};

fn main() -> anyhow::Result<()> {
    let rotation = match env::args().nth(1) {
        Some(arg) => parse_vector3(&arg).context("camera rotation must look like X,Y,Z")?,
        None => nalgebra::Vector3::new(0.15, -0.2, 0.0),
    };

    let config = CubeConfig {
        camera_rotation: rotation,
        frame_delay: Duration::from_millis(50),
        ..CubeConfig::default()
    };
    config.validate()?;

    let summary = TerminalApp::new(Mode::Cube(config)).run()?;
    println!("{}", summary.report());
    Ok(())
}
