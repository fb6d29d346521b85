/// Command-line parsing
use std::path::PathBuf;

use nalgebra::Point3;
use wirecube_core::config::{parse_f32, parse_millis, parse_vector3, parse_viewport};
use wirecube_core::{ConfigError, CubeConfig, PongConfig};

pub const USAGE: &str = "\
Usage: wirecube-terminal [cube|pong] [options]

Scenes:
  cube                      rotating wireframe cube (default)
  pong                      two-paddle ball game (W/S and Up/Down)

Options:
  --viewport WxH            logical viewport size (cube, default 640x640)
  --camera X,Y,Z            camera position (cube, default 0,0,-24)
  --camera-rotation X,Y,Z   camera rotation in radians (cube, z is ignored)
  --focal F                 focal length (cube, default 4)
  --step RADIANS            rotation per tick (cube, default pi/64)
  --delay-ms N              minimum milliseconds per frame (both scenes)
  --log-file PATH           write logs to PATH instead of stderr (both scenes)
  -h, --help                show this help

Press q or Esc to quit.";

const CUBE_ONLY: [&str; 5] = [
    "--viewport",
    "--camera",
    "--camera-rotation",
    "--focal",
    "--step",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Cube(CubeConfig),
    Pong(PongConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub mode: Mode,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Options),
    Help,
}

/// Parse arguments, excluding the program name
pub fn parse_args<I, S>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    let mut iter = args.iter().peekable();

    let mut pong = false;
    if let Some(first) = iter.peek() {
        match first.as_str() {
            "cube" => {
                iter.next();
            }
            "pong" => {
                pong = true;
                iter.next();
            }
            _ => {}
        }
    }

    let mut cube = CubeConfig::default();
    let mut pong_config = PongConfig::default();
    let mut log_file = None;
    let mut cube_flag = None;

    while let Some(flag) = iter.next() {
        if flag == "-h" || flag == "--help" {
            return Ok(Command::Help);
        }
        if CUBE_ONLY.contains(&flag.as_str()) {
            cube_flag.get_or_insert(flag.as_str());
        }

        let mut value = || {
            iter.next()
                .map(String::as_str)
                .ok_or_else(|| ConfigError::new(flag.trim_start_matches('-'), "missing value"))
        };

        match flag.as_str() {
            "--viewport" => cube.viewport = parse_viewport(value()?)?,
            "--camera" => cube.camera_position = Point3::from(parse_vector3(value()?)?),
            "--camera-rotation" => cube.camera_rotation = parse_vector3(value()?)?,
            "--focal" => cube.focal_length = parse_f32(value()?)?,
            "--step" => cube.angle_step = parse_f32(value()?)?,
            "--delay-ms" => {
                let delay = parse_millis(value()?)?;
                cube.frame_delay = delay;
                pong_config.frame_delay = delay;
            }
            "--log-file" => log_file = Some(PathBuf::from(value()?)),
            other => {
                return Err(ConfigError::new("argument", format!("unknown option {other:?}")))
            }
        }
    }

    let mode = if pong {
        if let Some(flag) = cube_flag {
            return Err(ConfigError::new(
                "argument",
                format!("{flag} only applies to the cube scene"),
            ));
        }
        Mode::Pong(pong_config)
    } else {
        cube.validate()?;
        Mode::Cube(cube)
    };

    Ok(Command::Run(Options { mode, log_file }))
}
