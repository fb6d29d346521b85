/// Wirecube Terminal Demo
///
/// Renders the rotating wireframe cube (default) or the paddle game.
/// Controls:
///   - W/S, Up/Down: Move the paddles (pong)
///   - Q/ESC: Quit

use anyhow::Context;
use wirecube_terminal::cli::{self, Command};
use wirecube_terminal::logging::{init_logging, LoggingConfig};
use wirecube_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    let options = match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        Command::Run(options) => options,
    };

    init_logging(LoggingConfig {
        env_filter: None,
        log_file: options.log_file.clone(),
    })
    .context("failed to open log file")?;

    let app = TerminalApp::new(options.mode);
    let summary = app.run().context("renderer stopped")?;

    println!("{} Thank you for using Wirecube!", summary.report());
    Ok(())
}
