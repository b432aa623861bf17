//! Crewmate CLI - procedural character renderer
//!
//! Renders single frames and bakes walk-cycle spritesheets from a preset
//! plus optional appearance overrides.

use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli_args;

use cli_args::{Cli, Commands};
use crewmate_cli::commands;

fn init_logging(verbose: bool, no_color: bool) {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install logger: {}", e);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose, cli.no_color);

    let result = match cli.command {
        Commands::Render {
            preset,
            appearance,
            animation,
            frame,
            direction,
            output,
        } => commands::render::run(
            &preset,
            appearance.as_deref(),
            &animation,
            frame,
            &direction,
            &output,
        ),
        Commands::Sheet {
            preset,
            appearance,
            frames,
            dirs,
            ssaa,
            output,
            metadata,
        } => commands::sheet::run(
            &preset,
            appearance.as_deref(),
            frames,
            dirs,
            ssaa,
            &output,
            metadata.as_deref(),
        ),
        Commands::Presets { json } => commands::presets::run(json),
        Commands::Validate {
            appearance,
            preset,
            json,
        } => commands::validate::run(&appearance, &preset, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render_defaults() {
        let cli = Cli::try_parse_from(["crewmate", "render", "-o", "frame.png"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Render {
                preset,
                appearance,
                animation,
                frame,
                direction,
                output,
            } => {
                assert_eq!(preset, "classic");
                assert!(appearance.is_none());
                assert_eq!(animation, "idle");
                assert_eq!(frame, 0);
                assert_eq!(direction, "right");
                assert_eq!(output, "frame.png");
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_direction() {
        let err = Cli::try_parse_from([
            "crewmate",
            "render",
            "--direction",
            "north",
            "-o",
            "frame.png",
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("north"));
    }

    #[test]
    fn test_cli_parses_sheet() {
        let cli = Cli::try_parse_from([
            "crewmate",
            "sheet",
            "--preset",
            "heroic",
            "--frames",
            "8",
            "--ssaa",
            "2",
            "-o",
            "sheet.png",
            "--metadata",
            "sheet.json",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Sheet {
                preset,
                frames,
                dirs,
                ssaa,
                metadata,
                ..
            } => {
                assert_eq!(preset, "heroic");
                assert_eq!(frames, 8);
                assert_eq!(dirs, 4);
                assert_eq!(ssaa, 2);
                assert_eq!(metadata.as_deref(), Some("sheet.json"));
            }
            _ => panic!("expected sheet command"),
        }
    }

    #[test]
    fn test_cli_sheet_requires_frames() {
        let err = Cli::try_parse_from(["crewmate", "sheet", "-o", "sheet.png"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--frames"));
    }

    #[test]
    fn test_cli_parses_validate_and_presets() {
        let cli = Cli::try_parse_from([
            "crewmate",
            "--no-color",
            "validate",
            "--appearance",
            "look.json",
            "--json",
        ])
        .unwrap();
        assert!(cli.no_color);
        match cli.command {
            Commands::Validate {
                appearance,
                preset,
                json,
            } => {
                assert_eq!(appearance, "look.json");
                assert_eq!(preset, "classic");
                assert!(json);
            }
            _ => panic!("expected validate command"),
        }

        let cli = Cli::try_parse_from(["crewmate", "presets"]).unwrap();
        assert!(matches!(cli.command, Commands::Presets { json: false }));
    }
}
