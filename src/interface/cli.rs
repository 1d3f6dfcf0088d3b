use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{App, ArgMatches, ErrorKind};
use log::info;

use crate::demos::{self, DemoContext, DEMOS};
use crate::graphics::context::Window;
use crate::graphics::render_loop;

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub demo: String,
    pub width: u32,
    pub height: u32,
    pub debug: bool,
    pub assets: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Run(RunOptions),
}

/// `--assets` is global, so it may come before or after the subcommand.
fn assets(top: &ArgMatches, sub: &ArgMatches) -> PathBuf {
    let dir = [sub, top]
        .iter()
        .find(|m| m.occurrences_of("assets") > 0)
        .and_then(|m| m.value_of("assets"))
        .unwrap_or("assets");

    PathBuf::from(dir)
}

fn run_options(top: &ArgMatches, run: &ArgMatches) -> Result<RunOptions> {
    let demo = run.value_of("DEMO").unwrap_or_default().to_string();
    let width = value_t!(run, "width", u32).map_err(|e| anyhow!("{}", e.message))?;
    let height = value_t!(run, "height", u32).map_err(|e| anyhow!("{}", e.message))?;

    Ok(RunOptions {
        demo,
        width,
        height,
        debug: run.is_present("debug"),
        assets: assets(top, run),
    })
}

fn command(matches: &ArgMatches) -> Result<Command> {
    match matches.subcommand() {
        ("list", _) => Ok(Command::List),
        ("run", Some(run)) => Ok(Command::Run(run_options(matches, run)?)),
        (other, _) => Err(anyhow!("unknown command '{}'", other)),
    }
}

/// Help and version requests are reported through `clap::Error` but are not failures.
fn is_informational(kind: ErrorKind) -> bool {
    kind == ErrorKind::HelpDisplayed || kind == ErrorKind::VersionDisplayed
}

/// Keeps clap's own errors apart so that help and version output can exit normally.
fn parse_with_clap<I, T>(args: I) -> std::result::Result<Result<Command>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;

    Ok(command(&matches))
}

/// Parses a full command line, program name included.
pub fn parse<I, T>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    parse_with_clap(args).map_err(|e| anyhow!("{}", e.message))?
}

fn list() {
    let width = DEMOS.iter().map(|d| d.name.len()).max().unwrap_or(0);
    for demo in DEMOS.iter() {
        println!("{:width$}  {}", demo.name, demo.about, width = width);
    }
}

fn run(options: RunOptions) -> Result<()> {
    let demo = demos::find(&options.demo)
        .ok_or_else(|| anyhow!("unknown demo '{}', see `notes list`", options.demo))?;

    let settings = demo.window_settings(options.width, options.height, options.debug);
    let window = Window::create(&settings)
        .with_context(|| format!("could not open a window for {}", demo.name))?;

    let (width, height) = window.framebuffer_size();
    let context = DemoContext {
        name: demo.name,
        assets: options.assets,
        width,
        height,
    };

    info!("setting up {} ({}x{})", demo.title, width, height);
    let scene = (demo.setup)(&context).with_context(|| format!("{} failed to start", demo.name))?;

    if scene.finished() {
        info!("{} finished", demo.name);
        return Ok(());
    }

    render_loop::run(window, scene)
}

pub fn cli_main() -> Result<()> {
    let command = match parse_with_clap(std::env::args_os()) {
        Ok(parsed) => parsed?,
        Err(e) if is_informational(e.kind) => e.exit(),
        Err(e) => return Err(anyhow!("{}", e.message)),
    };

    match command {
        Command::List => {
            list();
            Ok(())
        }
        Command::Run(options) => run(options),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn list_takes_no_arguments() {
        assert_eq!(parse(&["notes", "list"]).unwrap(), Command::List);
    }

    #[test]
    fn run_defaults_to_a_640_by_480_window() {
        let command = parse(&["notes", "run", "hello"]).unwrap();

        assert_eq!(
            command,
            Command::Run(RunOptions {
                demo: String::from("hello"),
                width: 640,
                height: 480,
                debug: false,
                assets: PathBuf::from("assets"),
            })
        );
    }

    #[test]
    fn run_accepts_size_debug_and_assets() {
        let command = parse(&[
            "notes", "--assets", "/opt/notes", "run", "terrain", "--width", "1024", "--height", "768",
            "--debug",
        ])
        .unwrap();

        match command {
            Command::Run(options) => {
                assert_eq!(options.demo, "terrain");
                assert_eq!((options.width, options.height), (1024, 768));
                assert!(options.debug);
                assert_eq!(options.assets, PathBuf::from("/opt/notes"));
            }
            other => panic!("expected a run command, got {:?}", other),
        }
    }

    #[test]
    fn sizes_must_be_numbers() {
        assert!(parse(&["notes", "run", "hello", "--width", "wide"]).is_err());
    }

    #[test]
    fn run_needs_a_demo_name() {
        assert!(parse(&["notes", "run"]).is_err());
        assert!(parse(&["notes"]).is_err());
    }

    #[test]
    fn help_and_version_are_not_failures() {
        let help = parse_with_clap(&["notes", "--help"]).err().map(|e| e.kind);
        let version = parse_with_clap(&["notes", "--version"]).err().map(|e| e.kind);

        assert!(help.map_or(false, is_informational));
        assert!(version.map_or(false, is_informational));
    }

    #[test]
    fn usage_errors_are_failures() {
        let missing_demo = parse_with_clap(&["notes", "run"]).err().map(|e| e.kind);

        assert_eq!(missing_demo, Some(ErrorKind::MissingRequiredArgument));
        assert!(!is_informational(ErrorKind::MissingRequiredArgument));
    }
}
