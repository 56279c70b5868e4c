//! Command dispatch: the caller side of the editing engine

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::EditorSession;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::render;
use crate::cli::script::{execute, parse_line, Outcome};
use crate::config::{global_config_path, RenderConfig, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    // Completion does not need settings
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(style) = cli.style {
        settings.render.style = style.into();
    }
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Show) | None => _show(&settings),
        Some(Commands::Run { script, quiet }) => _run(&settings, script, *quiet),
        Some(Commands::Repl) => _repl(&settings),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&settings),
            ConfigCommands::Path => _config_path(),
        },
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

#[instrument(skip(settings))]
fn _show(settings: &Settings) -> CliResult<()> {
    let session = EditorSession::new(settings.seed());
    print!(
        "{}",
        render(session.forest(), session.selection(), &settings.render)
    );
    Ok(())
}

#[instrument(skip(settings))]
fn _run(settings: &Settings, script: &Path, quiet: bool) -> CliResult<()> {
    let mut session = EditorSession::new(settings.seed());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if script == Path::new("-") {
        let stdin = io::stdin();
        run_session(&mut session, stdin.lock(), &mut out, &settings.render, false)?;
    } else {
        let file = File::open(script)
            .map_err(|e| CliError::io(format!("open script {}", script.display()), e))?;
        run_session(&mut session, BufReader::new(file), &mut out, &settings.render, false)?;
    }

    if !quiet {
        write!(
            out,
            "{}",
            render(session.forest(), session.selection(), &settings.render)
        )
        .map_err(|e| CliError::io("write output", e))?;
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _repl(settings: &Settings) -> CliResult<()> {
    let mut session = EditorSession::new(settings.seed());
    output::header("treedit: select <id> | deselect | add <name> | rename <name> | remove | delete <id> | find <id> | reset | show | quit");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(
        out,
        "{}",
        render(session.forest(), session.selection(), &settings.render)
    )
    .map_err(|e| CliError::io("write output", e))?;
    run_session(&mut session, stdin.lock(), &mut out, &settings.render, true)
}

fn _config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn _config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::info(&path.display()),
        None => output::warning("no config directory available on this platform"),
    }
    Ok(())
}

/// Feed every line of `input` to the session, reporting to `out`.
///
/// Engine and validation failures are reported as warnings and the session
/// continues. Malformed lines abort a script but only warn in interactive mode.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut EditorSession,
    input: R,
    out: &mut W,
    render_config: &RenderConfig,
    interactive: bool,
) -> CliResult<()> {
    let write_err = |e: io::Error| CliError::io("write output", e);
    if interactive {
        output::prompt(">");
    }
    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(|e| CliError::io("read input", e))?;
        let line_no = index + 1;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                if interactive {
                    output::prompt(">");
                }
                continue;
            }
            Err(e) if interactive => {
                output::warning(&e);
                output::prompt(">");
                continue;
            }
            Err(source) => return Err(CliError::Script { line: line_no, source }),
        };
        debug!("line {}: {:?}", line_no, command);

        match execute(session, &command) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Show) => write!(
                out,
                "{}",
                render(session.forest(), session.selection(), render_config)
            )
            .map_err(write_err)?,
            Ok(outcome) => writeln!(out, "{}", describe(&outcome)).map_err(write_err)?,
            Err(e) if e.is_recoverable() => {
                if interactive {
                    output::warning(&e);
                } else {
                    output::warning(&format!("line {line_no}: {e}"));
                }
            }
            Err(e) => return Err(e.into()),
        }
        if interactive {
            output::prompt(">");
        }
    }
    Ok(())
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Selected(id) => format!("selected {id}"),
        Outcome::Deselected => "deselected".to_string(),
        Outcome::Added(id) => format!("added {id}"),
        Outcome::Renamed(id) => format!("renamed {id}"),
        Outcome::Removed(id) => format!("removed {id}"),
        Outcome::Found { id, name, parent } => match parent {
            Some(parent) => format!("{id}: {name} (parent {parent})"),
            None => format!("{id}: {name} (root)"),
        },
        Outcome::Missing(id) => format!("{id}: not found"),
        Outcome::Reset => "reset".to_string(),
        Outcome::Show | Outcome::Quit => String::new(),
    }
}
