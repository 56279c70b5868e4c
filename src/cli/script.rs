//! Session command language shared by `run` and `repl`
//!
//! One command per line:
//!
//! ```text
//! select <id>     deselect      add <name>     rename <name>
//! remove          delete <id>   find <id>      reset
//! show            quit | exit
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use thiserror::Error;

use crate::application::{ApplicationResult, EditorSession};
use crate::domain::{InvalidNodeId, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Select(NodeId),
    Deselect,
    /// Name is passed through as typed; the session rejects empty names
    Add(String),
    Rename(String),
    /// Remove the selected node
    Remove,
    /// Remove a node by id
    Delete(NodeId),
    Find(NodeId),
    Reset,
    Show,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing argument")]
    MissingArgument { command: &'static str },

    #[error("{command}: unexpected argument: {arg}")]
    UnexpectedArgument { command: &'static str, arg: String },

    #[error(transparent)]
    InvalidId(#[from] InvalidNodeId),
}

/// Parse one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "select" => SessionCommand::Select(id_arg("select", rest)?),
        "delete" => SessionCommand::Delete(id_arg("delete", rest)?),
        "find" => SessionCommand::Find(id_arg("find", rest)?),
        "add" => SessionCommand::Add(rest.to_string()),
        "rename" => SessionCommand::Rename(rest.to_string()),
        "deselect" => no_arg("deselect", rest, SessionCommand::Deselect)?,
        "remove" => no_arg("remove", rest, SessionCommand::Remove)?,
        "reset" => no_arg("reset", rest, SessionCommand::Reset)?,
        "show" => no_arg("show", rest, SessionCommand::Show)?,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn id_arg(command: &'static str, rest: &str) -> Result<NodeId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument { command });
    }
    Ok(rest.parse()?)
}

fn no_arg(
    command: &'static str,
    rest: &str,
    parsed: SessionCommand,
) -> Result<SessionCommand, ParseError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ParseError::UnexpectedArgument {
            command,
            arg: rest.to_string(),
        })
    }
}

/// What a command did, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(NodeId),
    Deselected,
    Added(NodeId),
    Renamed(NodeId),
    Removed(NodeId),
    Found {
        id: NodeId,
        name: String,
        parent: Option<NodeId>,
    },
    Missing(NodeId),
    Reset,
    Show,
    Quit,
}

/// Apply a parsed command to the session.
pub fn execute(session: &mut EditorSession, command: &SessionCommand) -> ApplicationResult<Outcome> {
    let outcome = match command {
        SessionCommand::Select(id) => {
            session.select(*id)?;
            Outcome::Selected(*id)
        }
        SessionCommand::Deselect => {
            session.deselect();
            Outcome::Deselected
        }
        SessionCommand::Add(name) => Outcome::Added(session.add(name)?),
        SessionCommand::Rename(name) => Outcome::Renamed(session.rename(name)?),
        SessionCommand::Remove => Outcome::Removed(session.remove()?),
        SessionCommand::Delete(id) => {
            session.remove_node(*id)?;
            Outcome::Removed(*id)
        }
        SessionCommand::Find(id) => match session.find(*id) {
            Some(found) => Outcome::Found {
                id: *id,
                name: found.node.name().to_string(),
                parent: found.parent_id(),
            },
            None => Outcome::Missing(*id),
        },
        SessionCommand::Reset => {
            session.reset();
            Outcome::Reset
        }
        SessionCommand::Show => Outcome::Show,
        SessionCommand::Quit => Outcome::Quit,
    };
    Ok(outcome)
}
