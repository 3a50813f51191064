//! # Intents and Screen Events
//!
//! Everything the screen reacts to arrives as a [`ScreenEvent`] on one
//! channel, so the store sees one event at a time.
//!
//! ## Command Syntax
//! ```text
//! scan                 open (or close) a scan session
//! cancel               close the scan session
//! list                 re-render the list
//! type <id> <text>     type into row <id>'s name field
//! modify <id>          apply row <id>'s typed text as its name
//! edit <id> <name>     rename row <id> in one step
//! delete <id>          remove row <id>
//! grant                ask for camera permission again
//! quit                 leave the screen
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use shelfscan_core::ProductId;

use crate::error::ScreenError;

/// A user intent forwarded by the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    StartScan,
    CancelScan,
    List,
    Type { id: ProductId, text: String },
    Modify { id: ProductId },
    Edit { id: ProductId, name: String },
    Delete { id: ProductId },
    RequestPermission,
    Quit,
}

/// One input to the screen loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// A raw terminal line, classified when the screen handles it.
    Line(String),

    /// The user asked for something.
    Intent(Intent),

    /// The barcode source decoded a payload.
    Decoded(String),

    /// Input that could not be turned into an intent.
    Invalid(String),

    /// The input stream ended.
    InputClosed,
}

/// Splits `"<id> <rest>"`; `rest` may be empty.
fn id_and_rest(args: &str, command: &str) -> Result<(ProductId, String), ScreenError> {
    let args = args.trim_start();
    let (id, rest) = match args.split_once(char::is_whitespace) {
        Some((id, rest)) => (id, rest.trim()),
        None => (args, ""),
    };
    if id.is_empty() {
        return Err(ScreenError::InvalidIntent(format!("usage: {command} <id> ...")));
    }
    let id = id
        .parse::<ProductId>()
        .map_err(|_| ScreenError::InvalidIntent(format!("'{id}' is not a product id")))?;
    Ok((id, rest.to_string()))
}

fn id_only(args: &str, command: &str) -> Result<ProductId, ScreenError> {
    let (id, rest) = id_and_rest(args, command)?;
    if !rest.is_empty() {
        return Err(ScreenError::InvalidIntent(format!("usage: {command} <id>")));
    }
    Ok(id)
}

impl FromStr for Intent {
    type Err = ScreenError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match command.to_lowercase().as_str() {
            "scan" => Ok(Intent::StartScan),
            "cancel" => Ok(Intent::CancelScan),
            "list" | "ls" => Ok(Intent::List),
            "type" => {
                let (id, text) = id_and_rest(args, "type")?;
                Ok(Intent::Type { id, text })
            }
            "modify" => Ok(Intent::Modify {
                id: id_only(args, "modify")?,
            }),
            "edit" | "rename" => {
                let (id, name) = id_and_rest(args, "edit")?;
                Ok(Intent::Edit { id, name })
            }
            "delete" | "rm" => Ok(Intent::Delete {
                id: id_only(args, "delete")?,
            }),
            "grant" | "permission" => Ok(Intent::RequestPermission),
            "quit" | "exit" | "q" => Ok(Intent::Quit),
            "" => Err(ScreenError::InvalidIntent("empty command".to_string())),
            other => Err(ScreenError::InvalidIntent(format!(
                "unknown command '{other}'"
            ))),
        }
    }
}
