//! Line-oriented interactive session over a terminal surface.
//!
//! Each line is parsed into a [`Command`] and turned into controller events.
//! After every command the surface writes whatever changed.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::controller::{Controller, Event, Outcome};
use crate::error::Result;
use crate::model::{DisplayMode, Field};
use crate::storage::KeyValueStore;
use crate::surface::TerminalSurface;

/// Prompt written before each line is read.
pub const PROMPT: &str = "stockroom> ";

/// Help text for the `help` command.
pub const HELP: &str = "\
Commands:
  set <field> <value>          Type into a form field (name, quantity, price)
  submit                       Submit the form
  add <name> <quantity> <price>
                               Fill the form and submit it
  delete <id>                  Delete an item by id or id prefix
  clear                        Delete every item (asks first)
  mode quantity|value          Switch the chart mode
  list                         Show the table
  chart                        Show the chart
  help                         Show this help
  quit                         Leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace a form field's text.
    Set(Field, String),
    /// Submit the form.
    Submit,
    /// Fill all three fields and submit.
    Add {
        /// Name text.
        name: String,
        /// Quantity text.
        quantity: String,
        /// Price text.
        price: String,
    },
    /// Delete by id or unique id prefix.
    Delete(String),
    /// Clear all items.
    Clear,
    /// Switch chart mode.
    Mode(DisplayMode),
    /// Show the table.
    List,
    /// Show the chart.
    Chart,
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

/// A line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command \"{0}\" (try \"help\")")]
    Unknown(String),

    /// Wrong arguments for a known command.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// The field name is not one of the form fields.
    #[error("unknown field \"{0}\" (expected name, quantity, or price)")]
    Field(String),

    /// The mode name is not a display mode.
    #[error("unknown mode \"{0}\" (expected quantity or value)")]
    Mode(String),
}

/// Parse one line. Blank lines parse to `None`.
///
/// # Errors
///
/// Returns a [`CommandError`] describing what is wrong with the line.
pub fn parse(line: &str) -> std::result::Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(f, v)| (f, v.trim()));
            if field.is_empty() {
                return Err(CommandError::Usage("set <field> <value>"));
            }
            let field = field
                .parse::<Field>()
                .map_err(|_| CommandError::Field(field.to_string()))?;
            Command::Set(field, value.to_string())
        }
        "submit" => Command::Submit,
        "add" => {
            let Some((name, quantity, price)) = split_last_word(rest).and_then(|(head, price)| {
                split_last_word(head).map(|(name, quantity)| (name, quantity, price))
            }) else {
                return Err(CommandError::Usage("add <name> <quantity> <price>"));
            };
            Command::Add {
                name: name.to_string(),
                quantity: quantity.to_string(),
                price: price.to_string(),
            }
        }
        "delete" | "rm" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("delete <id>"));
            }
            Command::Delete(rest.to_string())
        }
        "clear" => Command::Clear,
        "mode" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("mode quantity|value"));
            }
            let mode = rest
                .parse::<DisplayMode>()
                .map_err(|_| CommandError::Mode(rest.to_string()))?;
            Command::Mode(mode)
        }
        "list" | "ls" => Command::List,
        "chart" => Command::Chart,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// Split off the last whitespace-separated word, trimming both halves.
fn split_last_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_end();
    let at = input.rfind(char::is_whitespace)?;
    Some((input[..at].trim_end(), input[at..].trim_start()))
}

/// A short message for an outcome, if it warrants one.
#[must_use]
pub fn describe(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Added(item) => Some(format!("Added {} ({})", item.name, item.id.short())),
        Outcome::Deleted(item) => Some(format!("Deleted {}", item.name)),
        Outcome::NotFound(id) => Some(format!("No item with id {id}")),
        Outcome::Cleared(count) => Some(format!("Cleared {count} item(s)")),
        Outcome::ClearDeclined => Some("Clear cancelled".to_string()),
        Outcome::AlreadyEmpty => Some("Inventory is already empty".to_string()),
        Outcome::Rejected(_) | Outcome::FieldCleared(_) | Outcome::ModeChanged(_) => None,
    }
}

/// Whether the session keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive session driving a controller.
#[derive(Debug)]
pub struct Shell<K, W, R> {
    controller: Controller<K, TerminalSurface<W, R>>,
}

impl<K, W, R> Shell<K, W, R>
where
    K: KeyValueStore,
    W: Write,
    R: BufRead,
{
    /// Wrap a mounted controller.
    pub fn new(controller: Controller<K, TerminalSurface<W, R>>) -> Self {
        Self { controller }
    }

    /// Read and run commands until `quit` or end of input.
    ///
    /// Save failures are reported and the session continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        self.surface().say("Type \"help\" for commands.")?;
        self.surface().present()?;

        loop {
            self.surface().prompt(PROMPT)?;
            let Some(line) = self.surface().read_line()? else {
                debug!("End of input");
                break;
            };

            let flow = match parse(&line) {
                Ok(Some(command)) => self.execute(command)?,
                Ok(None) => Flow::Continue,
                Err(e) => {
                    self.surface().say(&e.to_string())?;
                    Flow::Continue
                }
            };

            self.surface().present()?;
            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Run a single command.
    fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "Shell command");
        match command {
            Command::Set(field, value) => {
                self.surface().form_mut().set_value(field, value);
                self.dispatch(Event::FieldInput(field))?;
            }
            Command::Submit => self.dispatch(Event::Submit)?,
            Command::Add {
                name,
                quantity,
                price,
            } => {
                for (field, value) in Field::ALL.into_iter().zip([name, quantity, price]) {
                    self.surface().form_mut().set_value(field, value);
                    self.dispatch(Event::FieldInput(field))?;
                }
                self.dispatch(Event::Submit)?;
            }
            Command::Delete(prefix) => match self.controller.store().resolve_id(&prefix) {
                Some(id) => self.dispatch(Event::Delete(id))?,
                None => self
                    .surface()
                    .say(&format!("No item matches \"{prefix}\""))?,
            },
            Command::Clear => self.dispatch(Event::ClearAll)?,
            Command::Mode(mode) => self.dispatch(Event::SetMode(mode))?,
            Command::List => self.surface().invalidate_table(),
            Command::Chart => self.surface().invalidate_chart(),
            Command::Help => self.surface().say(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Dispatch an event and report the outcome. Save failures are
    /// reported instead of ending the session.
    fn dispatch(&mut self, event: Event) -> Result<()> {
        match self.controller.dispatch(event) {
            Ok(outcome) => {
                if let Some(message) = describe(&outcome) {
                    self.surface().say(&message)?;
                }
                Ok(())
            }
            Err(e) if e.is_persist_error() => {
                warn!(error = %e, "Change not saved");
                self.surface().say(&format!("error: {e}"))
            }
            Err(e) => Err(e),
        }
    }

    fn surface(&mut self) -> &mut TerminalSurface<W, R> {
        self.controller.surface_mut()
    }

    /// The controller behind the session.
    pub fn controller(&self) -> &Controller<K, TerminalSurface<W, R>> {
        &self.controller
    }

    /// End the session, returning the controller.
    pub fn into_controller(self) -> Controller<K, TerminalSurface<W, R>> {
        self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NumberFormat;
    use crate::model::{Item, ItemId};
    use crate::persistence::Persistence;
    use crate::storage::MemoryStore;
    use crate::store::InventoryStore;
    use crate::view::ChartStyle;
    use std::io::Cursor;

    fn run_session(kv: MemoryStore, input: &str) -> (String, usize) {
        let surface = TerminalSurface::new(Vec::new(), Cursor::new(input.as_bytes().to_vec()));
        let store = InventoryStore::open(Persistence::new(kv));
        let controller =
            Controller::mount_with(surface, store, NumberFormat::default(), ChartStyle::default())
                .unwrap();

        let mut shell = Shell::new(controller);
        shell.run().unwrap();

        let controller = shell.into_controller();
        let items = controller.store().len();
        let output = String::from_utf8(controller.into_surface().into_output()).unwrap();
        (output, items)
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            parse("set name Hex bolts").unwrap(),
            Some(Command::Set(Field::Name, "Hex bolts".to_string()))
        );
        assert_eq!(
            parse("set price").unwrap(),
            Some(Command::Set(Field::Price, String::new()))
        );
    }

    #[test]
    fn test_parse_add_name_with_spaces() {
        assert_eq!(
            parse("add Hex bolts 100 0.25").unwrap(),
            Some(Command::Add {
                name: "Hex bolts".to_string(),
                quantity: "100".to_string(),
                price: "0.25".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_add_extra_whitespace() {
        let expected = Some(Command::Add {
            name: "Bolts".to_string(),
            quantity: "100".to_string(),
            price: "0.25".to_string(),
        });
        assert_eq!(parse("add Bolts 100  0.25").unwrap(), expected);
        assert_eq!(parse("add Bolts\t100 \t 0.25  ").unwrap(), expected);
        assert_eq!(
            parse("add Hex  bolts   100 0.25").unwrap(),
            Some(Command::Add {
                name: "Hex  bolts".to_string(),
                quantity: "100".to_string(),
                price: "0.25".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("frobnicate"), Err(CommandError::Unknown("frobnicate".to_string())));
        assert_eq!(parse("add 1 2"), Err(CommandError::Usage("add <name> <quantity> <price>")));
        assert_eq!(parse("set colour red"), Err(CommandError::Field("colour".to_string())));
        assert_eq!(parse("mode pie"), Err(CommandError::Mode("pie".to_string())));
        assert_eq!(parse("delete"), Err(CommandError::Usage("delete <id>")));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("SUBMIT").unwrap(), Some(Command::Submit));
        assert_eq!(parse("mode value").unwrap(), Some(Command::Mode(DisplayMode::Value)));
        assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse("ls").unwrap(), Some(Command::List));
    }

    #[test]
    fn test_describe() {
        let item = Item {
            id: ItemId::from("0123456789abcdef"),
            name: "Bolts".to_string(),
            quantity: 1.0,
            price: 1.0,
        };
        assert_eq!(describe(&Outcome::Added(item)).as_deref(), Some("Added Bolts (01234567)"));
        assert_eq!(describe(&Outcome::Cleared(2)).as_deref(), Some("Cleared 2 item(s)"));
        assert_eq!(describe(&Outcome::ModeChanged(DisplayMode::Value)), None);
    }

    #[test]
    fn test_session_add_and_mode() {
        let (output, items) = run_session(MemoryStore::new(), "add Bolts 100 0.25\nmode value\nquit\n");

        assert_eq!(items, 1);
        assert!(output.contains("Added Bolts"));
        assert!(output.contains("$25.00"));
        assert!(output.contains("Total Value Overview"));
    }

    #[test]
    fn test_session_form_errors_then_fix() {
        let input = "set name Nuts\nset quantity lots\nset price 1\nsubmit\nset quantity 3\nsubmit\n";
        let (output, items) = run_session(MemoryStore::new(), input);

        assert!(output.contains("Quantity must be a valid number"));
        assert!(output.contains("Added Nuts"));
        assert_eq!(items, 1);
    }

    #[test]
    fn test_session_add_clears_stale_errors() {
        let (output, items) = run_session(MemoryStore::new(), "add Nuts x 1\nadd Nuts 5 -1\n");

        assert_eq!(output.matches("Quantity must be a valid number").count(), 1);
        assert_eq!(output.matches("Price cannot be negative").count(), 1);
        assert_eq!(items, 0);
    }

    #[test]
    fn test_session_clear_asks() {
        let (output, items) = run_session(MemoryStore::new(), "add Bolts 1 1\nclear\nn\n");
        assert!(output.contains("Are you sure you want to clear all items? [y/N]"));
        assert!(output.contains("Clear cancelled"));
        assert_eq!(items, 1);

        let (_, items) = run_session(MemoryStore::new(), "add Bolts 1 1\nclear\ny\n");
        assert_eq!(items, 0);
    }

    #[test]
    fn test_session_unknown_delete() {
        let (output, _) = run_session(MemoryStore::new(), "delete abc\n");
        assert!(output.contains("No item matches \"abc\""));
    }

    #[test]
    fn test_session_reports_save_failure_and_continues() {
        let (output, items) = run_session(MemoryStore::with_quota(8), "add Bolts 1 1\nhelp\n");
        assert!(output.contains("error:"));
        assert!(output.contains("Commands:"));
        assert_eq!(items, 0);
    }
}
