//! Line commands understood by the terminal front end

use crate::models::{is_other, Filter, TransactionForm, TransactionId};

/// Date token replaced by the form's preset date
pub const TODAY: &str = "today";

pub const HELP: &str = "\
Commands:
  add <income|expense> <amount> <YYYY-MM-DD|today> <category>[:detail] <description...>
  filter <all|income|expense>
  delete <id>
  category <name>
  list
  help
  quit";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(TransactionForm),
    Filter(Filter),
    Delete(TransactionId),
    Category(String),
    List,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or_else(|| "Empty command".to_string())?;

        match verb.to_lowercase().as_str() {
            "add" => {
                let mut next = || tokens.next().unwrap_or_default().to_string();
                let tx_type = next();
                let amount = next();
                let date = next();
                let (category, category_detail) = split_category(&next());
                let description = tokens.collect::<Vec<_>>().join(" ");
                Ok(Command::Add(TransactionForm {
                    description,
                    amount,
                    tx_type,
                    category,
                    category_detail,
                    date,
                }))
            }
            "filter" => {
                let filter = tokens.next().unwrap_or("all");
                Ok(Command::Filter(filter.parse()?))
            }
            "delete" | "rm" => {
                let raw = tokens
                    .next()
                    .ok_or_else(|| "Usage: delete <id>".to_string())?;
                let id = raw
                    .trim_start_matches('#')
                    .parse::<TransactionId>()
                    .map_err(|_| format!("Invalid transaction id: {}", raw))?;
                Ok(Command::Delete(id))
            }
            "category" => Ok(Command::Category(
                tokens.next().unwrap_or_default().to_string(),
            )),
            "list" | "ls" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

/// `other:Gym` selects the `other` category with the detail `Gym`
fn split_category(token: &str) -> (String, String) {
    match token.split_once(':') {
        Some((category, detail)) if is_other(category) => {
            (category.to_string(), detail.to_string())
        }
        _ => (token.to_string(), String::new()),
    }
}
