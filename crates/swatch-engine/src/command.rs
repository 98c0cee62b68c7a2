use thiserror::Error;

/// An axis named on the command line, by position or by option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisRef {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select { axis: AxisRef, value: String },
    Clear { axis: AxisRef },
    /// One entry per axis, `-` for unset.
    Set(Vec<Option<String>>),
    Variant,
    Availability(Option<AxisRef>),
    Show,
    Table,
    Render,
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing {argument} for '{command}'")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("Unterminated quote")]
    UnterminatedQuote,
}

pub const HELP: &str = "\
Commands:
  select <axis> <value>   choose a value (axis by index or name)
  clear <axis>            unset an axis
  set <value|-> ...       replace the whole selection, '-' leaves an axis unset
  variant                 show the resolved variant
  availability [axis]     show enabled values per axis
  show                    show the full variant change plan
  table                   list axes and variants
  render                  fetch the server-rendered fragment
  help                    show this message";

/// Split a line into words; double quotes group words containing spaces.
fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn axis_ref(token: &str) -> AxisRef {
    token
        .parse::<usize>()
        .map(AxisRef::Index)
        .unwrap_or_else(|_| AxisRef::Name(token.to_string()))
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Err(CommandError::Empty);
    };

    match head.to_lowercase().as_str() {
        "select" | "pick" => {
            let axis = args.first().ok_or(CommandError::MissingArgument {
                command: "select",
                argument: "axis",
            })?;
            if args.len() < 2 {
                return Err(CommandError::MissingArgument {
                    command: "select",
                    argument: "value",
                });
            }
            Ok(Command::Select {
                axis: axis_ref(axis),
                value: args[1..].join(" "),
            })
        }
        "clear" | "unset" => {
            let axis = args.first().ok_or(CommandError::MissingArgument {
                command: "clear",
                argument: "axis",
            })?;
            Ok(Command::Clear {
                axis: axis_ref(axis),
            })
        }
        "set" => Ok(Command::Set(
            args.iter()
                .map(|arg| (arg != "-").then(|| arg.clone()))
                .collect(),
        )),
        "variant" => Ok(Command::Variant),
        "availability" | "avail" => Ok(Command::Availability(
            args.first().map(|arg| axis_ref(arg)),
        )),
        "show" => Ok(Command::Show),
        "table" => Ok(Command::Table),
        "render" => Ok(Command::Render),
        "help" | "?" => Ok(Command::Help),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"select Color "Navy Blue""#).unwrap(),
            vec!["select", "Color", "Navy Blue"]
        );
        assert_eq!(tokenize(r#"set "" S"#).unwrap(), vec!["set", "", "S"]);
        assert_eq!(
            tokenize(r#"select 0 "Red"#),
            Err(CommandError::UnterminatedQuote)
        );
    }

    #[test]
    fn test_axis_ref() {
        assert_eq!(axis_ref("2"), AxisRef::Index(2));
        assert_eq!(axis_ref("Size"), AxisRef::Name("Size".into()));
    }
}
