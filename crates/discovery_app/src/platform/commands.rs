use discovery_core::ItemId;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text replaces the query being typed.
    Type(String),
    /// Commit immediately; `None` submits the text typed so far.
    Submit(Option<String>),
    Next,
    Previous,
    Page(u32),
    Clear,
    Dismiss,
    /// Open the details of the n-th suggestion (1-based).
    Pick(usize),
    Details(ItemId),
    Theme,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command :{0} (try :help)")]
    Unknown(String),
    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("not a number: {0}")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
type text to search as you type, or use a command:
  :go [text]   search now
  :n / :p      next / previous page
  :page N      jump to page N
  :clear       back to trending
  :pick N      open suggestion N
  :watch ID    show details and player link for a title id
  :dismiss     hide suggestions
  :theme       toggle light/dark
  :q           quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Type(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "go" | "search" => Ok(Command::Submit((!arg.is_empty()).then(|| arg.to_string()))),
        "n" | "next" => Ok(Command::Next),
        "p" | "prev" => Ok(Command::Previous),
        "page" => number(arg, "page").map(Command::Page),
        "clear" => Ok(Command::Clear),
        "dismiss" => Ok(Command::Dismiss),
        "pick" => number(arg, "pick").map(Command::Pick),
        "watch" | "details" => number(arg, "watch").map(Command::Details),
        "theme" => Ok(Command::Theme),
        "help" | "h" => Ok(Command::Help),
        "q" | "quit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn number<T: std::str::FromStr>(arg: &str, name: &'static str) -> Result<T, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    arg.parse().map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}
