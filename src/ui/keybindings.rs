// Command bindings for the interactive portfolio browser
// Maps typed input lines to gallery actions
//
// Bindings:
// - n / next: Next page
// - p / prev: Previous page
// - g <n> / page <n>: Jump to page n
// - c <name> / category <name>: Filter by category
// - a / all: Show all categories
// - s <term> / search <term>: Filter by title or description (no term clears it)
// - m / mode: Toggle grid/list layout
// - u / url: Print the shareable link
// - h / help / ?: Show bindings
// - q / quit: Leave the browser

/// A gallery action requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PrevPage,
    GoToPage(usize),
    Category(String),
    AllCategories,
    Search(String),
    ToggleMode,
    ShowUrl,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  n, next              next page
  p, prev              previous page
  g, page <n>          jump to page n
  c, category <name>   filter by category
  a, all               show all categories
  s, search [term]     filter by title/description (empty clears)
  m, mode              toggle grid/list layout
  u, url               print the shareable link
  h, help              show this help
  q, quit              leave";

/// Parse one input line. Blank lines and unknown commands give `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "n" | "next" => Command::NextPage,
        "p" | "prev" => Command::PrevPage,
        "g" | "page" => Command::GoToPage(rest.parse().ok()?),
        "c" | "category" if !rest.is_empty() => Command::Category(rest.to_string()),
        "a" | "all" => Command::AllCategories,
        "s" | "search" => Command::Search(rest.to_string()),
        "m" | "mode" => Command::ToggleMode,
        "u" | "url" => Command::ShowUrl,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}
