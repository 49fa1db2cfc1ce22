/// A chat line after routing on its leading slash-command token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Email(&'a str),
    Pdf(&'a str),
    Search(&'a str),
    /// No recognised command; the whole line goes to the default handler.
    Fallback(&'a str),
}

/// Only the first whitespace-delimited token is examined, and it must match exactly:
/// `/emails` or `/EMAIL` are plain text.
pub fn parse_command(text: &str) -> Command<'_> {
    let text = text.trim();
    let (token, rest) = match text.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (text, ""),
    };

    match token {
        "/email" => Command::Email(rest),
        "/pdf" => Command::Pdf(rest),
        "/search" => Command::Search(rest),
        _ => Command::Fallback(text),
    }
}
