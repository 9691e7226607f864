//! Message parser - Splits prefixed bodies into trigger key and arguments

use regex_lite::Regex;
use crate::application::errors::ConfigError;

/// Matches the command prefix at the start of a body
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    pattern: Regex,
}

impl PrefixMatcher {
    /// Build `^[...]` from a set of prefix characters
    pub fn from_chars(chars: &str) -> Result<Self, ConfigError> {
        if chars.is_empty() {
            return Err(ConfigError::InvalidValue("prefix set is empty".to_string()));
        }
        let class: String = chars
            .chars()
            .map(|c| regex_lite::escape(c.encode_utf8(&mut [0; 4])))
            .collect();
        let pattern = Regex::new(&format!("^[{}]", class))
            .map_err(|e| ConfigError::InvalidValue(format!("prefix {:?}: {}", chars, e)))?;
        Ok(Self { pattern })
    }

    /// Body with the matched prefix removed
    pub fn strip<'a>(&self, body: &'a str) -> Option<&'a str> {
        self.pattern
            .find(body)
            .filter(|m| m.start() == 0)
            .map(|m| &body[m.end()..])
    }
}

/// A prefixed body split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First token, lowercased
    pub key: String,
    pub args: Vec<String>,
    /// Arguments joined by single spaces
    pub text: String,
}

/// Parses incoming bodies against the configured prefix
#[derive(Debug, Clone)]
pub struct MessageParser {
    prefix: PrefixMatcher,
}

impl MessageParser {
    pub fn new(prefix: PrefixMatcher) -> Self {
        Self { prefix }
    }

    /// Parse a prefixed body; `None` when the body does not carry the prefix
    pub fn parse_command(&self, body: &str) -> Option<ParsedCommand> {
        let rest = self.prefix.strip(body)?;
        let mut tokens = rest.split_whitespace();
        let key = tokens.next().unwrap_or_default().to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();
        let text = args.join(" ");
        Some(ParsedCommand { key, args, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(chars: &str) -> MessageParser {
        MessageParser::new(PrefixMatcher::from_chars(chars).unwrap())
    }

    #[test]
    fn test_parse_slash_command() {
        let parsed = parser("/").parse_command("/ping hello world").unwrap();
        assert_eq!(parsed.key, "ping");
        assert_eq!(parsed.args, vec!["hello", "world"]);
        assert_eq!(parsed.text, "hello world");
    }

    #[test]
    fn test_key_is_lowercased_and_extra_spaces_collapse() {
        let parsed = parser("!.").parse_command(".PiNg   a  b").unwrap();
        assert_eq!(parsed.key, "ping");
        assert_eq!(parsed.text, "a b");
    }

    #[test]
    fn test_unprefixed_body() {
        let p = parser("/");
        assert!(p.parse_command("ping").is_none());
    }

    #[test]
    fn test_bare_prefix_gives_empty_key() {
        let parsed = parser("/").parse_command("/").unwrap();
        assert_eq!(parsed.key, "");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_class_metacharacters_are_escaped() {
        let p = parser("^-]\\");
        assert_eq!(p.parse_command("^a").unwrap().key, "a");
        assert_eq!(p.parse_command("-a").unwrap().key, "a");
        assert_eq!(p.parse_command("]a").unwrap().key, "a");
        assert_eq!(p.parse_command("\\a").unwrap().key, "a");
        assert!(p.parse_command("a").is_none());
    }

    #[test]
    fn test_empty_prefix_set_is_rejected() {
        assert!(PrefixMatcher::from_chars("").is_err());
    }
}
