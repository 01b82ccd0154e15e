//! Name matcher - finds the longest alias ending at each word boundary.

use roster::AliasIndex;

use super::NameCandidate;

/// Word characters are Unicode alphanumerics.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Check if `context` ends with `word`, and `word` is not the tail of a longer word.
pub fn ends_with_word(context: &str, word: &str) -> bool {
    if word.is_empty() || !context.ends_with(word) {
        return false;
    }
    context[..context.len() - word.len()]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c))
}

/// What the matcher saw at one character of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Not a word boundary.
    Inside,

    /// A word just ended. Holds the longest alias ending there, if any.
    WordEnd(Option<NameCandidate>),
}

/// Streams a text one character at a time, keeping a bounded trailing context.
///
/// The context holds at most `radius + 2` spaces; whenever it grows past that,
/// everything up to and including its first space is dropped.
#[derive(Debug)]
pub struct NameMatcher<'a> {
    aliases: &'a AliasIndex,
    context: String,
    spaces: usize,
    max_spaces: usize,
    previous: Option<char>,
    position: usize,
}

impl<'a> NameMatcher<'a> {
    pub fn new(aliases: &'a AliasIndex, radius: usize) -> Self {
        Self {
            aliases,
            context: String::new(),
            spaces: 0,
            max_spaces: radius + 2,
            previous: None,
            position: 0,
        }
    }

    /// Feed the next character.
    ///
    /// A word boundary is a non-word character right after a word character. The
    /// boundary is evaluated against the context *before* `c` is appended.
    pub fn advance(&mut self, c: char) -> Step {
        let position = self.position;
        self.position += 1;

        let step = match self.previous {
            Some(prev) if is_word_char(prev) && !is_word_char(c) => {
                Step::WordEnd(self.longest_match(position))
            }
            _ => Step::Inside,
        };

        self.previous = Some(c);
        self.context.push(c);
        if c == ' ' {
            self.spaces += 1;
        }
        while self.spaces > self.max_spaces {
            match self.context.find(' ') {
                Some(cut) => {
                    self.context.drain(..=cut);
                    self.spaces -= 1;
                }
                None => break,
            }
        }

        step
    }

    /// The current trailing context.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    fn longest_match(&self, position: usize) -> Option<NameCandidate> {
        // Strictly-longer comparison: among equal lengths the earliest registered alias stays.
        let mut best: Option<(&str, usize)> = None;
        for (alias, _) in self.aliases.iter() {
            if !ends_with_word(&self.context, alias) {
                continue;
            }
            let length = alias.chars().count();
            if best.map_or(true, |(_, best_length)| length > best_length) {
                best = Some((alias, length));
            }
        }

        best.map(|(alias, _)| NameCandidate {
            alias: alias.to_string(),
            position,
            context: self.context.clone(),
        })
    }
}
