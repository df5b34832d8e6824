use once_cell::sync::Lazy;
use regex::Regex;

static CLOSING_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*(\]\])").unwrap());

static LINK_CONTENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(\[\[|\]\]|\|\||\|)").unwrap());

/// Which delimiters end a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSet {
    /// Every delimiter of the query language, including the category and
    /// concept prefixes at the start of the remaining input.
    Default,
    /// Only `]]`; used to skip over the rest of a broken atom.
    ClosingBrackets,
    /// `[[`, `]]`, `||` and `|`; used while reading a property value.
    LinkContent,
}

/// Splits query text into delimiters and the literal text between them.
///
/// The chunker eats the input from the front. Each read returns either the
/// delimiter the remaining input starts with, or the text up to the next
/// delimiter. Whitespace in front of a delimiter is swallowed with it. An
/// empty chunk is returned when, and only when, nothing but whitespace is
/// left.
pub struct Chunker {
    default_stop: Regex,
    input: String,
    position: usize,
}

impl Chunker {
    /// Build a chunker that recognises the given localized namespace labels
    /// next to the canonical `Category:` and `Concept:` prefixes.
    pub fn new(category_label: &str, concept_label: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"(?i)\s*(\[\[|\]\]|::|:=|<q>|</q>|^{}:|^Category:|^{}:|^Concept:|\|\||\|)",
            regex::escape(category_label),
            regex::escape(concept_label),
        );
        Ok(Chunker {
            default_stop: Regex::new(&pattern)?,
            input: String::new(),
            position: 0,
        })
    }

    /// Start over on a new input.
    pub fn reset(&mut self, input: &str) {
        self.input = input.to_string();
        self.position = 0;
    }

    /// The input that has not been consumed yet.
    pub fn remaining(&self) -> &str {
        &self.input[self.position..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining().trim().is_empty()
    }

    /// Read the next chunk, consuming it and trimming whitespace.
    pub fn next_chunk(&mut self) -> String {
        self.read_chunk(StopSet::Default, true, true)
    }

    /// Look at the next chunk without consuming it.
    pub fn peek_chunk(&mut self) -> String {
        self.read_chunk(StopSet::Default, false, true)
    }

    pub fn read_chunk(&mut self, stop: StopSet, consume: bool, trim: bool) -> String {
        let regex = match stop {
            StopSet::Default => &self.default_stop,
            StopSet::ClosingBrackets => &*CLOSING_BRACKETS,
            StopSet::LinkContent => &*LINK_CONTENT,
        };
        let rest = &self.input[self.position..];

        let (chunk, advance) = match regex.captures(rest) {
            None => (rest, rest.len()),
            Some(captures) => {
                let (Some(whole), Some(delimiter)) = (captures.get(0), captures.get(1)) else {
                    return String::new();
                };
                if whole.start() == 0 {
                    (delimiter.as_str(), whole.end())
                } else {
                    // the delimiter itself stays in the input
                    (&rest[..whole.start()], delimiter.start())
                }
            }
        };

        let chunk = if trim { chunk.trim() } else { chunk }.to_string();
        if consume {
            self.position += advance;
        }
        chunk
    }
}
