/// Classification of a chunk returned by the [`Chunker`](crate::chunker::Chunker).
///
/// The chunker itself only hands out strings; the parser classifies them
/// to decide what to do next. Delimiters are matched case-insensitively,
/// the same way the chunker finds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Opens a query atom
    ///
    /// # Example
    /// ```text
    /// [[Category:City]]
    /// ^^
    /// ```
    OpenLink,

    /// Closes a query atom (`]]`)
    CloseLink,

    /// Separates a property from its values
    ///
    /// # Examples
    /// ```text
    /// [[Located in::Germany]]
    /// [[Population:=>1000]]
    /// ```
    PropertySeparator,

    /// Opens a subquery (`<q>`)
    ///
    /// # Example
    /// ```text
    /// [[Located in::<q>[[Category:Country]]</q>]]
    /// ```
    OpenSubquery,

    /// Closes a subquery (`</q>`)
    CloseSubquery,

    /// Disjunction inside and between atoms
    ///
    /// # Examples
    /// ```text
    /// [[Category:City||Town]]
    /// [[Category:City]] || [[Category:Town]]
    /// ```
    Or,

    /// Disjunction keyword between atoms (case-sensitive)
    ///
    /// # Example
    /// ```text
    /// [[Category:City]] OR [[Category:Town]]
    /// ```
    OrKeyword,

    /// Single pipe, the legacy label syntax inside an atom
    ///
    /// # Example
    /// ```text
    /// [[Category:City|label]]
    /// ```
    Pipe,

    /// Wildcard value (`+`)
    Wildcard,

    /// Nothing left to read
    Eof,

    /// Anything else: titles, values, namespace prefixes, stray words
    Text(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(chunk: &'a str) -> Self {
        match chunk {
            "" => Token::Eof,
            "[[" => Token::OpenLink,
            "]]" => Token::CloseLink,
            "::" | ":=" => Token::PropertySeparator,
            "||" => Token::Or,
            "|" => Token::Pipe,
            "+" => Token::Wildcard,
            "OR" => Token::OrKeyword,
            _ if chunk.eq_ignore_ascii_case("<q>") => Token::OpenSubquery,
            _ if chunk.eq_ignore_ascii_case("</q>") => Token::CloseSubquery,
            _ => Token::Text(chunk),
        }
    }

    /// Whether the chunk is one of the fixed delimiters rather than free text.
    pub fn is_delimiter(&self) -> bool {
        !matches!(self, Token::Text(_) | Token::Wildcard | Token::OrKeyword)
    }
}
