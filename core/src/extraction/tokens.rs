/// Whitespace-tokenized lines of a positional text file (ICS, overlay)
///
/// Lines that tokenize to nothing are dropped. Rows are keyed by their first
/// token and fields are addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedLines {
    lines: Vec<Vec<String>>,
}

impl TokenizedLines {
    /// Tokenizes every line of `text`
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                line.split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the first row whose first token is exactly `key`
    pub fn row(&self, key: &str) -> Option<&[String]> {
        self.lines
            .iter()
            .find(|tokens| tokens[0] == key)
            .map(Vec::as_slice)
    }

    /// Returns token `idx` of the row keyed by `key`
    ///
    /// Returns `None` if the row is absent or `idx` is out of range for it.
    pub fn value(&self, key: &str, idx: usize) -> Option<&str> {
        self.row(key)
            .and_then(|tokens| tokens.get(idx))
            .map(String::as_str)
    }

    pub fn into_lines(self) -> Vec<Vec<String>> {
        self.lines
    }
}
