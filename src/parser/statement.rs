use std::fmt;
use std::ops::Deref;


pub const TERMINATOR: &str = ";";
const BLOCK_OPEN: &str = "BEGIN";
const BLOCK_CLOSE: &str = "END";


fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whole-word, case-sensitive search: "BEGIN" matches, "BEGINNING" doesn't.
fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !is_word_char(c)).any(|w| w == word)
}

fn ends_with_word(text: &str, word: &str) -> bool {
    text.strip_suffix(word)
        .is_some_and(|rest| !rest.chars().next_back().is_some_and(is_word_char))
}


/// Ordered, non-empty, trimmed statements ready for execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementCollection {
    inner: Vec<String>,
}

impl StatementCollection {
    pub fn new() -> Self {
        StatementCollection { inner: vec![] }
    }

    /// Split (already comment-free) SQL on `;`.
    ///
    /// A fragment containing `BEGIN` opens a procedural block: it is glued back
    /// together with every following fragment up to and including the first one
    /// ending in `END`, keeping the inner terminators. If no such fragment exists
    /// the opener is emitted on its own and the rest is split as usual.
    pub fn parse_sql(sql: &str) -> Self {
        let fragments: Vec<&str> = sql.split(TERMINATOR).collect();
        let mut collection = StatementCollection::new();
        let mut i = 0;

        while i < fragments.len() {
            let fragment = fragments[i].trim();
            if fragment.is_empty() {
                i += 1;
                continue;
            }

            if contains_word(fragment, BLOCK_OPEN) {
                let close = fragments[i + 1..]
                    .iter()
                    .position(|f| ends_with_word(f.trim(), BLOCK_CLOSE));

                match close {
                    Some(offset) => {
                        let end = i + 1 + offset;
                        let block = fragments[i..=end].join(TERMINATOR);
                        collection.inner.push(block.trim().to_string());
                        i = end + 1;
                        continue;
                    }
                    None => tracing::warn!(
                        "Unterminated {BLOCK_OPEN} block, executing remaining statements individually: '{fragment}'"
                    ),
                }
            }

            collection.inner.push(fragment.to_string());
            i += 1;
        }

        tracing::debug!("Split SQL into {} statement(s)", collection.len());
        collection
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.inner.clone()
    }
}

impl IntoIterator for StatementCollection {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatementCollection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl Deref for StatementCollection {
    type Target = Vec<String>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl fmt::Display for StatementCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{statement}{TERMINATOR}")?;
        }
        Ok(())
    }
}
