use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::math::Vector3;

use super::LoadError;

/// A whitespace separated word and the (1-based) line it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
}

/// Split `source` into tokens. A token starting with `#` comments out the rest of its line.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];

    for (i, line) in source.lines().enumerate() {
        for text in line.split_whitespace() {
            if text.starts_with('#') {
                break;
            }
            tokens.push(Token { text, line: i + 1 });
        }
    }

    tokens
}

/// Pulls typed values off a token stream, reporting errors against the file
/// they were read from.
pub struct Reader<'a> {
    tokens: std::vec::IntoIter<Token<'a>>,
    path: PathBuf,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a str, path: &Path) -> Self {
        Self {
            tokens: tokenize(source).into_iter(),
            path: path.to_path_buf(),
        }
    }

    /// The next token, if there is one.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.tokens.next()
    }

    /// The next token, which must exist.
    pub fn expect_token(&mut self, expected: &'static str) -> Result<Token<'a>, LoadError> {
        self.tokens.next().ok_or_else(|| LoadError::UnexpectedEof {
            path: self.path.clone(),
            expected,
        })
    }

    pub fn invalid(&self, token: Token<'_>, expected: &'static str) -> LoadError {
        LoadError::InvalidValue {
            path: self.path.clone(),
            line: token.line,
            expected,
            token: token.text.to_string(),
        }
    }

    /// Parse the next token as a `T`.
    pub fn value<T: FromStr>(&mut self, expected: &'static str) -> Result<T, LoadError> {
        let token = self.expect_token(expected)?;
        token.text.parse().map_err(|_| self.invalid(token, expected))
    }

    /// Parse the next three tokens as the components of a vector.
    pub fn vector(&mut self, expected: &'static str) -> Result<Vector3, LoadError> {
        Ok(Vector3::new(
            self.value(expected)?,
            self.value(expected)?,
            self.value(expected)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_run_to_end_of_line() {
        let tokens = tokenize("depth 3 # five\n#sphere\n  ambience 1 1 1");
        let texts: Vec<_> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, ["depth", "3", "ambience", "1", "1", "1"]);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn values_are_parsed() {
        let mut reader = Reader::new("1.5 -2 3e1 7 x", Path::new("test.sce"));
        assert_eq!(reader.vector("vector").unwrap(), Vector3::new(1.5, -2., 30.));
        assert_eq!(reader.value::<u32>("count").unwrap(), 7);
        assert!(matches!(
            reader.value::<f64>("number"),
            Err(LoadError::InvalidValue { line: 1, .. })
        ));
        assert!(matches!(
            reader.value::<f64>("number"),
            Err(LoadError::UnexpectedEof { expected: "number", .. })
        ));
    }
}
