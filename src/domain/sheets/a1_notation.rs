use std::fmt::Formatter;

/// A worksheet-qualified range such as `March 2024!C9` or `March 2024!A7:A39`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self) -> A1Notation;
}
