use griddle_core::Dialect;
use std::fmt;

/// An identifier wrapped in the dialect's quote pair.
pub(crate) struct Ident<'a> {
    raw: &'a str,
    dialect: Dialect,
}

impl<'a> Ident<'a> {
    pub(crate) fn new(raw: &'a str, dialect: Dialect) -> Ident<'a> {
        Ident { raw, dialect }
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.dialect.quote_pair();
        write!(f, "{open}{}{close}", self.raw)
    }
}
