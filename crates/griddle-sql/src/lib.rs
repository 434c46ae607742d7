mod ident;
use ident::Ident;

mod serializer;
pub use serializer::Serializer;

/// The four statement kinds derivable from a model's field descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Delete,
    Insert,
    Select,
    Update,
}

impl QueryKind {
    /// Lower-case verb used in log and diagnostic messages.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Insert => "create",
            Self::Select => "read",
            Self::Update => "update",
        }
    }
}

/// Transaction control operations serialized per dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Begin,
    Commit,
    Rollback,
}
