use std::fmt;

/// A database engine's SQL variant: connection-string prefix, display name,
/// and identifier-quoting convention.
///
/// The set is closed. Detection from a connection string uses the longest
/// matching prefix, compared case-insensitively, so `sqlite2:` wins over
/// `sqlite:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Mysql,
    Pgsql,
    Sqlite,
    Sqlite2,
    Oci,
    Mssql,
    Sqlsrv,
    Sybase,
    Dblib,
    Odbc,
    Firebird,
    Ibm,
    Informix,
    Cubrid,
}

impl Dialect {
    pub const ALL: [Dialect; 14] = [
        Dialect::Mysql,
        Dialect::Pgsql,
        Dialect::Sqlite,
        Dialect::Sqlite2,
        Dialect::Oci,
        Dialect::Mssql,
        Dialect::Sqlsrv,
        Dialect::Sybase,
        Dialect::Dblib,
        Dialect::Odbc,
        Dialect::Firebird,
        Dialect::Ibm,
        Dialect::Informix,
        Dialect::Cubrid,
    ];

    /// The connection-string prefix that identifies this dialect.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Mysql => "mysql:",
            Self::Pgsql => "pgsql:",
            Self::Sqlite => "sqlite:",
            Self::Sqlite2 => "sqlite2:",
            Self::Oci => "oci:",
            Self::Mssql => "mssql:",
            Self::Sqlsrv => "sqlsrv:",
            Self::Sybase => "sybase:",
            Self::Dblib => "dblib:",
            Self::Odbc => "odbc:",
            Self::Firebird => "firebird:",
            Self::Ibm => "ibm:",
            Self::Informix => "informix:",
            Self::Cubrid => "cubrid:",
        }
    }

    /// The bare tag, i.e. the prefix without its trailing colon.
    pub fn tag(self) -> &'static str {
        let prefix = self.prefix();
        &prefix[..prefix.len() - 1]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mysql => "MySQL",
            Self::Pgsql => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::Sqlite2 => "SQLite 2",
            Self::Oci => "Oracle",
            Self::Mssql => "Microsoft SQL Server",
            Self::Sqlsrv => "SQL Server",
            Self::Sybase => "Sybase",
            Self::Dblib => "Generic TDS",
            Self::Odbc => "ODBC",
            Self::Firebird => "Firebird",
            Self::Ibm => "IBM DB2",
            Self::Informix => "Informix",
            Self::Cubrid => "CUBRID",
        }
    }

    /// The open/close characters wrapped around identifiers. Both strings are
    /// empty for dialects with no special quoting.
    pub fn quote_pair(self) -> (&'static str, &'static str) {
        match self {
            Self::Mysql => ("`", "`"),
            Self::Pgsql | Self::Sqlite | Self::Sqlite2 | Self::Oci => ("\"", "\""),
            Self::Mssql | Self::Sqlsrv | Self::Sybase => ("[", "]"),
            _ => ("", ""),
        }
    }

    /// Detect the dialect of a connection string by longest-prefix match.
    pub fn detect(connection_str: &str) -> Option<Dialect> {
        let bytes = connection_str.as_bytes();
        let mut best: Option<Dialect> = None;

        for dialect in Self::ALL {
            let prefix = dialect.prefix().as_bytes();
            let matched = bytes
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));

            if matched && best.is_none_or(|d| d.prefix().len() < prefix.len()) {
                best = Some(dialect);
            }
        }

        best
    }

    /// Resolve a dialect from either a bare tag (`"mysql"`) or a prefixed
    /// connection string (`"mysql:host=localhost"`).
    pub fn parse(s: &str) -> Option<Dialect> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|dialect| s.eq_ignore_ascii_case(dialect.tag()))
            .or_else(|| Self::detect(s))
    }

    /// Whether this dialect's driver reports a row count for SELECT.
    ///
    /// When false, the read path judges success from the fetched row itself
    /// instead of the reported count.
    pub fn select_reports_row_count(self) -> bool {
        !matches!(self, Self::Sqlite | Self::Mssql)
    }

    /// Statement that opens a transaction in this dialect.
    pub fn begin_statement(self) -> &'static str {
        match self {
            Self::Mysql => "START TRANSACTION",
            _ => "BEGIN",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
