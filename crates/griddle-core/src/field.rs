use crate::{Error, ParamType, Result};
use std::ops::BitOr;

/// Behavior flags for one mapped field, OR-combinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFlags(u8);

impl FieldFlags {
    pub const NONE: FieldFlags = FieldFlags(0);
    pub const IS_KEY: FieldFlags = FieldFlags(1);
    pub const SHOULD_INSERT: FieldFlags = FieldFlags(2);
    pub const SHOULD_UPDATE: FieldFlags = FieldFlags(4);
    pub const ALLOWS_NULLS: FieldFlags = FieldFlags(8);
    pub const AUTO_INCREMENT: FieldFlags = FieldFlags(16);

    pub const fn from_bits(bits: u8) -> FieldFlags {
        FieldFlags(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: FieldFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FieldFlags {
    type Output = FieldFlags;

    fn bitor(self, rhs: FieldFlags) -> FieldFlags {
        FieldFlags(self.0 | rhs.0)
    }
}

/// Declarative metadata binding one model property to one database column.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    column: String,
    value_type: ParamType,
    flags: FieldFlags,
}

impl FieldDescriptor {
    /// Build a descriptor from a flag bitmask. Fails if the column name is
    /// empty or whitespace.
    pub fn new(
        column: impl Into<String>,
        value_type: ParamType,
        flags: FieldFlags,
    ) -> Result<FieldDescriptor> {
        let column = column.into();

        if column.trim().is_empty() {
            return Err(Error::InvalidField(
                "column name must not be empty".to_string(),
            ));
        }

        Ok(FieldDescriptor {
            column,
            value_type,
            flags,
        })
    }

    /// Explicit-boolean constructor form, equivalent to OR-combining the
    /// corresponding flags.
    #[allow(clippy::too_many_arguments)]
    pub fn explicit(
        column: impl Into<String>,
        value_type: ParamType,
        is_key: bool,
        should_insert: bool,
        should_update: bool,
        allows_nulls: bool,
        auto_increment: bool,
    ) -> Result<FieldDescriptor> {
        let mut flags = FieldFlags::NONE;
        if is_key {
            flags = flags | FieldFlags::IS_KEY;
        }
        if should_insert {
            flags = flags | FieldFlags::SHOULD_INSERT;
        }
        if should_update {
            flags = flags | FieldFlags::SHOULD_UPDATE;
        }
        if allows_nulls {
            flags = flags | FieldFlags::ALLOWS_NULLS;
        }
        if auto_increment {
            flags = flags | FieldFlags::AUTO_INCREMENT;
        }

        Self::new(column, value_type, flags)
    }

    /// Gets the target column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Gets the declared value type.
    pub fn value_type(&self) -> ParamType {
        self.value_type
    }

    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    pub fn is_key(&self) -> bool {
        self.flags.contains(FieldFlags::IS_KEY)
    }

    pub fn should_insert(&self) -> bool {
        self.flags.contains(FieldFlags::SHOULD_INSERT)
    }

    pub fn should_update(&self) -> bool {
        self.flags.contains(FieldFlags::SHOULD_UPDATE)
    }

    pub fn allows_nulls(&self) -> bool {
        self.flags.contains(FieldFlags::ALLOWS_NULLS)
    }

    pub fn auto_increment(&self) -> bool {
        self.flags.contains(FieldFlags::AUTO_INCREMENT)
    }
}
