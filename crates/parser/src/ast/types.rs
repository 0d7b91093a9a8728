//! Type descriptors used by declarations, parameters and return types.

use std::fmt;

/// Built-in scalar type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Area,
    Boolean,
    Integer,
    LongInt,
    Val,
    ULong64,
    Date,
    Time,
    RoundMode,
}

impl ScalarType {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Area => "area",
            ScalarType::Boolean => "boolean",
            ScalarType::Integer => "integer",
            ScalarType::LongInt => "longint",
            ScalarType::Val => "val",
            ScalarType::ULong64 => "ulong64",
            ScalarType::Date => "date",
            ScalarType::Time => "time",
            ScalarType::RoundMode => "roundmode",
        }
    }

    /// Whether values of this type are plain numbers.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ScalarType::Integer | ScalarType::LongInt | ScalarType::Val | ScalarType::ULong64
        )
    }
}

/// A HAL type descriptor.
///
/// Records and rows are nominal references to layouts defined outside the
/// language; they are never expanded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Scalar(ScalarType),
    String(Option<u32>),
    Array(Box<TypeRef>),
    Record(String),
    Row(String),
}

impl TypeRef {
    pub const INTEGER: TypeRef = TypeRef::Scalar(ScalarType::Integer);

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    /// Innermost element type of an array, or the type itself.
    pub fn element(&self) -> &TypeRef {
        match self {
            TypeRef::Array(inner) => inner.element(),
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(s) => f.write_str(s.as_str()),
            TypeRef::String(Some(len)) => write!(f, "string {}", len),
            TypeRef::String(None) => f.write_str("string"),
            TypeRef::Array(inner) => write!(f, "array {}", inner),
            TypeRef::Record(name) => write!(f, "record {}", name),
            TypeRef::Row(name) => write!(f, "row {}", name),
        }
    }
}
