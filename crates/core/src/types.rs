//! Semantic type definitions for dataset fields.
//!
//! Every field of every dataset kind is declared as one of these types in the
//! schema catalog; filters and aggregations check against them.

use core::fmt;

/// Semantic type of a dataset field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// UTF-8 string, matched by `IS`
    String,
    /// 64-bit floating point number, compared by `LT`/`GT`/`EQ`
    Number,
}

impl DataType {
    /// Returns the name used for this type in validation messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
        }
    }

    /// Returns whether values of this type can be reduced by MAX/MIN/AVG/SUM.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Number)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
