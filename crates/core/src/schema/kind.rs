//! Dataset kinds and their column tables.

use super::column::Column;
use crate::types::DataType;
use core::fmt;
use core::str::FromStr;

/// Columns of a `Sections` dataset, in row order.
pub static SECTIONS_COLUMNS: [Column; 10] = [
    Column::string("dept"),
    Column::string("id"),
    Column::number("avg"),
    Column::string("instructor"),
    Column::string("title"),
    Column::number("pass"),
    Column::number("fail"),
    Column::number("audit"),
    Column::string("uuid"),
    Column::number("year"),
];

/// Columns of a `Rooms` dataset, in row order.
pub static ROOMS_COLUMNS: [Column; 11] = [
    Column::string("fullname"),
    Column::string("shortname"),
    Column::string("number"),
    Column::string("name"),
    Column::string("address"),
    Column::number("lat"),
    Column::number("lon"),
    Column::number("seats"),
    Column::string("type"),
    Column::string("furniture"),
    Column::string("href"),
];

/// The kind of a dataset, which fixes its schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Course sections.
    Sections,
    /// Campus rooms.
    Rooms,
}

impl DatasetKind {
    /// Returns the columns of this kind, in row order.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            DatasetKind::Sections => &SECTIONS_COLUMNS,
            DatasetKind::Rooms => &ROOMS_COLUMNS,
        }
    }

    /// Gets a column by field name.
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns().iter().find(|c| c.name() == name)
    }

    /// Gets a column position by field name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c.name() == name)
    }

    /// Looks up the declared type of a field.
    pub fn field_type(&self, name: &str) -> Option<DataType> {
        self.column(name).map(|c| c.data_type())
    }

    /// Returns the lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Sections => "sections",
            DatasetKind::Rooms => "rooms",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "sections" => Ok(DatasetKind::Sections),
            "rooms" => Ok(DatasetKind::Rooms),
            _ => Err(()),
        }
    }
}
