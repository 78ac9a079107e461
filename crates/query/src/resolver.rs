//! Qualified key resolution.
//!
//! A qualified key has the form `datasetId_field`. Dataset ids never contain an
//! underscore and field names never do either, so a key splits on its single
//! underscore. Apply names are the keys with no underscore at all.

use crate::ast::Attribute;
use crate::context::KindMap;
use alloc::format;
use insight_core::schema::DatasetKind;
use insight_core::{DataType, Error, Result};

/// Where the dataset kind of a key comes from.
#[derive(Clone, Copy, Debug)]
pub enum KindContext<'a> {
    /// The kind is known; the key's dataset id is taken as given.
    Kind(DatasetKind),
    /// The kind is looked up by the key's dataset id.
    Map(&'a KindMap),
}

/// Splits a qualified key into its dataset id and field.
pub fn split_key(key: &str) -> Result<(&str, &str)> {
    let mut parts = key.split('_');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(field), None) if !id.is_empty() => Ok((id, field)),
        _ => Err(Error::validation(format!("Invalid key {}", key))),
    }
}

/// Resolves a qualified key to an attribute.
pub fn resolve(key: &str, ctx: KindContext<'_>) -> Result<Attribute> {
    let (dataset_id, field) = split_key(key)?;
    let kind = match ctx {
        KindContext::Kind(kind) => kind,
        KindContext::Map(kinds) => *kinds.get(dataset_id).ok_or_else(|| {
            Error::validation(format!("Referenced dataset {} not added yet", dataset_id))
        })?,
    };
    Attribute::new(dataset_id, kind, field).ok_or_else(|| {
        Error::validation(format!("Invalid key {}: {} has no field {}", key, kind, field))
    })
}

/// Looks up the declared type of a field.
#[inline]
pub fn field_type(field: &str, kind: DatasetKind) -> Option<DataType> {
    kind.field_type(field)
}

/// Returns true if `s` can name an APPLY entry.
#[inline]
pub fn is_apply_name(s: &str) -> bool {
    !s.is_empty() && !s.contains('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds() -> KindMap {
        let mut kinds = KindMap::new();
        kinds.insert("rooms".into(), DatasetKind::Rooms);
        kinds.insert("courses".into(), DatasetKind::Sections);
        kinds
    }

    #[test]
    fn test_resolve_with_kind() {
        let attr = resolve("anything_avg", KindContext::Kind(DatasetKind::Sections)).unwrap();
        assert_eq!(attr.dataset_id, "anything");
        assert_eq!(attr.field, "avg");
        assert_eq!(attr.data_type, DataType::Number);
    }

    #[test]
    fn test_resolve_with_map() {
        let kinds = kinds();
        let attr = resolve("rooms_furniture", KindContext::Map(&kinds)).unwrap();
        assert_eq!(attr.index, 9);
        assert_eq!(attr.data_type, DataType::String);

        let attr = resolve("courses_uuid", KindContext::Map(&kinds)).unwrap();
        assert_eq!(attr.data_type, DataType::String);
    }

    #[test]
    fn test_resolve_underscore_count() {
        let kinds = kinds();
        assert!(resolve("roomsseats", KindContext::Map(&kinds)).is_err());
        assert!(resolve("rooms_seats_x", KindContext::Map(&kinds)).is_err());
        assert!(resolve("_seats", KindContext::Map(&kinds)).is_err());
        assert!(resolve("rooms_", KindContext::Map(&kinds)).is_err());
    }

    #[test]
    fn test_resolve_unknown_dataset_or_field() {
        let kinds = kinds();
        let err = resolve("sections_avg", KindContext::Map(&kinds)).unwrap_err();
        assert!(err.is_validation());
        assert!(resolve("rooms_avg", KindContext::Map(&kinds)).is_err());
        assert!(resolve("courses_seats", KindContext::Map(&kinds)).is_err());
    }

    #[test]
    fn test_field_type() {
        assert_eq!(field_type("lon", DatasetKind::Rooms), Some(DataType::Number));
        assert_eq!(field_type("lon", DatasetKind::Sections), None);
    }

    #[test]
    fn test_is_apply_name() {
        assert!(is_apply_name("maxSeats"));
        assert!(is_apply_name("overall avg"));
        assert!(!is_apply_name(""));
        assert!(!is_apply_name("max_seats"));
    }
}
