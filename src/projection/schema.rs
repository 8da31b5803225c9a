// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Annotation descriptors supplied alongside a record type

use std::collections::HashMap;

use serde::Serialize;

use super::tags::Tags;

/// Field annotations for one record type, keyed by serialized field name.
///
/// Fields missing from the schema carry no annotations and are visible to
/// every audience. Entries for fields the record doesn't have are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: HashMap<String, Tags>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a struct tag (`json:"-" visible:"bob"`) to `field`
    pub fn with_tags(self, field: impl Into<String>, tag: &str) -> Self {
        self.with_field(field, Tags::parse(tag))
    }

    pub fn with_field(mut self, field: impl Into<String>, tags: Tags) -> Self {
        self.fields.insert(field.into(), tags);
        self
    }

    pub fn tags(&self, field: &str) -> Option<&Tags> {
        self.fields.get(field)
    }
}

/// A record type that carries its own annotations.
///
/// ```
/// use field_visibility::{Annotated, Schema};
/// use once_cell::sync::Lazy;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Profile {
///     name: String,
///     email: String,
/// }
///
/// static PROFILE_SCHEMA: Lazy<Schema> =
///     Lazy::new(|| Schema::new().with_tags("email", r#"visible:"owner,admin""#));
///
/// impl Annotated for Profile {
///     fn schema() -> &'static Schema {
///         &PROFILE_SCHEMA
///     }
/// }
/// ```
pub trait Annotated: Serialize {
    fn schema() -> &'static Schema;
}

impl<T: Annotated> Annotated for Option<T> {
    fn schema() -> &'static Schema {
        T::schema()
    }
}

impl<T: Annotated + ?Sized> Annotated for Box<T> {
    fn schema() -> &'static Schema {
        T::schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_has_no_tags() {
        let schema = Schema::new().with_tags("AliceData", r#"visible:"alice""#);
        assert!(schema.tags("Name").is_none());
        assert_eq!(
            schema.tags("AliceData").and_then(|t| t.get("visible")),
            Some("alice")
        );
    }

    #[test]
    fn test_later_entry_replaces_earlier() {
        let schema = Schema::new()
            .with_tags("Both", r#"visible:"alice""#)
            .with_tags("Both", r#"visible:"alice,bob""#);
        assert_eq!(
            schema.tags("Both").and_then(|t| t.get("visible")),
            Some("alice,bob")
        );
    }
}
