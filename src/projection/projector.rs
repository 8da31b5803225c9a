// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Field selection: exclusion marker, visibility list, audience match

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::capture::capture_fields;
use super::config::{ConfigError, ProjectorConfig};
use super::error::ProjectionError;
use super::schema::{Annotated, Schema};
use super::tags::Tags;

/// Field name to value, for the fields one audience may see
pub type Projection = Map<String, Value>;

/// Outcome of the selection rules for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Carries the exclusion marker; never projected
    Excluded,
    /// No visibility list; visible to everyone
    Unrestricted,
    /// Visibility list names the audience
    Granted,
    /// Visibility list does not name the audience
    Denied,
}

impl Verdict {
    pub fn is_visible(self) -> bool {
        matches!(self, Verdict::Unrestricted | Verdict::Granted)
    }
}

/// Whether `audience` is one of the tokens of `list`.
///
/// Tokens are compared byte for byte: no trimming, no case folding. An
/// empty list names nobody.
pub fn audience_matches(list: &str, separator: char, audience: &str) -> bool {
    if list.is_empty() {
        return false;
    }
    list.split(separator).any(|token| token == audience)
}

/// Projects records onto the fields visible to an audience
///
/// # Example
/// ```
/// use field_visibility::{FieldProjector, Schema};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Data {
///     id: u32,
///     secret: String,
/// }
///
/// let schema = Schema::new().with_tags("secret", r#"visible:"admin""#);
/// let projector = FieldProjector::default();
/// let data = Data { id: 7, secret: "s3cr3t".into() };
///
/// let admin = projector.project(&data, &schema, "admin").unwrap();
/// assert_eq!(admin.len(), 2);
///
/// let guest = projector.project(&data, &schema, "guest").unwrap();
/// assert!(!guest.contains_key("secret"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldProjector {
    config: ProjectorConfig,
}

impl FieldProjector {
    pub fn new(config: ProjectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Keep the fields of `record` that `audience` may see.
    ///
    /// Annotations come from `schema`; fields it doesn't mention are
    /// visible to everyone. Fails with [`ProjectionError::NilInput`] for an
    /// absent record and [`ProjectionError::NotAStruct`] for anything that
    /// isn't a struct with named fields.
    pub fn project<T>(
        &self,
        record: &T,
        schema: &Schema,
        audience: &str,
    ) -> Result<Projection, ProjectionError>
    where
        T: Serialize + ?Sized,
    {
        let captured = capture_fields(record, |name| {
            let verdict = match schema.tags(name) {
                Some(tags) => self.verdict(tags, audience),
                None => Verdict::Unrestricted,
            };
            trace!(field = name, ?verdict, "field verdict");
            verdict.is_visible()
        })?;

        trace!(
            audience,
            kept = captured.fields.len(),
            total = captured.visited,
            "record projected"
        );

        Ok(captured
            .fields
            .into_iter()
            .map(|field| (field.name.to_string(), field.value))
            .collect())
    }

    /// [`FieldProjector::project`] with the record type's own schema
    pub fn project_annotated<T>(
        &self,
        record: &T,
        audience: &str,
    ) -> Result<Projection, ProjectionError>
    where
        T: Annotated + ?Sized,
    {
        self.project(record, T::schema(), audience)
    }

    /// Apply the selection rules to one field's annotations.
    ///
    /// The exclusion marker wins over any visibility list.
    pub fn verdict(&self, tags: &Tags, audience: &str) -> Verdict {
        if self.is_excluded(tags) {
            return Verdict::Excluded;
        }
        match self.visibility(tags) {
            None => Verdict::Unrestricted,
            Some(list) if audience_matches(list, self.config.separator, audience) => {
                Verdict::Granted
            }
            Some(_) => Verdict::Denied,
        }
    }

    pub fn is_excluded(&self, tags: &Tags) -> bool {
        tags.get(&self.config.exclusion_key) == Some(self.config.exclusion_value.as_str())
    }

    /// The visibility list, if present and non-empty
    pub fn visibility<'t>(&self, tags: &'t Tags) -> Option<&'t str> {
        tags.get(&self.config.visibility_key)
            .filter(|list| !list.is_empty())
    }
}

/// Project `record` with the default annotation keys (`json:"-"` excludes,
/// `visible:"a,b"` restricts).
pub fn project<T>(record: &T, schema: &Schema, audience: &str) -> Result<Projection, ProjectionError>
where
    T: Serialize + ?Sized,
{
    FieldProjector::default().project(record, schema, audience)
}
