// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Projection errors

use std::fmt::Display;

use thiserror::Error;

/// Why a record could not be projected. No partial result accompanies any
/// of these.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("record is absent")]
    NilInput,

    #[error("record is not a struct with named fields (found {found})")]
    NotAStruct { found: &'static str },

    #[error("field `{field}` could not be converted to a value: {source}")]
    FieldValue {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// Raised by the record's own `Serialize` implementation
    #[error("record serialization failed: {0}")]
    Serialize(String),
}

impl ProjectionError {
    pub(crate) fn not_a_struct(found: &'static str) -> Self {
        Self::NotAStruct { found }
    }
}

impl serde::ser::Error for ProjectionError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Serialize(msg.to_string())
    }
}
