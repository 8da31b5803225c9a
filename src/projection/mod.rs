// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Field Projector
//
// Audience-specific projections of structured records:
// - serde drives field enumeration (names, values, declaration order)
// - struct-tag annotations carry the exclusion marker and visibility list
// - exclusion always wins over visibility

pub mod capture;
pub mod config;
pub mod error;
pub mod projector;
#[cfg(feature = "python")]
pub mod python;
pub mod schema;
pub mod tags;

pub use config::{ConfigError, ProjectorConfig};
pub use error::ProjectionError;
pub use projector::{audience_matches, project, FieldProjector, Projection, Verdict};
pub use schema::{Annotated, Schema};
pub use tags::Tags;
