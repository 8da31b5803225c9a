// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Audience-specific projections of structured records
// Optional PyO3 bindings for Python dataclasses

// Allow non-local definitions for PyO3 macros (known issue with PyO3 0.20.x)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod projection;

pub use projection::{
    audience_matches, project, Annotated, ConfigError, FieldProjector, Projection,
    ProjectionError, ProjectorConfig, Schema, Tags, Verdict,
};

/// Python module: field_visibility
///
/// Projects dataclass instances onto the fields an audience may see.
///
/// # Examples
///
/// ```python
/// from dataclasses import dataclass, field
/// from field_visibility import FieldProjector
///
/// @dataclass
/// class Data:
///     id: int
///     both: str = field(metadata={"visible": "alice,bob"})
///
/// projector = FieldProjector({"visibility_key": "visible"})
/// print(projector.project(Data(1, "z"), "alice"))  # {"id": 1, "both": "z"}
/// print(projector.project(Data(1, "z"), "charlie"))  # {"id": 1}
/// ```
#[cfg(feature = "python")]
#[pymodule]
fn field_visibility(m: &Bound<'_, pyo3::types::PyModule>) -> PyResult<()> {
    use projection::python::{NilInputError, NotAStructError, PyFieldProjector};

    m.add_class::<PyFieldProjector>()?;
    m.add("NilInputError", m.py().get_type::<NilInputError>())?;
    m.add("NotAStructError", m.py().get_type::<NotAStructError>())?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(
        "__doc__",
        "Audience-specific projections of structured records",
    )?;

    Ok(())
}
