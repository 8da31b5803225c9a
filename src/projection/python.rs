// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// PyO3 bindings: projection of Python dataclass instances

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyType};
use tracing::trace;

use super::config::ProjectorConfig;
use super::projector::FieldProjector;
use super::tags::Tags;

create_exception!(field_visibility, NilInputError, PyValueError);
create_exception!(field_visibility, NotAStructError, PyValueError);

/// Field projector exposed to Python
///
/// # Example (Python)
/// ```python
/// from dataclasses import dataclass, field
/// from field_visibility import FieldProjector
///
/// @dataclass
/// class Data:
///     id: int
///     alice_data: str = field(metadata={"visible": "alice"})
///     private: str = field(metadata={"json": "-"})
///
/// projector = FieldProjector()
/// projector.project(Data(1, "x", "p"), "alice")  # {"id": 1, "alice_data": "x"}
/// projector.project(Data(1, "x", "p"), "bob")    # {"id": 1}
/// ```
#[pyclass(name = "FieldProjector", frozen)]
pub struct PyFieldProjector {
    inner: FieldProjector,
}

#[pymethods]
impl PyFieldProjector {
    /// Create a projector
    ///
    /// # Configuration Keys
    /// * `exclusion_key` (str): metadata key of the exclusion marker (default: "json")
    /// * `exclusion_value` (str): value meaning "never project" (default: "-")
    /// * `visibility_key` (str): metadata key of the audience list (default: "visible")
    /// * `separator` (str): single-character list separator (default: ",")
    #[new]
    #[pyo3(signature = (config = None))]
    pub fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = match config {
            Some(dict) => ProjectorConfig::from_py_dict(dict)?,
            None => ProjectorConfig::default(),
        };
        let inner = FieldProjector::new(config)
            .map_err(|e| PyValueError::new_err(format!("Invalid config: {}", e)))?;
        Ok(Self { inner })
    }

    /// Project a dataclass instance onto the fields `audience` may see
    ///
    /// Values are returned as the original Python objects.
    pub fn project<'py>(
        &self,
        py: Python<'py>,
        record: &Bound<'py, PyAny>,
        audience: &str,
    ) -> PyResult<Bound<'py, PyDict>> {
        if record.is_none() {
            return Err(NilInputError::new_err("record is absent"));
        }

        let dataclasses = py.import("dataclasses")?;
        let is_dataclass = dataclasses
            .call_method1("is_dataclass", (record,))?
            .is_truthy()?;
        if !is_dataclass || record.is_instance_of::<PyType>() {
            return Err(NotAStructError::new_err(format!(
                "record is not a dataclass instance (found {})",
                record.get_type().name()?
            )));
        }

        let projection = PyDict::new(py);
        for field in dataclasses.call_method1("fields", (record,))?.try_iter()? {
            let field = field?;
            let name: String = field.getattr("name")?.extract()?;
            let tags = self.field_tags(&field.getattr("metadata")?)?;

            let verdict = self.inner.verdict(&tags, audience);
            trace!(field = name.as_str(), ?verdict, "field verdict");
            if verdict.is_visible() {
                projection.set_item(name.as_str(), record.getattr(name.as_str())?)?;
            }
        }

        Ok(projection)
    }
}

impl PyFieldProjector {
    /// Read the configured keys out of a dataclass field's metadata mapping
    fn field_tags(&self, metadata: &Bound<'_, PyAny>) -> PyResult<Tags> {
        let config = self.inner.config();
        let mut pairs = Vec::with_capacity(2);
        for key in [&config.exclusion_key, &config.visibility_key] {
            let value = metadata.call_method1("get", (key.as_str(),))?;
            if !value.is_none() {
                pairs.push((key.clone(), value.str()?.to_string()));
            }
        }
        Ok(Tags::from_pairs(pairs))
    }
}
