// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Field enumeration through serde: a Serializer that only accepts structs
// with named fields and hands each field to a selection predicate

use serde::ser::{Impossible, Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use super::error::ProjectionError;

/// A field that passed selection, with its converted value
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedField {
    pub name: &'static str,
    pub value: Value,
}

/// Result of walking one record
#[derive(Debug, Default)]
pub struct Captured {
    pub fields: Vec<CapturedField>,
    /// Number of fields enumerated, kept or not
    pub visited: usize,
}

/// Enumerate the named fields of `record` in declaration order.
///
/// `keep` is called exactly once per serialized field; only fields it
/// accepts have their values converted. Fields skipped through
/// `skip_serializing_if` count as visited but never reach `keep`. `None`
/// and `()` are absent records, anything other than a named-field struct
/// is rejected, including structs using `#[serde(flatten)]` (serde emits
/// those as maps). `Some` and newtype wrappers are looked through.
pub fn capture_fields<T, F>(record: &T, keep: F) -> Result<Captured, ProjectionError>
where
    T: Serialize + ?Sized,
    F: FnMut(&'static str) -> bool,
{
    record.serialize(FieldCapture { keep })
}

struct FieldCapture<F> {
    keep: F,
}

struct StructCapture<F> {
    keep: F,
    captured: Captured,
}

type Rejected = Impossible<Captured, ProjectionError>;

impl<F> Serializer for FieldCapture<F>
where
    F: FnMut(&'static str) -> bool,
{
    type Ok = Captured;
    type Error = ProjectionError;

    type SerializeSeq = Rejected;
    type SerializeTuple = Rejected;
    type SerializeTupleStruct = Rejected;
    type SerializeTupleVariant = Rejected;
    type SerializeMap = Rejected;
    type SerializeStruct = StructCapture<F>;
    type SerializeStructVariant = Rejected;

    fn serialize_bool(self, _v: bool) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_i128(self, _v: i128) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_u128(self, _v: u128) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("float"))
    }

    fn serialize_char(self, _v: char) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("bytes"))
    }

    fn serialize_none(self) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::NilInput)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Captured, ProjectionError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::NilInput)
    }

    // `struct Marker;` is a struct without fields
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Captured, ProjectionError> {
        Ok(Captured::default())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Captured, ProjectionError> {
        Err(ProjectionError::not_a_struct("enum variant"))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Captured, ProjectionError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Captured, ProjectionError>
    where
        T: ?Sized + Serialize,
    {
        Err(ProjectionError::not_a_struct("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Rejected, ProjectionError> {
        Err(ProjectionError::not_a_struct("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Rejected, ProjectionError> {
        Err(ProjectionError::not_a_struct("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Rejected, ProjectionError> {
        Err(ProjectionError::not_a_struct("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Rejected, ProjectionError> {
        Err(ProjectionError::not_a_struct("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Rejected, ProjectionError> {
        Err(ProjectionError::not_a_struct("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<StructCapture<F>, ProjectionError> {
        Ok(StructCapture {
            keep: self.keep,
            captured: Captured {
                fields: Vec::with_capacity(len),
                visited: 0,
            },
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Rejected, ProjectionError> {
        Err(ProjectionError::not_a_struct("enum variant"))
    }
}

impl<F> SerializeStruct for StructCapture<F>
where
    F: FnMut(&'static str) -> bool,
{
    type Ok = Captured;
    type Error = ProjectionError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ProjectionError>
    where
        T: ?Sized + Serialize,
    {
        self.captured.visited += 1;
        if !(self.keep)(key) {
            return Ok(());
        }

        let value = serde_json::to_value(value).map_err(|source| ProjectionError::FieldValue {
            field: key.to_string(),
            source,
        })?;
        self.captured.fields.push(CapturedField { name: key, value });
        Ok(())
    }

    // `skip_serializing_if` held: the field is visited but never projected
    fn skip_field(&mut self, _key: &'static str) -> Result<(), ProjectionError> {
        self.captured.visited += 1;
        Ok(())
    }

    fn end(self) -> Result<Captured, ProjectionError> {
        Ok(self.captured)
    }
}
