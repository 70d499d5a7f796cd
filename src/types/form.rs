// src/types/form.rs
//! Form field values captured at submit time.

use crate::utils::content_type_for;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// File value with a content type guessed from the file name.
    pub fn file(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        FieldValue::File {
            file_name,
            content_type,
            bytes,
        }
    }
}

/// Ordered multimap of field name to value. Immutable once captured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    fields: Vec<(String, FieldValue)>,
}

impl FormSnapshot {
    pub fn builder() -> FormSnapshotBuilder {
        FormSnapshotBuilder::default()
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// All values recorded under `name`, in capture order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        self.fields
            .iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// First text value recorded under `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(field, value)| match value {
            FieldValue::Text(text) if field == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct FormSnapshotBuilder {
    fields: Vec<(String, FieldValue)>,
}

impl FormSnapshotBuilder {
    pub fn field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, FieldValue::text(value))
    }

    pub fn file(self, name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.field(name, FieldValue::file(file_name, bytes))
    }

    pub fn build(self) -> FormSnapshot {
        FormSnapshot {
            fields: self.fields,
        }
    }
}
