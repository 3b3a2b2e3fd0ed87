use crate::fields::{DetectedField, FieldType};
use crate::mapping::naming::generate_standard_name;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One output row, keyed by standardized name in mapping order.
///
/// A field whose path does not resolve in the source record is absent from
/// the row; a JSON `null` in the source is kept as `null`.
pub type StandardizedRecord = Map<String, Value>;

/// Selection and naming for one detected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub original_key: String,

    /// Joins back to `DetectedField::path`
    pub original_path: String,

    pub standard_name: String,

    pub is_selected: bool,

    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldMapping {
    /// Selected mapping with a heuristic standard name
    pub fn from_field(field: &DetectedField) -> Self {
        FieldMapping {
            original_key: field.key.clone(),
            original_path: field.path.clone(),
            standard_name: generate_standard_name(&field.key),
            is_selected: true,
            field_type: field.field_type,
        }
    }
}

/// Errors from editing a mapping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("No field with path '{0}'")]
    UnknownField(String),

    #[error("Standard name must not be empty")]
    EmptyName,

    #[error("Standard name '{name}' is already used by '{used_by}'")]
    DuplicateName { name: String, used_by: String },
}

/// Ordered mappings, at most one per original path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSet {
    mappings: Vec<FieldMapping>,
}

impl MappingSet {
    /// Build mappings for detected fields, all selected, in detection order
    pub fn from_fields(fields: &[DetectedField]) -> Self {
        let mut set = MappingSet::default();
        for field in fields {
            if set.get(&field.path).is_none() {
                set.mappings.push(FieldMapping::from_field(field));
            }
        }
        set
    }

    pub fn as_slice(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FieldMapping> {
        self.mappings.iter().find(|m| m.original_path == path)
    }

    /// Mappings that feed the output, in order
    pub fn selected(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.iter().filter(|m| m.is_selected)
    }

    /// Flip selection of the mapping at `path`; returns the new state
    pub fn toggle(&mut self, path: &str) -> Result<bool, MappingError> {
        let mapping = self.get_mut(path)?;
        mapping.is_selected = !mapping.is_selected;
        Ok(mapping.is_selected)
    }

    /// Explicitly set selection of the mapping at `path`
    pub fn set_selected(&mut self, path: &str, selected: bool) -> Result<(), MappingError> {
        self.get_mut(path)?.is_selected = selected;
        Ok(())
    }

    /// Rename the mapping at `path`.
    ///
    /// The name is trimmed, must not be empty, and must not be used by any
    /// other mapping.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<(), MappingError> {
        if self.get(path).is_none() {
            return Err(MappingError::UnknownField(path.to_string()));
        }

        let name = new_name.trim();
        if name.is_empty() {
            return Err(MappingError::EmptyName);
        }

        if let Some(other) = self
            .mappings
            .iter()
            .find(|m| m.original_path != path && m.standard_name == name)
        {
            return Err(MappingError::DuplicateName {
                name: name.to_string(),
                used_by: other.original_path.clone(),
            });
        }

        self.get_mut(path)?.standard_name = name.to_string();
        Ok(())
    }

    fn get_mut(&mut self, path: &str) -> Result<&mut FieldMapping, MappingError> {
        self.mappings
            .iter_mut()
            .find(|m| m.original_path == path)
            .ok_or_else(|| MappingError::UnknownField(path.to_string()))
    }
}
