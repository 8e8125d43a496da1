use std::fmt;

use serde::{Deserialize, Serialize};


/// Identifier of a parameter. Unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamId(pub u64);

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParamId {
    fn from(raw: u64) -> Self {
        ParamId(raw)
    }
}


/// Value type of a parameter. Only plain strings are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    #[default]
    String,
}


/// A named field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub id: ParamId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
}

impl Param {
    pub fn new(id: impl Into<ParamId>, name: impl Into<String>) -> Self {
        Param {
            id: id.into(),
            name: name.into(),
            param_type: ParamType::String,
        }
    }
}


/// The current value bound to a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamValue {
    pub param_id: ParamId,
    pub value: String,
}

impl ParamValue {
    pub fn new(param_id: impl Into<ParamId>, value: impl Into<String>) -> Self {
        ParamValue {
            param_id: param_id.into(),
            value: value.into(),
        }
    }
}


/// Snapshot of all parameter values, in parameter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub param_values: Vec<ParamValue>,
}


/// One row of the read view: a parameter joined with its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamEntry {
    pub id: ParamId,
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub value: String,
}

impl ParamEntry {
    /// Tab-separated `id name value` line used by the text output format.
    pub fn to_line(&self) -> String {
        format!("{}\t{}\t{}", self.id, self.name, self.value)
    }
}
