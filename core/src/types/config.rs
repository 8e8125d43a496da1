use serde::{Deserialize, Serialize};


/// A parameter the session starts with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedParam {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl SeedParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        SeedParam {
            name: name.into(),
            value: value.into(),
        }
    }
}


/// Editor settings, read from an optional YAML file.
///
/// Every field has a default so a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Title shown on the parameter list border.
    pub title: String,
    /// Text shown in an empty value field.
    pub placeholder: String,
    /// Parameters present when the session starts.
    pub seed: Vec<SeedParam>,
    /// Event poll interval of the terminal editor, in milliseconds.
    pub tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title: "Parameters".into(),
            placeholder: "Введите значение".into(),
            seed: vec![
                SeedParam::new("Назначение", "повседневное"),
                SeedParam::new("Длина", "макси"),
            ],
            tick_ms: 250,
        }
    }
}
