//! Keys the builder reacts to

/// A key press, reduced to what the builder distinguishes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Enter,
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Delete" => Key::Delete,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}
