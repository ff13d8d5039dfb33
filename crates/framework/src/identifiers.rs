//! Newtype identifiers for graph configuration names.
//!
//! Every configured name is represented as a distinct newtype wrapping a
//! `String`. This prevents accidentally interchanging — for example — a
//! [`StreamName`] with a [`SidePacketName`] even though both are strings
//! under the hood.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Names a stream edge in the graph configuration (e.g. `"input_matrix"`,
    /// `"output_matrix"`).
    ///
    /// Stream names are unique per graph; the engine uses them to wire one
    /// calculator's output to another's input.
    StreamName
}

string_id! {
    /// Names a side packet in the graph configuration (e.g. `"side_matrix"`).
    ///
    /// A side packet is delivered once, before the stream starts, and stays
    /// constant for the life of the graph.
    SidePacketName
}
