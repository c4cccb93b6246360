use indexmap::IndexMap;

/// The value recovered for one field during extraction.
///
/// Fields mirror the named-capture structure of the compiled expression: a
/// field whose group contains no further named groups yields text, one with
/// nested groups yields a record, and a field captured several times within
/// one parent match yields a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// The field's group did not participate in the match.
    Missing,

    /// A single captured string.
    Text(String),

    /// Several captures within one parent match, in order.
    List(Vec<Field>),

    /// Nested fields keyed by their logical (suffix-stripped) names.
    Record(IndexMap<String, Field>),
}

/// The top-level extraction result: every field name maps to its matches
/// over the whole input, in order of occurrence.
pub type ResultTree = IndexMap<String, Vec<Field>>;

impl Field {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    /// The captured text, when the field is a single string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The nested record, when the field has children.
    pub fn as_record(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The capture list, when the field matched more than once.
    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Field::List(items) => Some(items),
            _ => None,
        }
    }
}
