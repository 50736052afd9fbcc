//! Parameterized `IN` / `NOT IN` list fragments.
//!
//! Caller-supplied category codes are never spliced into SQL text; each
//! value gets its own placeholder and is bound at execution time.

/// A placeholder fragment plus its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct InList {
    /// `"$4, $5, $6"` style fragment, empty when there are no values.
    pub placeholders: String,
    pub values: Vec<String>,
}

impl InList {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The number of placeholders this fragment consumes, so callers can
    /// number a following fragment without collisions.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Build the placeholder list for an `IN (...)` or `NOT IN (...)` clause.
///
/// `first_param` is the index of the first free `$n` placeholder in the
/// enclosing query. With no values the fragment is empty and the caller
/// must omit the clause entirely: an empty `IN ()` is not valid SQL.
///
/// Values are passed through untouched; a value the bind layer cannot
/// handle fails as that query's own error.
pub fn in_list(values: &[String], first_param: usize) -> InList {
    let placeholders = values
        .iter()
        .enumerate()
        .map(|(i, _)| format!("${}", first_param + i))
        .collect::<Vec<_>>()
        .join(", ");

    InList {
        placeholders,
        values: values.to_vec(),
    }
}
