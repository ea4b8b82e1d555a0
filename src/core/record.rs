use std::fmt::{Display, Formatter};

/// Composite class label: every label column of a row, in order.
///
/// Equality, hashing and ordering are structural over the whole sequence, so
/// two rows fall in the same class only when all label columns agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(Vec<String>);

impl Label {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Label {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// A single data row: categorical attribute values plus its label.
///
/// An empty attribute value means the value is missing for that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    attribute_values: Vec<String>,
    label: Label,
}

impl Record {
    pub fn new(attribute_values: Vec<String>, label: Label) -> Self {
        Self {
            attribute_values,
            label,
        }
    }

    pub fn attribute_values(&self) -> &[String] {
        &self.attribute_values
    }

    /// Value of column `index`, or `None` when it is missing or out of range.
    #[inline]
    pub fn value_at_index(&self, index: usize) -> Option<&str> {
        self.attribute_values
            .get(index)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    #[inline]
    pub fn is_missing_at_index(&self, index: usize) -> bool {
        self.value_at_index(index).is_none()
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attribute_values.len()
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}
