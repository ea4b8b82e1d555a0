use crate::core::error::RatioError;
use crate::core::record::{Label, Record};

/// In-memory, ordered collection of [`Record`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Splits raw rows at `attribute_count`: the leading cells become the
    /// attribute values and the cells up to `header.len()` become the label.
    ///
    /// Cells past the header width are ignored. A row narrower than the header
    /// fails with [`RatioError::RowOutOfRange`].
    pub fn from_rows<S, I>(
        header: &[S],
        rows: I,
        attribute_count: usize,
    ) -> Result<Self, RatioError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Vec<String>>,
    {
        let width = header.len();
        if attribute_count > width {
            return Err(RatioError::AttributeCountOutOfRange {
                attribute_count,
                width,
            });
        }

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, mut cells)| {
                if cells.len() < width {
                    return Err(RatioError::RowOutOfRange {
                        row,
                        expected: width,
                        got: cells.len(),
                    });
                }
                cells.truncate(width);
                let label = Label::new(cells.split_off(attribute_count));
                Ok(Record::new(cells, label))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of attribute columns, taken as the widest record.
    pub fn attribute_width(&self) -> usize {
        self.records
            .iter()
            .map(Record::number_of_attributes)
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
