use crate::field::Field;
use crate::value::CellValue;

/// One data row of an upload, keyed by the header labels the file used.
///
/// Header order is kept so rows can be echoed back in the order they were read.
/// A header missing from the row means the cell was absent or blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `header` to `value`, replacing an earlier value under the same header.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        let header = header.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(h, _)| *h == header) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((header, value)),
        }
    }

    /// Value stored under exactly this header.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(h, _)| h == header).map(|(_, v)| v)
    }

    /// Value of a canonical field: the first alias holding a non-blank value.
    pub fn lookup(&self, field: Field) -> Option<&CellValue> {
        field
            .aliases()
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|v| !v.is_blank())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_prefers_label_then_alias() {
        let row: RawRow = [("First Name", "Ada"), ("firstName", "Grace")].into_iter().collect();
        assert_eq!(row.lookup(Field::FirstName), Some(&CellValue::from("Ada")));

        let row: RawRow = [("firstName", "Grace")].into_iter().collect();
        assert_eq!(row.lookup(Field::FirstName), Some(&CellValue::from("Grace")));
    }

    #[test]
    fn test_lookup_skips_blank_label() {
        let row: RawRow = [("First Name", "  "), ("firstName", "Grace")].into_iter().collect();
        assert_eq!(row.lookup(Field::FirstName), Some(&CellValue::from("Grace")));

        let row: RawRow = [("First Name", "")].into_iter().collect();
        assert_eq!(row.lookup(Field::FirstName), None);
    }

    #[test]
    fn test_insert_replaces_and_keeps_order() {
        let mut row = RawRow::new();
        row.insert("Email", "a@b.co");
        row.insert("CGPA", 8.0);
        row.insert("Email", "c@d.co");
        assert_eq!(row.headers().collect::<Vec<_>>(), vec!["Email", "CGPA"]);
        assert_eq!(row.get("Email"), Some(&CellValue::from("c@d.co")));
        assert_eq!(row.len(), 2);
    }
}
