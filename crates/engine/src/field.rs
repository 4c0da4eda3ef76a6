//! Canonical student fields and the header spellings accepted for each.
//!
//! Uploaded sheets use either the human labels from the template
//! ("First Name") or the camelCase property names ("firstName"). Lookup walks
//! the alias list in order and takes the first non-blank value.

/// A canonical field of the student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Gender,
    Department,
    Batch,
    RollNumber,
    Cgpa,
    ActiveBacklogs,
    BacklogHistory,
    TenthPercentage,
    TwelfthPercentage,
    Skills,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Gender,
        Field::Department,
        Field::Batch,
        Field::RollNumber,
        Field::Cgpa,
        Field::ActiveBacklogs,
        Field::BacklogHistory,
        Field::TenthPercentage,
        Field::TwelfthPercentage,
        Field::Skills,
    ];

    /// Accepted header spellings, in priority order. The first entry is the
    /// human label used by the template.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::FirstName => &["First Name", "firstName"],
            Field::LastName => &["Last Name", "lastName"],
            Field::Email => &["Email", "email"],
            Field::Phone => &["Phone", "phone"],
            Field::Gender => &["Gender", "gender"],
            Field::Department => &["Department", "department"],
            Field::Batch => &["Batch", "batch"],
            Field::RollNumber => &["Roll Number", "rollNumber"],
            Field::Cgpa => &["CGPA", "cgpa"],
            Field::ActiveBacklogs => &["Active Backlogs", "activeBacklogs"],
            Field::BacklogHistory => &["Backlog History", "backlogHistory"],
            Field::TenthPercentage => &["10th %", "tenthPercentage"],
            Field::TwelfthPercentage => &["12th %", "twelfthPercentage"],
            Field::Skills => &["Skills", "skills"],
        }
    }

    /// Human label, as printed in the template header row.
    pub fn label(self) -> &'static str {
        self.aliases()[0]
    }

    /// Find the field a header belongs to, if any.
    pub fn from_header(header: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| f.aliases().contains(&header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_label_and_alias() {
        for field in Field::ALL {
            assert_eq!(field.aliases().len(), 2, "{:?}", field);
            assert_eq!(field.label(), field.aliases()[0]);
        }
    }

    #[test]
    fn test_from_header() {
        assert_eq!(Field::from_header("First Name"), Some(Field::FirstName));
        assert_eq!(Field::from_header("rollNumber"), Some(Field::RollNumber));
        assert_eq!(Field::from_header("12th %"), Some(Field::TwelfthPercentage));
        assert_eq!(Field::from_header("first name"), None);
        assert_eq!(Field::from_header("Notes"), None);
    }
}
