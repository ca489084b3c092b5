//! Record layouts, one per record type.
//!
//! Each record type maps to a fixed list of [`Step`]s. Widths and element
//! names are part of the data contract with the downstream transforms and
//! with the fixed-width writer, so they must not drift.
//!
//! | Tag   | Layout                                                    |
//! |-------|-----------------------------------------------------------|
//! | `000` | open root `people`                                        |
//! | `001` | `personCount`(10) `creationDate`(10, untrimmed)           |
//! | `100` | open `person`                                             |
//! | `101` | `personId`(10) `firstName`(30) `lastName`(30)             |
//! | `201` | `address` with id, 5 lines, city, county, state, country, |
//! |       | postal code and postal code type                          |
//! | `301` | `phone` with `phoneNumber`(20) `phoneNumberType`(6)       |
//! | `199` | close current element                                     |
//! | `999` | close root, end document                                  |

use crate::record::TAG_WIDTH;

/// Padding side used when a value is written back to fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A leaf element read from a fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub width: usize,
    /// Strip padding on read. Untrimmed fields keep their exact content.
    pub trim: bool,
    pub align: Align,
}

impl Field {
    pub const fn trimmed(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            trim: true,
            align: Align::Left,
        }
    }

    pub const fn raw(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            trim: false,
            align: Align::Left,
        }
    }

    pub const fn right(self) -> Self {
        Self {
            align: Align::Right,
            ..self
        }
    }
}

/// One instruction of a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StartRoot(&'static str),
    Start(&'static str),
    /// Open the field's element, emit its text, close it.
    Field(Field),
    End,
    EndRoot,
}

/// Root element of every document.
pub const ROOT_ELEMENT: &str = "people";
pub const PERSON_ELEMENT: &str = "person";
pub const ADDRESS_ELEMENT: &str = "address";
pub const PHONE_ELEMENT: &str = "phone";

const DOCUMENT_START: &[Step] = &[Step::StartRoot(ROOT_ELEMENT)];

const HEADER: &[Step] = &[
    Step::Field(Field::trimmed("personCount", 10).right()),
    Step::Field(Field::raw("creationDate", 10)),
];

const PERSON_START: &[Step] = &[Step::Start(PERSON_ELEMENT)];

const PERSON_IDENTITY: &[Step] = &[
    Step::Field(Field::trimmed("personId", 10).right()),
    Step::Field(Field::trimmed("firstName", 30)),
    Step::Field(Field::trimmed("lastName", 30)),
];

const ADDRESS: &[Step] = &[
    Step::Start(ADDRESS_ELEMENT),
    Step::Field(Field::trimmed("addressId", 10).right()),
    Step::Field(Field::trimmed("line1", 50)),
    Step::Field(Field::trimmed("line2", 50)),
    Step::Field(Field::trimmed("line3", 50)),
    Step::Field(Field::trimmed("line4", 50)),
    Step::Field(Field::trimmed("line5", 50)),
    Step::Field(Field::trimmed("city", 30)),
    Step::Field(Field::trimmed("county", 30)),
    Step::Field(Field::trimmed("state", 30)),
    Step::Field(Field::raw("countryIso", 2)),
    Step::Field(Field::raw("postalCode", 30)),
    Step::Field(Field::raw("postalCodeType", 10)),
    Step::End,
];

const PHONE: &[Step] = &[
    Step::Start(PHONE_ELEMENT),
    Step::Field(Field::trimmed("phoneNumber", 20)),
    Step::Field(Field::trimmed("phoneNumberType", 6)),
    Step::End,
];

const CLOSE: &[Step] = &[Step::End];

const DOCUMENT_END: &[Step] = &[Step::EndRoot];

/// The closed set of record types understood by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    DocumentStart,
    Header,
    PersonStart,
    PersonIdentity,
    Address,
    Phone,
    Close,
    DocumentEnd,
}

impl RecordType {
    pub const ALL: [RecordType; 8] = [
        RecordType::DocumentStart,
        RecordType::Header,
        RecordType::PersonStart,
        RecordType::PersonIdentity,
        RecordType::Address,
        RecordType::Phone,
        RecordType::Close,
        RecordType::DocumentEnd,
    ];

    /// Look up a type tag. Unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "000" => Some(RecordType::DocumentStart),
            "001" => Some(RecordType::Header),
            "100" => Some(RecordType::PersonStart),
            "101" => Some(RecordType::PersonIdentity),
            "201" => Some(RecordType::Address),
            "301" => Some(RecordType::Phone),
            "199" => Some(RecordType::Close),
            "999" => Some(RecordType::DocumentEnd),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            RecordType::DocumentStart => "000",
            RecordType::Header => "001",
            RecordType::PersonStart => "100",
            RecordType::PersonIdentity => "101",
            RecordType::Address => "201",
            RecordType::Phone => "301",
            RecordType::Close => "199",
            RecordType::DocumentEnd => "999",
        }
    }

    pub fn steps(self) -> &'static [Step] {
        match self {
            RecordType::DocumentStart => DOCUMENT_START,
            RecordType::Header => HEADER,
            RecordType::PersonStart => PERSON_START,
            RecordType::PersonIdentity => PERSON_IDENTITY,
            RecordType::Address => ADDRESS,
            RecordType::Phone => PHONE,
            RecordType::Close => CLOSE,
            RecordType::DocumentEnd => DOCUMENT_END,
        }
    }

    /// Fields of this layout, in line order.
    pub fn fields(self) -> impl Iterator<Item = Field> {
        self.steps().iter().filter_map(|step| match step {
            Step::Field(field) => Some(*field),
            _ => None,
        })
    }

    /// Container element this record type opens, if any.
    pub fn element(self) -> Option<&'static str> {
        self.steps().iter().find_map(|step| match *step {
            Step::StartRoot(name) | Step::Start(name) => Some(name),
            _ => None,
        })
    }

    /// Full line width: tag plus every field.
    pub fn width(self) -> usize {
        TAG_WIDTH + self.fields().map(|f| f.width).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for rt in RecordType::ALL {
            assert_eq!(RecordType::from_tag(rt.tag()), Some(rt));
        }
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(RecordType::from_tag("200"), None);
        assert_eq!(RecordType::from_tag("299"), None);
        assert_eq!(RecordType::from_tag(""), None);
    }

    #[test]
    fn test_widths() {
        assert_eq!(RecordType::DocumentStart.width(), 3);
        assert_eq!(RecordType::Header.width(), 23);
        assert_eq!(RecordType::PersonIdentity.width(), 73);
        assert_eq!(RecordType::Address.width(), 395);
        assert_eq!(RecordType::Phone.width(), 29);
        assert_eq!(RecordType::Close.width(), 3);
    }

    #[test]
    fn test_address_field_order() {
        let names: Vec<&str> = RecordType::Address.fields().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "addressId",
                "line1",
                "line2",
                "line3",
                "line4",
                "line5",
                "city",
                "county",
                "state",
                "countryIso",
                "postalCode",
                "postalCodeType",
            ]
        );
    }

    #[test]
    fn test_untrimmed_fields() {
        let raw: Vec<&str> = RecordType::ALL
            .iter()
            .flat_map(|rt| rt.fields())
            .filter(|f| !f.trim)
            .map(|f| f.name)
            .collect();
        assert_eq!(
            raw,
            vec!["creationDate", "countryIso", "postalCode", "postalCodeType"]
        );
    }

    #[test]
    fn test_container_elements() {
        assert_eq!(RecordType::DocumentStart.element(), Some(ROOT_ELEMENT));
        assert_eq!(RecordType::PersonStart.element(), Some(PERSON_ELEMENT));
        assert_eq!(RecordType::Address.element(), Some(ADDRESS_ELEMENT));
        assert_eq!(RecordType::Phone.element(), Some(PHONE_ELEMENT));
        assert_eq!(RecordType::Header.element(), None);
        assert_eq!(RecordType::Close.element(), None);
    }

    #[test]
    fn test_container_steps_balance() {
        for rt in [RecordType::Address, RecordType::Phone] {
            let opens = rt
                .steps()
                .iter()
                .filter(|s| matches!(s, Step::Start(_)))
                .count();
            let closes = rt.steps().iter().filter(|s| matches!(s, Step::End)).count();
            assert_eq!(opens, closes, "{:?} layout is unbalanced", rt);
        }
    }
}
