use serde::{Deserialize, Serialize};

/// The closed set of attributes a user can filter on, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Type,
    Status,
    YearCompleted,
    TxdotDistrict,
    CityState,
    County,
    OnSystem,
    PreviousControlType,
    Approaches,
    LaneType,
}

impl Attribute {
    /// Number of filterable attributes.
    pub const COUNT: usize = 10;

    /// All attributes, in sidebar order.
    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::Type,
        Attribute::Status,
        Attribute::YearCompleted,
        Attribute::TxdotDistrict,
        Attribute::CityState,
        Attribute::County,
        Attribute::OnSystem,
        Attribute::PreviousControlType,
        Attribute::Approaches,
        Attribute::LaneType,
    ];

    /// Dense index into per-attribute tables.
    #[inline] pub fn index(self) -> usize { self as usize }

    /// Record key used in the JSON dataset.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Type => "type",
            Attribute::Status => "status",
            Attribute::YearCompleted => "yearCompleted",
            Attribute::TxdotDistrict => "txdotDistrict",
            Attribute::CityState => "cityState",
            Attribute::County => "county",
            Attribute::OnSystem => "onSystem",
            Attribute::PreviousControlType => "previousControlType",
            Attribute::Approaches => "approaches",
            Attribute::LaneType => "laneType",
        }
    }

    /// Human-readable label for sidebar sections.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Type => "Intersection Type",
            Attribute::Status => "Status",
            Attribute::YearCompleted => "Year Completed",
            Attribute::TxdotDistrict => "District",
            Attribute::CityState => "City/State",
            Attribute::County => "County",
            Attribute::OnSystem => "System",
            Attribute::PreviousControlType => "Previous Control Type",
            Attribute::Approaches => "Approaches",
            Attribute::LaneType => "Lane Type",
        }
    }

    /// Parse a JSON record key (e.g. "laneType").
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.key() == key)
    }

    /// True for attributes whose values are years rather than text.
    #[inline] pub fn is_year(self) -> bool { self == Attribute::YearCompleted }

    /// True for attributes every well-formed record carries.
    pub fn is_required(self) -> bool {
        matches!(self, Attribute::Type | Attribute::Status | Attribute::Approaches | Attribute::LaneType)
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::Attribute;

    #[test]
    fn index_matches_position_in_all() {
        for (i, attr) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attr.index(), i);
        }
    }

    #[test]
    fn keys_round_trip() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_key(attr.key()), Some(attr));
        }
        assert_eq!(Attribute::from_key("comments"), None);
        assert_eq!(Attribute::from_key("Type"), None);
    }

    #[test]
    fn serde_uses_record_keys() {
        let json = serde_json::to_string(&Attribute::PreviousControlType).unwrap();
        assert_eq!(json, "\"previousControlType\"");
        let attr: Attribute = serde_json::from_str("\"laneType\"").unwrap();
        assert_eq!(attr, Attribute::LaneType);
    }
}
