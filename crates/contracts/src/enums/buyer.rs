use serde::{Deserialize, Serialize};

/// Configured buyer catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Buyer {
    #[serde(rename = "DUNS")]
    Duns,
    #[serde(rename = "MORE THAN A FLINGS")]
    MoreThanAFlings,
}

impl Buyer {
    /// Display name as it appears on packing documents
    pub fn display_name(&self) -> &'static str {
        match self {
            Buyer::Duns => "DUNS",
            Buyer::MoreThanAFlings => "MORE THAN A FLINGS",
        }
    }

    /// All configured buyers
    pub fn all() -> Vec<Buyer> {
        vec![Buyer::Duns, Buyer::MoreThanAFlings]
    }

    /// Parse from the display name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DUNS" => Some(Buyer::Duns),
            "MORE THAN A FLINGS" => Some(Buyer::MoreThanAFlings),
            _ => None,
        }
    }
}

impl std::fmt::Display for Buyer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trip() {
        for buyer in Buyer::all() {
            assert_eq!(Buyer::from_name(buyer.display_name()), Some(buyer));
        }
        assert_eq!(Buyer::from_name(""), None);
        assert_eq!(Buyer::from_name("duns"), None);
    }
}
