use serde::{Deserialize, Serialize};

/// Macro to generate a unit enum with an `as_str` + `Display` pair
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(SeverityTier {
    Mild => "Mild",
    Moderate => "Moderate",
    Severe => "Severe",
});

impl SeverityTier {
    /// Colour tag used by the detail view (red / orange / green chips).
    pub fn color(&self) -> &'static str {
        match self {
            Self::Severe => "red",
            Self::Moderate => "orange",
            Self::Mild => "green",
        }
    }
}

str_enum!(Marker {
    Hemoglobin => "hemoglobin",
    WhiteCellCount => "wbc",
    Glucose => "glucose",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_labels_and_colors() {
        assert_eq!(SeverityTier::Severe.as_str(), "Severe");
        assert_eq!(SeverityTier::Severe.color(), "red");
        assert_eq!(SeverityTier::Moderate.color(), "orange");
        assert_eq!(SeverityTier::Mild.color(), "green");
    }

    #[test]
    fn tiers_order_by_severity() {
        assert!(SeverityTier::Mild < SeverityTier::Moderate);
        assert!(SeverityTier::Moderate < SeverityTier::Severe);
    }

    #[test]
    fn marker_serializes_snake_case() {
        let json = serde_json::to_string(&Marker::WhiteCellCount).unwrap();
        assert_eq!(json, "\"white_cell_count\"");
        assert_eq!(Marker::WhiteCellCount.to_string(), "wbc");
    }
}
