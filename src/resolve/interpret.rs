//! AQI interpretation
//!
//! Six bands from the aqicn.org "About the Air Quality Levels" table. Each
//! band has a category, a severity and localized label/description texts.

use serde::{Deserialize, Serialize};

/// Air quality category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Severity of a category, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

/// Language of labels and descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Pl,
    En,
}

/// Upper bounds (exclusive) of each band, ascending
const BANDS: [(i32, AqiCategory); 5] = [
    (50, AqiCategory::Good),
    (100, AqiCategory::Moderate),
    (150, AqiCategory::UnhealthyForSensitiveGroups),
    (200, AqiCategory::Unhealthy),
    (300, AqiCategory::VeryUnhealthy),
];

impl AqiCategory {
    /// Categorize an AQI value; the first band whose bound exceeds it wins
    pub fn from_aqi(aqi: i32) -> Self {
        BANDS
            .iter()
            .find(|(bound, _)| aqi < *bound)
            .map(|(_, category)| *category)
            .unwrap_or(AqiCategory::Hazardous)
    }

    /// All categories, mildest first
    pub fn all() -> [AqiCategory; 6] {
        [
            AqiCategory::Good,
            AqiCategory::Moderate,
            AqiCategory::UnhealthyForSensitiveGroups,
            AqiCategory::Unhealthy,
            AqiCategory::VeryUnhealthy,
            AqiCategory::Hazardous,
        ]
    }

    /// Stable identifier, used as the key of the localized texts
    pub fn id(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::UnhealthyForSensitiveGroups => "unhealthy_for_sensitive_groups",
            Self::Unhealthy => "unhealthy",
            Self::VeryUnhealthy => "very_unhealthy",
            Self::Hazardous => "hazardous",
        }
    }

    /// AQI range covered by this category, as (inclusive lower, exclusive upper)
    pub fn range(&self) -> (i32, Option<i32>) {
        match self {
            Self::Good => (0, Some(50)),
            Self::Moderate => (50, Some(100)),
            Self::UnhealthyForSensitiveGroups => (100, Some(150)),
            Self::Unhealthy => (150, Some(200)),
            Self::VeryUnhealthy => (200, Some(300)),
            Self::Hazardous => (300, None),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Good => Severity::Success,
            Self::Moderate => Severity::Warning,
            _ => Severity::Danger,
        }
    }

    /// Short label
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Good) => "Good",
            (Locale::En, Self::Moderate) => "Moderate",
            (Locale::En, Self::UnhealthyForSensitiveGroups) => "Unhealthy for sensitive groups",
            (Locale::En, Self::Unhealthy) => "Unhealthy",
            (Locale::En, Self::VeryUnhealthy) => "Very unhealthy",
            (Locale::En, Self::Hazardous) => "Hazardous",

            (Locale::Pl, Self::Good) => "Dobra",
            (Locale::Pl, Self::Moderate) => "Średnia",
            (Locale::Pl, Self::UnhealthyForSensitiveGroups) => "Niezdrowa dla osób wrażliwych",
            (Locale::Pl, Self::Unhealthy) => "Niezdrowa",
            (Locale::Pl, Self::VeryUnhealthy) => "Bardzo niezdrowa",
            (Locale::Pl, Self::Hazardous) => "Zagrożenie dla życia",
        }
    }

    /// Health implications
    pub fn description(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Good) => {
                "Air quality is considered satisfactory, and air pollution poses little or no risk."
            }
            (Locale::En, Self::Moderate) => {
                "Air quality is acceptable; however, for some pollutants there may be a moderate \
                 health concern for a very small number of people who are unusually sensitive to \
                 air pollution."
            }
            (Locale::En, Self::UnhealthyForSensitiveGroups) => {
                "Members of sensitive groups may experience health effects. The general public is \
                 not likely to be affected."
            }
            (Locale::En, Self::Unhealthy) => {
                "Everyone may begin to experience health effects; members of sensitive groups may \
                 experience more serious health effects."
            }
            (Locale::En, Self::VeryUnhealthy) => {
                "Health warnings of emergency conditions. The entire population is more likely to \
                 be affected."
            }
            (Locale::En, Self::Hazardous) => {
                "Health alert: everyone may experience more serious health effects."
            }

            (Locale::Pl, Self::Good) => {
                "Jakość powietrza jest uznawana za zadowalającą, a zanieczyszczenie powietrza \
                 stanowi niewielkie ryzyko lub jego brak."
            }
            (Locale::Pl, Self::Moderate) => {
                "Jakość powietrza jest dopuszczalna, jednak niektóre zanieczyszczenia mogą być \
                 umiarkowanie szkodliwe dla bardzo małej liczby osób, które są niezwykle wrażliwe \
                 na zanieczyszczenie powietrza."
            }
            (Locale::Pl, Self::UnhealthyForSensitiveGroups) => {
                "U osób wrażliwych mogą wystąpić negatywne skutki dla zdrowia. Większość populacji \
                 może nie odczuwać negatywnych objawów."
            }
            (Locale::Pl, Self::Unhealthy) => {
                "Każdy może zacząć doświadczać negatywnych skutków zdrowotnych. U osób wrażliwych \
                 mogą wystąpić poważniejsze skutki zdrowotne."
            }
            (Locale::Pl, Self::VeryUnhealthy) => {
                "Ostrzeżenie zdrowotne, poziom alarmowy. Bardzo prawdopodobny negatywny wpływ na \
                 całą populację."
            }
            (Locale::Pl, Self::Hazardous) => {
                "Alarm Zdrowotny - każdy może doświadczyć poważniejszych skutków zdrowotnych."
            }
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl Severity {
    /// Bootstrap list-group class for this severity
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "list-group-item-success",
            Self::Warning => "list-group-item-warning",
            Self::Danger => "list-group-item-danger",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pl" | "pl-pl" | "polish" => Ok(Self::Pl),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pl => write!(f, "pl"),
            Self::En => write!(f, "en"),
        }
    }
}

/// Interpretation of a single AQI value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub category: AqiCategory,
    pub label: String,
    pub text: String,
    pub severity: Severity,
}

/// Interpret an AQI value in the given locale
pub fn interpret_aqi(aqi: i32, locale: Locale) -> Interpretation {
    let category = AqiCategory::from_aqi(aqi);
    Interpretation {
        category,
        label: category.label(locale).to_string(),
        text: category.description(locale).to_string(),
        severity: category.severity(),
    }
}
