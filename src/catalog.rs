//! The sample locations and items that back autocomplete suggestions.
//!
//! The lists are static and never change while the server runs. Item lists are
//! partitioned by [Category], locations are a single flat list.

use std::{fmt::Display, str::FromStr, sync::OnceLock};

use crate::Error;

/// The kind of item or service a user is asking about.
///
/// The category only decides which item list backs the suggestions, it is
/// never sent to the price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Food and drinks.
    #[default]
    Food,
    /// Places to stay.
    Accommodation,
    /// Getting around.
    Transportation,
    /// Activities and entertainment.
    Activities,
    /// Shopping.
    Shopping,
}

impl Category {
    /// Every category, in the order they are shown in the category select.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Accommodation,
        Category::Transportation,
        Category::Activities,
        Category::Shopping,
    ];

    /// The value used for this category in forms and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Accommodation => "accommodation",
            Category::Transportation => "transportation",
            Category::Activities => "activities",
            Category::Shopping => "shopping",
        }
    }

    /// The human readable name of the category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food & Drinks",
            Category::Accommodation => "Accommodation",
            Category::Transportation => "Transportation",
            Category::Activities => "Activities & Entertainment",
            Category::Shopping => "Shopping",
        }
    }

    /// The sample items for this category.
    pub fn items(self) -> &'static [&'static str] {
        match self {
            Category::Food => FOOD_ITEMS,
            Category::Accommodation => ACCOMMODATION_ITEMS,
            Category::Transportation => TRANSPORTATION_ITEMS,
            Category::Activities => ACTIVITY_ITEMS,
            Category::Shopping => SHOPPING_ITEMS,
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sample locations offered as suggestions for the location field.
pub const LOCATIONS: &[&str] = &[
    "Bangkok, Thailand",
    "Chiang Mai, Thailand",
    "Hanoi, Vietnam",
    "Ho Chi Minh City, Vietnam",
    "Bali, Indonesia",
    "Kuala Lumpur, Malaysia",
    "Singapore",
    "Tokyo, Japan",
    "Kyoto, Japan",
    "Seoul, South Korea",
    "Manila, Philippines",
    "Siem Reap, Cambodia",
    "Kathmandu, Nepal",
    "Delhi, India",
    "Istanbul, Turkey",
    "Lisbon, Portugal",
    "Barcelona, Spain",
    "Paris, France",
    "Rome, Italy",
    "Berlin, Germany",
    "Prague, Czech Republic",
    "Budapest, Hungary",
    "London, United Kingdom",
    "Marrakech, Morocco",
    "Cairo, Egypt",
    "Cape Town, South Africa",
    "Mexico City, Mexico",
    "Lima, Peru",
    "Buenos Aires, Argentina",
    "New York, USA",
];

const FOOD_ITEMS: &[&str] = &[
    "Pad Thai",
    "Street food Pad Thai",
    "Bowl of pho",
    "Banh mi",
    "Nasi goreng",
    "Bottle of water",
    "Local beer",
    "Cappuccino",
    "Fresh coconut",
    "Mango sticky rice",
    "Three course meal",
    "Fast food combo meal",
];

const ACCOMMODATION_ITEMS: &[&str] = &[
    "Hostel dorm bed",
    "Budget hotel room",
    "Mid-range hotel room",
    "Luxury hotel room",
    "Guesthouse double room",
    "Private apartment",
    "Beach bungalow",
];

const TRANSPORTATION_ITEMS: &[&str] = &[
    "Taxi from airport",
    "Tuk tuk ride",
    "Motorbike taxi",
    "Metro ticket",
    "City bus ticket",
    "Scooter rental per day",
    "Overnight train",
    "Long distance bus",
];

const ACTIVITY_ITEMS: &[&str] = &[
    "Museum entry",
    "Temple entry",
    "Cooking class",
    "Thai massage",
    "Snorkeling trip",
    "Walking tour",
    "Cinema ticket",
    "Island hopping tour",
];

const SHOPPING_ITEMS: &[&str] = &[
    "SIM card with data",
    "Sunscreen",
    "T-shirt at market",
    "Elephant pants",
    "Souvenir magnet",
    "Pack of cigarettes",
    "Toothpaste",
];

/// Every sample item across all categories, in category order.
pub fn all_items() -> &'static [&'static str] {
    static ALL_ITEMS: OnceLock<Vec<&'static str>> = OnceLock::new();

    ALL_ITEMS.get_or_init(|| {
        Category::ALL
            .into_iter()
            .flat_map(|category| category.items().iter().copied())
            .collect()
    })
}

/// The item list backing suggestions for the raw category value `category`.
///
/// Values that are not a known category fall back to [all_items].
pub fn items_for(category: &str) -> &'static [&'static str] {
    category
        .parse::<Category>()
        .map(Category::items)
        .unwrap_or_else(|_| all_items())
}

#[cfg(test)]
mod category_tests {
    use crate::Error;

    use super::{Category, all_items, items_for};

    #[test]
    fn parses_every_category_value() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert_eq!(
            "groceries".parse::<Category>(),
            Err(Error::InvalidCategory("groceries".to_owned()))
        );
    }

    #[test]
    fn labels_match_category_select() {
        let labels: Vec<_> = Category::ALL.iter().map(|category| category.label()).collect();

        assert_eq!(
            labels,
            [
                "Food & Drinks",
                "Accommodation",
                "Transportation",
                "Activities & Entertainment",
                "Shopping"
            ]
        );
    }

    #[test]
    fn default_category_is_food() {
        assert_eq!(Category::default(), Category::Food);
    }

    #[test]
    fn all_items_contains_every_category() {
        let items = all_items();
        let want_len: usize = Category::ALL.iter().map(|c| c.items().len()).sum();

        assert_eq!(items.len(), want_len);
        assert!(items.contains(&"Pad Thai"));
        assert!(items.contains(&"Hostel dorm bed"));
        assert!(items.contains(&"Sunscreen"));
    }

    #[test]
    fn items_for_unknown_category_falls_back_to_all_items() {
        assert_eq!(items_for("shopping"), Category::Shopping.items());
        assert_eq!(items_for("nonsense"), all_items());
    }
}
