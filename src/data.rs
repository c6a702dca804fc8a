use std::{fmt, str::FromStr};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Label of the category selector option that shows every restaurant.
pub const ALL_CATEGORIES: &str = "전체";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "한식")]
    Korean,
    #[serde(rename = "중식")]
    Chinese,
    #[serde(rename = "일식")]
    Japanese,
    #[serde(rename = "양식")]
    Western,
    #[serde(rename = "아시안")]
    Asian,
    #[serde(rename = "기타")]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Korean,
        Self::Chinese,
        Self::Japanese,
        Self::Western,
        Self::Asian,
        Self::Other,
    ];

    pub fn english(self) -> &'static str {
        match self {
            Self::Korean => "korean",
            Self::Chinese => "chinese",
            Self::Japanese => "japanese",
            Self::Western => "western",
            Self::Asian => "asian",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Korean => "한식",
            Self::Chinese => "중식",
            Self::Japanese => "일식",
            Self::Western => "양식",
            Self::Asian => "아시안",
            Self::Other => "기타",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = &'static str;

    // Accepts the stored Korean label, or the English name for terminal use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s || category.english().eq_ignore_ascii_case(s))
            .ok_or("unknown restaurant category")
    }
}

/// The category selector. `All` is never stored on a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_CATEGORIES || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category) => f.write_str(category.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Distance,
}

impl FromStr for SortKey {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "distance" => Ok(Self::Distance),
            _ => Err("sort must be either `name` or `distance`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u32,
    pub category: Category,
    pub name: String,
    /// walking distance in minutes
    pub distance: u32,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Restaurant {
    pub fn icon(&self) -> FavoriteIcon {
        FavoriteIcon::from(self.favorite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteIcon {
    Filled,
    Lined,
}

impl FavoriteIcon {
    pub fn src(self) -> &'static str {
        match self {
            Self::Filled => "./favorite-icon-filled.png",
            Self::Lined => "./favorite-icon-lined.png",
        }
    }
}

impl From<bool> for FavoriteIcon {
    fn from(favorite: bool) -> Self {
        if favorite {
            Self::Filled
        } else {
            Self::Lined
        }
    }
}

/// A validated add-restaurant form. The id is assigned by the store.
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct NewRestaurant {
    category: Category,
    #[builder(setter(into))]
    name: String,
    distance: u32,
    #[builder(setter(into, strip_option), default)]
    link: Option<String>,
    #[builder(setter(into, strip_option), default)]
    description: Option<String>,
}

impl NewRestaurantBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err("restaurant name is empty".to_string()),
            _ => Ok(()),
        }
    }
}

impl NewRestaurant {
    pub(crate) fn into_restaurant(self, id: u32) -> Restaurant {
        let NewRestaurant {
            category,
            name,
            distance,
            link,
            description,
        } = self;

        Restaurant {
            id,
            category,
            name: name.trim().to_string(),
            distance,
            favorite: false,
            link: link.filter(|link| !link.trim().is_empty()),
            description: description.filter(|desc| !desc.trim().is_empty()),
        }
    }
}

/// Raw form fields as they arrive from a front-end, before presence checks.
#[derive(Debug, Default, Deserialize)]
pub struct RestaurantForm {
    pub category: Option<String>,
    pub name: Option<String>,
    pub distance: Option<u32>,
    pub link: Option<String>,
    pub description: Option<String>,
}

impl RestaurantForm {
    pub fn build(self) -> Result<NewRestaurant, NewRestaurantBuilderError> {
        let mut builder = NewRestaurantBuilder::default();
        if let Some(category) = self.category {
            let category = category
                .parse::<Category>()
                .map_err(|hint| NewRestaurantBuilderError::from(format!("{hint}: {category}")))?;
            builder.category(category);
        }
        if let Some(name) = self.name {
            builder.name(name);
        }
        if let Some(distance) = self.distance {
            builder.distance(distance);
        }
        if let Some(link) = self.link {
            builder.link(link);
        }
        if let Some(description) = self.description {
            builder.description(description);
        }
        builder.build()
    }
}
