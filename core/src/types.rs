//! Domain DTOs for the storefront API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product category filter. `All` means no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Fashion,
    Beverage,
    Electronics,
    Kitchen,
    Fitness,
    Books,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Fashion => "fashion",
            Category::Beverage => "beverage",
            Category::Electronics => "electronics",
            Category::Kitchen => "kitchen",
            Category::Fitness => "fitness",
            Category::Books => "books",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORY_OPTIONS
            .iter()
            .map(|option| option.value)
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Product ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortType {
    #[default]
    #[serde(rename = "price,asc")]
    PriceAsc,
    #[serde(rename = "price,desc")]
    PriceDesc,
}

impl SortType {
    pub fn as_str(self) -> &'static str {
        match self {
            SortType::PriceAsc => "price,asc",
            SortType::PriceDesc => "price,desc",
        }
    }
}

impl std::str::FromStr for SortType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SORT_OPTIONS
            .iter()
            .map(|option| option.value)
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| format!("unknown sort type: {s}"))
    }
}

/// One dropdown entry: the value plus its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption<T> {
    pub value: T,
    pub label: &'static str,
}

pub const CATEGORY_OPTIONS: &[FilterOption<Category>] = &[
    FilterOption { value: Category::All, label: "All" },
    FilterOption { value: Category::Fashion, label: "Fashion" },
    FilterOption { value: Category::Beverage, label: "Beverage" },
    FilterOption { value: Category::Electronics, label: "Electronics" },
    FilterOption { value: Category::Kitchen, label: "Kitchen" },
    FilterOption { value: Category::Fitness, label: "Fitness" },
    FilterOption { value: Category::Books, label: "Books" },
];

pub const SORT_OPTIONS: &[FilterOption<SortType>] = &[
    FilterOption { value: SortType::PriceAsc, label: "Lowest price" },
    FilterOption { value: SortType::PriceDesc, label: "Highest price" },
];

/// A single product in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: u64,
    pub image_url: String,
    pub category: Category,
}

/// One page of `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub has_next: bool,
}

/// Parameters of a product listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Category,
    pub sort_type: SortType,
    pub page: u32,
    pub size: u32,
}

/// A line in the shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: u64,
    pub quantity: u32,
}

/// Request payload for adding or replacing a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: u64,
    pub quantity: u32,
}

/// Request payload for a partial cart line update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemPatch {
    pub quantity: u32,
}
