use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Number of products returned per ranking in the categorized summary
pub const SUMMARY_SIZE: u64 = 2;

/// Product category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductCategory {
    #[default]
    MostViewed,
    MostPopular,
    MostReviewed,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::MostViewed,
        ProductCategory::MostPopular,
        ProductCategory::MostReviewed,
    ];
}

/// Sort direction on `createdAt`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// MongoDB sort direction
    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// Product entity - one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned on creation
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
    /// Popularity counter, never set through the API
    pub views: i64,
    /// Popularity counter, never set through the API
    pub reviews: i64,
    /// Creation instant, millisecond precision
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product from the creation payload.
    ///
    /// Counters start at zero and `created_at` is truncated to milliseconds
    /// so that it survives a round trip through the store unchanged.
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            category: input.category,
            views: 0,
            reviews: 0,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Payload for `POST /products`.
///
/// Missing fields fall back to defaults and unknown fields (`views`,
/// `reviews`, `createdAt`, ...) are ignored. `price` accepts a JSON number
/// or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    #[schema(value_type = f64, example = 19.99)]
    pub price: f64,
    #[serde(default)]
    pub category: ProductCategory,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceInput {
    Number(f64),
    Text(String),
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match PriceInput::deserialize(deserializer)? {
        PriceInput::Number(value) => value,
        PriceInput::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("price must be a number, got '{}'", text))
        })?,
    };

    if price.is_finite() {
        Ok(price)
    } else {
        Err(serde::de::Error::custom("price must be a finite number"))
    }
}

/// Filter applied to listing and count queries
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    /// Inclusive upper bound on price
    pub max_price: Option<f64>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| product.category == c)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

/// Validated listing request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingQuery {
    pub filter: ProductFilter,
    pub sort: SortOrder,
    /// 1-based page number
    pub page: u64,
    pub limit: u64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filter: ProductFilter::default(),
            sort: SortOrder::Asc,
            page: 1,
            limit: 10,
        }
    }
}

impl ListingQuery {
    /// Number of matching products to skip before the requested page
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of listing results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// `ceil(matching / limit)`, 0 when nothing matches
    pub total_pages: u64,
}

/// Pages needed to show `count` products, `limit` per page
pub fn total_pages(count: u64, limit: u64) -> u64 {
    count.div_ceil(limit.max(1))
}

/// Top products per popularity ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedProducts {
    pub most_viewed: Vec<Product>,
    pub most_popular: Vec<Product>,
    pub most_reviewed: Vec<Product>,
}

/// Counter a ranking is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RankingMetric {
    Views,
    Reviews,
}

impl RankingMetric {
    /// Stored field name, also the `Display` form
    pub fn field(self) -> &'static str {
        match self {
            RankingMetric::Views => "views",
            RankingMetric::Reviews => "reviews",
        }
    }

    pub fn value(self, product: &Product) -> i64 {
        match self {
            RankingMetric::Views => product.views,
            RankingMetric::Reviews => product.reviews,
        }
    }
}
