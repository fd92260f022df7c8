//! Query-string parameters of `GET /products` and their validation.
//!
//! Values arrive as raw strings so that a malformed value produces a
//! descriptive `400` instead of a generic deserialization failure.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::IntoParams;

use crate::error::{ProductError, ProductResult};
use crate::models::{ListingQuery, ProductCategory, ProductFilter, SortOrder};

/// Raw listing parameters as sent by clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// 1-based page number (default 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Page size (default 10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<u64>, minimum = 1)]
    pub limit: Option<String>,
    /// Inclusive price ceiling; empty means no ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<f64>)]
    pub max_price: Option<String>,
    /// Exact category match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<ProductCategory>)]
    pub category: Option<String>,
    /// `asc` or `desc` on creation time (default `asc`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<SortOrder>)]
    pub sort: Option<String>,
}

impl TryFrom<ListingParams> for ListingQuery {
    type Error = ProductError;

    fn try_from(params: ListingParams) -> ProductResult<Self> {
        let defaults = ListingQuery::default();

        let page = match present(&params.page) {
            Some(raw) => positive_integer("page", raw)?,
            None => defaults.page,
        };
        let limit = match present(&params.limit) {
            Some(raw) => positive_integer("limit", raw)?,
            None => defaults.limit,
        };
        let max_price = present(&params.max_price)
            .map(|raw| finite_number("maxPrice", raw))
            .transpose()?;
        let category = present(&params.category)
            .map(|raw| {
                ProductCategory::from_str(raw).map_err(|_| {
                    invalid(
                        "category",
                        "one of most_viewed, most_popular, most_reviewed",
                        raw,
                    )
                })
            })
            .transpose()?;
        let sort = match present(&params.sort) {
            Some(raw) => SortOrder::from_str(raw).map_err(|_| invalid("sort", "asc or desc", raw))?,
            None => defaults.sort,
        };

        Ok(ListingQuery {
            filter: ProductFilter {
                category,
                max_price,
            },
            sort,
            page,
            limit,
        })
    }
}

impl From<&ListingQuery> for ListingParams {
    fn from(query: &ListingQuery) -> Self {
        Self {
            page: Some(query.page.to_string()),
            limit: Some(query.limit.to_string()),
            max_price: query.filter.max_price.map(|max| max.to_string()),
            category: query.filter.category.map(|c| c.to_string()),
            sort: Some(query.sort.to_string()),
        }
    }
}

/// Blank values count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn positive_integer(name: &str, raw: &str) -> ProductResult<u64> {
    raw.parse::<u64>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| invalid(name, "an integer >= 1", raw))
}

fn finite_number(name: &str, raw: &str) -> ProductResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(name, "a number", raw))
}

fn invalid(name: &str, expected: &str, raw: &str) -> ProductError {
    ProductError::InvalidInput(format!(
        "Invalid query parameter '{}': expected {}, got '{}'",
        name, expected, raw
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ListingParams {
        ListingParams::default()
    }

    #[test]
    fn test_defaults_when_absent() {
        let query = ListingQuery::try_from(params()).unwrap();
        assert_eq!(query, ListingQuery::default());
        assert_eq!(query.sort, SortOrder::Asc);
    }

    #[test]
    fn test_parses_all_parameters() {
        let query = ListingQuery::try_from(ListingParams {
            page: Some("2".to_string()),
            limit: Some("5".to_string()),
            max_price: Some("49.5".to_string()),
            category: Some("most_popular".to_string()),
            sort: Some("DESC".to_string()),
        })
        .unwrap();

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
        assert_eq!(query.filter.max_price, Some(49.5));
        assert_eq!(query.filter.category, Some(ProductCategory::MostPopular));
        assert_eq!(query.sort, SortOrder::Desc);
    }

    #[test]
    fn test_empty_max_price_means_no_filter() {
        let query = ListingQuery::try_from(ListingParams {
            max_price: Some(String::new()),
            ..params()
        })
        .unwrap();
        assert_eq!(query.filter.max_price, None);
    }

    #[test]
    fn test_rejects_bad_page_values() {
        for raw in ["0", "-1", "abc", "1.5"] {
            let result = ListingQuery::try_from(ListingParams {
                page: Some(raw.to_string()),
                ..params()
            });
            assert!(
                matches!(result, Err(ProductError::InvalidInput(_))),
                "page={raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_zero_limit() {
        let result = ListingQuery::try_from(ListingParams {
            limit: Some("0".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ProductError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_non_numeric_max_price() {
        for raw in ["cheap", "NaN", "inf"] {
            let result = ListingQuery::try_from(ListingParams {
                max_price: Some(raw.to_string()),
                ..params()
            });
            assert!(result.is_err(), "maxPrice={raw} should be rejected");
        }
    }

    #[test]
    fn test_rejects_unknown_category_and_sort() {
        let category = ListingQuery::try_from(ListingParams {
            category: Some("electronics".to_string()),
            ..params()
        });
        let sort = ListingQuery::try_from(ListingParams {
            sort: Some("newest".to_string()),
            ..params()
        });

        assert!(category.is_err());
        assert!(sort.is_err());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = ListingQuery::try_from(ListingParams {
            page: Some("abc".to_string()),
            ..params()
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid query parameter 'page': expected an integer >= 1, got 'abc'"
        );
    }

    #[test]
    fn test_query_converts_back_to_params() {
        let query = ListingQuery {
            filter: ProductFilter {
                category: Some(ProductCategory::MostReviewed),
                max_price: Some(20.0),
            },
            sort: SortOrder::Desc,
            page: 3,
            limit: 10,
        };

        let params = ListingParams::from(&query);
        assert_eq!(params.category.as_deref(), Some("most_reviewed"));
        assert_eq!(params.sort.as_deref(), Some("desc"));
        assert_eq!(ListingQuery::try_from(params).unwrap(), query);
    }
}
