//! Product listing with filter controls and pagination.

use domain_products::{
    CatalogApi, ClientError, ListingQuery, Product, ProductCategory, ProductFilter, ProductPage,
    SortOrder,
};
use std::fmt;
use tracing::{debug, warn};

use super::LISTING_FAILED;

/// Products requested per page
pub const PAGE_SIZE: u64 = 10;

/// A listing request issued by the view, tagged with its sequence number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    token: u64,
    query: ListingQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Perform the request; the outcome must be handed back to
    /// [`ListingView::apply`].
    pub async fn send<A>(self, api: &A) -> FetchOutcome
    where
        A: CatalogApi + ?Sized,
    {
        FetchOutcome {
            token: self.token,
            result: api.list_products(self.query).await,
        }
    }
}

/// Response to a [`FetchTicket`]
#[derive(Debug)]
pub struct FetchOutcome {
    token: u64,
    result: Result<ProductPage, ClientError>,
}

/// State of the listing screen.
///
/// Every change to a filter or the page yields a [`FetchTicket`]. Tickets
/// carry an increasing token and only the outcome of the most recent one is
/// applied, so a slow response cannot overwrite newer results. Changing a
/// filter keeps the current page.
#[derive(Debug)]
pub struct ListingView {
    category: ProductCategory,
    sort: SortOrder,
    max_price: Option<f64>,
    page: u64,
    products: Vec<Product>,
    total_pages: u64,
    error: Option<String>,
    latest_token: u64,
}

impl Default for ListingView {
    fn default() -> Self {
        Self {
            category: ProductCategory::MostViewed,
            sort: SortOrder::Desc,
            max_price: None,
            page: 1,
            products: Vec::new(),
            total_pages: 1,
            error: None,
            latest_token: 0,
        }
    }
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page != 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page != self.total_pages
    }

    /// The request matching the current controls
    pub fn query(&self) -> ListingQuery {
        ListingQuery {
            filter: ProductFilter {
                category: Some(self.category),
                max_price: self.max_price,
            },
            sort: self.sort,
            page: self.page,
            limit: PAGE_SIZE,
        }
    }

    /// Start a request for the current controls, superseding earlier ones
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_token += 1;
        FetchTicket {
            token: self.latest_token,
            query: self.query(),
        }
    }

    /// Apply a response. Returns `false` when a newer request was issued
    /// since, in which case the view is left untouched.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.token != self.latest_token {
            debug!(
                token = outcome.token,
                latest = self.latest_token,
                "Discarding stale listing response"
            );
            return false;
        }

        match outcome.result {
            Ok(page) => {
                self.products = page.products;
                self.total_pages = page.total_pages;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Error fetching products");
                self.error = Some(LISTING_FAILED.to_string());
            }
        }
        true
    }

    /// Fetch and apply in one step
    pub async fn refresh<A>(&mut self, api: &A)
    where
        A: CatalogApi + ?Sized,
    {
        let ticket = self.begin_fetch();
        let outcome = ticket.send(api).await;
        self.apply(outcome);
    }

    pub fn set_category(&mut self, category: ProductCategory) -> Option<FetchTicket> {
        if self.category == category {
            return None;
        }
        self.category = category;
        Some(self.begin_fetch())
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> Option<FetchTicket> {
        if self.sort == sort {
            return None;
        }
        self.sort = sort;
        Some(self.begin_fetch())
    }

    /// `None` clears the price ceiling
    pub fn set_max_price(&mut self, max_price: Option<f64>) -> Option<FetchTicket> {
        if self.max_price == max_price {
            return None;
        }
        self.max_price = max_price;
        Some(self.begin_fetch())
    }

    /// `None` when the Next control is disabled
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_next() {
            return None;
        }
        self.page += 1;
        Some(self.begin_fetch())
    }

    /// `None` when the Previous control is disabled
    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_previous() {
            return None;
        }
        self.page -= 1;
        Some(self.begin_fetch())
    }
}

impl fmt::Display for ListingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_price = self
            .max_price
            .map(|max| format!("{:.2}", max))
            .unwrap_or_else(|| "any".to_string());
        writeln!(
            f,
            "Category: {} | Sort: {} | Max price: {}",
            self.category, self.sort, max_price
        )?;
        writeln!(f)?;

        if self.products.is_empty() {
            writeln!(f, "  No products found.")?;
        }
        for product in &self.products {
            writeln!(f, "  {:<32} ${:>10.2}", product.name, product.price)?;
        }
        writeln!(f)?;

        let previous = if self.can_go_previous() { "[prev]" } else { " prev " };
        let next = if self.can_go_next() { "[next]" } else { " next " };
        write!(
            f,
            "{} Page {} of {} {}",
            previous, self.page, self.total_pages, next
        )?;

        if let Some(error) = &self.error {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}
