//! Form for adding a product.

use domain_products::{CatalogApi, ClientError, CreateProduct, Product, ProductCategory};
use tracing::{info, warn};

use super::{ADD_FAILED, Navigation};

/// Form contents as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub category: ProductCategory,
}

impl ProductDraft {
    fn parsed_price(&self) -> Option<f64> {
        self.price.trim().parse::<f64>().ok().filter(|p| p.is_finite())
    }

    /// A finite number; anything else is rejected before a request is sent
    pub fn has_valid_price(&self) -> bool {
        self.parsed_price().is_some()
    }

    /// Creation payload, or `None` when the price is not a finite number
    fn to_payload(&self) -> Option<CreateProduct> {
        let price = self.parsed_price()?;
        Some(CreateProduct {
            name: self.name.clone(),
            price,
            category: self.category,
        })
    }
}

/// State of the creation screen.
///
/// While a submission is in flight both submit and cancel are disabled. A
/// failure keeps the draft so the user can retry.
#[derive(Debug, Default)]
pub struct CreationView {
    draft: ProductDraft,
    in_flight: bool,
    error: Option<String>,
}

impl CreationView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.draft.price = price.into();
    }

    pub fn set_category(&mut self, category: ProductCategory) {
        self.draft.category = category;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }

    pub fn can_cancel(&self) -> bool {
        !self.in_flight
    }

    /// Leave the form without saving; ignored while a submission is in flight
    pub fn cancel(&self) -> Option<Navigation> {
        self.can_cancel().then_some(Navigation::Listing)
    }

    /// Mark the submission as started and build its payload.
    ///
    /// `None` when submit is disabled or the price does not parse; the
    /// latter sets the error message without issuing a request.
    pub fn begin_submit(&mut self) -> Option<CreateProduct> {
        if !self.can_submit() {
            return None;
        }

        let Some(payload) = self.draft.to_payload() else {
            warn!(price = %self.draft.price, "Rejected non-numeric price");
            self.error = Some(ADD_FAILED.to_string());
            return None;
        };

        self.in_flight = true;
        self.error = None;
        Some(payload)
    }

    /// Record the response of a submission started with [`Self::begin_submit`]
    pub fn finish_submit(&mut self, result: Result<Product, ClientError>) -> Option<Navigation> {
        self.in_flight = false;

        match result {
            Ok(product) => {
                info!(product_id = %product.id, "Product added: {}", product.name);
                Some(Navigation::Listing)
            }
            Err(e) => {
                warn!(error = %e, "Error adding product");
                self.error = Some(ADD_FAILED.to_string());
                None
            }
        }
    }

    /// Submit the draft; `Some(Navigation::Listing)` on success
    pub async fn submit<A>(&mut self, api: &A) -> Option<Navigation>
    where
        A: CatalogApi + ?Sized,
    {
        let payload = self.begin_submit()?;
        let result = api.create_product(payload).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{MockCatalogApi, api_error};

    fn filled_view() -> CreationView {
        let mut view = CreationView::new();
        view.set_name("Lamp");
        view.set_price("19.99");
        view.set_category(ProductCategory::MostPopular);
        view
    }

    #[test]
    fn test_draft_defaults_to_most_viewed() {
        let view = CreationView::new();
        assert_eq!(view.draft().category, ProductCategory::MostViewed);
        assert!(view.can_submit());
        assert_eq!(view.cancel(), Some(Navigation::Listing));
    }

    #[tokio::test]
    async fn test_successful_submit_navigates_to_listing() {
        let mut api = MockCatalogApi::new();
        api.expect_create_product()
            .withf(|input| {
                input.name == "Lamp"
                    && input.price == 19.99
                    && input.category == ProductCategory::MostPopular
            })
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let mut view = filled_view();
        let navigation = view.submit(&api).await;

        assert_eq!(navigation, Some(Navigation::Listing));
        assert!(!view.is_in_flight());
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft_for_retry() {
        let mut api = MockCatalogApi::new();
        api.expect_create_product()
            .times(1)
            .returning(|_| Err(api_error()));

        let mut view = filled_view();
        let navigation = view.submit(&api).await;

        assert_eq!(navigation, None);
        assert_eq!(view.error(), Some(ADD_FAILED));
        assert_eq!(view.draft().name, "Lamp");
        assert_eq!(view.draft().price, "19.99");
        assert!(view.can_submit());
    }

    #[tokio::test]
    async fn test_non_numeric_price_is_rejected_without_request() {
        let mut api = MockCatalogApi::new();
        api.expect_create_product().never();

        let mut view = filled_view();
        view.set_price("cheap");

        assert_eq!(view.submit(&api).await, None);
        assert_eq!(view.error(), Some(ADD_FAILED));
        assert!(!view.is_in_flight());
    }

    #[tokio::test]
    async fn test_non_finite_price_is_rejected_without_request() {
        let mut api = MockCatalogApi::new();
        api.expect_create_product().never();

        for price in ["inf", "-inf", "NaN"] {
            let mut view = filled_view();
            view.set_price(price);

            assert!(!view.draft().has_valid_price());
            assert_eq!(view.submit(&api).await, None);
            assert_eq!(view.error(), Some(ADD_FAILED));
        }
    }

    #[test]
    fn test_controls_disabled_while_in_flight() {
        let mut view = filled_view();

        let payload = view.begin_submit();
        assert!(payload.is_some());
        assert!(!view.can_submit());
        assert!(!view.can_cancel());
        assert_eq!(view.cancel(), None);
        assert!(view.begin_submit().is_none());

        view.finish_submit(Err(api_error()));
        assert!(view.can_submit());
        assert_eq!(view.cancel(), Some(Navigation::Listing));
    }

    #[test]
    fn test_retry_clears_previous_error() {
        let mut view = filled_view();
        view.begin_submit();
        view.finish_submit(Err(api_error()));
        assert!(view.error().is_some());

        view.begin_submit();
        assert!(view.error().is_none());
    }
}
