//! Shop controller: the storefront page logic without a page.
//!
//! [`ShopController`] owns the shopper's [`ShopState`] and talks to the API.
//! Read failures never surface as errors: lists fall back to static data and
//! the failure is logged. Mutations report their outcome as a [`Notice`].

use bazaar_core::{
    Branch, Cart, CheckoutConfirmation, CheckoutError, CreateProductRequest, Product, ProductId,
    Refresh, RegisterCustomerRequest, ShopSelection,
};

use crate::api::ApiClient;
use crate::fallback;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything the shop view shows.
#[derive(Debug, Clone, Default)]
pub struct ShopState {
    pub selection: ShopSelection,
    pub cart: Cart,
    /// Products currently displayed.
    pub products: Vec<Product>,
    /// Branches for the selected city.
    pub branches: Vec<Branch>,
    pub cities: Vec<String>,
    pub categories: Vec<String>,
}

/// Drives [`ShopState`] against the storefront API.
pub struct ShopController {
    api: ApiClient,
    state: ShopState,
}

impl ShopController {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ShopState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ShopState {
        &self.state
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Load cities, branches and categories, then the product list.
    pub async fn start(&mut self) {
        self.load_dropdowns().await;
        self.load_products().await;
    }

    /// Fill the city, branch and category lists.
    ///
    /// Cities and categories fall back to static lists; branches stay empty.
    pub async fn load_dropdowns(&mut self) {
        self.state.cities = match self.api.cities().await {
            Ok(cities) => cities,
            Err(e) => {
                tracing::warn!(error = %e, "Error loading cities, using fallback list");
                fallback::cities()
            }
        };

        self.load_branches(None).await;

        self.state.categories = match self.api.categories().await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::warn!(error = %e, "Error loading categories, using fallback list");
                fallback::categories()
            }
        };
    }

    async fn load_branches(&mut self, city: Option<&str>) {
        match self.api.branches(city).await {
            Ok(branches) => self.state.branches = branches,
            Err(e) => {
                tracing::warn!(error = %e, "Error loading branches");
                self.state.branches.clear();
            }
        }
    }

    /// Show the whole catalog, or the demo products if it cannot be loaded.
    pub async fn load_products(&mut self) {
        self.state.products = match self.api.products(&bazaar_core::ProductFilter::all()).await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "Error loading products, using mock data");
                fallback::mock_products()
            }
        };
    }

    /// Show the products matching the current selection.
    ///
    /// Falls back to [`Self::load_products`] if the filtered query fails.
    pub async fn filter_products(&mut self) {
        let filter = self.state.selection.to_filter();
        match self.api.filter_products(&filter).await {
            Ok(products) => self.state.products = products,
            Err(e) => {
                tracing::warn!(error = %e, "Error filtering products");
                self.load_products().await;
            }
        }
    }

    pub async fn select_city(&mut self, city: &str) {
        let effects = self.state.selection.select_city(city);
        self.apply(effects).await;
    }

    pub async fn select_branch(&mut self, branch: &str) {
        let effects = self.state.selection.select_branch(branch);
        self.apply(effects).await;
    }

    pub async fn select_category(&mut self, category: &str) {
        let effects = self.state.selection.select_category(category);
        self.apply(effects).await;
    }

    /// Clear every filter.
    pub async fn reset(&mut self) {
        let effects = self.state.selection.reset();
        self.apply(effects).await;
    }

    async fn apply(&mut self, effects: Vec<Refresh>) {
        for effect in effects {
            match effect {
                Refresh::Branches(city) => self.load_branches(city.value()).await,
                Refresh::Products => self.filter_products().await,
            }
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a displayed product to the cart as a new line.
    ///
    /// Returns `None` if no displayed product has that id.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Option<Notice> {
        let product = self.state.products.iter().find(|p| p.id == product_id)?;
        self.state
            .cart
            .add(product.id, product.name.clone(), product.price);
        Some(Notice::success(format!("Added {} to cart!", product.name)))
    }

    /// Set the quantity of the first line for `product_id`; zero or less removes it.
    pub fn change_quantity(&mut self, product_id: ProductId, quantity: i64) -> Option<Notice> {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }
        self.state.cart.set_quantity(product_id, quantity);
        None
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Option<Notice> {
        self.state
            .cart
            .remove(product_id)
            .map(|line| Notice::success(format!("Removed {} from cart", line.name)))
    }

    /// Place the order. The cart is cleared on success.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the cart is empty or the email is blank.
    pub fn checkout(&mut self, email: &str) -> Result<CheckoutConfirmation, CheckoutError> {
        self.state.cart.checkout(email)
    }

    // =========================================================================
    // Forms
    // =========================================================================

    /// Submit the seller form, then reload the catalog.
    pub async fn add_product(&mut self, request: &CreateProductRequest) -> Notice {
        if request.validate().is_err() {
            return Notice::error("Please fill all fields with valid values");
        }

        match self.api.create_product(request).await {
            Ok(product) => {
                self.load_products().await;
                Notice::success(format!("Product \"{}\" added successfully!", product.name))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error adding product");
                Notice::error("Error adding product. Please try again.")
            }
        }
    }

    /// Submit the registration form.
    pub async fn register_customer(&mut self, request: &RegisterCustomerRequest) -> Notice {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        if blank(&request.name) || blank(&request.email) {
            return Notice::error("Please enter at least name and email");
        }

        match self.api.register_customer(request).await {
            Ok(customer) => {
                Notice::success(format!("Customer {} registered successfully!", customer.name))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error registering customer");
                Notice::error("Error registering customer. Please try again.")
            }
        }
    }
}
