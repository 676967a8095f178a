// 🛒 Shopping Desk - customers, carts, payment
//
// Customers register with the strict password policy and own an ordered
// cart of products. Payment totals the cart; a zero or negative total is
// rejected by the payment processor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::{Repository, RepositoryError};
use crate::validation::{self, PasswordPolicy, ValidationError};

// ============================================================================
// SHOPPING ERROR
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShoppingError {
    #[error("Product already in the cart.")]
    DuplicateCartItem,

    #[error("Product not found in the cart.")]
    CartItemNotFound,

    #[error("Payment amount must be positive.")]
    InvalidPayment,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ============================================================================
// PRODUCT
// ============================================================================

/// Closed set of product categories. Each variant carries its own
/// category-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductKind {
    Electronics { warranty_months: u32 },
}

/// Catalog item placed into carts. Identity is the numeric product ID;
/// equality covers all fields so duplicate detection sees the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub kind: ProductKind,
}

impl Product {
    pub fn electronics(
        id: u32,
        name: &str,
        price: f64,
        warranty_months: u32,
    ) -> Result<Self, ShoppingError> {
        validation::positive_id("Product ID", id)?;
        validation::non_empty("Product name", name)?;
        validation::positive_amount("Product price", price)?;

        Ok(Product {
            id,
            name: name.to_string(),
            price,
            kind: ProductKind::Electronics { warranty_months },
        })
    }

    /// Human-readable one-line description, varying by category.
    pub fn details(&self) -> String {
        match self.kind {
            ProductKind::Electronics { warranty_months } => format!(
                "Electronics [ID: {}, Name: {}, Price: ${}, Warranty: {} months]",
                self.id,
                self.name,
                crate::console::money(self.price),
                warranty_months
            ),
        }
    }
}

// ============================================================================
// CUSTOMER
// ============================================================================

/// A registered shopper. Registration validates every field before the
/// record exists; the cart starts empty and keeps insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub user_id: u32,
    pub name: String,
    pub email: String,
    password: String,
    pub address: String,
    cart: Vec<Product>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        user_id: u32,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
    ) -> Result<Self, ShoppingError> {
        validation::positive_id("User ID", user_id)?;
        validation::non_empty("Name", name)?;
        validation::check_email(email)?;
        PasswordPolicy::Strict.check(password)?;
        validation::non_empty("Address", address)?;

        Ok(Customer {
            user_id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            address: address.to_string(),
            cart: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Plain credential comparison against the registered email.
    pub fn login(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Rejects a product that is already in the cart (full-value equality).
    pub fn add_to_cart(&mut self, product: Product) -> Result<(), ShoppingError> {
        if self.cart.contains(&product) {
            return Err(ShoppingError::DuplicateCartItem);
        }
        self.cart.push(product);
        Ok(())
    }

    /// Linear scan by product ID.
    pub fn remove_from_cart(&mut self, product_id: u32) -> Result<Product, ShoppingError> {
        let position = self
            .cart
            .iter()
            .position(|p| p.id == product_id)
            .ok_or(ShoppingError::CartItemNotFound)?;
        Ok(self.cart.remove(position))
    }

    pub fn view_cart(&self) -> &[Product] {
        &self.cart
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.iter().map(|p| p.price).sum()
    }
}

// ============================================================================
// PAYMENT PROCESSOR
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaymentProcessor;

impl PaymentProcessor {
    /// Accepts any strictly positive, finite amount. An empty cart totals
    /// zero and is rejected here rather than in the cart itself.
    pub fn pay(&self, amount: f64) -> Result<(), ShoppingError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ShoppingError::InvalidPayment);
        }
        Ok(())
    }
}

// ============================================================================
// SHOPPING SYSTEM
// ============================================================================

/// Customer repository keyed by numeric user ID plus the payment processor.
#[derive(Debug, Clone)]
pub struct ShoppingSystem {
    customers: Repository<u32, Customer>,
    processor: PaymentProcessor,
}

impl ShoppingSystem {
    pub fn new() -> Self {
        ShoppingSystem {
            customers: Repository::new("Customer"),
            processor: PaymentProcessor,
        }
    }

    pub fn register_customer(
        &mut self,
        user_id: u32,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
    ) -> Result<(), ShoppingError> {
        let customer = Customer::new(user_id, name, email, password, address)?;
        self.customers.insert(user_id, customer)?;
        Ok(())
    }

    pub fn customer(&self, user_id: u32) -> Result<&Customer, ShoppingError> {
        Ok(self.customers.get(&user_id)?)
    }

    pub fn add_to_cart(&mut self, user_id: u32, product: Product) -> Result<(), ShoppingError> {
        self.customers.get_mut(&user_id)?.add_to_cart(product)
    }

    pub fn remove_from_cart(
        &mut self,
        user_id: u32,
        product_id: u32,
    ) -> Result<Product, ShoppingError> {
        self.customers.get_mut(&user_id)?.remove_from_cart(product_id)
    }

    pub fn view_cart(&self, user_id: u32) -> Result<&[Product], ShoppingError> {
        Ok(self.customers.get(&user_id)?.view_cart())
    }

    /// Totals the cart and runs the payment. Returns the amount charged.
    /// The cart is left as-is, matching the desk's demo behavior.
    pub fn pay(&mut self, user_id: u32) -> Result<f64, ShoppingError> {
        let total = self.customers.get(&user_id)?.cart_total();
        self.processor.pay(total)?;
        Ok(total)
    }
}

impl Default for ShoppingSystem {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
