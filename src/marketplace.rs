//! Marketplace Catalog
//!
//! In-memory product store with basic insert/read. Ids are assigned
//! sequentially from 1 and never reused.
//!
//! ## Listing
//! - `search`: case-insensitive substring of the product name
//! - `category`: exact match, `all` disables the filter
//! - `priceRange`: `under-30`, `30-50`, `50-100`, `over-100`, `all`
//! - `sortBy`: `price-low`, `price-high`, `rating`, anything else sorts by name

use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

pub const DEFAULT_IMAGE: &str = "🌾";
pub const DEFAULT_FARMER: &str = "Unknown";
pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_RATING: f64 = 4.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub image: String,
    pub farmer: String,
    pub rating: f64,
    pub reviews: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub farmer: Option<String>,
}

impl NewProduct {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation("name must not be empty".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::Validation(format!("price must be non-negative, got {}", self.price)));
        }
        if self.stock < 0 {
            return Err(CatalogError::Validation(format!("stock must be non-negative, got {}", self.stock)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    Under30,
    From30To50,
    From50To100,
    Over100,
}

impl PriceRange {
    /// `None` for `all` and for unrecognised labels
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "under-30" => Some(PriceRange::Under30),
            "30-50" => Some(PriceRange::From30To50),
            "50-100" => Some(PriceRange::From50To100),
            "over-100" => Some(PriceRange::Over100),
            _ => None,
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceRange::Under30 => price < 30.0,
            PriceRange::From30To50 => (30.0..=50.0).contains(&price),
            PriceRange::From50To100 => price > 50.0 && price <= 100.0,
            PriceRange::Over100 => price > 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortOrder {
    pub fn parse(label: &str) -> Self {
        match label {
            "price-low" => SortOrder::PriceLow,
            "price-high" => SortOrder::PriceHigh,
            "rating" => SortOrder::Rating,
            _ => SortOrder::Name,
        }
    }
}

/// Listing filters, as received on the query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price_range: Option<String>,
    pub sort_by: Option<String>,
}

impl ProductQuery {
    fn matches(&self, product: &Product) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !product.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty() && *c != "all") {
            if product.category != category {
                return false;
            }
        }

        if let Some(range) = self.price_range.as_deref().and_then(PriceRange::parse) {
            if !range.contains(product.price) {
                return false;
            }
        }

        true
    }

    fn sort_order(&self) -> SortOrder {
        self.sort_by.as_deref().map(SortOrder::parse).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct CatalogInner {
    products: Vec<Product>,
    next_id: u64,
}

/// Thread-safe product store
#[derive(Debug, Default)]
pub struct ProductCatalog {
    inner: RwLock<CatalogInner>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, new: NewProduct) -> Result<Product, CatalogError> {
        new.validate()?;

        let mut inner = self.inner.write().map_err(|_| CatalogError::Poisoned)?;
        inner.next_id += 1;
        let now = Utc::now();

        let product = Product {
            id: inner.next_id,
            name: new.name,
            description: new.description,
            price: new.price,
            stock: new.stock,
            category: new.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image: new.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            farmer: new.farmer.unwrap_or_else(|| DEFAULT_FARMER.to_string()),
            rating: DEFAULT_RATING,
            reviews: 0,
            created_at: now,
            updated_at: now,
        };

        tracing::debug!("Inserted product {} ({})", product.id, product.name);
        inner.products.push(product.clone());
        Ok(product)
    }

    pub fn get(&self, id: u64) -> Result<Product, CatalogError> {
        let inner = self.inner.read().map_err(|_| CatalogError::Poisoned)?;
        inner
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Filtered and sorted listing. Ties keep insertion order.
    pub fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let inner = self.inner.read().map_err(|_| CatalogError::Poisoned)?;
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        drop(inner);

        match query.sort_order() {
            SortOrder::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::PriceLow => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHigh => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }

        Ok(products)
    }

    pub fn len(&self) -> Result<usize, CatalogError> {
        Ok(self.inner.read().map_err(|_| CatalogError::Poisoned)?.products.len())
    }

    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.len()? == 0)
    }
}
