//! Product listing.
//!
//! Products are the rated offerings the deployment bills for (instance
//! flavors, volume types, network resources), each carrying its rate and
//! unit. Listing supports an optional region filter.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::ApiVersion;
use crate::rest::{Manager, QueryString, Resource, ResourceError};

/// A rated product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    resource: Resource,
}

impl Product {
    /// Returns the product name, when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.resource.get_str("name")
    }
}

impl From<Resource> for Product {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl Deref for Product {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resource.fmt_named("Product", f)
    }
}

/// Manager for the products collection.
#[derive(Clone, Debug)]
pub struct ProductManager {
    manager: Manager,
    version: ApiVersion,
}

impl ProductManager {
    pub(crate) fn new(http: Arc<HttpClient>, version: ApiVersion) -> Self {
        Self {
            manager: Manager::new(http),
            version,
        }
    }

    fn collection_path(&self) -> String {
        format!("/{}/products", self.version.path_segment())
    }

    /// Lists products, optionally filtered to the given regions.
    ///
    /// An empty `regions` slice lists every region: the request goes to the
    /// bare collection path with no query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] for transport failures or malformed bodies.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let everywhere = client.products.list(&[]).await?;
    /// let filtered = client.products.list(&["nz-hlz-1", "nz-por-1"]).await?;
    /// ```
    pub async fn list(&self, regions: &[&str]) -> Result<Vec<Product>, ResourceError> {
        let mut query = QueryString::new();
        query.push_list("regions", regions);
        let url = query.append_to(&self.collection_path());
        self.manager.list_as(&url, "products").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_display_uses_type_name() {
        let product =
            Product::from(Resource::from_value(json!({"name": "o1.standard"})).unwrap());
        assert_eq!(product.to_string(), "<Product name=o1.standard>");
    }

    #[test]
    fn test_product_name_accessor() {
        let product = Product::from(
            Resource::from_value(json!({"name": "b1.standard", "rate": 0.0005})).unwrap(),
        );
        assert_eq!(product.name(), Some("b1.standard"));
        assert_eq!(product.get("rate").unwrap(), 0.0005);
    }

    #[test]
    fn test_products_with_same_id_compare_equal() {
        let p1 = Product::from(Resource::from_value(json!({"id": 7, "name": "a"})).unwrap());
        let p2 = Product::from(Resource::from_value(json!({"id": 7, "name": "b"})).unwrap());
        assert_eq!(p1, p2);
    }
}
