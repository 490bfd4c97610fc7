//! Service catalog types.
//!
//! The identity service publishes a catalog of endpoints per service. The two
//! protocol generations ship it in different shapes; this module holds the
//! normalized form the rest of the SDK works against, and the filtering logic
//! that resolves one endpoint from it.

use crate::config::Interface;

/// One endpoint entry from the identity service's catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// The service type (e.g., `"rating"`).
    pub service_type: String,
    /// The service name, when the catalog carries one.
    pub service_name: Option<String>,
    /// Which interface this URL is published on.
    pub interface: Interface,
    /// The region the endpoint lives in, when the catalog carries one.
    pub region: Option<String>,
    /// The endpoint URL.
    pub url: String,
}

/// A normalized service catalog.
///
/// Built from either identity protocol generation; entries keep their
/// catalog order, and [`endpoint_for`](Self::endpoint_for) returns the first
/// match.
///
/// # Example
///
/// ```rust
/// use distil_api::{Endpoint, Interface, ServiceCatalog};
///
/// let catalog = ServiceCatalog::new(vec![Endpoint {
///     service_type: "rating".to_string(),
///     service_name: Some("distil".to_string()),
///     interface: Interface::Public,
///     region: Some("nz-hlz-1".to_string()),
///     url: "https://distil.example.com:9999".to_string(),
/// }]);
///
/// let endpoint = catalog
///     .endpoint_for("rating", Interface::Public, Some("nz-hlz-1"), None)
///     .unwrap();
/// assert_eq!(endpoint.url, "https://distil.example.com:9999");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    entries: Vec<Endpoint>,
}

impl ServiceCatalog {
    /// Creates a catalog from normalized entries.
    #[must_use]
    pub fn new(entries: Vec<Endpoint>) -> Self {
        Self { entries }
    }

    /// Returns all catalog entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[Endpoint] {
        &self.entries
    }

    /// Returns `true` if the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the first endpoint matching the given filters.
    ///
    /// Entries are matched by service type and interface; when `region` is
    /// given, the entry's region must equal it exactly (entries without a
    /// region never match a region filter). When `service_name` is given,
    /// entries carrying a different name are skipped; entries without a name
    /// still match.
    #[must_use]
    pub fn endpoint_for(
        &self,
        service_type: &str,
        interface: Interface,
        region: Option<&str>,
        service_name: Option<&str>,
    ) -> Option<&Endpoint> {
        self.entries.iter().find(|entry| {
            if entry.service_type != service_type || entry.interface != interface {
                return false;
            }
            if let Some(wanted) = region {
                if entry.region.as_deref() != Some(wanted) {
                    return false;
                }
            }
            if let (Some(wanted), Some(name)) = (service_name, entry.service_name.as_deref()) {
                if name != wanted {
                    return false;
                }
            }
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(service_type: &str, interface: Interface, region: &str, url: &str) -> Endpoint {
        Endpoint {
            service_type: service_type.to_string(),
            service_name: None,
            interface,
            region: Some(region.to_string()),
            url: url.to_string(),
        }
    }

    fn sample_catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            entry("identity", Interface::Public, "nz-hlz-1", "https://ks.example.com:5000"),
            entry("rating", Interface::Internal, "nz-hlz-1", "https://distil.internal:9999"),
            entry("rating", Interface::Public, "nz-hlz-1", "https://distil.hlz.example.com:9999"),
            entry("rating", Interface::Public, "nz-por-1", "https://distil.por.example.com:9999"),
        ])
    }

    #[test]
    fn test_endpoint_for_filters_by_type_and_interface() {
        let catalog = sample_catalog();
        let endpoint = catalog
            .endpoint_for("rating", Interface::Internal, None, None)
            .unwrap();
        assert_eq!(endpoint.url, "https://distil.internal:9999");
    }

    #[test]
    fn test_endpoint_for_takes_first_match_without_region() {
        let catalog = sample_catalog();
        let endpoint = catalog
            .endpoint_for("rating", Interface::Public, None, None)
            .unwrap();
        assert_eq!(endpoint.url, "https://distil.hlz.example.com:9999");
    }

    #[test]
    fn test_endpoint_for_region_match_is_exact() {
        let catalog = sample_catalog();
        let endpoint = catalog
            .endpoint_for("rating", Interface::Public, Some("nz-por-1"), None)
            .unwrap();
        assert_eq!(endpoint.url, "https://distil.por.example.com:9999");

        assert!(catalog
            .endpoint_for("rating", Interface::Public, Some("nz-akl-1"), None)
            .is_none());
    }

    #[test]
    fn test_endpoint_for_unknown_service_type_is_none() {
        let catalog = sample_catalog();
        assert!(catalog
            .endpoint_for("volume", Interface::Public, None, None)
            .is_none());
    }

    #[test]
    fn test_endpoint_without_region_never_matches_region_filter() {
        let catalog = ServiceCatalog::new(vec![Endpoint {
            service_type: "rating".to_string(),
            service_name: None,
            interface: Interface::Public,
            region: None,
            url: "https://distil.example.com:9999".to_string(),
        }]);

        assert!(catalog
            .endpoint_for("rating", Interface::Public, Some("nz-hlz-1"), None)
            .is_none());
        assert!(catalog
            .endpoint_for("rating", Interface::Public, None, None)
            .is_some());
    }

    #[test]
    fn test_service_name_filter_skips_mismatched_names() {
        let mut named = entry("rating", Interface::Public, "nz-hlz-1", "https://a.example.com");
        named.service_name = Some("distil".to_string());
        let mut other = entry("rating", Interface::Public, "nz-hlz-1", "https://b.example.com");
        other.service_name = Some("other".to_string());
        let catalog = ServiceCatalog::new(vec![other, named]);

        let endpoint = catalog
            .endpoint_for("rating", Interface::Public, None, Some("distil"))
            .unwrap();
        assert_eq!(endpoint.url, "https://a.example.com");
    }
}
