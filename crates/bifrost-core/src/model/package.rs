// ── Package catalog ──
//
// The three broadband packages and the per-site exclusions that hide some
// of them.

use serde::{Deserialize, Serialize};

/// Hide packages whose name starts with any `excluded` prefix at `site_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRestriction {
    pub site_id: i64,
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCatalog {
    pub packages: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<PackageRestriction>,
}

impl Default for PackageCatalog {
    fn default() -> Self {
        Self {
            packages: vec![
                "50/50Mbps - R750".into(),
                "100/100Mbps - R950".into(),
                "200/200Mbps - R1 125".into(),
            ],
            restrictions: vec![PackageRestriction {
                site_id: 1,
                excluded: vec!["200/200Mbps - R1 125".into()],
            }],
        }
    }
}

impl PackageCatalog {
    /// Packages choosable at `site`, in catalog order.
    pub fn available_for(&self, site: Option<i64>) -> Vec<&str> {
        self.packages
            .iter()
            .map(String::as_str)
            .filter(|pkg| self.is_offered(pkg, site))
            .collect()
    }

    pub fn is_offered(&self, package: &str, site: Option<i64>) -> bool {
        if !self.packages.iter().any(|p| p == package) {
            return false;
        }
        let Some(site) = site else {
            return true;
        };
        !self
            .restrictions
            .iter()
            .filter(|r| r.site_id == site)
            .flat_map(|r| r.excluded.iter())
            .any(|prefix| package.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_one_hides_the_200_package() {
        let catalog = PackageCatalog::default();
        assert_eq!(
            catalog.available_for(Some(1)),
            vec!["50/50Mbps - R750", "100/100Mbps - R950"]
        );
    }

    #[test]
    fn other_sites_offer_everything() {
        let catalog = PackageCatalog::default();
        for site in [None, Some(2), Some(42)] {
            assert_eq!(catalog.available_for(site).len(), 3);
        }
    }

    #[test]
    fn unknown_package_is_never_offered() {
        let catalog = PackageCatalog::default();
        assert!(!catalog.is_offered("1000/1000Mbps - R2 000", Some(2)));
    }
}
