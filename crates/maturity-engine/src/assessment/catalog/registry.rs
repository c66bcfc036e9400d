use super::{standard, Catalog, CatalogError};

/// Catalogs available to a process, keyed by [`Catalog::key`] and kept in registration order.
#[derive(Debug, Default, Clone)]
pub struct CatalogRegistry {
    catalogs: Vec<Catalog>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in Control Tower and Golden Architecture catalogs.
    pub fn standard() -> Self {
        Self {
            catalogs: vec![standard::control_tower(), standard::golden_architecture()],
        }
    }

    pub fn register(&mut self, catalog: Catalog) -> Result<(), CatalogError> {
        if self.get(catalog.key()).is_some() {
            return Err(CatalogError::DuplicateCatalog(catalog.key().to_string()));
        }
        self.catalogs.push(catalog);
        Ok(())
    }

    /// Overrides the benchmark average of a registered catalog.
    pub fn set_benchmark(&mut self, key: &str, average: f64) -> Result<(), CatalogError> {
        self.catalogs
            .iter_mut()
            .find(|catalog| catalog.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| CatalogError::UnknownCatalog(key.to_string()))?
            .set_benchmark(average)
    }

    pub fn get(&self, key: &str) -> Option<&Catalog> {
        self.catalogs
            .iter()
            .find(|catalog| catalog.key().eq_ignore_ascii_case(key))
    }

    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    pub fn keys(&self) -> Vec<&str> {
        self.catalogs.iter().map(Catalog::key).collect()
    }
}
