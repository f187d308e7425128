/// Custom actions for catalog entries.
#[derive(Debug, Clone)]
pub enum CatalogAction {
    /// Reads the stock level without modifying it.
    CheckStock,
}

/// Results from CatalogActions - variants match 1:1 with CatalogAction
#[derive(Debug, Clone)]
pub enum CatalogActionResult {
    StockLevel(u32),
}
