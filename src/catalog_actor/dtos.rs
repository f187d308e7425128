// DTOs for catalog entries
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub title: String,
    pub price: f64,
    pub image: String,
    pub stock: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub price: Option<f64>,
    pub stock: Option<u32>,
}
