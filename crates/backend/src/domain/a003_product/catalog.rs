use contracts::domain::a003_product::Product;

/// Lookup over the product list used to resolve sold-product tokens.
///
/// Orders name their products inconsistently (display names in some feeds,
/// catalog ids in others), so a token resolves to:
/// 1. the first product, in catalog order, whose name contains the token
///    (case-insensitive);
/// 2. otherwise the first product whose id equals the token
///    (case-insensitive).
///
/// Several products can contain the same token; the first one in catalog
/// order wins.
pub struct ProductCatalog<'a> {
    products: &'a [Product],
    names: Vec<String>,
    ids: Vec<String>,
}

impl<'a> ProductCatalog<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        Self {
            products,
            names: products.iter().map(|p| p.name.to_lowercase()).collect(),
            ids: products
                .iter()
                .map(|p| p.product_id.as_str().to_lowercase())
                .collect(),
        }
    }

    pub fn products(&self) -> &'a [Product] {
        self.products
    }

    pub fn resolve(&self, token: &str) -> Option<&'a Product> {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return None;
        }
        self.names
            .iter()
            .position(|name| name.contains(&token))
            .or_else(|| self.ids.iter().position(|id| *id == token))
            .map(|idx| &self.products[idx])
    }
}
