use contracts::domain::a003_product::{Product, ProductId};
use serde_json::{Map, Value};

use crate::shared::data::raw_record::{NormalizeOptions, RawRecord};

const PRODUCT_ID: &[&str] = &["ID do Produto", "id_produto", "product_id", "id"];
const NAME: &[&str] = &["Nome do Produto", "nome_produto", "name"];
const CATEGORY: &[&str] = &["Categoria", "category"];
const PRICE: &[&str] = &["Preço", "preco", "price"];
const COST: &[&str] = &["Preço de Custo", "preco_custo", "cost"];
const STOCK: &[&str] = &["Estoque", "stock"];

/// Map a raw product record to the canonical schema.
///
/// A missing or blank cost stays `None` so cost attribution can tell an
/// unknown cost from a zero cost.
pub fn normalize_product(raw: &Map<String, Value>, options: &NormalizeOptions) -> Product {
    let record = RawRecord::new(raw);
    let scale = options.money_scale;

    Product {
        product_id: ProductId::new(record.required_text(PRODUCT_ID)),
        name: record.required_text(NAME),
        category: record.text(CATEGORY),
        price: record.money(PRICE, scale),
        cost: record.optional_money(COST, scale),
        stock: record.optional_number(STOCK).map(|n| n.trunc() as i64),
    }
}
