use contracts::domain::a001_order::{Attribution, Order, OrderNumber};
use contracts::domain::a002_customer::CustomerId;
use serde_json::{Map, Value};

use crate::shared::data::raw_record::{NormalizeOptions, RawRecord};

// Header spellings seen across feed revisions: store export, snake_case, English.
const ORDER_NUMBER: &[&str] = &["Nº Pedido", "N° Pedido", "numero_pedido", "order_number", "order_id"];
const ORDER_DATE: &[&str] = &["Data do Pedido", "data_pedido", "order_date", "date"];
const CUSTOMER_ID: &[&str] = &["id_cliente", "ID do Cliente", "customer_id"];
const CUSTOMER_NAME: &[&str] = &["Cliente", "nome_cliente", "customer_name"];
const STATUS: &[&str] = &["Status"];
const TOTAL_VALUE: &[&str] = &["Valor Total", "valor_total", "total_value", "total"];
const ITEM_COUNT: &[&str] = &["Qtd Itens", "quantidade_itens", "item_count"];
const PAYMENT_METHOD: &[&str] = &["Forma de Pagamento", "forma_pagamento", "payment_method"];
const COUPON: &[&str] = &["Cupom Usado", "cupom_usado", "coupon_used", "coupon"];
const UTM_SOURCE: &[&str] = &["utm_source"];
const UTM_MEDIUM: &[&str] = &["utm_medium"];
const UTM_CAMPAIGN: &[&str] = &["utm_campaign"];
const UTM_CONTENT: &[&str] = &["utm_content"];
const UTM_TERM: &[&str] = &["utm_term"];
const ORIGIN_URL: &[&str] = &["origem", "origem_url", "origin_url"];
const SOLD_PRODUCTS: &[&str] = &["produto(s)", "produtos_vendidos", "sold_products", "products"];
const CATEGORY: &[&str] = &["categoria", "category"];

/// Map a raw order record to the canonical schema
pub fn normalize_order(raw: &Map<String, Value>, options: &NormalizeOptions) -> Order {
    let record = RawRecord::new(raw);
    let scale = options.money_scale;

    Order {
        order_number: OrderNumber::new(record.required_text(ORDER_NUMBER)),
        order_date: record.date_time(ORDER_DATE),
        customer_id: CustomerId::new(record.required_text(CUSTOMER_ID)),
        customer_name: record.required_text(CUSTOMER_NAME),
        status: record.text(STATUS),
        total_value: record.money(TOTAL_VALUE, scale),
        item_count: record.count(ITEM_COUNT),
        payment_method: record.text(PAYMENT_METHOD),
        coupon_used: record.text(COUPON),
        attribution: Attribution {
            source: record.text(UTM_SOURCE),
            medium: record.text(UTM_MEDIUM),
            campaign: record.text(UTM_CAMPAIGN),
            content: record.text(UTM_CONTENT),
            term: record.text(UTM_TERM),
        },
        origin_url: record.text(ORIGIN_URL),
        sold_products: record.text(SOLD_PRODUCTS),
        category: record.text(CATEGORY),
    }
}
