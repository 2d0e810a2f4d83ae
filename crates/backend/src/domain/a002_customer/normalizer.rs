use contracts::domain::a002_customer::{Customer, CustomerId};
use serde_json::{Map, Value};

use crate::shared::data::raw_record::RawRecord;

const CUSTOMER_ID: &[&str] = &["ID do Cliente", "id_cliente", "customer_id", "id"];
const NAME: &[&str] = &["Nome", "nome", "name"];
const EMAIL: &[&str] = &["E-mail", "email"];
const PHONE: &[&str] = &["Telefone", "phone"];
const BIRTH_DATE: &[&str] = &["Data de nascimento", "data_nascimento", "birth_date"];
const CITY: &[&str] = &["Cidade", "city"];
const STATE: &[&str] = &["Estado", "state"];
const ADDRESS: &[&str] = &["Endereço", "endereco_completo", "endereco", "address"];

/// Map a raw customer record to the canonical schema
pub fn normalize_customer(raw: &Map<String, Value>) -> Customer {
    let record = RawRecord::new(raw);

    Customer {
        customer_id: CustomerId::new(record.required_text(CUSTOMER_ID)),
        name: record.required_text(NAME),
        email: record.required_text(EMAIL),
        phone: record.text(PHONE),
        birth_date: record.text(BIRTH_DATE),
        city: record.text(CITY),
        state: record.text(STATE),
        address: record.text(ADDRESS),
    }
}
