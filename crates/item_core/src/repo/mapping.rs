//! Declarative field-to-column mapping for the `item` table.
//!
//! All item SQL is rendered from [`ITEM_TABLE`], so column order in
//! statements and bind order of values can never drift apart.

use crate::model::item::{Item, ItemUpdateDto};
use rusqlite::types::Value;

/// Borrowed view over the writable item fields.
pub(crate) struct ItemValues<'a> {
    pub item_name: &'a str,
    pub price: i32,
    pub quantity: i32,
}

impl<'a> From<&'a Item> for ItemValues<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            item_name: &item.item_name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

impl<'a> From<&'a ItemUpdateDto> for ItemValues<'a> {
    fn from(dto: &'a ItemUpdateDto) -> Self {
        Self {
            item_name: &dto.item_name,
            price: dto.price,
            quantity: dto.quantity,
        }
    }
}

/// One writable column and how to read its value from the entity.
pub(crate) struct ColumnMapping {
    pub column: &'static str,
    pub bind: fn(&ItemValues<'_>) -> Value,
}

/// Table name, generated key column and ordered writable columns.
pub(crate) struct TableMapping {
    pub table: &'static str,
    pub id_column: &'static str,
    pub columns: &'static [ColumnMapping],
}

pub(crate) const ITEM_TABLE: TableMapping = TableMapping {
    table: "item",
    id_column: "id",
    columns: &[
        ColumnMapping {
            column: "item_name",
            bind: bind_item_name,
        },
        ColumnMapping {
            column: "price",
            bind: bind_price,
        },
        ColumnMapping {
            column: "quantity",
            bind: bind_quantity,
        },
    ],
};

fn bind_item_name(values: &ItemValues<'_>) -> Value {
    Value::Text(values.item_name.to_string())
}

fn bind_price(values: &ItemValues<'_>) -> Value {
    Value::Integer(i64::from(values.price))
}

fn bind_quantity(values: &ItemValues<'_>) -> Value {
    Value::Integer(i64::from(values.quantity))
}

impl TableMapping {
    /// Id column followed by the writable columns.
    pub fn all_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.id_column).chain(self.columns.iter().map(|c| c.column))
    }

    pub fn select_sql(&self) -> String {
        let columns = self.all_columns().collect::<Vec<_>>().join(", ");
        format!("SELECT {columns} FROM {}", self.table)
    }

    pub fn select_by_id_sql(&self) -> String {
        format!("{} WHERE {} = ?", self.select_sql(), self.id_column)
    }

    pub fn insert_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| c.column)
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!("INSERT INTO {} ({columns}) VALUES ({placeholders})", self.table)
    }

    /// Bind order: every writable column, then the id.
    pub fn update_by_id_sql(&self) -> String {
        let assignments = self
            .columns
            .iter()
            .map(|c| format!("{} = ?", c.column))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {assignments} WHERE {} = ?",
            self.table, self.id_column
        )
    }

    /// Values for the writable columns, in column order.
    pub fn bind_values(&self, values: &ItemValues<'_>) -> Vec<Value> {
        self.columns.iter().map(|c| (c.bind)(values)).collect()
    }
}
