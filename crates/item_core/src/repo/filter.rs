//! WHERE-clause assembly for item scans.
//!
//! Each predicate builder looks at the search condition and may emit one
//! SQL fragment plus its bound value. Emitted fragments are AND-ed in list
//! order; when nothing is emitted no WHERE clause is produced.

use crate::model::item::ItemSearchCond;
use rusqlite::types::Value;

/// Single SQL condition with one positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Predicate {
    pub fragment: &'static str,
    pub value: Value,
}

type PredicateBuilder = fn(&ItemSearchCond) -> Option<Predicate>;

const ITEM_PREDICATES: &[PredicateBuilder] = &[item_name_contains, price_at_most];

/// Rendered clause (leading space included) and its parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct WhereClause {
    pub sql: String,
    pub params: Vec<Value>,
}

pub(crate) fn build_where_clause(cond: &ItemSearchCond) -> WhereClause {
    let (fragments, params): (Vec<_>, Vec<_>) = ITEM_PREDICATES
        .iter()
        .filter_map(|builder| builder(cond))
        .map(|predicate| (predicate.fragment, predicate.value))
        .unzip();

    if fragments.is_empty() {
        return WhereClause::default();
    }

    WhereClause {
        sql: format!(" WHERE {}", fragments.join(" AND ")),
        params,
    }
}

/// Case-sensitive substring match; the text is taken literally.
fn item_name_contains(cond: &ItemSearchCond) -> Option<Predicate> {
    let name = cond.item_name_filter()?;
    Some(Predicate {
        fragment: "instr(item_name, ?) > 0",
        value: Value::Text(name.to_string()),
    })
}

fn price_at_most(cond: &ItemSearchCond) -> Option<Predicate> {
    let max_price = cond.max_price?;
    Some(Predicate {
        fragment: "price <= ?",
        value: Value::Integer(i64::from(max_price)),
    })
}

#[cfg(test)]
mod tests {
    use super::build_where_clause;
    use crate::model::item::ItemSearchCond;
    use rusqlite::types::Value;

    #[test]
    fn empty_condition_emits_no_clause() {
        let clause = build_where_clause(&ItemSearchCond::default());
        assert!(clause.sql.is_empty());
        assert!(clause.params.is_empty());
    }

    #[test]
    fn blank_name_emits_no_clause() {
        let clause = build_where_clause(&ItemSearchCond::new(Some("   ".into()), None));
        assert!(clause.sql.is_empty());
    }

    #[test]
    fn name_only() {
        let clause = build_where_clause(&ItemSearchCond::new(Some("bc".into()), None));
        assert_eq!(clause.sql, " WHERE instr(item_name, ?) > 0");
        assert_eq!(clause.params, vec![Value::Text("bc".into())]);
    }

    #[test]
    fn price_only() {
        let clause = build_where_clause(&ItemSearchCond::new(None, Some(1000)));
        assert_eq!(clause.sql, " WHERE price <= ?");
        assert_eq!(clause.params, vec![Value::Integer(1000)]);
    }

    #[test]
    fn both_filters_are_joined_with_and_in_order() {
        let clause = build_where_clause(&ItemSearchCond::new(Some("a".into()), Some(500)));
        assert_eq!(clause.sql, " WHERE instr(item_name, ?) > 0 AND price <= ?");
        assert_eq!(
            clause.params,
            vec![Value::Text("a".into()), Value::Integer(500)]
        );
    }

    #[test]
    fn name_is_bound_verbatim() {
        let clause = build_where_clause(&ItemSearchCond::new(Some(" 50%_off ".into()), None));
        assert_eq!(clause.params, vec![Value::Text(" 50%_off ".into())]);
    }
}
