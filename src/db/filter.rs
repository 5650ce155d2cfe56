// src/db/filter.rs

use rusqlite::types::Value;
use uuid::Uuid;

/// Conversion into a bound SQL parameter, matching how rusqlite stores
/// each type (uuids as 16-byte blobs, bools as 0/1).
pub trait IntoSqlValue {
    fn into_sql_value(self) -> Value;
}

impl IntoSqlValue for Uuid {
    fn into_sql_value(self) -> Value {
        Value::Blob(self.as_bytes().to_vec())
    }
}

impl IntoSqlValue for i64 {
    fn into_sql_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoSqlValue for i32 {
    fn into_sql_value(self) -> Value {
        Value::Integer(self.into())
    }
}

impl IntoSqlValue for f64 {
    fn into_sql_value(self) -> Value {
        Value::Real(self)
    }
}

impl IntoSqlValue for bool {
    fn into_sql_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoSqlValue for String {
    fn into_sql_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoSqlValue for &str {
    fn into_sql_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(&'static str, Value),
    Ge(&'static str, Value),
    Gt(&'static str, Value),
    Le(&'static str, Value),
    In(&'static str, Vec<Value>),
    /// Case-sensitive substring match.
    Contains(&'static str, String),
    IsNull(&'static str),
}

impl Predicate {
    pub fn eq(column: &'static str, value: impl IntoSqlValue) -> Self {
        Predicate::Eq(column, value.into_sql_value())
    }

    pub fn ge(column: &'static str, value: impl IntoSqlValue) -> Self {
        Predicate::Ge(column, value.into_sql_value())
    }

    pub fn gt(column: &'static str, value: impl IntoSqlValue) -> Self {
        Predicate::Gt(column, value.into_sql_value())
    }

    pub fn le(column: &'static str, value: impl IntoSqlValue) -> Self {
        Predicate::Le(column, value.into_sql_value())
    }

    pub fn is_in<V: IntoSqlValue>(column: &'static str, values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In(
            column,
            values.into_iter().map(IntoSqlValue::into_sql_value).collect(),
        )
    }

    pub fn contains(column: &'static str, needle: impl Into<String>) -> Self {
        Predicate::Contains(column, needle.into())
    }

    pub fn is_null(column: &'static str) -> Self {
        Predicate::IsNull(column)
    }

    fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Predicate::Eq(col, v) => {
                params.push(v.clone());
                format!("{col} = ?")
            }
            Predicate::Ge(col, v) => {
                params.push(v.clone());
                format!("{col} >= ?")
            }
            Predicate::Gt(col, v) => {
                params.push(v.clone());
                format!("{col} > ?")
            }
            Predicate::Le(col, v) => {
                params.push(v.clone());
                format!("{col} <= ?")
            }
            // An empty set matches nothing.
            Predicate::In(_, values) if values.is_empty() => "0".to_string(),
            Predicate::In(col, values) => {
                params.extend(values.iter().cloned());
                let marks = vec!["?"; values.len()].join(", ");
                format!("{col} IN ({marks})")
            }
            // instr() is case-sensitive, unlike LIKE.
            Predicate::Contains(col, needle) => {
                params.push(Value::Text(needle.clone()));
                format!("instr({col}, ?) > 0")
            }
            Predicate::IsNull(col) => format!("{col} IS NULL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// A conjunction of predicates plus optional ordering and limit.
///
/// Column names are `'static` and come from entity definitions, never from
/// user input; values are always bound as parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
    order_by: Option<(&'static str, Order)>,
    limit: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn eq(self, column: &'static str, value: impl IntoSqlValue) -> Self {
        self.and(Predicate::eq(column, value))
    }

    pub fn is_in<V: IntoSqlValue>(
        self,
        column: &'static str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.and(Predicate::is_in(column, values))
    }

    pub fn order_by(mut self, column: &'static str, order: Order) -> Self {
        self.order_by = Some((column, order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Renders the predicates as SQL conditions, appending bound values to
    /// `params` in placeholder order.
    pub(crate) fn conditions(&self, params: &mut Vec<Value>) -> Vec<String> {
        self.predicates.iter().map(|p| p.render(params)).collect()
    }

    /// ORDER BY / LIMIT tail. Unordered reads fall back to insertion order.
    pub(crate) fn tail(&self) -> String {
        let mut sql = match self.order_by {
            Some((col, Order::Asc)) => format!(" ORDER BY {col} ASC"),
            Some((col, Order::Desc)) => format!(" ORDER BY {col} DESC"),
            None => " ORDER BY rowid".to_string(),
        };
        // SQLite reads anything past i64::MAX as a float and rejects it.
        if let Some(limit) = self.limit {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_conjunction_in_order() {
        let id = Uuid::new_v4();
        let filter = Filter::new()
            .eq("make_id", id)
            .and(Predicate::ge("year", 2015))
            .and(Predicate::le("price", 30_000.0))
            .and(Predicate::contains("city", "Sof"));

        let mut params = Vec::new();
        let conds = filter.conditions(&mut params);

        assert_eq!(
            conds,
            vec!["make_id = ?", "year >= ?", "price <= ?", "instr(city, ?) > 0"]
        );
        assert_eq!(params.len(), 4);
        assert_eq!(params[0], Value::Blob(id.as_bytes().to_vec()));
        assert_eq!(params[3], Value::Text("Sof".into()));
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let mut params = Vec::new();
        let conds = Filter::new()
            .is_in("vehicle_id", Vec::<Uuid>::new())
            .conditions(&mut params);
        assert_eq!(conds, vec!["0"]);
        assert!(params.is_empty());
    }

    #[test]
    fn renders_strict_bound_and_null_check() {
        let mut params = Vec::new();
        let conds = Filter::new()
            .and(Predicate::gt("mileage", 100_000i64))
            .and(Predicate::is_null("vin"))
            .conditions(&mut params);

        assert_eq!(conds, vec!["mileage > ?", "vin IS NULL"]);
        assert_eq!(params, vec![Value::Integer(100_000)]);
    }

    #[test]
    fn huge_limit_is_clamped_to_an_integer() {
        assert_eq!(
            Filter::new().limit(usize::MAX).tail(),
            format!(" ORDER BY rowid LIMIT {}", i64::MAX)
        );
    }

    #[test]
    fn tail_defaults_to_rowid() {
        assert_eq!(Filter::new().tail(), " ORDER BY rowid");
        assert_eq!(
            Filter::new().order_by("created_at", Order::Desc).limit(5).tail(),
            " ORDER BY created_at DESC LIMIT 5"
        );
    }
}
