use crate::catalog::types::{Row, Value};
use compact_str::CompactString;
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// A single accumulated filter. Rows match a chain only if they satisfy
/// every accumulated predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPredicate {
    /// String-coercion equality on a field.
    Eq(CompactString, Value),
    /// Matches rows whose field is not null.
    NotNull(CompactString),
}

impl FilterPredicate {
    pub fn field(&self) -> &str {
        match self {
            FilterPredicate::Eq(field, _) | FilterPredicate::NotNull(field) => field,
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        match self {
            FilterPredicate::Eq(field, expected) => row
                .get(field)
                .is_some_and(|value| value.coerce_string() == expected.coerce_string()),
            FilterPredicate::NotNull(field) => row
                .get(field)
                .is_some_and(|value| !matches!(value, Value::Null)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

/// At most one per chain; a later `order` call overwrites an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: CompactString,
    pub order: Order,
}

impl SortDirective {
    pub fn new(field: impl Into<CompactString>, order: Order) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// Stable in-place sort by the directive's field. Nulls coerce to the empty
/// string and therefore sort first in ascending order.
pub fn sort_rows(rows: &mut [Row], directive: &SortDirective) {
    rows.sort_by(|a, b| {
        let left = a
            .get(&directive.field)
            .map_or_else(String::new, Value::sort_string);
        let right = b
            .get(&directive.field)
            .map_or_else(String::new, Value::sort_string);
        let ord = natural_cmp(&left, &right);
        match directive.order {
            Order::Asc => ord,
            Order::Desc => ord.reverse(),
        }
    });
}

/// Numeric-sensitive natural string comparison: digit runs compare by their
/// integer magnitude, everything else compares char by char ignoring ASCII
/// case. Naturally-equal but distinct strings ("01" vs "1") fall back to
/// plain ordering so the comparison stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digit_run(&mut left);
                    let run_b = take_digit_run(&mut right);
                    let ord = cmp_digit_runs(&run_a, &run_b);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let ord = x
                        .to_ascii_lowercase()
                        .cmp(&y.to_ascii_lowercase())
                        .then_with(|| x.cmp(&y));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    left.next();
                    right.next();
                }
            }
        }
    }
}

fn take_digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::{natural_cmp, sort_rows, FilterPredicate, Order, SortDirective};
    use crate::catalog::types::{Row, Value};
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(natural_cmp("1", "2"), Ordering::Less);
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("a2", "a10"), Ordering::Less);
        assert_eq!(natural_cmp("", "1"), Ordering::Less);
        assert_eq!(natural_cmp("10", "10"), Ordering::Equal);
    }

    #[test]
    fn case_differences_do_not_dominate_ordering() {
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("Banana", "cherry"), Ordering::Less);
    }

    #[test]
    fn equality_uses_string_coercion() {
        let row = Row::from_pairs([("id", Value::Integer(2)), ("table", Value::Null)]);
        assert!(FilterPredicate::Eq("id".into(), Value::Text("2".into())).matches(&row));
        assert!(FilterPredicate::Eq("id".into(), Value::Integer(2)).matches(&row));
        assert!(!FilterPredicate::Eq("id".into(), Value::Text("5".into())).matches(&row));
        // Null coerces to the literal "null" on both sides.
        assert!(FilterPredicate::Eq("table".into(), Value::Null).matches(&row));
        assert!(FilterPredicate::Eq("table".into(), Value::Text("null".into())).matches(&row));
    }

    #[test]
    fn not_null_rejects_null_and_absent_fields() {
        let assigned = Row::from_pairs([("table", Value::Text("3".into()))]);
        let unassigned = Row::from_pairs([("table", Value::Null)]);
        let predicate = FilterPredicate::NotNull("table".into());
        assert!(predicate.matches(&assigned));
        assert!(!predicate.matches(&unassigned));
        assert!(!predicate.matches(&Row::default()));
    }

    fn rows_from_tables(tables: &[Option<&str>]) -> Vec<Row> {
        tables
            .iter()
            .enumerate()
            .map(|(idx, table)| {
                Row::from_pairs([
                    ("id", Value::Integer(idx as i64 + 1)),
                    (
                        "table",
                        table.map_or(Value::Null, |t| Value::Text(t.into())),
                    ),
                ])
            })
            .collect()
    }

    #[test]
    fn ascending_sort_puts_nulls_first_and_orders_numerically() {
        let mut rows = rows_from_tables(&[Some("2"), Some("1"), None, Some("10")]);
        sort_rows(&mut rows, &SortDirective::new("table", Order::Asc));
        let tables: Vec<_> = rows
            .iter()
            .map(|row| row.get("table").expect("table").clone())
            .collect();
        assert_eq!(
            tables,
            vec![
                Value::Null,
                Value::Text("1".into()),
                Value::Text("2".into()),
                Value::Text("10".into()),
            ]
        );
    }

    proptest! {
        #[test]
        fn and_semantics_is_set_intersection(
            cells in prop::collection::vec((0..3i64, 0..3i64), 0..40),
            wanted_x in 0..3i64,
            wanted_y in 0..3i64,
        ) {
            let rows: Vec<Row> = cells
                .iter()
                .enumerate()
                .map(|(idx, (x, y))| Row::from_pairs([
                    ("id", Value::Integer(idx as i64)),
                    ("x", Value::Integer(*x)),
                    ("y", Value::Integer(*y)),
                ]))
                .collect();
            let p1 = FilterPredicate::Eq("x".into(), Value::Integer(wanted_x));
            let p2 = FilterPredicate::Eq("y".into(), Value::Integer(wanted_y));

            let both: Vec<&Row> = rows
                .iter()
                .filter(|row| p1.matches(row) && p2.matches(row))
                .collect();
            let intersection: Vec<&Row> = rows
                .iter()
                .filter(|row| p1.matches(row))
                .filter(|row| p2.matches(row))
                .collect();
            prop_assert_eq!(both, intersection);
        }

        #[test]
        fn sorting_twice_is_stable_and_reverse_is_exact(
            keys in prop::collection::hash_set("[a-z0-9]{0,6}", 0..20)
        ) {
            let tables: Vec<Option<&str>> = keys.iter().map(|k| Some(k.as_str())).collect();
            let mut ascending = rows_from_tables(&tables);
            sort_rows(&mut ascending, &SortDirective::new("table", Order::Asc));

            let mut again = ascending.clone();
            sort_rows(&mut again, &SortDirective::new("table", Order::Asc));
            prop_assert_eq!(&again, &ascending);

            // Distinct keys mean no ties, so descending is the exact reverse.
            let mut descending = ascending.clone();
            sort_rows(&mut descending, &SortDirective::new("table", Order::Desc));
            let mut reversed = ascending.clone();
            reversed.reverse();
            prop_assert_eq!(descending, reversed);
        }
    }
}
