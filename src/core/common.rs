//! Helpers shared by the distributor and machine operations.

use crate::errors::{Error, Result};
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

/// Current time truncated to the microsecond precision of `timestamptz`.
pub(crate) fn now_stamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for an update of a record last stamped at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not advanced
/// past it at microsecond precision.
pub(crate) fn next_update_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now_stamp();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Trims a required text field, rejecting blank values.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; blank values are stored as NULL.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builds a case-insensitive substring match of `term` against any of `columns`.
///
/// Returns `None` for a blank term so callers can skip the filter entirely.
pub(crate) fn search_condition<C>(columns: &[C], term: &str) -> Option<Condition>
where
    C: ColumnTrait + Copy,
{
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    let condition = columns.iter().fold(Condition::any(), |condition, column| {
        condition.add(
            Expr::expr(Func::lower(Expr::col(*column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    });
    Some(condition)
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::distributor;
    use sea_orm::{DatabaseBackend, EntityTrait, QueryFilter, QueryTrait};

    #[test]
    fn test_next_update_stamp_is_strictly_later() {
        let future = Utc::now() + TimeDelta::hours(1);
        let next = next_update_stamp(future);
        assert!(next > future);
        assert_eq!(next - future, TimeDelta::microseconds(1));

        let past = Utc::now() - TimeDelta::hours(1);
        assert!(next_update_stamp(past) > past);
    }

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("name", "  Acme  ").ok(), Some("Acme".to_string()));
        assert!(matches!(
            required("name", "   "),
            Err(Error::Validation { message }) if message == "name cannot be empty"
        ));
    }

    #[test]
    fn test_optional_blank_becomes_none() {
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(Some(" Pune ".to_string())), Some("Pune".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_search_condition_blank_term() {
        assert!(search_condition(&[distributor::Column::Name], "  ").is_none());
    }

    #[test]
    fn test_search_condition_sql() {
        let condition = search_condition(
            &[distributor::Column::Name, distributor::Column::Email],
            "AcMe",
        );
        assert!(condition.is_some());
        let sql = distributor::Entity::find()
            .filter(condition.unwrap_or_else(Condition::any))
            .build(DatabaseBackend::Sqlite)
            .to_string();
        assert!(sql.contains("LOWER("), "{sql}");
        assert!(sql.contains("'%acme%'"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
    }
}
