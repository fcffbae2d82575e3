use chronicle_core_types::{CompareOp, Expr, PropertyName};

use crate::env::Environment;
use crate::errors::{ChronicleError, Result};
use crate::model::{Entity, HistoricalDate};

/// A fully evaluated expression value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Date(HistoricalDate),
    Importance(chronicle_core_types::Importance),
}

impl Value {
    /// Value-class name used in type diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Date(_) => "date",
            Value::Importance(_) => "importance tier",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Date(d) => write!(f, "{}", d),
            Value::Importance(i) => f.write_str(i.as_str()),
        }
    }
}

/// Evaluate an expression against the current environment
///
/// Property access resolves the object name through loop scope first. Date
/// literals are validated here, so a malformed literal inside a condition
/// is caught at the point of use.
///
/// # Errors
/// * `UnknownIdentifier` - property access on an unresolvable name
/// * `UnknownProperty` - property inapplicable to the entity's kind
/// * `InvalidDate` - malformed date literal
/// * `InvalidImportance` - importance literal outside HIGH/MEDIUM/LOW
pub fn eval_expr(env: &Environment, expr: &Expr) -> Result<Value> {
    match expr {
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Int(i) => Ok(Value::Int(*i)),
        Expr::Date(date_expr) => Ok(Value::Date(HistoricalDate::from_expr(date_expr)?)),
        Expr::ImportanceTag(raw) => {
            let tier = raw
                .parse()
                .map_err(|_| ChronicleError::InvalidImportance {
                    id: "<literal>".to_string(),
                    value: raw.clone(),
                })?;
            Ok(Value::Importance(tier))
        }
        Expr::Property { object, property } => {
            let entity = env.resolve(object).ok_or_else(|| {
                ChronicleError::UnknownIdentifier {
                    id: object.clone(),
                    context: format!("object of property access '.{}'", property),
                }
            })?;
            read_property(entity, *property)
        }
    }
}

/// Read one property off an entity, per the closed dispatch table
///
/// The table mirrors the entity shapes exactly: `date` only on events,
/// `start`/`end` only on periods, `relation` only on relationships,
/// `title`/`importance` on the dated kinds, `id` everywhere. Anything else
/// is an `UnknownProperty` runtime diagnostic.
pub fn read_property(entity: &Entity, property: PropertyName) -> Result<Value> {
    let value = match (entity, property) {
        (_, PropertyName::Id) => Some(Value::Str(entity.id().to_string())),

        (Entity::Event(e), PropertyName::Title) => Some(Value::Str(e.title.clone())),
        (Entity::Event(e), PropertyName::Importance) => Some(Value::Importance(e.importance)),
        (Entity::Event(e), PropertyName::Date) => Some(Value::Date(e.date)),

        (Entity::Period(p), PropertyName::Title) => Some(Value::Str(p.title.clone())),
        (Entity::Period(p), PropertyName::Importance) => Some(Value::Importance(p.importance)),
        (Entity::Period(p), PropertyName::Start) => Some(Value::Date(p.start)),
        (Entity::Period(p), PropertyName::End) => Some(Value::Date(p.end)),

        (Entity::Relationship(r), PropertyName::Relation) => {
            Some(Value::Str(r.kind.label().to_string()))
        }

        (Entity::Timeline(t), PropertyName::Title) => Some(Value::Str(t.title.clone())),

        _ => None,
    };

    value.ok_or_else(|| ChronicleError::UnknownProperty {
        kind: entity.kind(),
        id: entity.id().to_string(),
        property: property.as_str().to_string(),
    })
}

/// Apply a comparison operator to two evaluated values
///
/// Same-class values compare directly: strings lexically, integers and
/// dates by their total orders, importance tiers LOW < MEDIUM < HIGH. The
/// one coercion is integer-against-date, where the integer is read as a
/// bare-year date. Any other mixed pairing is a type diagnostic.
///
/// # Errors
/// * `IncomparableValues` - operands with no common type
pub fn compare_values(left: &Value, op: CompareOp, right: &Value) -> Result<bool> {
    use std::cmp::Ordering;

    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Importance(a), Value::Importance(b)) => a.cmp(b),
        (Value::Int(a), Value::Date(b)) => coerce_year(*a)?.cmp(b),
        (Value::Date(a), Value::Int(b)) => a.cmp(&coerce_year(*b)?),
        _ => {
            return Err(ChronicleError::IncomparableValues {
                left: left.type_name().to_string(),
                right: right.type_name().to_string(),
            });
        }
    };

    Ok(match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Ge => ordering != Ordering::Less,
    })
}

fn coerce_year(year: i64) -> Result<HistoricalDate> {
    let year = i32::try_from(year).map_err(|_| ChronicleError::InvalidDate {
        reason: format!("year {} is out of range", year),
    })?;
    Ok(HistoricalDate::from_year(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Event;
    use chronicle_core_types::{DateExpr, Importance};

    fn env_with_event() -> Environment {
        let mut env = Environment::new();
        env.declare(Entity::Event(
            Event::new(
                "e1".to_string(),
                "Moon landing".to_string(),
                HistoricalDate::new(1969, Some(7), Some(20)).unwrap(),
                Importance::High,
            )
            .unwrap(),
        ))
        .unwrap();
        env
    }

    #[test]
    fn test_literals_evaluate_to_their_values() {
        let env = Environment::new();
        assert_eq!(
            eval_expr(&env, &Expr::Int(44)).unwrap(),
            Value::Int(44)
        );
        assert_eq!(
            eval_expr(&env, &Expr::Str("x".to_string())).unwrap(),
            Value::Str("x".to_string())
        );
        assert_eq!(
            eval_expr(&env, &Expr::ImportanceTag("high".to_string())).unwrap(),
            Value::Importance(Importance::High)
        );
    }

    #[test]
    fn test_malformed_date_literal_fails_at_evaluation() {
        let env = Environment::new();
        let result = eval_expr(&env, &Expr::Date(DateExpr::full(1900, 2, 29)));
        assert!(matches!(result, Err(ChronicleError::InvalidDate { .. })));
    }

    #[test]
    fn test_bad_importance_literal_is_a_validation_error() {
        let env = Environment::new();
        let result = eval_expr(&env, &Expr::ImportanceTag("URGENT".to_string()));
        assert!(matches!(
            result,
            Err(ChronicleError::InvalidImportance { value, .. }) if value == "URGENT"
        ));
    }

    #[test]
    fn test_property_access_reads_entity_fields() {
        let env = env_with_event();
        let date = eval_expr(
            &env,
            &Expr::Property {
                object: "e1".to_string(),
                property: PropertyName::Date,
            },
        )
        .unwrap();
        assert_eq!(
            date,
            Value::Date(HistoricalDate::new(1969, Some(7), Some(20)).unwrap())
        );
    }

    #[test]
    fn test_inapplicable_property_is_runtime_diagnostic() {
        let env = env_with_event();
        let result = eval_expr(
            &env,
            &Expr::Property {
                object: "e1".to_string(),
                property: PropertyName::Start,
            },
        );
        assert!(matches!(
            result,
            Err(ChronicleError::UnknownProperty { property, .. }) if property == "start"
        ));
    }

    #[test]
    fn test_unknown_object_is_lookup_diagnostic() {
        let env = Environment::new();
        let result = eval_expr(
            &env,
            &Expr::Property {
                object: "ghost".to_string(),
                property: PropertyName::Title,
            },
        );
        assert!(matches!(
            result,
            Err(ChronicleError::UnknownIdentifier { id, .. }) if id == "ghost"
        ));
    }

    #[test]
    fn test_integer_coerces_against_date() {
        let date = Value::Date(HistoricalDate::from_year(100));
        assert!(compare_values(&Value::Int(50), CompareOp::Lt, &date).unwrap());
        assert!(compare_values(&date, CompareOp::Ge, &Value::Int(100)).unwrap());
    }

    #[test]
    fn test_importance_tiers_order() {
        let low = Value::Importance(Importance::Low);
        let high = Value::Importance(Importance::High);
        assert!(compare_values(&low, CompareOp::Lt, &high).unwrap());
    }

    #[test]
    fn test_mixed_types_refuse_comparison() {
        let result = compare_values(
            &Value::Str("100".to_string()),
            CompareOp::Eq,
            &Value::Int(100),
        );
        assert!(matches!(
            result,
            Err(ChronicleError::IncomparableValues { left, right })
                if left == "string" && right == "integer"
        ));
    }
}
