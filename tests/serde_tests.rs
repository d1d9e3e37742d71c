use configspace::condition::{Condition, Expression};
use configspace::forbidden::{Forbidden, Relation};
use configspace::{Dialect, Value, ValueKind};

#[test]
fn value_json_shape() {
    let json = serde_json::to_string(&Value::from("rbf")).unwrap();
    assert_eq!(json, r#"{"Str":"rbf"}"#);
    let back: Value = serde_json::from_str(r#"{"Int":3}"#).unwrap();
    assert_eq!(back, Value::Int(3));
    let kind: ValueKind = serde_json::from_str(r#""Float""#).unwrap();
    assert_eq!(kind, ValueKind::Float);
}

#[test]
fn condition_survives_json() {
    let condition = Condition::new(
        "degree",
        Expression::or(vec![
            Expression::is_in("kernel", vec!["poly", "sigmoid"]),
            Expression::and(vec![
                Expression::greater_than("C", 1.5),
                Expression::not_equals("shrinking", true),
            ]),
        ]),
    );
    let json = serde_json::to_string(&condition).unwrap();
    let back: Condition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, condition);
}

#[test]
fn forbidden_survives_json() {
    let clause = Forbidden::and(vec![
        Forbidden::is_in("a", vec![1, 2]),
        Forbidden::relation("b", "c", Relation::LessThan),
    ]);
    let json = serde_json::to_string(&clause).unwrap();
    let back: Forbidden = serde_json::from_str(&json).unwrap();
    assert_eq!(back, clause);
}

#[test]
fn dialect_is_a_plain_string() {
    assert_eq!(serde_json::to_string(&Dialect::New).unwrap(), r#""New""#);
    let dialect: Dialect = serde_json::from_str(r#""Old""#).unwrap();
    assert_eq!(dialect, Dialect::Old);
}
