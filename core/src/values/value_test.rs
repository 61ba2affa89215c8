use crate::values::{Value, ValueKind};

#[test]
fn test_kind() {
    assert_eq!(Value::Int(1).kind(), ValueKind::Int);
    assert_eq!(Value::Time(1).kind(), ValueKind::Time);
    assert_eq!(Value::Date(1).kind(), ValueKind::Date);
    assert_eq!(Value::DateTime(1).kind(), ValueKind::DateTime);
    assert_eq!(Value::from("s").kind(), ValueKind::String);
    assert_eq!(Value::Error.kind(), ValueKind::Error);
}

#[test]
fn test_kind_names() {
    assert_eq!(ValueKind::DateTime.name(), "DATETIME");
    assert_eq!(ValueKind::from_name("string"), Some(ValueKind::String));
    assert_eq!(ValueKind::from_name("DateTime"), Some(ValueKind::DateTime));
    assert_eq!(ValueKind::from_name("special"), None);
    assert_eq!(ValueKind::from_name("float"), None);
}

#[test]
fn test_truthiness() {
    assert!(Value::Int(-3).is_true());
    assert!(!Value::Int(0).is_true());
    assert!(Value::from("x").is_true());
    assert!(!Value::from("").is_true());
    assert!(!Value::Date(0).is_true());
    assert!(!Value::Error.is_true());
}

#[test]
fn test_datetime_constructor_checks_overflow() {
    assert_eq!(Value::datetime(1, 30), Some(Value::DateTime(1470)));
    assert_eq!(Value::datetime(i64::MAX / 1000, 0), None);
}

#[test]
fn test_raw_int() {
    assert_eq!(Value::Date(7).as_raw_int(), Some(7));
    assert_eq!(Value::from("7").as_raw_int(), None);
    assert_eq!(Value::from("7").as_str(), Some("7"));
    assert_eq!(Value::Int(7).as_int(), Some(7));
    assert_eq!(Value::Time(7).as_int(), None);
}
