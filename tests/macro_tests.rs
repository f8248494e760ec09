use serde_luadata::{lua, LuaTable, LuaValue, Number};

#[test]
fn test_lua_macro_nil() {
    let value = lua!(nil);
    assert_eq!(value, LuaValue::Nil);
}

#[test]
fn test_lua_macro_booleans() {
    let true_val = lua!(true);
    assert_eq!(true_val, LuaValue::Boolean(true));

    let false_val = lua!(false);
    assert_eq!(false_val, LuaValue::Boolean(false));
}

#[test]
fn test_lua_macro_numbers() {
    let int_val = lua!(42);
    assert_eq!(int_val, LuaValue::Number(Number::Integer(42)));

    let float_val = lua!(3.5);
    assert_eq!(float_val, LuaValue::Number(Number::Float(3.5)));

    let negative_val = lua!(-123);
    assert_eq!(negative_val, LuaValue::Number(Number::Integer(-123)));
}

#[test]
fn test_lua_macro_strings() {
    let string_val = lua!("hello world");
    assert_eq!(string_val, LuaValue::String("hello world".to_string()));

    let empty_string = lua!("");
    assert_eq!(empty_string, LuaValue::String(String::new()));
}

#[test]
fn test_lua_macro_arrays() {
    let empty_array = lua!([]);
    assert_eq!(empty_array, LuaValue::Array(vec![]));

    let mixed_array = lua!([1, "hello", true, nil]);
    assert_eq!(
        mixed_array,
        LuaValue::Array(vec![
            LuaValue::Number(Number::Integer(1)),
            LuaValue::String("hello".to_string()),
            LuaValue::Boolean(true),
            LuaValue::Nil,
        ])
    );
}

#[test]
fn test_lua_macro_tables() {
    // An empty table has no keys to tell it apart from an empty array.
    assert_eq!(lua!({}), LuaValue::Array(vec![]));

    let table = lua!({
        "name": "Alice",
        "age": 30,
        false: "no"
    });

    match table {
        LuaValue::Table(ref entries) => {
            assert_eq!(entries.len(), 3);
            assert_eq!(
                entries.get(&LuaValue::from("name")),
                Some(&LuaValue::String("Alice".to_string()))
            );
            assert_eq!(
                entries.get(&LuaValue::from("age")),
                Some(&LuaValue::Number(Number::Integer(30)))
            );
            assert_eq!(
                entries.get(&LuaValue::Boolean(false)),
                Some(&LuaValue::from("no"))
            );
        }
        _ => panic!("Expected table"),
    }
}

#[test]
fn test_lua_macro_integer_keys() {
    assert_eq!(lua!({ 1: "a", 2: "b" }), lua!(["a", "b"]));

    let mut sparse = LuaTable::new();
    sparse.insert(LuaValue::from(1), LuaValue::from("a"));
    sparse.insert(LuaValue::from(3), LuaValue::from("c"));
    assert_eq!(lua!({ 1: "a", 3: "c" }), LuaValue::Table(sparse));
}

#[test]
fn test_lua_macro_nested() {
    let nested = lua!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    assert_eq!(
        nested.get(&LuaValue::from("user")).and_then(|u| u.get(&LuaValue::from("id"))),
        Some(&LuaValue::from(123))
    );
    assert_eq!(
        nested.get(&LuaValue::from("tags")).and_then(|t| t.get(&LuaValue::from(2))),
        Some(&LuaValue::from("developer"))
    );
    assert_eq!(
        nested.to_string(),
        r#"{count=42,tags={"admin","developer"},user={active=true,id=123,name="Bob"}}"#
    );
}

#[test]
fn test_lua_macro_from_serializable() {
    #[derive(serde::Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    let point = Point { x: 1, y: -2 };
    let value = lua!(point);
    assert!(value.is_object());
    assert_eq!(value.to_string(), "{x=1,y=-2}");
}

#[test]
fn test_lua_value_methods() {
    let nil_val = lua!(nil);
    assert!(nil_val.is_nil());
    assert!(!nil_val.is_boolean());
    assert!(!nil_val.is_number());
    assert!(!nil_val.is_string());
    assert!(!nil_val.is_array());
    assert!(!nil_val.is_table());
    assert!(!nil_val.is_object());
    assert!(!nil_val.is_indexable());

    let bool_val = lua!(true);
    assert!(bool_val.is_boolean());
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = lua!("hello");
    assert!(str_val.is_string());
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = lua!([1, 2, 3]);
    assert!(array_val.is_array());
    assert!(array_val.is_indexable());
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));

    let table_val = lua!({ "key": "value" });
    assert!(table_val.is_table());
    assert_eq!(table_val.as_table().map(LuaTable::len), Some(1));
}
