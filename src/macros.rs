/// Builds a [`LuaValue`](crate::LuaValue) from a literal-like syntax.
///
/// ```rust
/// use serde_luadata::{lua, LuaValue};
///
/// let value = lua!({ "name": "Alice", 1: true, "extra": nil });
/// assert_eq!(value.to_string(), r#"{true,extra=nil,name="Alice"}"#);
///
/// assert_eq!(lua!([1, "two"]).to_string(), r#"{1,"two"}"#);
/// ```
#[macro_export]
macro_rules! lua {
    (nil) => {
        $crate::LuaValue::Nil
    };

    (true) => {
        $crate::LuaValue::Boolean(true)
    };

    (false) => {
        $crate::LuaValue::Boolean(false)
    };

    ([]) => {
        $crate::LuaValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::LuaValue::Array(vec![$($crate::lua!($elem)),*])
    };

    // An empty table reads back as an empty array.
    ({}) => {
        $crate::LuaValue::Array(vec![])
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::LuaTable::new();
        $(
            table.insert($crate::LuaValue::from($key), $crate::lua!($value));
        )*
        table.into_value()
    }};

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::LuaValue::Nil)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{LuaTable, LuaValue, Number};

    #[test]
    fn test_lua_macro_primitives() {
        assert_eq!(lua!(nil), LuaValue::Nil);
        assert_eq!(lua!(true), LuaValue::Boolean(true));
        assert_eq!(lua!(false), LuaValue::Boolean(false));
        assert_eq!(lua!(42), LuaValue::Number(Number::Integer(42)));
        assert_eq!(lua!(3.5), LuaValue::Number(Number::Float(3.5)));
        assert_eq!(lua!("hello"), LuaValue::String("hello".to_string()));
    }

    #[test]
    fn test_lua_macro_arrays() {
        assert_eq!(lua!([]), LuaValue::Array(vec![]));

        let arr = lua!([1, nil, [3]]);
        match arr {
            LuaValue::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], LuaValue::from(1));
                assert!(vec[1].is_nil());
                assert_eq!(vec[2], LuaValue::Array(vec![LuaValue::from(3)]));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_lua_macro_tables() {
        assert_eq!(lua!({}), LuaValue::Array(vec![]));

        let table = lua!({
            "name": "Alice",
            "age": 30
        });

        match table {
            LuaValue::Table(table) => {
                assert_eq!(table.len(), 2);
                assert_eq!(
                    table.get(&LuaValue::from("name")),
                    Some(&LuaValue::String("Alice".to_string()))
                );
                assert_eq!(table.get(&LuaValue::from("age")), Some(&LuaValue::from(30)));
            }
            _ => panic!("Expected table"),
        }
    }

    #[test]
    fn test_lua_macro_sequence_keys_become_array() {
        assert_eq!(
            lua!({ 2: "b", 1: "a" }),
            LuaValue::Array(vec![LuaValue::from("a"), LuaValue::from("b")])
        );

        let sparse: LuaTable = vec![(LuaValue::from(2), LuaValue::from("b"))]
            .into_iter()
            .collect();
        assert_eq!(lua!({ 2: "b" }), LuaValue::Table(sparse));
    }

    #[test]
    fn test_lua_macro_expressions() {
        let n = 7;
        assert_eq!(lua!(n), LuaValue::from(7));
        assert_eq!(lua!(Some("x")), LuaValue::from("x"));
        assert_eq!(lua!(None::<i32>), LuaValue::Nil);
    }
}
