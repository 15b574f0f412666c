use serde_dotted::{
    flatten, flatten_with, flatten_with_options, record, Dynamic, FlatMap, FlattenOptions,
    NamingPolicy, Value,
};
use std::collections::BTreeMap;

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Simple {
        not_exported: i32 => "notExported",
        pub negated: i32 => "-",
        pub regular_field_no_tag: i32,
        pub regular_field_name_tag: i32 => "regularField",
        pub regular_field_omit_empty: Option<Box<i32>> => "regularFieldOmitEmpty,omitempty",
        pub regular_field_pointer_pointer: Option<Box<Option<Box<i32>>>> => "regularFieldPointerPointer",
    }
}

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Complex {
        pub top_level_field: bool => "topLevelBool",
        pub slice_field: Vec<i32> => "sliceField",
        pub slice_field_ptr_val: Vec<Option<Box<i32>>> => "sliceFieldPtrVal",
        pub map_field_str_key: BTreeMap<String, i32> => "mapFieldStrKey",
        pub map_field_str_key_ptr_val: BTreeMap<String, Option<Box<i32>>> => "mapFieldStrKeyPtrVal",
        pub map_field_int_key: BTreeMap<i32, String> => "mapFieldIntKey",
        pub map_field_str_key_struct_val: BTreeMap<String, Simple> => "mapFieldStrKeyStructVal",
        pub map_field_str_key_struct_ptr_val: BTreeMap<String, Option<Box<Simple>>> => "mapFieldStrKeyStructPtrVal",
        pub map_field_pointer_key: BTreeMap<Option<&'static str>, String> => "mapFieldPointerKey",
    }
}

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Pair {
        pub reg_struct: Simple,
        pub reg_struct_ptr: Option<Box<Simple>>,
    }
}

record! {
    #[derive(Debug, Clone, Default)]
    pub struct ComplexEmbed {
        pub complex_test_struct: Complex,
        pub anon_struct: Pair => "anonStruct",
    }
}

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Embedded {
        pub top_level_value: bool => "topLevelBool",
        not_exported_struct: Simple => "notExportedStruct",
        pub negated_exported_struct: Simple => "-",
        pub regular_export_struct_no_tag: Simple,
        pub regular_field_name_tag: Simple => "regularStruct",
        pub regular_field_omit_empty: Option<Box<Simple>> => "regularStructOmitEmpty,omitempty",
        pub regular_field_pointer_pointer: Option<Box<Option<Box<Simple>>>> => "regularStructPointerPointer",
        pub anon_struct: Pair => "anonStruct",
        pub anon_struct_ptr: Option<Box<Pair>> => "anonStructPtr",
    }
}

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Contained {
        pub contained_struct: Option<Box<Simple>> => "structIgnoreParent,ignoreparents",
    }
}

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Flattened {
        pub top_level_value: bool => "topLevelBool",
        pub anon_contained_struct: Contained => "anonContained",
    }
}

record! {
    #[derive(Debug, Default)]
    pub struct Envelope {
        pub kind: String,
        pub payload: Dynamic,
        pub extra: Dynamic => "extra,omitempty",
    }
}

fn simple() -> Simple {
    Simple {
        not_exported: 1,
        negated: 1,
        regular_field_no_tag: 1,
        regular_field_name_tag: 1,
        regular_field_omit_empty: Some(Box::new(1)),
        regular_field_pointer_pointer: Some(Box::new(Some(Box::new(1)))),
    }
}

fn complex() -> Complex {
    Complex {
        top_level_field: true,
        slice_field: vec![1, 2, 3],
        slice_field_ptr_val: vec![Some(Box::new(1))],
        map_field_str_key: [("test1", 1), ("test2", 2), ("test3", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        map_field_str_key_ptr_val: [("test1".to_string(), Some(Box::new(1)))]
            .into_iter()
            .collect(),
        map_field_int_key: [(1, "test1".to_string()), (2, "test2".to_string())]
            .into_iter()
            .collect(),
        map_field_str_key_struct_val: [("test1".to_string(), simple())].into_iter().collect(),
        map_field_str_key_struct_ptr_val: [("testPtr1".to_string(), Some(Box::new(simple())))]
            .into_iter()
            .collect(),
        map_field_pointer_key: [
            (None, "testing1".to_string()),
            (Some("testKey"), "testing2".to_string()),
        ]
        .into_iter()
        .collect(),
    }
}

fn simple_keys(prefix: &str) -> Vec<(String, Value)> {
    [
        "regular_field_no_tag",
        "regularField",
        "regularFieldOmitEmpty",
        "regularFieldPointerPointer",
    ]
    .iter()
    .map(|k| (format!("{prefix}{k}"), Value::from(1)))
    .collect()
}

fn assert_flat(map: &FlatMap, expected: Vec<(String, Value)>) {
    let have: BTreeMap<&str, &Value> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let want: BTreeMap<&str, &Value> = expected.iter().map(|(k, v)| (k.as_str(), v)).collect();
    assert_eq!(have, want);
}

fn owned(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

#[test]
fn test_simple_struct() {
    let map = flatten(&simple()).unwrap();
    assert_flat(&map, simple_keys(""));
}

#[test]
fn test_simple_struct_through_pointers() {
    let value = simple();
    let boxed = Some(Box::new(&value));
    assert_flat(&flatten(&boxed).unwrap(), simple_keys(""));
    assert_flat(&flatten(&std::rc::Rc::new(value)).unwrap(), simple_keys(""));
}

#[test]
fn test_simple_struct_absent_pointers() {
    let value = Simple {
        regular_field_omit_empty: None,
        regular_field_pointer_pointer: None,
        ..simple()
    };
    let map = flatten(&value).unwrap();
    assert_flat(
        &map,
        owned(&[
            ("regular_field_no_tag", Value::from(1)),
            ("regularField", Value::from(1)),
            ("regularFieldPointerPointer", Value::Nil),
        ]),
    );

    // an inner link missing still reads as nil
    let value = Simple {
        regular_field_pointer_pointer: Some(Box::new(None)),
        ..simple()
    };
    let map = flatten(&value).unwrap();
    assert_eq!(map.get("regularFieldPointerPointer"), Some(&Value::Nil));
}

#[test]
fn test_complex_struct() {
    let map = flatten(&complex()).unwrap();

    let mut expected = owned(&[
        ("topLevelBool", Value::Bool(true)),
        ("sliceField.0", Value::from(1)),
        ("sliceField.1", Value::from(2)),
        ("sliceField.2", Value::from(3)),
        ("sliceFieldPtrVal.0", Value::from(1)),
        ("mapFieldStrKey.test1", Value::from(1)),
        ("mapFieldStrKey.test2", Value::from(2)),
        ("mapFieldStrKey.test3", Value::from(3)),
        ("mapFieldStrKeyPtrVal.test1", Value::from(1)),
        ("mapFieldIntKey.1", Value::from("test1")),
        ("mapFieldIntKey.2", Value::from("test2")),
        ("mapFieldPointerKey.", Value::from("testing1")),
        ("mapFieldPointerKey.testKey", Value::from("testing2")),
    ]);
    // record-valued entries merge under the map key, without the entry key
    expected.extend(simple_keys("mapFieldStrKeyStructVal."));
    expected.extend(simple_keys("mapFieldStrKeyStructPtrVal."));

    assert_flat(&map, expected);
}

#[test]
fn test_nil_map_key_placeholder() {
    let options = FlattenOptions::new().with_nil_key("[emptyKey]");
    let map = flatten_with_options(&complex(), &options).unwrap();
    assert_eq!(
        map.get("mapFieldPointerKey.[emptyKey]").and_then(Value::as_str),
        Some("testing1")
    );
    assert!(!map.contains_key("mapFieldPointerKey."));
}

#[test]
fn test_embedded_structs() {
    let embedded = Embedded {
        top_level_value: true,
        not_exported_struct: simple(),
        negated_exported_struct: simple(),
        regular_export_struct_no_tag: simple(),
        regular_field_name_tag: simple(),
        regular_field_omit_empty: None,
        regular_field_pointer_pointer: None,
        anon_struct: Pair {
            reg_struct: simple(),
            reg_struct_ptr: Some(Box::new(simple())),
        },
        anon_struct_ptr: None,
    };
    let map = flatten(&embedded).unwrap();

    let mut expected = owned(&[
        ("topLevelBool", Value::Bool(true)),
        ("regularStructPointerPointer", Value::Nil),
        ("anonStructPtr", Value::Nil),
    ]);
    expected.extend(simple_keys("regular_export_struct_no_tag."));
    expected.extend(simple_keys("regularStruct."));
    expected.extend(simple_keys("anonStruct.reg_struct."));
    expected.extend(simple_keys("anonStruct.reg_struct_ptr."));

    assert_flat(&map, expected);
}

#[test]
fn test_embedded_structs_set_pointers() {
    let embedded = Embedded {
        regular_field_omit_empty: Some(Box::new(simple())),
        regular_field_pointer_pointer: Some(Box::new(Some(Box::new(simple())))),
        anon_struct_ptr: Some(Box::new(Pair::default())),
        ..Embedded::default()
    };
    let map = flatten(&embedded).unwrap();

    assert_eq!(
        map.get("regularStructOmitEmpty.regularField").and_then(Value::as_i64),
        Some(1)
    );
    assert_eq!(
        map.get("regularStructPointerPointer.regularFieldPointerPointer")
            .and_then(Value::as_i64),
        Some(1)
    );
    assert_eq!(map.get("anonStructPtr.reg_struct_ptr"), Some(&Value::Nil));
    assert_eq!(
        map.get("anonStructPtr.reg_struct.regularFieldPointerPointer"),
        Some(&Value::Nil)
    );
    assert!(!map.contains_key("anonStructPtr.reg_struct.regularFieldOmitEmpty"));
    assert!(!map.contains_key("regularStructPointerPointer"));
}

#[test]
fn test_ignore_parents() {
    let flattened = Flattened {
        top_level_value: true,
        anon_contained_struct: Contained {
            contained_struct: Some(Box::new(simple())),
        },
    };
    let map = flatten(&flattened).unwrap();

    let mut expected = owned(&[("topLevelBool", Value::Bool(true))]);
    expected.extend(simple_keys("structIgnoreParent."));
    assert_flat(&map, expected);
    assert!(map.keys().all(|k| !k.starts_with("anonContained")));
}

#[test]
fn test_dynamic_slots() {
    let envelope = Envelope {
        kind: "event".to_string(),
        payload: Dynamic::new(simple()),
        extra: Dynamic::none(),
    };
    let map = flatten(&envelope).unwrap();

    assert_eq!(map.sorted_keys(), vec!["kind", "payload"]);
    assert!(map.get("payload").unwrap().is_record());

    let envelope = Envelope::default();
    let map = flatten(&envelope).unwrap();
    assert_eq!(map.get("payload"), Some(&Value::Nil));
    assert!(!map.contains_key("extra"));
}

#[test]
fn test_dynamic_top_level() {
    let slot = Dynamic::new(simple());
    assert_flat(&flatten(&slot).unwrap(), simple_keys(""));
    assert!(flatten(&Dynamic::none()).is_none());
}

#[test]
fn test_non_record_inputs() {
    assert!(flatten(&5).is_none());
    assert!(flatten("text").is_none());
    assert!(flatten(&None::<Simple>).is_none());
    assert!(flatten(&vec![simple()]).is_none());
    assert!(flatten(&BTreeMap::<String, i32>::new()).is_none());
}

#[test]
fn test_flatten_is_deterministic() {
    let value = complex();
    let first = flatten(&value).unwrap();
    let second = flatten(&value).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_policy_lower() {
    let map = flatten_with(&complex_embed(), [NamingPolicy::Lower]).unwrap();
    assert_policy_keys(
        &map,
        &[
            "complex_test_struct.top_level_field",
            "complex_test_struct.slice_field.2",
            "complex_test_struct.map_field_str_key.test1",
            "complex_test_struct.map_field_int_key.1",
            "complex_test_struct.map_field_str_key_struct_val.regular_field_name_tag",
            "complex_test_struct.map_field_pointer_key.testKey",
            "anon_struct.reg_struct_ptr.regular_field_pointer_pointer",
        ],
    );
}

#[test]
fn test_policy_upper() {
    let map = flatten_with(&complex_embed(), [NamingPolicy::Upper]).unwrap();
    assert_policy_keys(
        &map,
        &[
            "COMPLEX_TEST_STRUCT.TOP_LEVEL_FIELD",
            "COMPLEX_TEST_STRUCT.MAP_FIELD_INT_KEY.1",
            "COMPLEX_TEST_STRUCT.MAP_FIELD_STR_KEY.test2",
            "ANON_STRUCT.REG_STRUCT.REGULAR_FIELD_NO_TAG",
        ],
    );
}

#[test]
fn test_policy_upper_camel() {
    let map = flatten_with(&complex_embed(), [NamingPolicy::UpperCamel]).unwrap();
    assert_policy_keys(
        &map,
        &[
            "ComplexTestStruct.TopLevelField",
            "ComplexTestStruct.SliceFieldPtrVal.0",
            "ComplexTestStruct.MapFieldStrKeyStructPtrVal.RegularFieldOmitEmpty",
            "AnonStruct.RegStructPtr.RegularFieldNameTag",
        ],
    );
}

#[test]
fn test_policy_lower_camel() {
    let map = flatten_with(&complex_embed(), [NamingPolicy::LowerCamel]).unwrap();
    assert_policy_keys(
        &map,
        &[
            "complexTestStruct.topLevelField",
            "complexTestStruct.mapFieldStrKeyPtrVal.test1",
            "anonStruct.regStruct.regularFieldNoTag",
        ],
    );
}

#[test]
fn test_policy_snake_keeps_declared_names() {
    let map = flatten_with(&complex_embed(), [NamingPolicy::Snake]).unwrap();
    assert_policy_keys(
        &map,
        &[
            "complex_test_struct.top_level_field",
            "complex_test_struct.map_field_pointer_key.",
            "anon_struct.reg_struct.regular_field_omit_empty",
        ],
    );
}

#[test]
fn test_policy_identity_ignores_renames() {
    let map = flatten_with(&simple(), [NamingPolicy::Identity]).unwrap();
    assert_eq!(
        map.sorted_keys(),
        vec![
            "regular_field_name_tag",
            "regular_field_no_tag",
            "regular_field_omit_empty",
            "regular_field_pointer_pointer",
        ]
    );
}

#[test]
fn test_policy_keeps_directives() {
    let value = Simple {
        regular_field_omit_empty: None,
        ..simple()
    };
    for policy in [
        NamingPolicy::Identity,
        NamingPolicy::Lower,
        NamingPolicy::Upper,
        NamingPolicy::UpperCamel,
        NamingPolicy::LowerCamel,
        NamingPolicy::Snake,
    ] {
        let map = flatten_with(&value, [policy]).unwrap();
        // excluded, hidden and omitted fields stay out under every policy
        assert_eq!(map.len(), 3, "policy {policy:?}");
    }

    let flattened = Flattened {
        top_level_value: false,
        anon_contained_struct: Contained {
            contained_struct: Some(Box::new(simple())),
        },
    };
    let map = flatten_with(&flattened, [NamingPolicy::UpperCamel]).unwrap();
    assert!(map.contains_key("ContainedStruct.RegularFieldNoTag"));
    assert!(map.contains_key("TopLevelValue"));
}

#[test]
fn test_last_policy_wins() {
    let map = flatten_with(&simple(), [NamingPolicy::Upper, NamingPolicy::UpperCamel]).unwrap();
    assert!(map.contains_key("RegularFieldNoTag"));
    assert!(!map.contains_key("REGULAR_FIELD_NO_TAG"));
}

record! {
    #[derive(Debug, Default)]
    #[allow(non_snake_case)]
    pub struct Colliding {
        pub user_name: String,
        pub userName: String,
    }
}

#[test]
fn test_policy_collision_last_writer_wins() {
    let colliding = Colliding {
        user_name: "first".to_string(),
        userName: "second".to_string(),
    };

    let map = flatten(&colliding).unwrap();
    assert_eq!(map.len(), 2);

    let map = flatten_with(&colliding, [NamingPolicy::Snake]).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("user_name").and_then(Value::as_str), Some("second"));
}

fn complex_embed() -> ComplexEmbed {
    ComplexEmbed {
        complex_test_struct: complex(),
        anon_struct: Pair {
            reg_struct: simple(),
            reg_struct_ptr: Some(Box::new(simple())),
        },
    }
}

fn assert_policy_keys(map: &FlatMap, keys: &[&str]) {
    for key in keys {
        assert!(map.contains_key(key), "missing {key}, have {:?}", map.sorted_keys());
    }
    // 13 leaves from the complex record, 8 merged from its record-valued
    // entries, 8 from the pair
    assert_eq!(map.len(), 29);
}
