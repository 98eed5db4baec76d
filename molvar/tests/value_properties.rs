// Behavioral properties of values, checked through the public API only.

use molvar::datum::Datum;
use molvar::escape::unescape;
use molvar::format::{format, format_args};
use molvar::geometry::{Mat3, Mat4, Quaternion, Vec3, Vec4};
use molvar::selection::{BitSet, Selection};
use molvar::types::ScriptInt;
use molvar::util::truncate;
use molvar::value::are_equal;
use molvar::{Data, Value, Vars};

fn list(items: &[&str]) -> Value {
    Value::from(items.iter().map(|s| s.to_string()).collect::<Vec<String>>())
}

#[test]
fn int_reading_truncates_decimal_reading() {
    let samples = [
        "0", "7", "-7", "3.9", "-3.9", "1e3", "2.5e-1", " 12 ", "", "true", "FALSE", "abc",
        "12abc", "1.2.3", "99999999999999", "-0.5",
    ];

    for text in samples {
        let value = Value::from(text);
        assert_eq!(
            value.as_int(),
            truncate(value.as_decimal()),
            "as_int of {:?}",
            text
        );
    }
}

#[test]
fn list_items_parse_as_scalars() {
    let items = ["12", "1.5", "true", "word", "{1 2 3}", "({1})"];
    let value = list(&items);

    for (k, text) in items.iter().enumerate() {
        let k = k as ScriptInt + 1;
        let item = value.select_item(k).select_item(k);
        assert_eq!(item, Value::from_literal(text), "item {}", k);
    }

    assert_eq!(value.item(1).data(), &Data::Int(12));
    assert_eq!(value.item(2).data(), &Data::Decimal(1.5));
    assert_eq!(value.item(3).data(), &Data::Bool(true));
    assert_eq!(value.item(4).data(), &Data::Str("word".into()));
}

#[test]
fn string_indexing() {
    let s = Value::from("testing");
    assert_eq!(s.item(-1).as_str(), "n");
    assert_eq!(s.select_item(-1).as_str(), "n");
    assert_eq!(s.slice(1, 0).as_str(), "testing");
    assert_eq!(s.select_item(3).select_item(0).as_str(), "sting");
    assert_eq!(s.as_str(), "testing");
}

#[test]
fn slices_never_share_storage() {
    let source = list(&["a", "b", "c"]);
    let tagged = source.select_item(2);
    assert!(tagged.shares_payload(&source));

    let sub = tagged.select_item(3);
    assert!(!sub.shares_payload(&source));
    assert_eq!(sub.as_str(), "b\nc");

    let mut vars = Vars::new();
    vars.set("sub", sub);
    assert!(vars.set_selected_value("sub", 1, &Value::from("z")));
    assert_eq!(vars.get("sub").map(|v| v.as_str()), Ok("z\nc".to_string()));
    assert_eq!(source.as_str(), "a\nb\nc");
}

#[test]
fn escaped_literals_read_back() {
    let values = [
        Value::from(true),
        Value::from(false),
        Value::from(-42),
        Value::from(Vec3::new(1.5, -2.0, 0.0)),
        Value::from(Vec4::new(0.0, 0.0, 1.0, -3.5)),
        Value::from(Quaternion::new(0.5, 0.5, 0.5, 0.5)),
        Value::from(BitSet::from_indexes(vec![0, 2, 3, 4, 9])),
        Value::from(BitSet::new()),
    ];

    for value in values {
        let back = Value::from_literal(&value.escape());
        assert_eq!(back, value, "literal {}", value.escape());
        assert!(are_equal(&back, &value));
    }

    let m = Value::from(Mat4::identity());
    assert_eq!(unescape(&m.escape()), Ok(m));
}

#[test]
fn formatting() {
    assert_eq!(format("%5.2f", &Value::from(3.14159)), " 3.14");
    assert_eq!(format("%d items", &Value::from("7")), "7 items");
    assert_eq!(
        format_args(&[
            Value::from("%-6s|%4d|%p"),
            Value::from("CA"),
            Value::from(12),
            Value::from(Vec3::new(1.0, 2.0, 3.0)),
        ]),
        "CA    |  12|{  1.00   2.00   3.00}"
    );
}

#[test]
fn increment_requires_a_variable() {
    let samples = [
        Value::from(1),
        Value::from(2.5),
        Value::from("3"),
        list(&["a"]),
        Value::from(Vec3::new(1.0, 0.0, 0.0)),
    ];

    for value in samples {
        let mut copy = value.clone();
        assert!(!copy.increment(1));
        assert_eq!(copy, value);
    }

    let mut vars = Vars::new();
    vars.set("x", Value::from(Vec3::new(0.0, 3.0, 4.0)));
    assert!(vars.increment("x", 1));
    assert_eq!(vars.get("x").map(|v| v.data().clone()), Ok(Data::Int(6)));
}

#[test]
fn loose_equality() {
    assert!(are_equal(&Value::from("ABC"), &Value::from("abc")));
    assert!(are_equal(&Value::from(1.0), &Value::from(1.0000001)));
    assert!(!are_equal(&Value::from(1.0), &Value::from(1.1)));
}

#[test]
fn matrix_element_access() {
    let m = Mat3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    let value = Value::from(m);
    assert_eq!(value.item(23).as_decimal(), m.element(1, 2));
    assert_eq!(value.slice(2, 3).as_decimal(), m.element(1, 2));
    assert_eq!(value.slice(-3, 2).as_decimal(), m.element(1, 2));
}

#[test]
fn bond_selections_keep_their_atoms() {
    let bonds = Value::from(Selection::bonds(
        BitSet::from_indexes(vec![3, 5, 8]),
        BitSet::from_indexes(vec![0, 1, 2]),
    ));

    let second = bonds.item(2);
    match second.data() {
        Data::Selection(sel) => {
            assert!(sel.is_bonds());
            assert_eq!(sel.bits(), &BitSet::from_indexes(vec![5]));
            assert_eq!(sel.companion(), Some(&BitSet::from_indexes(vec![0, 1, 2])));
        }
        other => panic!("expected a selection, got {:?}", other),
    }
    assert_eq!(second.escape(), "[{5}]");
}

#[test]
fn external_data() {
    let value = Value::from_datum(Datum::Map(vec![
        ("atoms".into(), Datum::Bits(BitSet::from_indexes(vec![1, 2]))),
        ("charges".into(), Datum::Reals(vec![-0.5, 0.25])),
    ]));

    assert_eq!(
        value.as_str(),
        "atoms\t:\t({1:2})\ncharges\t:\n\t-0.5\n\t0.25\n"
    );
    assert_eq!(
        value.escape(),
        "{ \"atoms\": ({1:2}), \"charges\": [\"-0.5\", \"0.25\"] }"
    );
}

#[test]
fn selection_literals_are_bounded() {
    let text = "({18446744073709551615})";
    assert_eq!(Value::from_literal(text).data(), &Data::Str(text.into()));
    assert_eq!(list(&[text]).item(1).type_name(), "string");
    assert_eq!(
        format("%s", &list(&[text, "({0:99999999999})"])),
        format!("{}\n({{0:99999999999}})", text)
    );
    assert_eq!(Value::from_datum(Datum::Text(text.into())).type_name(), "string");
    assert!(unescape("({0:4000000000})").is_err());
}

#[test]
fn extreme_matrix_indexes_select_nothing() {
    let m = Value::from(Mat3::identity());
    assert_eq!(m.select_item(ScriptInt::MIN).selected().as_str(), "");
    assert_eq!(m.item(ScriptInt::MAX).as_str(), "");
}

#[test]
fn values_convert_back_to_external_data() {
    let values = [
        Value::from(7),
        Value::from("some text"),
        Value::from(Vec4::new(1.0, 0.0, 0.0, 0.5)),
        Value::from(BitSet::from_indexes(vec![3, 4])),
        list(&["1", "two", "({5})"]),
    ];

    for value in values {
        assert_eq!(Value::from_datum(value.to_datum()), value);
    }
}

#[test]
fn oversized_format_fields_are_text() {
    assert_eq!(format("%99999999999d", &Value::from(1)), "%99999999999d");
    assert_eq!(format("%.70000f", &Value::from(1)), "%.70000f");
}
