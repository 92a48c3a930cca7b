use alloc::vec::Vec;

use crate::{AccessError, BencodeType, View};

use super::utils::parse;

#[test]
fn integer_view() {
    let table = parse(b"i63e");
    let root = table.root();
    assert_eq!(root.kind(), Some(BencodeType::Integer));

    let integer = root.as_integer().unwrap();
    assert_eq!(integer.value(), 63);
    assert_eq!(integer, 63);
    assert_eq!(integer.bencoded_view(), b"i63e");
    assert_eq!(integer.position(), 0);

    assert!(root.as_string().is_none());
    assert!(root.as_list().is_none());
    assert!(root.as_dict().is_none());
}

#[test]
fn string_view() {
    let table = parse(b"4:spam");
    let string = table.root().as_string().unwrap();

    assert_eq!(string.value(), b"spam");
    assert_eq!(string, "spam");
    assert_eq!(string.as_str(), Some("spam"));
    assert_eq!(string.len(), 4);
    assert!(!string.is_empty());
    assert_eq!(string.bencoded_view(), b"4:spam");
}

#[test]
fn empty_string_view() {
    let table = parse(b"0:");
    let string = table.root().as_string().unwrap();
    assert_eq!(string.value(), b"");
    assert!(string.is_empty());
}

#[test]
fn non_utf8_string_view() {
    let table = parse(b"2:\xff\xfe");
    let string = table.root().as_string().unwrap();
    assert_eq!(string.value(), b"\xff\xfe");
    assert_eq!(string.as_str(), None);
}

#[test]
fn list_view_access() {
    let table = parse(b"li1ei2ee");
    let list = table.root().as_list().unwrap();

    assert_eq!(list.size(), 2);
    assert!(!list.is_empty());

    assert_eq!(list.at(0).unwrap().as_integer().unwrap().value(), 1);
    assert_eq!(list.at(1).unwrap().as_integer().unwrap().value(), 2);
    assert_eq!(
        list.at(3).unwrap_err(),
        AccessError::OutOfRange { index: 3, size: 2 }
    );
    assert!(list.get(2).is_none());

    assert_eq!(list.front().unwrap().as_integer().unwrap().value(), 1);
    assert_eq!(list.back().unwrap().as_integer().unwrap().value(), 2);

    assert_eq!(list.bencoded_view(), b"li1ei2ee");
}

#[test]
fn empty_list_view() {
    let table = parse(b"le");
    let list = table.root().as_list().unwrap();
    assert!(list.is_empty());
    assert!(list.front().is_none());
    assert!(list.back().is_none());
    assert_eq!(list.iter().count(), 0);
}

#[test]
fn nested_list_iteration() {
    let table = parse(b"li1el3:foo3:baree");
    let outer = table.root().as_list().unwrap();
    assert_eq!(outer.size(), 2);

    assert_eq!(outer.at(0).unwrap().as_integer().unwrap().value(), 1);

    let inner = outer.at(1).unwrap().as_list().unwrap();
    let strings: Vec<&[u8]> = inner
        .iter()
        .map(|v| v.as_string().unwrap().value())
        .collect();
    assert_eq!(strings, [b"foo".as_slice(), b"bar".as_slice()]);

    assert_eq!(inner.bencoded_view(), b"l3:foo3:baree");
    assert_eq!(outer.iter().count(), 2);
}

#[test]
fn list_reverse_iteration() {
    let table = parse(b"li1el3:foo3:baree");
    let outer = table.root().as_list().unwrap();

    let forward: Vec<View<'_>> = outer.iter().collect();
    let mut backward: Vec<View<'_>> = outer.iter().rev().collect();
    backward.reverse();
    assert_eq!(forward, backward);

    // The last element is the nested list; stepping back over it is one
    // hop via the end record.
    let last = outer.iter().next_back().unwrap();
    assert!(last.is_list());
}

#[test]
fn list_view_canonicalizes_end_records() {
    let table = parse(b"li1el3:foo3:baree");
    let end_index = table.descriptors().len() - 1;
    assert!(table.descriptors()[end_index].is_end());

    let from_end = table.view_at(end_index).unwrap().as_list().unwrap();
    let from_header = table.root().as_list().unwrap();

    assert_eq!(from_end, from_header);
    assert_eq!(from_end.iter(), from_header.iter());
    assert_eq!(from_end.size(), 2);
    assert_eq!(
        from_end.front().unwrap().as_integer().unwrap().value(),
        1
    );
}

#[test]
fn dict_view_lookup() {
    let table = parse(b"d3:bar4:spam3:fooi42ee");
    let dict = table.root().as_dict().unwrap();

    assert_eq!(dict.size(), 2);
    assert!(!dict.is_empty());

    assert_eq!(
        dict.find(b"bar").unwrap().as_string().unwrap().value(),
        b"spam"
    );
    assert_eq!(dict.find(b"foo").unwrap().as_integer().unwrap().value(), 42);
    assert!(dict.contains(b"bar"));
    assert!(!dict.contains(b"baz"));
    assert_eq!(dict.at(b"missing").unwrap_err(), AccessError::KeyNotFound);

    assert!(dict.find(b"baz").is_none());
    assert!(dict.find(b"zzz").is_none());

    assert_eq!(dict.bencoded_view(), b"d3:bar4:spam3:fooi42ee");
}

#[test]
fn dict_view_unsorted_keys_lookup() {
    let table = parse(b"d3:foo1:x3:bar1:y1:a1:ze");
    let dict = table.root().as_dict().unwrap();

    // Keys are out of order; every entry must remain reachable, including
    // ones that sort below an earlier key.
    assert_eq!(dict.find(b"foo").unwrap().as_string().unwrap().value(), b"x");
    assert_eq!(dict.find(b"bar").unwrap().as_string().unwrap().value(), b"y");
    assert_eq!(dict.find(b"a").unwrap().as_string().unwrap().value(), b"z");
    assert!(dict.find(b"baz").is_none());
}

#[test]
fn dict_iteration_yields_pairs_in_input_order() {
    let table = parse(b"d3:bar4:spam3:fooi42ee");
    let dict = table.root().as_dict().unwrap();

    let keys: Vec<&[u8]> = dict.iter().map(|(k, _)| k.value()).collect();
    assert_eq!(keys, [b"bar".as_slice(), b"foo".as_slice()]);

    let mut reversed: Vec<&[u8]> = dict.iter().rev().map(|(k, _)| k.value()).collect();
    reversed.reverse();
    assert_eq!(keys, reversed);
}

#[test]
fn dict_view_canonicalizes_end_records() {
    let table = parse(b"d1:ali1eee");
    let end_index = table.descriptors().len() - 1;

    let from_end = table.view_at(end_index).unwrap().as_dict().unwrap();
    let from_header = table.root().as_dict().unwrap();
    assert_eq!(from_end, from_header);
    assert_eq!(from_end.iter(), from_header.iter());
    assert!(from_end.contains(b"a"));
}

#[test]
fn dict_with_container_values() {
    let table = parse(b"d4:infod6:lengthi128ee4:name4:spame");
    let dict = table.root().as_dict().unwrap();

    let info = dict.find(b"info").unwrap().as_dict().unwrap();
    assert_eq!(
        info.find(b"length").unwrap().as_integer().unwrap().value(),
        128
    );
    assert_eq!(
        dict.find(b"name").unwrap().as_string().unwrap().value(),
        b"spam"
    );
}

#[test]
fn bencoded_view_of_nested_values() {
    let source = b"d1:ali1eee";
    let table = parse(source);
    let dict = table.root().as_dict().unwrap();

    let inner = dict.find(b"a").unwrap();
    assert_eq!(inner.bencoded_view(), b"li1ee");
    assert_eq!(table.root().bencoded_view(), source.as_slice());
}

#[test]
fn views_are_copyable() {
    let table = parse(b"li1ee");
    let list = table.root().as_list().unwrap();
    let copy = list;
    assert_eq!(copy, list);
    assert_eq!(copy.size(), list.size());
}
