use crate::{DescriptorParser, DescriptorTable, ParserOptions};

/// Parses `source` with default options, panicking on failure.
pub fn parse(source: &[u8]) -> DescriptorTable<'_> {
    let mut parser = DescriptorParser::new(ParserOptions::default());
    match parser.parse(source) {
        Ok(table) => table,
        Err(err) => panic!("parse of {source:?} failed: {err}"),
    }
}

/// Asserts the structural invariants every successful parse must uphold.
pub fn check_table_invariants(table: &DescriptorTable<'_>) {
    let descriptors = table.descriptors();
    assert!(!descriptors.is_empty());

    // Exactly the last record carries the stop flag.
    for (i, d) in descriptors.iter().enumerate() {
        assert_eq!(
            d.is_stop(),
            i == descriptors.len() - 1,
            "stop flag misplaced at record {i}"
        );
    }

    // Descriptor order equals lexical order.
    for pair in descriptors.windows(2) {
        assert!(
            pair[0].position() < pair[1].position(),
            "positions must strictly increase"
        );
    }

    for (i, d) in descriptors.iter().enumerate() {
        // Every container header matches its end record.
        if (d.is_list() || d.is_dict()) && !d.is_end() {
            let end = &descriptors[i + d.offset() as usize];
            assert!(end.is_end(), "record at header + offset must be an end");
            assert_eq!(end.is_list(), d.is_list());
            assert_eq!(end.is_dict(), d.is_dict());
            assert_eq!(end.offset(), d.offset());
            assert_eq!(end.size(), d.size());
        }

        // Every string payload lies within the source.
        if d.is_string() {
            let start = d.position() + d.offset() as usize;
            assert!(start + d.size() as usize <= table.source().len());
        }
    }

    // Iterating any container view visits exactly `size` elements.
    for (i, d) in descriptors.iter().enumerate() {
        if d.is_end() {
            continue;
        }
        let view = table.view_at(i).unwrap();
        if let Some(list) = view.as_list() {
            assert_eq!(list.iter().count(), list.size());
            assert_eq!(list.iter().rev().count(), list.size());
        }
        if let Some(dict) = view.as_dict() {
            assert_eq!(dict.iter().count(), dict.size());
            assert_eq!(dict.iter().rev().count(), dict.size());
        }
    }
}
