#![no_main]

use bentable::{DescriptorParser, Encoder, EventConsumer, ParserOptions, PushParser};
use libfuzzer_sys::fuzz_target;

/// Swallows every event; used to drive the push parser over inputs the
/// descriptor parser rejects.
struct Ignore;

impl EventConsumer for Ignore {
    fn integer(&mut self, _value: i64) {}
    fn string(&mut self, _value: &[u8]) {}
    fn begin_list(&mut self, _size: Option<usize>) {}
    fn end_list(&mut self, _size: Option<usize>) {}
    fn begin_dict(&mut self, _size: Option<usize>) {}
    fn end_dict(&mut self, _size: Option<usize>) {}
}

fuzz_target!(|data: &[u8]| {
    let options = ParserOptions {
        recursion_limit: 64,
        value_limit: Some(1 << 16),
    };

    let mut table_parser = DescriptorParser::new(options);
    let mut push_parser = PushParser::new(options);

    match table_parser.parse(data) {
        Ok(table) => {
            // A successful parse must re-encode to the exact input bytes
            // through both event producers.
            let mut encoder = Encoder::new();
            table.emit_events(&mut encoder);
            assert_eq!(encoder.as_bytes(), data);

            let mut encoder = Encoder::new();
            push_parser
                .parse(&mut encoder, data)
                .expect("push parser rejected input the table parser accepted");
            assert_eq!(encoder.as_bytes(), data);
        }
        Err(err) => {
            assert!(err.position() <= data.len());
            let push_err = push_parser
                .parse(&mut Ignore, data)
                .expect_err("push parser accepted input the table parser rejected");
            assert_eq!(err, push_err);
        }
    }
});
