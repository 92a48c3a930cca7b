use rstest::rstest;

use crate::{
    BencodeType, DescriptorParser, Encoder, ParserOptions, ParsingErrorKind, PushParser,
};

#[rstest]
#[case::leading_zero(b"i00e", ParsingErrorKind::LeadingZero, Some(BencodeType::Integer))]
#[case::leading_zero_nonzero(b"i01e", ParsingErrorKind::LeadingZero, Some(BencodeType::Integer))]
#[case::negative_zero(b"i-0e", ParsingErrorKind::NegativeZero, Some(BencodeType::Integer))]
#[case::negative_leading_zero(b"i-01e", ParsingErrorKind::LeadingZero, Some(BencodeType::Integer))]
#[case::integer_overflow(
    b"i9223372036854775808e",
    ParsingErrorKind::OutOfRange,
    Some(BencodeType::Integer)
)]
#[case::integer_underflow(
    b"i-9223372036854775809e",
    ParsingErrorKind::OutOfRange,
    Some(BencodeType::Integer)
)]
#[case::integer_truncated(b"i12", ParsingErrorKind::UnexpectedEof, Some(BencodeType::Integer))]
#[case::integer_no_digits(b"ie", ParsingErrorKind::ExpectedEnd, Some(BencodeType::Integer))]
#[case::integer_bad_digit(b"i1x2e", ParsingErrorKind::ExpectedEnd, Some(BencodeType::Integer))]
#[case::string_short_payload(b"3:ab", ParsingErrorKind::UnexpectedEof, Some(BencodeType::String))]
#[case::string_truncated_prefix(b"12", ParsingErrorKind::UnexpectedEof, Some(BencodeType::String))]
#[case::string_missing_colon(b"2x:ab", ParsingErrorKind::ExpectedColon, Some(BencodeType::String))]
#[case::string_leading_zero_length(
    b"03:abc",
    ParsingErrorKind::LeadingZero,
    Some(BencodeType::String)
)]
#[case::string_length_too_large(
    b"99999999999:",
    ParsingErrorKind::SizeLimitExceeded,
    Some(BencodeType::String)
)]
#[case::empty_input(b"", ParsingErrorKind::UnexpectedEof, None)]
#[case::bare_end(b"e", ParsingErrorKind::ExpectedValue, None)]
#[case::garbage(b"x", ParsingErrorKind::ExpectedValue, None)]
#[case::list_garbage_element(b"lxe", ParsingErrorKind::ExpectedValue, Some(BencodeType::List))]
#[case::list_missing_end(
    b"li1e",
    ParsingErrorKind::ExpectedListValueOrEnd,
    Some(BencodeType::List)
)]
#[case::dict_missing_end(
    b"d3:keyi1e",
    ParsingErrorKind::ExpectedDictKeyOrEnd,
    Some(BencodeType::Dict)
)]
#[case::dict_key_not_string(
    b"di1ei2ee",
    ParsingErrorKind::ExpectedDictKeyOrEnd,
    Some(BencodeType::Dict)
)]
#[case::dict_missing_value(b"d3:fooe", ParsingErrorKind::ExpectedDictValue, Some(BencodeType::Dict))]
#[case::dict_truncated_after_key(
    b"d3:foo",
    ParsingErrorKind::ExpectedDictValue,
    Some(BencodeType::Dict)
)]
#[case::dict_bad_key_token(
    b"d3x:ae",
    ParsingErrorKind::ExpectedColon,
    Some(BencodeType::String)
)]
#[case::trailing_input(b"de3:foo", ParsingErrorKind::ExpectedEof, None)]
#[case::trailing_integer(b"i1ei2e", ParsingErrorKind::ExpectedEof, None)]
fn descriptor_parser_errors(
    #[case] input: &[u8],
    #[case] kind: ParsingErrorKind,
    #[case] context: Option<BencodeType>,
) {
    let mut parser = DescriptorParser::new(ParserOptions::default());
    let err = parser.parse(input).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.context(), context);
    assert_eq!(parser.error(), Some(err));
}

#[rstest]
#[case(b"i00e", ParsingErrorKind::LeadingZero)]
#[case(b"3:ab", ParsingErrorKind::UnexpectedEof)]
#[case(b"li1e", ParsingErrorKind::ExpectedListValueOrEnd)]
#[case(b"d3:keyi1e", ParsingErrorKind::ExpectedDictKeyOrEnd)]
#[case(b"de3:foo", ParsingErrorKind::ExpectedEof)]
fn push_parser_reports_the_same_errors(#[case] input: &[u8], #[case] kind: ParsingErrorKind) {
    let mut parser = PushParser::new(ParserOptions::default());
    let mut encoder = Encoder::new();
    let err = parser.parse(&mut encoder, input).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(parser.error(), Some(err));
}

#[test]
fn error_positions() {
    let mut parser = DescriptorParser::new(ParserOptions::default());

    assert_eq!(parser.parse(b"i00e").unwrap_err().position(), 1);
    assert_eq!(parser.parse(b"i-0e").unwrap_err().position(), 2);
    assert_eq!(parser.parse(b"li1e").unwrap_err().position(), 4);
    assert_eq!(parser.parse(b"de3:foo").unwrap_err().position(), 2);
    assert_eq!(parser.parse(b"lxe").unwrap_err().position(), 1);
    assert_eq!(parser.parse(b"d3:fooe").unwrap_err().position(), 6);
}

#[test]
fn recursion_limit_list() {
    let mut parser = DescriptorParser::new(ParserOptions {
        recursion_limit: 10,
        ..Default::default()
    });
    let input = b"l".repeat(11);
    let err = parser.parse(&input).unwrap_err();
    assert_eq!(err.kind(), ParsingErrorKind::RecursionDepthExceeded);
    assert_eq!(err.position(), 10);
}

#[test]
fn recursion_limit_dict() {
    let mut parser = DescriptorParser::new(ParserOptions {
        recursion_limit: 10,
        ..Default::default()
    });
    let input = b"d0:".repeat(11);
    let err = parser.parse(&input).unwrap_err();
    assert_eq!(err.kind(), ParsingErrorKind::RecursionDepthExceeded);
}

#[test]
fn value_limit() {
    let mut parser = DescriptorParser::new(ParserOptions {
        value_limit: Some(10),
        ..Default::default()
    });
    let body = b"i1e".repeat(50);
    let input = [b"l".as_slice(), body.as_slice(), b"e".as_slice()].concat();
    let err = parser.parse(&input).unwrap_err();
    assert_eq!(err.kind(), ParsingErrorKind::ValueLimitExceeded);
}

#[test]
fn value_limit_push_parser() {
    let mut parser = PushParser::new(ParserOptions {
        value_limit: Some(10),
        ..Default::default()
    });
    let body = b"i1e".repeat(50);
    let input = [b"l".as_slice(), body.as_slice(), b"e".as_slice()].concat();
    let mut encoder = Encoder::new();
    let err = parser.parse(&mut encoder, &input).unwrap_err();
    assert_eq!(err.kind(), ParsingErrorKind::ValueLimitExceeded);
}

#[test]
fn default_limits_accept_reasonable_nesting() {
    let mut parser = DescriptorParser::new(ParserOptions::default());
    let input = [b"l".repeat(1024), b"e".repeat(1024)].concat();
    assert!(parser.parse(&input).is_ok());

    let input = [b"l".repeat(1025), b"e".repeat(1025)].concat();
    let err = parser.parse(&input).unwrap_err();
    assert_eq!(err.kind(), ParsingErrorKind::RecursionDepthExceeded);
}
