use parser_example::logging;
use parser_framework::one_of;

#[test]
fn test_init_installs_once() {
    assert!(logging::init());
    assert!(!logging::init());

    // Parsing with the subscriber installed emits trace events without
    // disturbing the result.
    let parsed = one_of("ab").repeat(0, None).parse("abx").unwrap();
    assert_eq!(parsed.value, vec!['a', 'b']);
}
