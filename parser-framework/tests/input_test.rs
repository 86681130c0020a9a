use parser_framework::{InputStream, StreamError};

#[test]
fn test_stream_new() {
    let stream = InputStream::from("hello");
    assert_eq!(stream.position(), 0);
    assert_eq!(stream.len(), 5);
    assert!(!stream.is_empty());
    assert_eq!(stream.peek(), Some(&'h'));
}

#[test]
fn test_stream_from_byte_literal() {
    let stream = InputStream::from(b"1+2");
    assert_eq!(stream.len(), 3);
    assert_eq!(stream.peek(), Some(&b'1'));
    assert_eq!(stream.as_slice(), &[b'1', b'+', b'2']);
}

#[test]
fn test_stream_empty() {
    let stream = InputStream::from("");
    assert!(stream.is_empty());
    assert_eq!(stream.peek(), None);
    assert_eq!(stream.to_string(), "");
}

#[test]
fn test_take_advances_position() {
    let stream = InputStream::from("hello");
    let (taken, rest) = stream.take(2).unwrap();
    assert_eq!(taken, vec!['h', 'e']);
    assert_eq!(rest.position(), 2);
    assert_eq!(rest.to_string(), "llo");

    // The original stream is untouched.
    assert_eq!(stream.position(), 0);
    assert_eq!(stream.to_string(), "hello");
}

#[test]
fn test_take_position_is_cumulative() {
    let stream = InputStream::from("abcdef");
    let (_, rest) = stream.take(2).unwrap();
    let (_, rest) = rest.take(3).unwrap();
    assert_eq!(rest.position(), 5);
    assert_eq!(rest.as_slice(), &['f']);
}

#[test]
fn test_take_zero() {
    let stream = InputStream::from("ab");
    let (taken, rest) = stream.take(0).unwrap();
    assert!(taken.is_empty());
    assert_eq!(rest, stream);
}

#[test]
fn test_take_out_of_range() {
    let stream = InputStream::from("ab");
    let (_, rest) = stream.take(1).unwrap();
    assert_eq!(
        rest.take(2).unwrap_err(),
        StreamError::OutOfRange {
            requested: 2,
            remaining: 1,
            position: 1,
        }
    );
}

#[test]
fn test_take_everything() {
    let stream = InputStream::from("ab");
    let (taken, rest) = stream.take(2).unwrap();
    assert_eq!(taken, vec!['a', 'b']);
    assert!(rest.is_empty());
    assert_eq!(rest.position(), 2);
}

#[test]
fn test_find_single_token() {
    let stream = InputStream::from("hello!world");
    assert_eq!(stream.find(&['!']), Ok(5));
}

#[test]
fn test_find_is_relative_to_position() {
    let stream = InputStream::from("a!b!c");
    let (_, rest) = stream.take(2).unwrap();
    assert_eq!(rest.find(&['!']), Ok(1));
}

#[test]
fn test_find_subsequence() {
    let stream = InputStream::from("aXbXYc");
    assert_eq!(stream.find(&['X', 'Y']), Ok(3));
}

#[test]
fn test_find_empty_pattern() {
    let stream = InputStream::from("abc");
    assert_eq!(stream.find(&[]), Ok(0));
}

#[test]
fn test_find_missing() {
    let stream = InputStream::from("abc");
    let (_, rest) = stream.take(1).unwrap();
    assert_eq!(
        rest.find(&['z']),
        Err(StreamError::PatternNotFound { position: 1 })
    );
}

#[test]
fn test_generic_tokens() {
    let stream = InputStream::new(vec![vec![1, 2, 3], vec![1, 2], vec![1, 2, 3]]);
    assert_eq!(stream.find(&[vec![1, 2]]), Ok(1));
    let (taken, rest) = stream.take(1).unwrap();
    assert_eq!(taken, vec![vec![1, 2, 3]]);
    assert_eq!(rest.len(), 2);
}

#[test]
fn test_stream_from_slice_and_clone() {
    let tokens = [1u8, 2, 3];
    let stream = InputStream::from(&tokens[..]);
    let copy = stream.clone();
    assert_eq!(stream, copy);
    assert_eq!(copy.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_stream_equality_considers_position() {
    let a = InputStream::from("xab");
    let (_, a) = a.take(1).unwrap();
    let b = InputStream::from("ab");
    assert_eq!(a.as_slice(), b.as_slice());
    assert_ne!(a, b);
}
