use std::cmp::Ordering;

use bytebuf::{BufferError, BufferView, Encoding};

fn text(s: &str) -> BufferView {
    BufferView::from_text(s, Encoding::Utf8).unwrap()
}

#[test]
fn test_slice_aliases_parent() {
    let hello = text("Hello");
    let head = hello.slice(0, 2);

    head.set(0, 0x4a).unwrap();

    assert_eq!(hello.get(0), Some(0x4a));
    assert_eq!(hello.to_text(Encoding::Utf8).unwrap(), "Jello");
    assert!(head.store().same_region(hello.store()));
}

#[test]
fn test_clone_is_an_alias() {
    let original = text("abc");
    let alias = original.clone();
    alias.set(2, b'z').unwrap();

    assert_eq!(original, *b"abz");
}

#[test]
fn test_copy_does_not_alias() {
    let hello = text("Hello");
    let copy = BufferView::alloc(hello.len()).unwrap();
    assert_eq!(hello.copy_into(&copy, 0, 0, hello.len()), 5);

    copy.set(0, 0x4a).unwrap();

    assert_eq!(hello.get(0), Some(b'H'));
    assert_eq!(copy, *b"Jello");

    let duplicate = BufferView::from_view(&hello).unwrap();
    duplicate.set(1, b'a').unwrap();
    assert_eq!(hello, *b"Hello");
    assert!(!duplicate.store().same_region(hello.store()));
}

#[test]
fn test_slice_clamps_bounds() {
    let view = text("abcdef");

    assert_eq!(view.slice(2, 100), *b"cdef");
    assert_eq!(view.slice(100, 200).len(), 0);
    assert_eq!(view.slice(4, 1).len(), 0);
    assert_eq!(view.slice(4, 1).offset(), 4);
}

#[test]
fn test_nested_slices_keep_offsets() {
    let view = text("0123456789");
    let outer = view.slice(2, 8);
    let inner = outer.slice(1, 3);

    assert_eq!(inner.offset(), 3);
    assert_eq!(inner, *b"34");
    assert_eq!(outer.slice(4, 100), *b"67");
}

#[test]
fn test_set_past_end_is_out_of_bounds() {
    let view = text("ab");
    assert_eq!(view.get(2), None);
    assert_eq!(
        view.set(2, 0).unwrap_err(),
        BufferError::OutOfBounds {
            offset: 2,
            len: 1,
            bound: 2,
        }
    );
}

#[test]
fn test_copy_into_truncates_to_target() {
    let source = text("abcdef");
    let target = BufferView::alloc(4).unwrap();

    assert_eq!(source.copy_into(&target, 1, 0, 6), 3);
    assert_eq!(target, [0, b'a', b'b', b'c']);

    assert_eq!(source.copy_into(&target, 9, 0, 6), 0);
    assert_eq!(source.copy_into(&target, 0, 5, 2), 0);
}

#[test]
fn test_copy_into_overlapping_slices_of_one_store() {
    let whole = text("0123456789");
    let left = whole.slice(0, 6);
    let right = whole.slice(2, 10);

    // left[0..6] -> right[0..], i.e. whole[2..8] <- whole[0..6]
    assert_eq!(left.copy_into(&right, 0, 0, 6), 6);
    assert_eq!(whole, *b"0101234589");
}

#[test]
fn test_copy_within_matches_temporary_copy() {
    let view = text("abcdefgh");
    let mut expected = view.to_vec();
    let tmp = expected[0..5].to_vec();
    expected[3..8].copy_from_slice(&tmp);

    assert_eq!(view.copy_within(3, 0, 5), 5);
    assert_eq!(view.to_vec(), expected);

    let view = text("abcdefgh");
    assert_eq!(view.copy_within(0, 3, 100), 5);
    assert_eq!(view, *b"defghfgh");
}

#[test]
fn test_write_truncates_at_end() {
    let view = BufferView::alloc(4).unwrap();

    assert_eq!(view.write("abcdef", 1, Encoding::Utf8).unwrap(), 3);
    assert_eq!(view, [0, b'a', b'b', b'c']);
    assert_eq!(view.write("x", 4, Encoding::Utf8).unwrap(), 0);
}

#[test]
fn test_write_drops_split_character() {
    let view = BufferView::alloc(2).unwrap();

    assert_eq!(view.write("€", 0, Encoding::Utf8).unwrap(), 0);
    assert_eq!(view, [0, 0]);

    let view = BufferView::alloc(5).unwrap();
    assert_eq!(view.write("a€€", 0, Encoding::Utf8).unwrap(), 4);
    assert_eq!(view.to_text(Encoding::Utf8).unwrap(), "a€\0");
}

#[test]
fn test_write_past_end_is_out_of_bounds() {
    let view = BufferView::alloc(2).unwrap();
    assert!(matches!(
        view.write("a", 3, Encoding::Utf8),
        Err(BufferError::OutOfBounds { offset: 3, .. })
    ));
}

#[test]
fn test_write_rejects_invalid_text_without_writing() {
    let view = BufferView::alloc(4).unwrap();
    assert!(view.write("zz", 0, Encoding::Hex).is_err());
    assert_eq!(view, [0, 0, 0, 0]);

    assert_eq!(view.write("cafe", 0, Encoding::Hex).unwrap(), 2);
    assert_eq!(view, [0xCA, 0xFE, 0, 0]);
}

#[test]
fn test_fill_range() {
    let view = BufferView::alloc(6).unwrap();
    view.fill(7, 2..4);
    assert_eq!(view, [0, 0, 7, 7, 0, 0]);

    view.fill(1, 4..);
    assert_eq!(view, [0, 0, 7, 7, 1, 1]);

    view.fill(9, 5..100);
    assert_eq!(view, [0, 0, 7, 7, 1, 9]);
}

#[test]
fn test_fill_text_tiles_pattern() {
    let view = BufferView::alloc(7).unwrap();
    view.fill_text("abc", Encoding::Utf8, ..).unwrap();
    assert_eq!(view, *b"abcabca");

    view.fill_text("", Encoding::Utf8, 1..3).unwrap();
    assert_eq!(view, *b"a\0\0abca");

    view.fill_text("0102", Encoding::Hex, 3..).unwrap();
    assert_eq!(view, [b'a', 0, 0, 1, 2, 1, 2]);
}

#[test]
fn test_compare_and_equals() {
    let abc = text("abc");
    let abd = text("abd");
    let ab = text("ab");

    assert_eq!(abc.compare(&abd), Ordering::Less);
    assert_eq!(abd.compare(&abc), Ordering::Greater);
    assert_eq!(ab.compare(&abc), Ordering::Less);
    assert_eq!(abc.compare(&text("abc")), Ordering::Equal);

    assert!(abc.equals(&text("abc")));
    assert!(!abc.equals(&ab));
    assert!(ab < abc);

    // Overlapping views of one store compare by content
    let whole = text("abab");
    assert!(whole.slice(0, 2).equals(&whole.slice(2, 4)));
}

#[test]
fn test_index_of() {
    let view = text("this is a buffer");

    assert_eq!(view.index_of(b"is", 0), Some(2));
    assert_eq!(view.index_of(b"is", 3), Some(5));
    assert_eq!(view.index_of(b"buffer", 0), Some(10));
    assert_eq!(view.index_of(b"nope", 0), None);
    assert_eq!(view.index_of(b"is", 100), None);
    assert_eq!(view.index_of(b"", 3), Some(3));
    assert_eq!(view.index_of(b"", 100), Some(16));
    assert_eq!(view.index_of_byte(b'a', 0), Some(8));
    assert_eq!(view.last_index_of(b"is"), Some(5));
    assert!(view.contains(b"a buf"));
    assert!(!view.slice(0, 4).contains(b"is "));
}

#[test]
fn test_concat() {
    let empty = BufferView::concat(&[]).unwrap();
    assert!(empty.is_empty());

    let a = text("foo");
    let b = text("bär");
    let joined = BufferView::concat(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(
        joined.to_text(Encoding::Utf8).unwrap(),
        a.to_text(Encoding::Utf8).unwrap() + &b.to_text(Encoding::Utf8).unwrap()
    );
    assert!(!joined.store().same_region(a.store()));
}

#[test]
fn test_concat_with_len() {
    let parts = [text("abc"), text("def")];

    assert_eq!(BufferView::concat_with_len(&parts, 4).unwrap(), *b"abcd");
    assert_eq!(
        BufferView::concat_with_len(&parts, 8).unwrap(),
        *b"abcdef\0\0"
    );
}

#[test]
fn test_swaps() {
    let view = BufferView::from_vec(vec![1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();

    view.swap16().unwrap();
    assert_eq!(view, [2, 1, 4, 3, 6, 5, 8, 7]);
    view.swap16().unwrap();

    view.swap32().unwrap();
    assert_eq!(view, [4, 3, 2, 1, 8, 7, 6, 5]);
    view.swap32().unwrap();

    view.swap64().unwrap();
    assert_eq!(view, [8, 7, 6, 5, 4, 3, 2, 1]);

    assert_eq!(
        view.slice(0, 3).swap16().unwrap_err(),
        BufferError::InvalidLength { len: 3, unit: 2 }
    );
}

#[test]
fn test_bytes_iterator() {
    let view = text("xyz");
    let mut bytes = view.bytes();

    assert_eq!(bytes.len(), 3);
    assert_eq!(bytes.next(), Some(b'x'));
    assert_eq!(bytes.len(), 2);

    let collected: Vec<u8> = (&view).into_iter().collect();
    assert_eq!(collected, b"xyz");
}

#[test]
fn test_with_bytes_mut() {
    let view = text("abc").slice(1, 3);
    view.with_bytes_mut(|bytes| bytes.make_ascii_uppercase());

    assert_eq!(view, *b"BC");
    assert_eq!(view.with_bytes(<[u8]>::len), 2);
}

#[test]
fn test_hash_follows_content() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(text("key"));

    assert!(set.contains(&text("key")));
    assert!(!set.contains(&text("other")));
}

#[test]
fn test_conversions_are_fallible() {
    let owned = BufferView::try_from(vec![1u8, 2, 3]).unwrap();
    assert_eq!(owned, [1, 2, 3]);
    assert_eq!(BufferView::try_from(&b"ab"[..]).unwrap(), *b"ab");
    assert_eq!(BufferView::try_from("hé").unwrap().len(), 3);

    let result: Result<BufferView, BufferError> = Vec::new().try_into();
    assert!(result.unwrap().is_empty());

}
