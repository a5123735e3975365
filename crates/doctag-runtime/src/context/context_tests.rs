#![allow(non_snake_case)]

use super::*;

#[test]
fn RequestContext___new___has_unique_request_uid() {
    let first = RequestContext::new();
    let second = RequestContext::new();

    assert!(!first.request_uid.is_empty());
    assert_ne!(first.request_uid, second.request_uid);
    assert!(first.session_uid.is_none());
}

#[test]
fn RequestContext___builders___set_ids() {
    let ctx = RequestContext::new()
        .with_request_uid("req-1")
        .with_session_uid("sess-9");

    assert_eq!(ctx.request_uid, "req-1");
    assert_eq!(ctx.session_uid.as_deref(), Some("sess-9"));
}

#[test]
fn RequestContext___next_sequence_number___starts_at_one_and_increases() {
    let ctx = RequestContext::new();

    assert_eq!(ctx.last_sequence_number(), 0);
    assert_eq!(ctx.next_sequence_number(), 1);
    assert_eq!(ctx.next_sequence_number(), 2);
    assert_eq!(ctx.last_sequence_number(), 2);
}

#[test]
fn RequestContext___with_last_sequence_number___continues_after_it() {
    let ctx = RequestContext::new().with_last_sequence_number(41);

    assert_eq!(ctx.next_sequence_number(), 42);
}

#[test]
fn RequestContext___clones___share_the_counter() {
    let ctx = RequestContext::new();
    let clone = ctx.clone();

    let a = ctx.next_sequence_number();
    let b = clone.next_sequence_number();
    let c = ctx.next_sequence_number();

    assert_eq!((a, b, c), (1, 2, 3));
}

#[test]
fn RequestContext___threads___never_reuse_a_number() {
    let ctx = RequestContext::new();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = ctx.clone();
            std::thread::spawn(move || (0..100).map(|_| ctx.next_sequence_number()).collect::<Vec<_>>())
        })
        .collect();
    let mut all: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all.sort_unstable();
    all.dedup();

    assert_eq!(all.len(), 400);
    assert_eq!(all.last(), Some(&400));
}
