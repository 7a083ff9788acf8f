use waitq::{cancelled_policy, Direction, Queue};

#[test]
fn add_rejected_at_capacity() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 3);
    assert!(q.add("item", &["index"]));
    assert!(q.add("item", &["index2"]));
    assert!(q.add("item", &["index3"]));
    assert!(!q.add("item", &["index4"]));
    assert_eq!(q.len(), 3);
}

#[test]
fn eviction_keeps_admitting_under_immediate_eviction() {
    // Every entry is born evictable, so the admission sweep always frees
    // room and all adds succeed despite the tiny capacity.
    let q: Queue<&str> = Queue::with_policies(Direction::Fifo, 3, vec![cancelled_policy()]);
    for i in 0..100 {
        let index = format!("index_{i}");
        assert!(q.add("item", &[index.as_str()]));
    }
}

#[test]
fn multi_index_add_is_all_or_nothing() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 3);
    assert!(q.add("existing", &["x", "y"]));

    // 2 held + 2 requested exceeds capacity and nothing is evictable.
    assert!(!q.add("item", &["a", "b"]));
    assert_eq!(q.len(), 2);
    assert_eq!(q.pop("a"), None);
    assert_eq!(q.pop("b"), None);
}

#[test]
fn len_never_exceeds_capacity_after_add() {
    let q: Queue<u32> = Queue::new(Direction::Fifo, 5);
    for i in 0..20 {
        q.add(i, &[]);
        assert!(q.len() <= q.capacity());
    }
}
