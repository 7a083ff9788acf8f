use waitq::{Direction, Queue, DEFAULT_INDEX};

#[test]
fn add_and_pop_default_index() {
    let q: Queue<bool> = Queue::new(Direction::Fifo, 10);
    assert!(q.add(true, &[]));
    assert_eq!(q.pop(DEFAULT_INDEX), Some(true));
    assert_eq!(q.len(), 0);
}

#[test]
fn pop_from_missing_index_is_none() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 10);
    assert_eq!(q.pop("non_existing_index"), None);
}

#[test]
fn named_index_is_independent_of_default() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 10);
    assert!(q.add("item", &["index"]));
    assert_eq!(q.pop(DEFAULT_INDEX), None);
    assert_eq!(q.pop("index"), Some("item"));
    assert_eq!(q.pop("index"), None);
    assert_eq!(q.len(), 0);
}

#[test]
fn fifo_pops_oldest_first() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 10);
    q.add("first", &[]);
    q.add("second", &[]);
    q.add("third", &[]);

    assert_eq!(q.pop(DEFAULT_INDEX), Some("first"));
    assert_eq!(q.pop(DEFAULT_INDEX), Some("second"));
    assert_eq!(q.pop(DEFAULT_INDEX), Some("third"));
}

#[test]
fn lifo_pops_newest_first() {
    let q: Queue<&str> = Queue::new(Direction::Lifo, 10);
    q.add("first", &[]);
    q.add("second", &[]);
    q.add("third", &[]);

    assert_eq!(q.pop(DEFAULT_INDEX), Some("third"));
    assert_eq!(q.pop(DEFAULT_INDEX), Some("second"));
    assert_eq!(q.pop(DEFAULT_INDEX), Some("first"));
}

#[test]
fn multi_index_fanout_is_independent_per_index() {
    let q: Queue<&str> = Queue::new(Direction::Fifo, 3);
    assert!(q.add("payload", &["i1", "i2", "i3"]));
    assert_eq!(q.len(), 3);

    assert_eq!(q.pop("i1"), Some("payload"));
    assert_eq!(q.pop("i2"), Some("payload"));
    assert_eq!(q.pop("i3"), Some("payload"));
    assert_eq!(q.len(), 0);
}

#[test]
fn count_tracks_adds_and_pops_across_indexes() {
    let q: Queue<u32> = Queue::new(Direction::Fifo, 10);
    q.add(1, &["a"]);
    q.add(2, &["a"]);
    q.add(3, &["b"]);
    assert_eq!(q.len(), 3);

    q.pop("a");
    assert_eq!(q.len(), 2);
    q.pop("b");
    assert_eq!(q.len(), 1);
}
