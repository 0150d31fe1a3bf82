use firmware_sync::{OnceSlot, SlotTaken};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn empty_until_set() {
    let s = OnceSlot::<u64>::new();
    assert!(s.get().is_none());
    assert!(!s.is_set());

    assert_eq!(s.set(7), Ok(&7));
    assert!(s.is_set());
    assert_eq!(s.get(), Some(&7));
}

#[test]
fn second_set_hands_value_back() {
    let s = OnceSlot::new();
    s.set(String::from("first")).unwrap();

    let Err(SlotTaken(rejected)) = s.set(String::from("second")) else {
        panic!("second set must fail");
    };
    assert_eq!(rejected, "second");
    assert_eq!(s.get().map(String::as_str), Some("first"));
}

#[test]
fn racing_writers_publish_exactly_one_value() {
    let threads = 8;
    let slot = Arc::new(OnceSlot::new());
    let start = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let slot = Arc::clone(&slot);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                slot.set(i).is_ok()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert!(slot.get().is_some());
}

#[test]
fn published_value_is_dropped_with_slot() {
    let marker = Arc::new(());
    {
        let s = OnceSlot::new();
        s.set(Arc::clone(&marker)).unwrap();
        assert_eq!(Arc::strong_count(&marker), 2);
    }
    assert_eq!(Arc::strong_count(&marker), 1);
}
