mod common;

use common::{example_registry, PagesFixture, DOMAIN, PAGE};
use optpage::{Caller, OptionStore, PageRequest, PagesConfig, SubmitRequest};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_views_and_submits() {
    let fixture = Arc::new(PagesFixture::with_registry(
        example_registry(),
        PagesConfig::default(),
    ));
    let barrier = Arc::new(Barrier::new(10));
    let mut handles = vec![];

    for i in 0..10 {
        let f = Arc::clone(&fixture);
        let b = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            b.wait();
            // Mixed page views and submissions
            if i % 2 == 0 {
                let output = f
                    .pages
                    .render_page(&PageRequest::new(PAGE, Caller::administrator()))
                    .unwrap();
                assert!(output.field_errors.is_empty());
            } else {
                let form = SubmitRequest::new(DOMAIN, Caller::administrator())
                    .value("option_key_3", i.to_string());
                f.pages.handle_submit(&form).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let stored = fixture.store.get("option_key_3").unwrap().unwrap();
    assert!([1, 3, 5, 7, 9].contains(&stored.as_i64().unwrap()));
}

#[test]
fn test_concurrent_bootstrap_runs_once() {
    let fixture = Arc::new(PagesFixture::unbootstrapped(
        example_registry(),
        PagesConfig::default(),
    ));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let f = Arc::clone(&fixture);
            let b = Arc::clone(&barrier);
            thread::spawn(move || {
                b.wait();
                f.pages.bootstrap(&f.menu).unwrap()
            })
        })
        .collect();

    let ran: usize = handles
        .into_iter()
        .map(|h| usize::from(h.join().unwrap()))
        .sum();

    assert_eq!(ran, 1);
    assert!(fixture.pages.is_bootstrapped());
    assert_eq!(fixture.menu.pages().len(), 1);
    assert_eq!(fixture.store.registered_keys(DOMAIN).unwrap().len(), 5);
}
