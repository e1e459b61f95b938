#![no_main]

use fdnd_core::reorder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u16>, usize, usize)| {
    let (list, source, destination) = input;
    if list.len() > 1024 {
        return;
    }
    let Some(out) = reorder(&list, source, destination) else {
        assert!(source >= list.len() || destination >= list.len());
        return;
    };
    assert_eq!(out.len(), list.len());
    assert_eq!(out[destination], list[source]);

    let mut a = list.clone();
    let mut b = out.clone();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b, "reorder must permute");
});
