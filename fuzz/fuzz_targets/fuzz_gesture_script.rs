#![no_main]

use fdnd_controls::ReorderApp;
use fdnd_demo::script::{parse_script, run_steps};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 1024 {
        return;
    }
    // Parsing must never panic; bad steps are errors.
    let Ok(steps) = parse_script(&[text]) else {
        return;
    };

    let items: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| (*s).to_string()).collect();
    let mut app = ReorderApp::new(items.clone());
    let Ok(report) = run_steps(&mut app, &steps) else {
        return;
    };

    let mut before = items;
    let mut after = report.items.clone();
    before.sort();
    after.sort();
    assert_eq!(before, after, "script must only reorder");
    assert!(report.drops.iter().all(|d| d.destination_index.is_none_or(|i| i < 4)));
});
