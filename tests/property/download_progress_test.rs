//! Property-based tests for download progress reporting.
//!
//! For any signal sequence the engine produces — including stale or
//! regressing progress updates — the reported byte counts and percentages
//! must be non-decreasing while downloading, and a terminal record must
//! never change again.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use probe_browser::engine::DownloadDoneState;
use probe_browser::managers::download_manager::DownloadManager;
use probe_browser::types::download::DownloadStatus;
use probe_browser::ui::channel::{UiEvent, UiSink};
use proptest::prelude::*;

#[derive(Clone, Default)]
struct RecordingSink {
    events: Rc<RefCell<Vec<UiEvent>>>,
}

impl UiSink for RecordingSink {
    fn publish(&mut self, event: UiEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Debug, Clone)]
enum Signal {
    Progress(u64),
    Finish(bool), // true = completed
}

fn arb_signals() -> impl Strategy<Value = (u64, Vec<Signal>)> {
    let signal = prop_oneof![
        6 => (0u64..2_000).prop_map(Signal::Progress),
        1 => any::<bool>().prop_map(Signal::Finish),
    ];
    (1u64..1_500, prop::collection::vec(signal, 1..40))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn progress_is_monotonic_until_terminal((total, signals) in arb_signals()) {
        let mut mgr = DownloadManager::new();
        let mut sink = RecordingSink::default();
        mgr.begin("file.bin", total, PathBuf::from("/tmp/file.bin"), &mut sink);

        let mut terminal_snapshot = None;

        for signal in &signals {
            match signal {
                Signal::Progress(bytes) => mgr.progress("file.bin", *bytes, &mut sink),
                Signal::Finish(completed) => {
                    let state = if *completed {
                        DownloadDoneState::Completed
                    } else {
                        DownloadDoneState::Interrupted
                    };
                    mgr.finish("file.bin", state, &mut sink);
                    if terminal_snapshot.is_none() {
                        terminal_snapshot = Some(mgr.get("file.bin").unwrap().clone());
                    }
                }
            }

            let item = mgr.get("file.bin").unwrap();
            prop_assert!(item.percent <= 100);
            if let Some(snap) = &terminal_snapshot {
                // Terminal records never mutate again.
                prop_assert_eq!(item.status, snap.status);
                prop_assert_eq!(item.received_bytes, snap.received_bytes);
                prop_assert_eq!(item.percent, snap.percent);
            }
        }

        // The published progress stream is non-decreasing in both bytes and
        // percent up to the terminal event.
        let mut last_bytes = 0u64;
        let mut last_percent = 0u8;
        for event in sink.events.borrow().iter() {
            if let UiEvent::DownloadProgress { download } = event {
                prop_assert!(download.received_bytes >= last_bytes);
                prop_assert!(download.percent >= last_percent);
                last_bytes = download.received_bytes;
                last_percent = download.percent;
            }
        }

        // A completed download reports exactly 100%.
        if matches!(
            mgr.get("file.bin").unwrap().status,
            DownloadStatus::Completed
        ) {
            prop_assert_eq!(mgr.get("file.bin").unwrap().percent, 100);
        }
    }
}
