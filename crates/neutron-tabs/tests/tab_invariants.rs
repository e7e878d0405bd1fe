//! Property-based tests for the tab list and history invariants.
//!
//! For any sequence of tab operations the list is never empty, exactly one
//! tab is active, and each tab's back/forward flags mirror its history.

use neutron_tabs::TabManager;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create,
    /// Close the tab at this index (modulo the current length)
    Close(usize),
    Select(usize),
    CloseUnknown,
    Navigate(String),
    Back,
    Forward,
    Reload,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Create),
        (0usize..8).prop_map(Op::Close),
        (0usize..8).prop_map(Op::Select),
        Just(Op::CloseUnknown),
        "[a-c]{1,2}(\\.example)?".prop_map(Op::Navigate),
        Just(Op::Back),
        Just(Op::Forward),
        Just(Op::Reload),
    ]
}

fn apply(manager: &TabManager, op: &Op) {
    let ids: Vec<String> = manager.tabs().into_iter().map(|t| t.id).collect();
    match op {
        Op::Create => {
            manager.create_tab();
        }
        Op::Close(i) => {
            manager.close_tab(&ids[i % ids.len()]);
        }
        Op::Select(i) => {
            manager.select_tab(&ids[i % ids.len()]);
        }
        Op::CloseUnknown => {
            manager.close_tab("no-such-tab");
        }
        Op::Navigate(input) => {
            manager.navigate(input, None);
        }
        Op::Back => {
            manager.go_back();
        }
        Op::Forward => {
            manager.go_forward();
        }
        Op::Reload => {
            manager.reload();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exactly_one_active_tab(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let manager = TabManager::new();

        for op in &ops {
            apply(&manager, op);

            let tabs = manager.tabs();
            prop_assert!(!tabs.is_empty(), "tab list must never be empty");

            let active = manager.active_tab_id();
            let matching = tabs.iter().filter(|t| t.id == active).count();
            prop_assert_eq!(matching, 1, "active id must name exactly one tab");
        }
    }

    #[test]
    fn history_flags_mirror_history(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let manager = TabManager::new();

        for op in &ops {
            apply(&manager, op);
        }

        for tab in manager.tabs() {
            let history = manager.history(&tab.id).expect("every tab has a history");
            prop_assert_eq!(tab.can_go_back, history.can_go_back());
            prop_assert_eq!(tab.can_go_forward, history.can_go_forward());
            prop_assert_eq!(&tab.url, history.current());
        }
    }

    #[test]
    fn closing_every_tab_leaves_one(extra in 0usize..6) {
        let manager = TabManager::new();
        for _ in 0..extra {
            manager.create_tab();
        }

        for tab in manager.tabs() {
            manager.close_tab(&tab.id);
        }

        prop_assert_eq!(manager.tab_count(), 1);
        prop_assert!(manager.active_tab().is_some());
    }
}
