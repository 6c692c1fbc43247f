//! Back-stack behavior through the application-facing surface: gating of
//! rapid input, terminal no-ops at the home state, and transitioned back
//! navigation.

use crate::integration::test_utils::*;
use navframe::error::NavigationError;

#[test]
fn rapid_navigation_during_a_transition_is_rejected_without_corruption() {
    let api = engine();
    api.navigate_to(HOME, instant()).unwrap();
    api.navigate_to(SOME_PAGE, slide()).unwrap();

    // Second request races the in-flight transition: exactly one entry
    // lands on the stack.
    let err = api.navigate_to(STILL_OTHER_PAGE, slide());
    assert!(matches!(err, Err(NavigationError::NavigationBusy(_))));
    assert_eq!(pages(&api), vec![SOME_PAGE]);

    assert!(api.complete_transition().unwrap());
    api.navigate_to(STILL_OTHER_PAGE, instant()).unwrap();
    assert_eq!(pages(&api), vec![STILL_OTHER_PAGE]);
}

#[test]
fn back_during_a_transition_is_rejected_too() {
    let api = engine();
    api.navigate_to(HOME, instant()).unwrap();
    api.navigate_to(SOME_PAGE, slide()).unwrap();
    assert!(matches!(
        api.go_back(),
        Err(NavigationError::NavigationBusy(_))
    ));
    api.complete_transition().unwrap();
    assert!(api.go_back().unwrap());
    assert!(api.complete_transition().unwrap());
    assert_eq!(pages(&api), vec![HOME]);
}

#[test]
fn back_at_home_state_is_a_terminal_no_op() {
    let api = engine();
    api.navigate_to(HOME, instant()).unwrap();
    assert!(!api.on_hardware_back().unwrap());
    assert!(!api.on_hardware_back().unwrap());
    assert_eq!(pages(&api), vec![HOME]);
}

#[test]
fn slide_navigation_to_other_pages_and_back_twice() {
    // Mirrors pushing two transitioned pages and unwinding them one at a
    // time, twice over.
    let api = engine();
    api.navigate_to(HOME, instant()).unwrap();
    api.navigate_to(SOME_PAGE, slide()).unwrap();
    api.complete_transition().unwrap();

    for _ in 0..2 {
        api.navigate_to(STILL_OTHER_PAGE, slide()).unwrap();
        api.complete_transition().unwrap();
        assert_eq!(pages(&api), vec![STILL_OTHER_PAGE]);

        assert!(api.on_hardware_back().unwrap());
        api.complete_transition().unwrap();
        assert_eq!(pages(&api), vec![SOME_PAGE]);
    }

    assert!(api.on_hardware_back().unwrap());
    api.complete_transition().unwrap();
    assert_eq!(pages(&api), vec![HOME]);
}

#[test]
fn each_back_undoes_exactly_the_last_navigation() {
    let api = engine();
    api.navigate_to(HOME, instant()).unwrap();
    let visited = ["a", "b", "c", "d"];
    for page in visited {
        api.navigate_to(page, instant()).unwrap();
    }
    for page in visited.iter().rev().skip(1) {
        assert!(api.go_back().unwrap());
        assert_eq!(pages(&api), vec![page.to_string()]);
    }
    assert!(api.go_back().unwrap());
    assert_eq!(pages(&api), vec![HOME]);
    assert!(!api.go_back().unwrap());
}
