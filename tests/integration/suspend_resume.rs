//! Suspend/resume scenarios: backgrounding at every step of nested
//! navigation must reproduce the exact pre-suspend page, with no spurious
//! navigation on resume.

use crate::integration::test_utils::*;
use navframe::api::{NavigateOptions, NavigationApi};
use navframe::registry::{FrameRegistry, DEFAULT_SUSPENDED_FRAME_CAP};
use navframe::store::MemoryBundleStore;
use navframe::transition::TransitionSpec;
use navframe::types::PageId;
use std::sync::Arc;

#[test]
fn nested_detail_survives_suspend_resume() {
    let api = engine();
    open_players_frame(&api);
    api.navigate_to(PLAYER_TWO, instant()).unwrap();

    suspend_resume(&api);
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYER_TWO]);
}

#[test]
fn suspend_resume_at_every_step_of_a_detail_round_trip() {
    let api = engine();
    open_players_frame(&api);
    suspend_resume(&api);
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);

    api.navigate_to(PLAYER_TWO, instant()).unwrap();
    suspend_resume(&api);
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYER_TWO]);

    assert!(api.on_hardware_back().unwrap());
    suspend_resume(&api);
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);

    // Same round trip again after resuming.
    api.navigate_to(PLAYER_TWO, instant()).unwrap();
    assert!(api.on_hardware_back().unwrap());
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);
}

#[test]
fn parent_navigation_with_suspends_between_steps() {
    let api = engine();
    open_players_frame(&api);
    let root = api.registry().root_id();

    api.navigate_to(SOME_PAGE, slide().on_frame(root)).unwrap();
    api.complete_transition().unwrap();
    suspend_resume(&api);
    assert_eq!(pages(&api), vec![SOME_PAGE]);

    assert!(api.on_hardware_back().unwrap());
    api.complete_transition().unwrap();
    suspend_resume(&api);
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);
}

#[test]
fn background_mid_transition_lands_on_destination() {
    let api = engine();
    api.navigate_to(HOME, instant()).unwrap();
    api.navigate_to(SOME_PAGE, slide()).unwrap();

    // Suspend races the animation: the committed navigation stands and
    // the gate is released deterministically before the snapshot.
    suspend_resume(&api);
    assert_eq!(pages(&api), vec![SOME_PAGE]);
    api.navigate_to(STILL_OTHER_PAGE, instant()).unwrap();
    assert_eq!(pages(&api), vec![STILL_OTHER_PAGE]);
}

#[test]
fn suspended_nested_frame_survives_suspend_resume_and_reentry() {
    let api = engine();
    open_players_frame(&api);
    api.navigate_to(TEAMS_LIST, instant()).unwrap();

    let root = api.registry().root_id();
    assert!(api.go_back_on(root).unwrap());
    assert_eq!(pages(&api), vec![HOME]);

    suspend_resume(&api);

    api.navigate_to(FRAME_HOST, NavigateOptions::nested_host(TransitionSpec::none()))
        .unwrap();
    assert_eq!(pages(&api), vec![FRAME_HOST, TEAMS_LIST]);
}

#[test]
fn multi_frame_state_survives_suspend_resume() {
    let api = engine();
    api.navigate_to(HOME, instant()).unwrap();
    api.navigate_to(MULTI_HOST, NavigateOptions::nested_host(TransitionSpec::none()))
        .unwrap();
    let root = api.registry().root_id();
    let players = api.mount_nested(root, MULTI_HOST, "players").unwrap();
    let teams = api.mount_nested(root, MULTI_HOST, "teams").unwrap();
    api.navigate_to(PLAYERS_LIST, instant().on_frame(players)).unwrap();
    api.navigate_to(TEAMS_LIST, instant().on_frame(teams)).unwrap();
    api.navigate_to(PLAYER_TWO, instant().on_frame(players)).unwrap();
    api.navigate_to(TEAM_TWO, instant().on_frame(teams)).unwrap();

    suspend_resume(&api);

    assert_eq!(
        api.registry().current_page(players).unwrap().as_str(),
        PLAYER_TWO
    );
    assert_eq!(
        api.registry().current_page(teams).unwrap().as_str(),
        TEAM_TWO
    );
    assert_eq!(api.registry().depth(players).unwrap(), 2);
    assert_eq!(api.registry().depth(teams).unwrap(), 2);
}

#[test]
fn resume_with_corrupt_bundle_degrades_to_root_only() {
    let registry = Arc::new(FrameRegistry::new(DEFAULT_SUSPENDED_FRAME_CAP));
    let store = Arc::new(MemoryBundleStore::new());
    let api = NavigationApi::new(registry.clone(), store.clone());

    let child = open_players_frame(&api);
    api.on_app_background().unwrap();
    store.inject_raw(b"not a bundle".to_vec());
    api.on_app_foreground().unwrap();

    assert!(!registry.contains(child));
    assert_eq!(
        registry.current_page(registry.root_id()).unwrap().as_str(),
        FRAME_HOST
    );
    // The engine stays navigable after the fallback.
    api.navigate_to(SOME_PAGE, instant()).unwrap();
    assert_eq!(pages(&api), vec![SOME_PAGE]);
}

#[test]
fn hardware_back_works_immediately_after_resume() {
    let api = engine();
    open_players_frame(&api);
    api.navigate_to(PLAYER_TWO, instant()).unwrap();
    suspend_resume(&api);

    assert!(api.on_hardware_back().unwrap());
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);

    let page = PageId::new(FRAME_HOST).unwrap();
    let root = api.registry().root_id();
    assert!(api.registry().resolve_child(root, &page, "").is_some());
}
