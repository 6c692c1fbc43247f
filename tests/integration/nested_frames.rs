//! Nested-frame scenarios: lazy creation, reuse on revisit, parent-frame
//! navigation over a live nested frame, and sibling frames mounted on one
//! page.

use crate::integration::test_utils::*;
use navframe::api::NavigateOptions;
use navframe::transition::TransitionSpec;
use navframe::types::{FrameId, PageId};

#[test]
fn player_details_and_back_twice() {
    let api = engine();
    open_players_frame(&api);
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);

    for _ in 0..2 {
        api.navigate_to(PLAYER_TWO, instant()).unwrap();
        assert_eq!(pages(&api), vec![FRAME_HOST, PLAYER_TWO]);
        assert!(api.on_hardware_back().unwrap());
        assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);
    }
}

#[test]
fn navigate_parent_frame_over_nested_and_go_back() {
    let api = engine();
    open_players_frame(&api);
    let root = api.registry().root_id();

    // The parent frame navigates while the nested frame is visible.
    api.navigate_to(SOME_PAGE, slide().on_frame(root)).unwrap();
    api.complete_transition().unwrap();
    assert_eq!(pages(&api), vec![SOME_PAGE]);

    // System back pops the parent; the nested frame reappears as left.
    assert!(api.on_hardware_back().unwrap());
    api.complete_transition().unwrap();
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);
}

#[test]
fn player_details_survive_parent_frame_navigation() {
    let api = engine();
    let players = open_players_frame(&api);
    let root = api.registry().root_id();

    api.navigate_to(PLAYER_TWO, instant()).unwrap();
    api.navigate_to(SOME_PAGE, slide().on_frame(root)).unwrap();
    api.complete_transition().unwrap();

    assert!(api.on_hardware_back().unwrap());
    api.complete_transition().unwrap();
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYER_TWO]);

    assert!(api.go_back_on(players).unwrap());
    assert_eq!(pages(&api), vec![FRAME_HOST, PLAYERS_LIST]);
}

#[test]
fn leaving_and_reentering_a_host_page_restores_the_nested_stack() {
    let api = engine();
    let child = open_players_frame(&api);
    api.navigate_to(TEAMS_LIST, instant()).unwrap();
    assert_eq!(pages(&api), vec![FRAME_HOST, TEAMS_LIST]);

    // Pop the parent past the host page entirely, as a back button on the
    // host page would.
    let root = api.registry().root_id();
    assert!(api.go_back_on(root).unwrap());
    assert_eq!(pages(&api), vec![HOME]);

    // Re-enter: same frame, same stack, not the initial page.
    api.navigate_to(FRAME_HOST, NavigateOptions::nested_host(TransitionSpec::none()))
        .unwrap();
    let root = api.registry().root_id();
    let again = api
        .registry()
        .resolve_child(root, &PageId::new(FRAME_HOST).unwrap(), "")
        .unwrap();
    assert_eq!(again, child);
    assert_eq!(pages(&api), vec![FRAME_HOST, TEAMS_LIST]);
}

fn open_multi_frame_page(api: &navframe::api::NavigationApi) -> (FrameId, FrameId) {
    api.navigate_to(HOME, instant()).unwrap();
    api.navigate_to(MULTI_HOST, NavigateOptions::nested_host(TransitionSpec::none()))
        .unwrap();
    let root = api.registry().root_id();
    let players = api.mount_nested(root, MULTI_HOST, "players").unwrap();
    let teams = api.mount_nested(root, MULTI_HOST, "teams").unwrap();
    api.navigate_to(PLAYERS_LIST, instant().on_frame(players)).unwrap();
    api.navigate_to(TEAMS_LIST, instant().on_frame(teams)).unwrap();
    (players, teams)
}

#[test]
fn sibling_frames_on_one_page_navigate_independently() {
    let api = engine();
    let (players, teams) = open_multi_frame_page(&api);

    api.navigate_to(PLAYER_TWO, instant().on_frame(players)).unwrap();
    assert_eq!(
        api.registry().current_page(teams).unwrap().as_str(),
        TEAMS_LIST
    );
    assert_eq!(
        api.registry().current_page(players).unwrap().as_str(),
        PLAYER_TWO
    );

    assert!(api.go_back_on(players).unwrap());
    assert_eq!(
        api.registry().current_page(players).unwrap().as_str(),
        PLAYERS_LIST
    );
    assert_eq!(
        api.registry().current_page(teams).unwrap().as_str(),
        TEAMS_LIST
    );
}

#[test]
fn mixed_player_and_team_actions_with_parent_navigation() {
    let api = engine();
    let (players, teams) = open_multi_frame_page(&api);
    let root = api.registry().root_id();

    api.navigate_to(PLAYER_TWO, instant().on_frame(players)).unwrap();
    api.navigate_to(SOME_PAGE, slide().on_frame(root)).unwrap();
    api.complete_transition().unwrap();
    assert!(api.on_hardware_back().unwrap());
    api.complete_transition().unwrap();

    // Neither sibling lost its place while the parent was away.
    assert_eq!(
        api.registry().current_page(players).unwrap().as_str(),
        PLAYER_TWO
    );
    assert_eq!(
        api.registry().current_page(teams).unwrap().as_str(),
        TEAMS_LIST
    );

    api.navigate_to(TEAM_TWO, instant().on_frame(teams)).unwrap();
    api.navigate_to(SOME_PAGE, slide().on_frame(root)).unwrap();
    api.complete_transition().unwrap();
    assert!(api.on_hardware_back().unwrap());
    api.complete_transition().unwrap();

    assert_eq!(
        api.registry().current_page(players).unwrap().as_str(),
        PLAYER_TWO
    );
    assert_eq!(
        api.registry().current_page(teams).unwrap().as_str(),
        TEAM_TWO
    );

    assert!(api.go_back_on(players).unwrap());
    assert!(api.go_back_on(teams).unwrap());
    assert_eq!(
        api.registry().current_page(players).unwrap().as_str(),
        PLAYERS_LIST
    );
    assert_eq!(
        api.registry().current_page(teams).unwrap().as_str(),
        TEAMS_LIST
    );
}

#[test]
fn back_to_home_from_a_nested_frame_host() {
    let api = engine();
    open_players_frame(&api);
    assert!(api.on_hardware_back().unwrap());
    assert_eq!(pages(&api), vec![HOME]);
    // Terminal: nothing left to pop anywhere in the chain.
    assert!(api.registry().resolve_back_target().is_none());
}
