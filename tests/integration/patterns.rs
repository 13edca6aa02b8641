//! Integration tests for pattern semantics at the request level
//! Tests how the match modes behave against a populated mapset.

use mapsweep_core::{RemoveRequest, run};
use mapsweep_gis::raster::write_const_raster;
use mapsweep_gis::{MapType, Session};
use mapsweep_pattern::{MatchMode, PatternList};
use tempfile::TempDir;

fn session_with_maps(names: &[&str]) -> (TempDir, Session) {
    let dir = TempDir::new().unwrap();
    let session = Session::new(dir.path(), "test_location", "user1");
    session.create().unwrap();
    for name in names {
        write_const_raster(&session, name, 1.0).unwrap();
    }
    (dir, session)
}

fn listed(session: &Session, request: &RemoveRequest) -> Vec<String> {
    run(session, request)
        .unwrap()
        .stdout
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_wildcard_matching_is_anchored() {
    let (_dir, session) = session_with_maps(&["test_two", "two"]);

    let request = RemoveRequest::new(MapType::Raster, "two");
    assert_eq!(listed(&session, &request), vec!["rast/two@user1"]);

    let request = RemoveRequest::new(MapType::Raster, "*two");
    assert_eq!(
        listed(&session, &request),
        vec!["rast/test_two@user1", "rast/two@user1"]
    );
}

#[test]
fn test_comma_list_unions_patterns() {
    let (_dir, session) = session_with_maps(&["alpha", "beta", "gamma"]);

    let request = RemoveRequest::new(MapType::Raster, "alpha,gam*");
    assert_eq!(
        listed(&session, &request),
        vec!["rast/alpha@user1", "rast/gamma@user1"]
    );
}

#[test]
fn test_ignore_case_request() {
    let (_dir, session) = session_with_maps(&["Elevation", "elevation_fine"]);

    let request = RemoveRequest::new(MapType::Raster, "elev*");
    assert_eq!(
        listed(&session, &request),
        vec!["rast/elevation_fine@user1"]
    );

    let mut request = RemoveRequest::new(MapType::Raster, "elev*");
    request.ignore_case = true;
    assert_eq!(
        listed(&session, &request),
        vec!["rast/Elevation@user1", "rast/elevation_fine@user1"]
    );
}

#[test]
fn test_extended_regex_request() {
    let (_dir, session) = session_with_maps(&["test_map_3", "test_two", "unrelated"]);

    let mut request = RemoveRequest::new(MapType::Raster, "test_(map_[0-9]+|two)");
    request.extended = true;
    assert_eq!(
        listed(&session, &request),
        vec!["rast/test_map_3@user1", "rast/test_two@user1"]
    );
}

#[test]
fn test_basic_regex_treats_extensions_as_literals() {
    let (_dir, session) = session_with_maps(&["aaa", "a+"]);

    let mut request = RemoveRequest::new(MapType::Raster, "a+");
    request.regex = true;
    assert_eq!(listed(&session, &request), vec!["rast/a+@user1"]);
}

#[test]
fn test_listing_agrees_with_direct_matching() {
    let names = ["other", "test_map_0", "test_map_1", "test_two"];
    let (_dir, session) = session_with_maps(&names);

    let list = PatternList::compile("test_map_*,*two", MatchMode::Wildcard, false).unwrap();
    let expected: Vec<String> = names
        .iter()
        .filter(|name| list.matches(name))
        .map(|name| format!("rast/{name}@user1"))
        .collect();

    let request = RemoveRequest::new(MapType::Raster, "test_map_*,*two");
    assert_eq!(listed(&session, &request), expected);
}

#[test]
fn test_exclude_stays_wildcard_in_regex_mode() {
    let (_dir, session) = session_with_maps(&["test_a", "test_b", "test_keep"]);

    let mut request = RemoveRequest::new(MapType::Raster, "test_.*");
    request.extended = true;
    request.exclude = Some("*keep".to_string());
    assert_eq!(
        listed(&session, &request),
        vec!["rast/test_a@user1", "rast/test_b@user1"]
    );
}
