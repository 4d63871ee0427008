mod common;

use common::{Harness, sample_user};
use petsync_application::{GuardState, RouteGuard};
use petsync_core::route::Route;
use std::time::Duration;

fn guard(harness: &Harness) -> RouteGuard {
    RouteGuard::new(
        harness.sessions.clone(),
        harness.stores.clone(),
        Duration::from_millis(5),
    )
}

#[tokio::test]
async fn protected_route_without_session_redirects_to_login() {
    let harness = Harness::new();
    let guard = guard(&harness);

    let state = guard.check(Route::Home).await;

    assert_eq!(state, GuardState::Redirecting { to: Route::Login });
    assert_eq!(Route::Login.path(), "/account/login");
    assert_eq!(guard.state(), state);
}

#[tokio::test]
async fn protected_route_with_session_is_authorized() {
    let harness = Harness::new();
    harness.sign_in().await;
    harness.stores.user.write().await.reset_user();
    let guard = guard(&harness);

    let state = guard.check(Route::Feedings).await;

    assert_eq!(state, GuardState::Authorized { user: sample_user() });
    assert_eq!(harness.stores.user.read().await.to_user(), Some(sample_user()));
}

#[tokio::test]
async fn public_routes_are_not_checked() {
    let harness = Harness::new();
    let guard = guard(&harness);

    assert_eq!(guard.check(Route::Register).await, GuardState::Public);
    assert_eq!(guard.check(Route::Login).await, GuardState::Public);
}

#[tokio::test]
async fn signed_in_user_skips_login_page() {
    let harness = Harness::new();
    harness.sign_in().await;

    let state = guard(&harness).check(Route::Login).await;

    assert_eq!(state, GuardState::Redirecting { to: Route::Home });
}

#[tokio::test]
async fn subscribers_see_checking_before_the_decision() {
    let harness = Harness::new();
    let guard = RouteGuard::new(
        harness.sessions.clone(),
        harness.stores.clone(),
        Duration::from_millis(50),
    );
    let mut states = guard.subscribe();

    let check = guard.check(Route::Settings);
    tokio::pin!(check);
    tokio::select! {
        _ = &mut check => panic!("check finished before the delay"),
        changed = states.changed() => changed.unwrap(),
    }
    assert_eq!(*states.borrow_and_update(), GuardState::Checking);

    let state = check.await;
    assert_eq!(state, GuardState::Redirecting { to: Route::Login });
}
