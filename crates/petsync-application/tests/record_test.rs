mod common;

use common::{Harness, MockRecordGateway, date, pet};
use petsync_application::{Confirmation, RecordCoordinator, RecordView, SubmitOutcome};
use petsync_core::forms::{ActivityForm, FeedingForm};
use petsync_core::gateway::{ApiResponse, RecordList};
use petsync_core::record::{DailyActivity, Feeding};
use petsync_core::types::{PetId, RecordId};
use std::sync::Arc;

fn feeding(id: i64, description: &str) -> Feeding {
    Feeding {
        id: RecordId(id),
        pet_id: Some(PetId(1)),
        kind: "Dry kibble".to_string(),
        description: description.to_string(),
        quantity: 120,
        date: date(2024, 1, 5),
    }
}

fn feeding_form() -> FeedingForm {
    FeedingForm {
        kind: "Dry kibble".to_string(),
        description: "Morning bowl".to_string(),
        quantity: Some(120),
        date: Some(date(2024, 1, 5)),
    }
}

fn coordinator(
    harness: &Harness,
) -> (Arc<MockRecordGateway<Feeding>>, RecordCoordinator<Feeding>) {
    let gateway = Arc::new(MockRecordGateway::<Feeding>::new());
    let coordinator = RecordCoordinator::<Feeding>::new(
        gateway.clone(),
        harness.stores.clone(),
        harness.notifier.clone(),
    );
    (gateway, coordinator)
}

#[tokio::test]
async fn no_pets_means_no_request() {
    let harness = Harness::new();
    let (gateway, feedings) = coordinator(&harness);

    assert_eq!(feedings.refresh().await, RecordView::NoPets);
    assert_eq!(gateway.list.calls(), 0);
    assert_eq!(feedings.loaded_for().await, None);
}

#[tokio::test]
async fn missing_feedings_show_empty_state() {
    let mut harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway.list.set(ApiResponse::success(RecordList::NotFound {
        detail: Some("No feedings found".to_string()),
    }));

    let view = feedings.refresh().await;

    assert_eq!(
        view,
        RecordView::Empty {
            detail: Some("No feedings found".to_string())
        }
    );
    assert!(feedings.records().await.is_empty());
    assert_eq!(feedings.loaded_for().await, Some(PetId(1)));
    assert!(harness.notifications().is_empty());
}

#[tokio::test]
async fn refresh_lists_records_of_selected_pet() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway.list.set(ApiResponse::success(RecordList::Found(vec![
        feeding(1, "Morning bowl"),
        feeding(2, "Evening bowl"),
    ])));

    let view = feedings.refresh().await;

    assert!(matches!(view, RecordView::Records(ref records) if records.len() == 2));
    assert_eq!(feedings.find(RecordId(2)).await.unwrap().description, "Evening bowl");
}

#[tokio::test]
async fn list_failure_is_an_error_view() {
    let mut harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway.list.set(ApiResponse::failure("A connection error has occurred."));

    let view = feedings.refresh().await;

    assert_eq!(
        view,
        RecordView::Error("A connection error has occurred.".to_string())
    );
    assert!(harness.notifications()[0].is_error());
}

#[tokio::test]
async fn create_appends_echoed_record() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway.create.set(ApiResponse::success(Some(feeding(9, "Morning bowl"))));

    let outcome = feedings.create(&feeding_form()).await;

    assert_eq!(outcome, SubmitOutcome::Completed(feeding(9, "Morning bowl")));
    assert_eq!(feedings.records().await, vec![feeding(9, "Morning bowl")]);
    assert_eq!(gateway.list.calls(), 0);
}

#[tokio::test]
async fn create_without_echo_appends_provisional_then_reloads() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway
        .list
        .set(ApiResponse::success(RecordList::Found(vec![feeding(9, "Morning bowl")])));

    let outcome = feedings.create(&feeding_form()).await;

    let created = outcome.completed().unwrap();
    assert!(created.id.is_provisional());
    assert_eq!(gateway.list.calls(), 1);
    assert_eq!(feedings.records().await, vec![feeding(9, "Morning bowl")]);
}

#[tokio::test]
async fn invalid_feeding_is_rejected_before_gateway() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    let form = FeedingForm {
        kind: "Chocolate".to_string(),
        quantity: Some(501),
        ..feeding_form()
    };

    let errors = feedings.create(&form).await.field_errors().cloned().unwrap();

    assert!(errors.contains("type"));
    assert!(errors.contains("quantity"));
    assert_eq!(gateway.create.calls(), 0);
}

#[tokio::test]
async fn create_without_selected_pet_fails() {
    let harness = Harness::new();
    let (gateway, feedings) = coordinator(&harness);

    let outcome = feedings.create(&feeding_form()).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(gateway.create.calls(), 0);
}

#[tokio::test]
async fn edit_replaces_in_place_and_delete_removes() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway.list.set(ApiResponse::success(RecordList::Found(vec![
        feeding(1, "Morning bowl"),
        feeding(2, "Evening bowl"),
    ])));
    feedings.refresh().await;

    let mut form = FeedingForm::from(&feeding(2, "Evening bowl"));
    form.description = "Late evening bowl".to_string();
    let edited = feedings.edit(RecordId(2), &form).await.completed().unwrap();
    assert_eq!(edited.description, "Late evening bowl");
    assert_eq!(feedings.records().await[1].description, "Late evening bowl");

    assert_eq!(
        feedings.delete(RecordId(1), Confirmation::Declined).await,
        SubmitOutcome::Cancelled
    );
    assert_eq!(feedings.records().await.len(), 2);

    assert!(feedings.delete(RecordId(1), Confirmation::Confirmed).await.is_completed());
    let remaining = feedings.records().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, RecordId(2));
}

#[tokio::test]
async fn deleting_the_selected_pet_drops_its_records() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira"), pet(2, "Toby")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway
        .list
        .set(ApiResponse::success(RecordList::Found(vec![feeding(1, "Morning bowl")])));
    feedings.refresh().await;
    assert_eq!(feedings.records().await.len(), 1);

    harness.stores.pets.write().await.remove(PetId(1));
    assert!(feedings.records().await.is_empty());
    assert_eq!(feedings.find(RecordId(1)).await, None);

    let for_toby = Feeding {
        pet_id: Some(PetId(2)),
        ..feeding(5, "Morning bowl")
    };
    gateway.create.set(ApiResponse::success(Some(for_toby.clone())));
    feedings.create(&feeding_form()).await.completed().unwrap();

    assert_eq!(feedings.loaded_for().await, Some(PetId(2)));
    assert_eq!(feedings.records().await, vec![for_toby]);

    harness.stores.pets.write().await.remove(PetId(2));
    assert!(feedings.records().await.is_empty());
    assert_eq!(feedings.refresh().await, RecordView::NoPets);
    assert_eq!(feedings.loaded_for().await, None);
}

#[tokio::test]
async fn failed_reload_after_create_only_reports_success() {
    let mut harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway.list.set(ApiResponse::failure("A connection error has occurred."));

    assert!(feedings.create(&feeding_form()).await.is_completed());

    let notifications = harness.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(!notifications[0].is_error());
}

#[tokio::test]
async fn disposed_coordinator_ignores_late_results() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let (gateway, feedings) = coordinator(&harness);
    gateway.create.set(ApiResponse::success(Some(feeding(9, "Morning bowl"))));
    feedings.dispose_guard().dispose();

    let outcome = feedings.create(&feeding_form()).await;

    assert_eq!(outcome, SubmitOutcome::Discarded);
    assert!(feedings.records().await.is_empty());
}

#[tokio::test]
async fn activities_use_their_own_table() {
    let harness = Harness::new();
    harness.with_roster(&[pet(1, "Kira")]).await;
    let gateway = Arc::new(MockRecordGateway::<DailyActivity>::new());
    let activities = RecordCoordinator::<DailyActivity>::new(
        gateway.clone(),
        harness.stores.clone(),
        harness.notifier.clone(),
    );
    let form = ActivityForm {
        kind: "Walk".to_string(),
        duration: Some(1441),
        notes: "Park".to_string(),
        date: Some(date(2024, 1, 5)),
    };

    let errors = activities.create(&form).await.field_errors().cloned().unwrap();

    assert!(errors.contains("duration"));
    assert_eq!(errors.len(), 1);
    assert_eq!(gateway.create.calls(), 0);
}
