//! Tests de la máquina de estados de reservas y de la sincronización del
//! estado del vehículo.

mod common;

use common::*;
use rental_booking::services::lifecycle_service::LifecycleService;
use rental_booking::utils::errors::AppError;

#[tokio::test]
async fn approve_confirms_and_marks_vehicle_rented() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    LifecycleService::new(pool.clone())
        .approve(rental_id)
        .await
        .expect("approve");

    assert_eq!(rental_status(&pool, rental_id).await, "confirmed");
    assert_eq!(vehicle_status(&pool, vehicle_id).await, "rented");
}

#[tokio::test]
async fn reject_leaves_vehicle_untouched() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    LifecycleService::new(pool.clone())
        .reject(rental_id)
        .await
        .expect("reject");

    assert_eq!(rental_status(&pool, rental_id).await, "rejected");
    assert_eq!(vehicle_status(&pool, vehicle_id).await, "available");
}

#[tokio::test]
async fn cancel_pending_succeeds_without_touching_vehicle() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    LifecycleService::new(pool.clone())
        .cancel(rental_id, user_id)
        .await
        .expect("cancel");

    assert_eq!(rental_status(&pool, rental_id).await, "cancelled");
    assert_eq!(vehicle_status(&pool, vehicle_id).await, "available");
}

#[tokio::test]
async fn cancel_confirmed_is_an_invalid_transition() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    let service = LifecycleService::new(pool.clone());
    service.approve(rental_id).await.expect("approve");

    let result = service.cancel(rental_id, user_id).await;
    match result {
        Err(AppError::InvalidTransition(msg)) => {
            assert!(msg.contains("only pending bookings can be cancelled"));
        }
        other => panic!("expected InvalidTransition, got {:?}", other),
    }
    // el estado no se movió
    assert_eq!(rental_status(&pool, rental_id).await, "confirmed");
    assert_eq!(vehicle_status(&pool, vehicle_id).await, "rented");
}

#[tokio::test]
async fn cancel_by_non_owner_reports_not_found() {
    let pool = setup_pool().await;
    let owner = insert_member(&pool, "An", "an@example.com").await;
    let stranger = insert_member(&pool, "Binh", "binh@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, owner, vehicle_id, 10, 3).await;

    let result = LifecycleService::new(pool.clone())
        .cancel(rental_id, stranger)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(rental_status(&pool, rental_id).await, "pending");
}

#[tokio::test]
async fn mark_returned_completes_and_frees_vehicle() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    let service = LifecycleService::new(pool.clone());
    service.approve(rental_id).await.expect("approve");
    service.mark_returned(rental_id).await.expect("return");

    assert_eq!(rental_status(&pool, rental_id).await, "completed");
    assert_eq!(vehicle_status(&pool, vehicle_id).await, "available");
}

#[tokio::test]
async fn mark_returned_requires_confirmed() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    let result = LifecycleService::new(pool.clone())
        .mark_returned(rental_id)
        .await;

    assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    assert_eq!(rental_status(&pool, rental_id).await, "pending");
    assert_eq!(vehicle_status(&pool, vehicle_id).await, "available");
}

#[tokio::test]
async fn terminal_states_reject_every_transition() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    let service = LifecycleService::new(pool.clone());
    service.reject(rental_id).await.expect("reject");

    assert!(matches!(
        service.approve(rental_id).await,
        Err(AppError::InvalidTransition(_))
    ));
    assert!(matches!(
        service.reject(rental_id).await,
        Err(AppError::InvalidTransition(_))
    ));
    assert!(matches!(
        service.cancel(rental_id, user_id).await,
        Err(AppError::InvalidTransition(_))
    ));
    assert!(matches!(
        service.mark_returned(rental_id).await,
        Err(AppError::InvalidTransition(_))
    ));
    assert_eq!(rental_status(&pool, rental_id).await, "rejected");
    assert_eq!(vehicle_status(&pool, vehicle_id).await, "available");
}

#[tokio::test]
async fn completed_rentals_cannot_be_reapproved() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    let service = LifecycleService::new(pool.clone());
    service.approve(rental_id).await.expect("approve");
    service.mark_returned(rental_id).await.expect("return");

    assert!(matches!(
        service.approve(rental_id).await,
        Err(AppError::InvalidTransition(_))
    ));
    assert_eq!(rental_status(&pool, rental_id).await, "completed");
}

#[tokio::test]
async fn unknown_rental_reports_not_found() {
    let pool = setup_pool().await;
    let service = LifecycleService::new(pool.clone());

    assert!(matches!(
        service.approve(12345).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.mark_returned(12345).await,
        Err(AppError::NotFound(_))
    ));
}
