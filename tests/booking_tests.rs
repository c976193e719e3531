//! Tests del motor de reservas: validación de fechas, precios congelados,
//! detección de conflictos con semántica de intervalos semiabiertos y
//! atomicidad del lote.

mod common;

use common::*;
use rental_booking::models::cart::CartLine;
use rental_booking::models::rental::Rental;
use rental_booking::services::booking_service::BookingService;
use rental_booking::services::lifecycle_service::LifecycleService;
use rental_booking::utils::errors::AppError;

#[tokio::test]
async fn checkout_prices_and_creates_pending_reservation() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id, days: 3 }];
    let rental_ids = service
        .checkout(user_id, &cart, &checkout_request(10, 3))
        .await
        .expect("checkout should succeed");

    assert_eq!(rental_ids.len(), 1);

    let rental: Rental = sqlx::query_as("SELECT * FROM rentals WHERE rental_id = ?")
        .bind(rental_ids[0])
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rental.total_amount, 2_400_000);
    assert_eq!(rental.status.as_str(), "pending");
    assert_eq!(rental.payment_method, "cod");
    assert_eq!(rental.start_date, day_from_now(10));
    assert_eq!(rental.end_date, day_from_now(13));
}

#[tokio::test]
async fn one_reservation_is_created_per_cart_line() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let car = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let bike = insert_vehicle(&pool, "29A-67890", 150_000).await;

    let service = BookingService::new(pool.clone());
    let cart = vec![
        CartLine { vehicle_id: car, days: 2 },
        CartLine { vehicle_id: bike, days: 1 },
    ];
    // ventana total = 3 días para las dos líneas
    let rental_ids = service
        .checkout(user_id, &cart, &checkout_request(5, 3))
        .await
        .expect("checkout should succeed");

    assert_eq!(rental_ids.len(), 2);
    assert_eq!(rental_count(&pool).await, 2);

    let amounts: Vec<i64> = sqlx::query_scalar(
        "SELECT total_amount FROM rentals ORDER BY rental_id",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(amounts, vec![1_600_000, 150_000]);
}

#[tokio::test]
async fn overlapping_window_rejects_whole_checkout() {
    let pool = setup_pool().await;
    let first = insert_member(&pool, "An", "an@example.com").await;
    let second = insert_member(&pool, "Binh", "binh@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    create_booking(&pool, first, vehicle_id, 10, 3).await;

    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id, days: 1 }];
    let result = service
        .checkout(second, &cart, &checkout_request(11, 1))
        .await;

    match result {
        Err(AppError::VehicleConflict(id)) => assert_eq!(id, vehicle_id),
        other => panic!("expected VehicleConflict, got {:?}", other.map(|_| ())),
    }
    assert_eq!(rental_count(&pool).await, 1);
}

#[tokio::test]
async fn back_to_back_windows_are_allowed() {
    // Semántica semiabierta: fin de una reserva == inicio de la siguiente
    let pool = setup_pool().await;
    let first = insert_member(&pool, "An", "an@example.com").await;
    let second = insert_member(&pool, "Binh", "binh@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    create_booking(&pool, first, vehicle_id, 10, 3).await;

    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id, days: 2 }];
    let result = service
        .checkout(second, &cart, &checkout_request(13, 2))
        .await;

    assert!(result.is_ok(), "touching endpoints must not conflict");
    assert_eq!(rental_count(&pool).await, 2);
}

#[tokio::test]
async fn end_date_mismatch_is_rejected() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id, days: 3 }];
    // 3 días en el carrito pero end = start + 2
    let result = service
        .checkout(user_id, &cart, &checkout_request(10, 2))
        .await;

    assert!(matches!(result, Err(AppError::InvalidDateRange(_))));
    assert_eq!(rental_count(&pool).await, 0);
}

#[tokio::test]
async fn past_start_date_is_rejected() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id, days: 3 }];
    let result = service
        .checkout(user_id, &cart, &checkout_request(-1, 3))
        .await;

    assert!(matches!(result, Err(AppError::InvalidDateRange(_))));
    assert_eq!(rental_count(&pool).await, 0);
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;

    let service = BookingService::new(pool.clone());
    let result = service
        .checkout(user_id, &[], &checkout_request(10, 3))
        .await;

    assert!(matches!(result, Err(AppError::EmptyCart)));
}

#[tokio::test]
async fn conflicting_line_aborts_the_whole_batch() {
    let pool = setup_pool().await;
    let first = insert_member(&pool, "An", "an@example.com").await;
    let second = insert_member(&pool, "Binh", "binh@example.com").await;
    let free_vehicle = insert_vehicle(&pool, "51H-12345", 800_000).await;
    let busy_vehicle = insert_vehicle(&pool, "29A-67890", 150_000).await;

    create_booking(&pool, first, busy_vehicle, 10, 2).await;
    assert_eq!(rental_count(&pool).await, 1);

    let service = BookingService::new(pool.clone());
    let cart = vec![
        CartLine { vehicle_id: free_vehicle, days: 1 },
        CartLine { vehicle_id: busy_vehicle, days: 1 },
    ];
    let result = service
        .checkout(second, &cart, &checkout_request(10, 2))
        .await;

    match result {
        Err(AppError::VehicleConflict(id)) => assert_eq!(id, busy_vehicle),
        other => panic!("expected VehicleConflict, got {:?}", other.map(|_| ())),
    }
    // ni siquiera la línea libre se insertó
    assert_eq!(rental_count(&pool).await, 1);
}

#[tokio::test]
async fn missing_vehicle_aborts_the_checkout() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;

    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id: 9999, days: 2 }];
    let result = service
        .checkout(user_id, &cart, &checkout_request(10, 2))
        .await;

    assert!(matches!(result, Err(AppError::VehicleUnavailable(9999))));
    assert_eq!(rental_count(&pool).await, 0);
}

#[tokio::test]
async fn total_amount_is_frozen_at_booking_time() {
    let pool = setup_pool().await;
    let user_id = insert_member(&pool, "An", "an@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    let rental_id = create_booking(&pool, user_id, vehicle_id, 10, 3).await;

    sqlx::query("UPDATE vehicles SET daily_rate = 999999 WHERE vehicle_id = ?")
        .bind(vehicle_id)
        .execute(&pool)
        .await
        .unwrap();

    let total: i64 = sqlx::query_scalar("SELECT total_amount FROM rentals WHERE rental_id = ?")
        .bind(rental_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, 2_400_000);
}

#[tokio::test]
async fn cancelled_reservations_do_not_block_the_window() {
    let pool = setup_pool().await;
    let first = insert_member(&pool, "An", "an@example.com").await;
    let second = insert_member(&pool, "Binh", "binh@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    let rental_id = create_booking(&pool, first, vehicle_id, 10, 3).await;
    LifecycleService::new(pool.clone())
        .cancel(rental_id, first)
        .await
        .expect("cancel");

    let service = BookingService::new(pool.clone());
    let cart = vec![CartLine { vehicle_id, days: 3 }];
    let result = service
        .checkout(second, &cart, &checkout_request(10, 3))
        .await;

    assert!(result.is_ok(), "a cancelled reservation frees the window");
}

#[tokio::test]
async fn concurrent_overlapping_checkouts_only_one_succeeds() {
    let pool = setup_pool().await;
    let first = insert_member(&pool, "An", "an@example.com").await;
    let second = insert_member(&pool, "Binh", "binh@example.com").await;
    let vehicle_id = insert_vehicle(&pool, "51H-12345", 800_000).await;

    let service_a = BookingService::new(pool.clone());
    let service_b = BookingService::new(pool.clone());
    let cart_a = vec![CartLine { vehicle_id, days: 3 }];
    let cart_b = vec![CartLine { vehicle_id, days: 3 }];

    let request_a = checkout_request(10, 3);
    let request_b = checkout_request(10, 3);
    let (result_a, result_b) = tokio::join!(
        service_a.checkout(first, &cart_a, &request_a),
        service_b.checkout(second, &cart_b, &request_b),
    );

    let successes = [&result_a, &result_b]
        .iter()
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(successes, 1, "exactly one of the two checkouts must win");
    assert_eq!(rental_count(&pool).await, 1);
}
