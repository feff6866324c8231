use rental_desk::clients::ProductClient;
use rental_desk::model::{
    AccountTerms, BookingRequest, CustomerId, Product, ProductId, ProductStatus,
};
use rental_desk::product_actor::{ProductActionResult, ProductError};
use rental_desk::rental_actor::{self, scripted_receipts, RentalContext, RentalError};
use resource_actor::mock::MockClient;
use resource_actor::{EntityClient, FrameworkError, Store};
use rust_decimal::Decimal;

fn van(quantity: u32) -> Product {
    Product {
        id: ProductId(2),
        product_type: "Van".to_string(),
        product_code: "VAN775".to_string(),
        cost_per_day: Decimal::new(1900, 2),
        available_quantity: quantity,
        status: ProductStatus::Available,
    }
}

fn van_booking() -> BookingRequest {
    BookingRequest {
        customer_id: CustomerId(7),
        product_type: "Van".to_string(),
        period: "31-90 days".to_string(),
        terms: AccountTerms::default(),
    }
}

async fn migrated_store(dir: &tempfile::TempDir) -> Store {
    let store = Store::open(dir.path().join("rental.db"));
    rental_desk::store::migrate(&store).await.unwrap();
    store
}

/// Real Rental actor with a mocked catalog.
///
/// Pattern 2: Actor + Mocks
/// - Real Rental actor (pricing, receipt allocation, SQL)
/// - Mocked Product client (scripted first-eligible answers)
#[tokio::test]
async fn test_booking_is_priced_from_the_catalog_answer() {
    let dir = tempfile::tempdir().unwrap();
    let store = migrated_store(&dir).await;

    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::FirstEligible(Some(van(3))));

    let (rental_actor, rental_client) = rental_actor::new(store, 8);
    let context = RentalContext::new(ProductClient::new(product_mock.client()))
        .with_receipts(scripted_receipts(["424242"]));
    let actor_handle = tokio::spawn(rental_actor.run(context));

    let id = rental_client.book(van_booking()).await.unwrap();
    let rental = rental_client.get(id).await.unwrap().expect("Rental not found");

    // 19.00 * 90 * 0.90 = 1539.00, tax 230.85
    assert_eq!(rental.receipt_ref, "424242");
    assert_eq!(rental.product_code, "VAN775");
    assert_eq!(rental.no_days, 90);
    assert_eq!(rental.subtotal, Decimal::new(153900, 2));
    assert_eq!(rental.tax, Decimal::new(23085, 2));
    assert_eq!(rental.total, Decimal::new(176985, 2));
    assert_eq!(rental.credit_limit, Decimal::from(200));
    assert_eq!(rental.discount_percent, Decimal::from(10));

    product_mock.verify();

    drop(rental_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_no_eligible_product_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = migrated_store(&dir).await;

    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::FirstEligible(None));

    let (rental_actor, rental_client) = rental_actor::new(store, 8);
    let actor_handle = tokio::spawn(
        rental_actor.run(RentalContext::new(ProductClient::new(product_mock.client()))),
    );

    let result = rental_client.book(van_booking()).await;
    assert_eq!(result, Err(RentalError::NoAvailableProduct("Van".into())));
    assert!(rental_client.list_rentals().await.unwrap().is_empty());

    product_mock.verify();
    drop(rental_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_reserved_unit_is_released_when_the_write_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = migrated_store(&dir).await;

    let mut product_mock = MockClient::<Product>::new();
    // First booking: lookup + reserve, written under "1".
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::FirstEligible(Some(van(3))));
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::ReserveStock(2));
    // Second booking: lookup + reserve, "1" is taken on every attempt, unit goes back.
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::FirstEligible(Some(van(2))));
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::ReserveStock(1));
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::ReleaseStock(2));

    let (rental_actor, rental_client) = rental_actor::new(store, 8);
    let context = RentalContext::new(ProductClient::new(product_mock.client()))
        .with_receipts(scripted_receipts(["1"]))
        .with_reserve_stock(true)
        .with_receipt_attempts(2);
    let actor_handle = tokio::spawn(rental_actor.run(context));

    rental_client.book(van_booking()).await.unwrap();
    let second = rental_client.book(van_booking()).await;
    assert_eq!(second, Err(RentalError::DuplicateReceipt(2)));

    product_mock.verify();
    drop(rental_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_catalog_refusal_is_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let store = migrated_store(&dir).await;

    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::FirstEligible(Some(van(1))));
    product_mock
        .expect_action()
        .return_err(FrameworkError::entity(ProductError::InsufficientStock {
            id: ProductId(2),
            requested: 1,
            available: 0,
        }));

    let (rental_actor, rental_client) = rental_actor::new(store, 8);
    let context = RentalContext::new(ProductClient::new(product_mock.client()))
        .with_reserve_stock(true);
    let actor_handle = tokio::spawn(rental_actor.run(context));

    let result = rental_client.book(van_booking()).await;
    assert_eq!(
        result,
        Err(RentalError::Product(ProductError::InsufficientStock {
            id: ProductId(2),
            requested: 1,
            available: 0,
        }))
    );
    assert!(rental_client.list_rentals().await.unwrap().is_empty());

    product_mock.verify();
    drop(rental_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_store_failure_does_not_stop_the_actor() {
    let dir = tempfile::tempdir().unwrap();
    // A directory is not a database file: every connect fails.
    let store = Store::open(dir.path());

    let product_mock = MockClient::<Product>::new();
    let (rental_actor, rental_client) = rental_actor::new(store, 8);
    let actor_handle = tokio::spawn(
        rental_actor.run(RentalContext::new(ProductClient::new(product_mock.client()))),
    );

    for _ in 0..2 {
        let result = rental_client.list_rentals().await;
        assert!(matches!(result, Err(RentalError::DatabaseError(_))));
    }

    product_mock.verify();
    drop(rental_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_unpriceable_rate_fails_one_booking_only() {
    let dir = tempfile::tempdir().unwrap();
    let store = migrated_store(&dir).await;

    let mut jet = van(1);
    jet.product_type = "Jet".to_string();
    jet.product_code = "JET1".to_string();
    jet.cost_per_day = Decimal::MAX;

    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::FirstEligible(Some(jet)));
    product_mock
        .expect_action()
        .return_ok(ProductActionResult::FirstEligible(Some(van(3))));

    let (rental_actor, rental_client) = rental_actor::new(store, 8);
    let actor_handle = tokio::spawn(
        rental_actor.run(RentalContext::new(ProductClient::new(product_mock.client()))),
    );

    let mut jet_booking = van_booking();
    jet_booking.product_type = "Jet".to_string();
    let refused = rental_client.book(jet_booking).await;
    assert!(matches!(refused, Err(RentalError::Validation(_))));

    rental_client.book(van_booking()).await.unwrap();
    assert_eq!(rental_client.list_rentals().await.unwrap().len(), 1);

    product_mock.verify();
    drop(rental_client);
    actor_handle.await.unwrap();
}
