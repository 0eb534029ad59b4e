//! Session workflow tests: sign-in, counting and submission outcomes

mod support;

use serde_json::json;
use shared::{fallback_config, CountSheet, Session, SubmissionKind, ValidationError};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use stock_logic_client::{init_tracing, AppSession, Config, SubmitOutcome};
use support::{event_document, FakeTransport};

async fn started(transport: &Arc<FakeTransport>) -> AppSession {
    init_tracing();
    AppSession::start(Config::default(), transport.clone()).await
}

fn counted_sheet(session: &AppSession) -> CountSheet {
    let config = session.config();
    let mut sheet = CountSheet::new();
    sheet.record(config.product_by_name("Coke 330ml").unwrap(), 2, 0);
    sheet.record(config.product_by_name("RedBull").unwrap(), 1, 3);
    sheet.record(config.product_by_name("Bombay Sapphire Gin").unwrap(), 0, 0);
    sheet
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_start_loads_configuration_once() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;

    assert_eq!(transport.fetches.load(Ordering::SeqCst), 1);
    let config = session.config();
    assert_eq!(config.locations.len(), 2);
    assert_eq!(config.location("l6").unwrap().name, "Main Storage");
    assert!(session.current_staff().is_none());
}

#[tokio::test]
async fn test_unreachable_script_still_yields_usable_config() {
    let transport = Arc::new(FakeTransport::unreachable());
    let session = started(&transport).await;

    let config = session.config();
    assert_eq!(*config, fallback_config());
    assert!(!config.products.is_empty());
    assert!(!config.locations.is_empty());
    assert!(!config.staff.is_empty());
}

#[tokio::test]
async fn test_refresh_replaces_configuration_wholesale() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;

    transport.set_document(Some(json!({
        "products": [{ "id": "p9", "category": "Beer", "name": "Lager Keg", "caseSize": 1 }],
        "locations": [{ "id": "l9", "name": "Bar 9", "type": "Bar" }],
        "staff": [{ "id": "s9", "name": "Night Crew" }]
    })));
    session.refresh_config().await;

    let config = session.config();
    assert_eq!(config.products.len(), 1);
    assert_eq!(config.products[0].name, "Lager Keg");
    assert!(config.location("l1").is_none());
    assert!(config.opening_snapshot.is_none());

    transport.set_document(None);
    session.refresh_config().await;
    assert_eq!(*session.config(), fallback_config());
    assert_eq!(transport.fetches.load(Ordering::SeqCst), 3);
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
async fn test_submit_uses_staff_from_refreshed_roster() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    transport.set_document(Some(json!({
        "products": [{ "id": "p5", "category": "Soft Drinks", "name": "Coke 330ml", "caseSize": 24 }],
        "locations": [{ "id": "l1", "name": "Bar 1A", "type": "Bar" }],
        "staff": [{ "id": "s1", "name": "David Manager", "role": "Admin" }]
    })));
    session.refresh_config().await;

    assert_eq!(session.current_staff().unwrap().name, "David Manager");
    let outcome = session.submit_stocktake("l1", Session::Opening, &sheet).await;
    assert!(outcome.is_saved());
    assert_eq!(transport.posted()[0]["data"]["staff"], "David Manager");
}

#[tokio::test]
async fn test_submit_blocked_when_staff_left_the_roster() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    transport.set_document(Some(json!({
        "products": [{ "id": "p5", "category": "Soft Drinks", "name": "Coke 330ml", "caseSize": 24 }],
        "locations": [{ "id": "l1", "name": "Bar 1A", "type": "Bar" }],
        "staff": [{ "id": "s9", "name": "Night Crew" }]
    })));
    session.refresh_config().await;

    assert!(session.current_staff().is_none());
    assert_eq!(
        session.submit_stocktake("l1", Session::Opening, &sheet).await,
        SubmitOutcome::Blocked(ValidationError::UnknownStaff("s1".to_string()))
    );
    assert_eq!(
        session.submit_transfer("l1", "l1", &sheet).await,
        SubmitOutcome::Blocked(ValidationError::UnknownStaff("s1".to_string()))
    );
    assert!(transport.posted().is_empty());
}

#[tokio::test]
async fn test_sign_in_checks_pin() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;

    assert_eq!(session.sign_in("s2", None), Err(ValidationError::PinRequired));
    assert_eq!(session.sign_in("s2", Some("1234")), Err(ValidationError::IncorrectPin));
    assert!(session.current_staff().is_none());

    let staff = session.sign_in("s2", Some("2580")).unwrap();
    assert_eq!(staff.name, "Sarah Lead");
    assert_eq!(session.current_staff().unwrap().id, "s2");

    session.sign_out();
    assert!(session.current_staff().is_none());
}

#[tokio::test]
async fn test_sign_in_without_pin_and_unknown_staff() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;

    assert_eq!(session.sign_in("s1", None).unwrap().name, "Manager Dave");
    assert_eq!(
        session.sign_in("s404", None),
        Err(ValidationError::UnknownStaff("s404".to_string()))
    );
}

// ============================================================================
// Stocktake
// ============================================================================

#[tokio::test]
async fn test_stocktake_is_saved_and_posted() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s2", Some("2580")).unwrap();
    let sheet = counted_sheet(&session);

    let outcome = session.submit_stocktake("l1", Session::Closing, &sheet).await;

    assert_eq!(outcome, SubmitOutcome::Saved(SubmissionKind::Stocktake));
    assert_eq!(outcome.notice(), "Stocktake Saved Successfully!");
    assert!(!session.is_submitting());

    let posted = transport.posted();
    assert_eq!(posted.len(), 1);
    let body = &posted[0];
    assert_eq!(body["action"], "submitStock");
    assert_eq!(body["data"]["staff"], "Sarah Lead");
    assert_eq!(body["data"]["bar"], "Bar 1A");
    assert_eq!(body["data"]["session"], "Closing");
    assert_eq!(
        body["data"]["items"],
        json!([
            { "productName": "Coke 330ml", "quantity": 48 },
            { "productName": "RedBull", "quantity": 27 }
        ])
    );
}

#[tokio::test]
async fn test_stocktake_requires_signed_in_staff() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    let sheet = counted_sheet(&session);

    let outcome = session.submit_stocktake("l1", Session::Opening, &sheet).await;

    assert_eq!(outcome, SubmitOutcome::Blocked(ValidationError::NoStaffSelected));
    assert!(transport.posted().is_empty());
}

#[tokio::test]
async fn test_empty_stocktake_is_blocked() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();

    let mut sheet = CountSheet::new();
    sheet.set("Coke 330ml", 0);
    let outcome = session.submit_stocktake("l1", Session::Opening, &sheet).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Blocked(ValidationError::EmptyCount(SubmissionKind::Stocktake))
    );
    assert_eq!(outcome.notice(), "No items counted!");
    assert!(transport.posted().is_empty());
}

#[tokio::test]
async fn test_stocktake_needs_a_location() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    assert_eq!(
        session.submit_stocktake("", Session::Opening, &sheet).await,
        SubmitOutcome::Blocked(ValidationError::MissingLocation("stocktake"))
    );
    assert_eq!(
        session.submit_stocktake("l42", Session::Opening, &sheet).await,
        SubmitOutcome::Blocked(ValidationError::UnknownLocation("l42".to_string()))
    );
    assert!(transport.posted().is_empty());
}

#[tokio::test]
async fn test_rejected_post_reports_failure() {
    let transport = Arc::new(FakeTransport::serving(event_document()).rejecting_posts());
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    let outcome = session.submit_stocktake("l1", Session::Opening, &sheet).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(outcome.notice(), "Failed to save. Check connection.");
    assert_eq!(transport.posted().len(), 1);
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_busy() {
    let transport = Arc::new(
        FakeTransport::serving(event_document()).with_post_delay(Duration::from_millis(100)),
    );
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    let (first, second) = tokio::join!(
        session.submit_stocktake("l1", Session::Opening, &sheet),
        session.submit_stocktake("l1", Session::Opening, &sheet),
    );

    assert_eq!(first, SubmitOutcome::Saved(SubmissionKind::Stocktake));
    assert_eq!(second, SubmitOutcome::Busy);
    assert_eq!(transport.posted().len(), 1);
    assert!(!session.is_submitting());
}

// ============================================================================
// Transfer
// ============================================================================

#[tokio::test]
async fn test_transfer_is_saved() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    let outcome = session.submit_transfer("l6", "l1", &sheet).await;

    assert_eq!(outcome, SubmitOutcome::Saved(SubmissionKind::Transfer));
    assert_eq!(outcome.notice(), "Transfer Recorded Successfully!");
    let body = &transport.posted()[0];
    assert_eq!(body["action"], "submitTransfer");
    assert_eq!(body["data"]["type"], "transfer");
    assert_eq!(body["data"]["source"], "Main Storage");
    assert_eq!(body["data"]["destination"], "Bar 1A");
    assert_eq!(body["data"]["staff"], "Manager Dave");
}

#[tokio::test]
async fn test_transfer_to_same_location_is_allowed() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    let outcome = session.submit_transfer("l6", "l6", &sheet).await;

    assert!(outcome.is_saved());
    let body = &transport.posted()[0];
    assert_eq!(body["data"]["source"], body["data"]["destination"]);
}

#[tokio::test]
async fn test_transfer_needs_both_ends() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    session.sign_in("s1", None).unwrap();
    let sheet = counted_sheet(&session);

    assert_eq!(
        session.submit_transfer("", "l1", &sheet).await,
        SubmitOutcome::Blocked(ValidationError::MissingLocation("source"))
    );
    assert_eq!(
        session.submit_transfer("l6", "", &sheet).await,
        SubmitOutcome::Blocked(ValidationError::MissingLocation("destination"))
    );
    assert_eq!(
        session.submit_transfer("l6", "l1", &CountSheet::new()).await.notice(),
        "No items selected for transfer!"
    );
    assert!(transport.posted().is_empty());
}

// ============================================================================
// Opening snapshot
// ============================================================================

#[tokio::test]
async fn test_opening_variances_against_snapshot() {
    let transport = Arc::new(FakeTransport::serving(event_document()));
    let session = started(&transport).await;
    let sheet = counted_sheet(&session);

    let variances = session.opening_variances("l1", &sheet).unwrap();

    assert_eq!(variances.len(), 1);
    assert_eq!(variances[0].product_name, "RedBull");
    assert_eq!(variances[0].opening, 24);
    assert_eq!(variances[0].counted, 27);
    assert_eq!(variances[0].delta(), 3);

    assert!(session.opening_variances("l6", &sheet).unwrap().is_empty());

    let mut empty_shelf = CountSheet::new();
    empty_shelf.record(session.config().product_by_name("Coke 330ml").unwrap(), 0, 0);
    let variances = session.opening_variances("l1", &empty_shelf).unwrap();
    assert_eq!(variances.len(), 1);
    assert_eq!(variances[0].product_name, "Coke 330ml");
    assert_eq!(variances[0].counted, 0);
    assert_eq!(variances[0].delta(), -48);
    assert_eq!(
        session.opening_variances("", &sheet),
        Err(ValidationError::MissingLocation("stocktake"))
    );
}
