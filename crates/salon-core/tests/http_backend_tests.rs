mod common;

use common::{spawn_backend, test_config, PASSWORD, REFRESH_TOKEN};
use jiff::civil::date;
use salon_core::{
    session::Session, AuthTokens, BookingBackend, BookingError, BookingStatus, ContactInfo,
    CreateBooking, Credentials, HttpBackendBuilder, Id, SessionStore, SlotQuery,
};

#[tokio::test]
async fn test_list_services_narrows_wire_shapes() {
    let (url, _state) = spawn_backend().await;
    let (_temp_dir, config) = test_config(&url);
    let backend = HttpBackendBuilder::new(config).build().unwrap();

    let services = backend.list_services().await.unwrap();
    assert_eq!(services.len(), 4);
    assert_eq!(services[1].price, 1200);
    assert!(!services[3].is_active);

    let stylists = backend.list_stylists().await.unwrap();
    assert_eq!(stylists[0].specialty, vec!["hair", "nail"]);
    assert_eq!(stylists[1].experience, 3);
}

#[tokio::test]
async fn test_available_slots_sends_query_and_normalizes_labels() {
    let (url, state) = spawn_backend().await;
    let (_temp_dir, config) = test_config(&url);
    let backend = HttpBackendBuilder::new(config).build().unwrap();

    let slots = backend
        .available_slots(&SlotQuery {
            stylist_id: 4,
            date: date(2026, 10, 20),
            duration: 105,
        })
        .await
        .unwrap();

    let labels: Vec<&str> = slots.iter().map(|s| s.time.as_str()).collect();
    assert_eq!(labels, vec!["17:30", "18:00", "18:30"]);
    assert!(!slots[1].available);

    let state = state.lock().unwrap();
    let query = &state.slot_queries[0];
    assert_eq!(query["stylist_id"], "4");
    assert_eq!(query["date"], "2026-10-20");
    assert_eq!(query["duration"], "105");
}

#[tokio::test]
async fn test_login_then_profile() {
    let (url, _state) = spawn_backend().await;
    let (_temp_dir, config) = test_config(&url);
    let backend = HttpBackendBuilder::new(config).build().unwrap();

    assert_eq!(backend.current_identity().await.unwrap(), None);

    let sign_in = backend
        .login(&Credentials {
            email: "amy@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(sign_in.tokens.refresh_token.as_deref(), Some(REFRESH_TOKEN));
    assert_eq!(sign_in.identity.as_ref().map(|i| i.id.as_str()), Some("7"));

    let identity = backend.current_identity().await.unwrap().unwrap();
    assert_eq!(identity.name, "Amy Chen");
    assert_eq!(identity.phone.as_deref(), Some("0912345678"));
}

#[tokio::test]
async fn test_login_rejection_keeps_message_and_session() {
    let (url, state) = spawn_backend().await;
    let (temp_dir, config) = test_config(&url);
    let store = SessionStore::new(temp_dir.path());
    store
        .save(&Session::new(
            AuthTokens {
                access_token: "stale".to_string(),
                refresh_token: Some(REFRESH_TOKEN.to_string()),
            },
            None,
        ))
        .unwrap();
    let backend = HttpBackendBuilder::new(config)
        .with_session_store(store.clone())
        .build()
        .unwrap();

    let err = backend
        .login(&Credentials {
            email: "amy@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Rejected { status: 401, .. }));
    assert_eq!(err.user_message(), "Invalid email or password");

    assert_eq!(state.lock().unwrap().refresh_calls, 0);
    assert!(backend.has_session().await);
    assert!(store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_create_booking_surfaces_server_message() {
    let (url, state) = spawn_backend().await;
    let (_temp_dir, config) = test_config(&url);
    let backend = HttpBackendBuilder::new(config)
        .with_tokens(Some(AuthTokens {
            access_token: "access-1".to_string(),
            refresh_token: None,
        }))
        .build()
        .unwrap();
    let request = CreateBooking {
        service_ids: vec![1, 2],
        stylist_id: 4,
        date: date(2026, 10, 20),
        time: "18:30".to_string(),
        contact: ContactInfo {
            name: "Amy Chen".to_string(),
            phone: "0912345678".to_string(),
            ..ContactInfo::default()
        },
    };

    let booking = backend.create_booking(&request).await.unwrap();
    assert_eq!(booking.id, 42);
    assert_eq!(booking.service_ids, vec![1, 2]);
    assert_eq!(booking.time, "18:30");
    assert_eq!(booking.total_price, Some(2000));
    {
        let state = state.lock().unwrap();
        let body = &state.created[0];
        assert_eq!(body["service_ids"], serde_json::json!([1, 2]));
        assert_eq!(body["service_id"], 1);
        assert_eq!(body["booking_date"], "2026-10-20");
        assert_eq!(body["customer_name"], "Amy Chen");
    }

    state.lock().unwrap().reject_booking = Some("This slot was just taken".to_string());
    let err = backend.create_booking(&request).await.unwrap_err();
    assert!(matches!(err, BookingError::Rejected { status: 409, .. }));
    assert_eq!(err.user_message(), "This slot was just taken");
}

#[tokio::test]
async fn test_accepted_booking_with_unknown_status_is_confirmed() {
    let (url, state) = spawn_backend().await;
    let (_temp_dir, config) = test_config(&url);
    state.lock().unwrap().created_status = "booked".to_string();
    let backend = HttpBackendBuilder::new(config)
        .with_tokens(Some(AuthTokens {
            access_token: "access-1".to_string(),
            refresh_token: None,
        }))
        .build()
        .unwrap();
    let request = CreateBooking {
        service_ids: vec![1],
        stylist_id: 4,
        date: date(2026, 10, 20),
        time: "18:30".to_string(),
        contact: ContactInfo {
            name: "Amy Chen".to_string(),
            phone: "0912345678".to_string(),
            ..ContactInfo::default()
        },
    };

    let booking = backend.create_booking(&request).await.unwrap();
    assert_eq!(booking.id, 42);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.date, date(2026, 10, 20));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once_and_persisted() {
    let (url, state) = spawn_backend().await;
    let (temp_dir, config) = test_config(&url);
    let store = SessionStore::new(temp_dir.path());
    store
        .save(&Session::new(
            AuthTokens {
                access_token: "stale".to_string(),
                refresh_token: Some(REFRESH_TOKEN.to_string()),
            },
            None,
        ))
        .unwrap();
    let backend = HttpBackendBuilder::new(config)
        .with_session_store(store.clone())
        .build()
        .unwrap();

    let bookings = backend.list_bookings().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, BookingStatus::Confirmed);
    assert_eq!(bookings[0].date, date(2026, 10, 20));
    assert_eq!(state.lock().unwrap().refresh_calls, 1);

    let session = store.load().unwrap().expect("session should survive refresh");
    assert_eq!(session.tokens.access_token, "access-2");
    assert_eq!(session.tokens.refresh_token.as_deref(), Some(REFRESH_TOKEN));

    backend.list_bookings().await.unwrap();
    assert_eq!(state.lock().unwrap().refresh_calls, 1);
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let (url, state) = spawn_backend().await;
    let (temp_dir, config) = test_config(&url);
    let store = SessionStore::new(temp_dir.path());
    store
        .save(&Session::new(
            AuthTokens {
                access_token: "stale".to_string(),
                refresh_token: Some("revoked".to_string()),
            },
            None,
        ))
        .unwrap();
    let backend = HttpBackendBuilder::new(config)
        .with_session_store(store.clone())
        .build()
        .unwrap();

    let err = backend.list_bookings().await.unwrap_err();
    assert!(matches!(err, BookingError::Unauthorized));
    assert_eq!(state.lock().unwrap().refresh_calls, 1);
    assert!(!backend.has_session().await);
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_cancel_booking_accepts_single_service_id() {
    let (url, _state) = spawn_backend().await;
    let (_temp_dir, config) = test_config(&url);
    let backend = HttpBackendBuilder::new(config)
        .with_tokens(Some(AuthTokens {
            access_token: "access-1".to_string(),
            refresh_token: None,
        }))
        .build()
        .unwrap();

    let booking = backend.cancel_booking(&Id { id: 42 }).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
    assert_eq!(booking.service_ids, vec![1]);
    assert_eq!(booking.date, date(2026, 10, 20));

    let err = backend.cancel_booking(&Id { id: 7 }).await.unwrap_err();
    assert_eq!(err.to_string(), "Booking not found");
}

#[tokio::test]
async fn test_branding_falls_back_to_default() {
    let (url, state) = spawn_backend().await;
    let (_temp_dir, config) = test_config(&url);
    let backend = HttpBackendBuilder::new(config.clone()).build().unwrap();

    let context = salon_core::AppContext::initialize(config.clone(), &backend).await;
    assert_eq!(context.branding.name, "Studio K");
    assert!(!context.is_signed_in());

    state.lock().unwrap().branding_available = false;
    let context = salon_core::AppContext::initialize(config, &backend).await;
    assert_eq!(context.branding, salon_core::Branding::default());
}
