use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::{Appointment, AppointmentStatus, AppointmentStore, SupabaseAppointmentStore};
use shared_config::SlotReleasePolicy;
use shared_database::{StoreError, SupabaseClient};
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

async fn store_for(server: &MockServer) -> SupabaseAppointmentStore {
    let config = TestConfig::with_supabase_url(&server.uri()).to_app_config();
    SupabaseAppointmentStore::with_client(SupabaseClient::new(&config))
}

fn appointment() -> Appointment {
    let row = MockSupabaseResponses::appointment_row(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), "pending");
    serde_json::from_value(row).unwrap()
}

#[tokio::test]
async fn test_booking_goes_through_rpc() {
    let server = MockServer::start().await;
    let appointment = appointment();

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/book_appointment_slot"))
        .and(body_partial_json(json!({
            "release_rejected": false,
            "appointment": { "id": appointment.id, "officeTime": "10:00", "date": "2024-01-10" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::appointment_row(appointment.id, appointment.user_id, appointment.doctor_id, "pending")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let booked = store_for(&server).await.book_if_free(appointment.clone(), SlotReleasePolicy::Never).await.unwrap();

    assert_eq!(booked.id, appointment.id);
    assert_eq!(booked.status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn test_taken_slot_maps_to_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/book_appointment_slot"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "slot already booked"
        })))
        .mount(&server)
        .await;

    let result = store_for(&server).await.book_if_free(appointment(), SlotReleasePolicy::OnRejection).await;

    assert_matches!(result, Err(StoreError::Conflict(_)));
}

#[tokio::test]
async fn test_slot_check_query() {
    let server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("doctorId", format!("eq.{}", doctor_id)))
        .and(query_param("date", "eq.2024-01-10"))
        .and(query_param("officeTime", "eq.10:00"))
        .and(query_param("status", "neq.rejected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let free = store_for(&server)
        .await
        .is_slot_free(
            doctor_id,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            SlotReleasePolicy::OnRejection,
        )
        .await
        .unwrap();

    assert!(free);
}

#[tokio::test]
async fn test_slot_taken_under_default_policy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": Uuid::new_v4() }])))
        .mount(&server)
        .await;

    let free = store_for(&server)
        .await
        .is_slot_free(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            SlotReleasePolicy::Never,
        )
        .await
        .unwrap();

    assert!(!free);
}

#[tokio::test]
async fn test_status_update_reads_database_time() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    let mut row = MockSupabaseResponses::appointment_row(id, Uuid::new_v4(), Uuid::new_v4(), "accepted");
    row["officeTime"] = json!("10:00:00");

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", id)))
        .and(query_param("status", "eq.pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .expect(1)
        .mount(&server)
        .await;

    let updated = store_for(&server)
        .await
        .update_status(id, AppointmentStatus::Pending, AppointmentStatus::Accepted)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, AppointmentStatus::Accepted);
    assert_eq!(updated.office_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
}
