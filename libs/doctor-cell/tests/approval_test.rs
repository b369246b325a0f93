use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;

use doctor_cell::{
    ApplyDoctorRequest, ApprovalStatus, ApprovalWorkflow, DoctorDirectory, DoctorError, DoctorStore,
    InMemoryDoctorStore,
};
use identity_cell::{
    Account, AccountStore, IdentityDirectory, IdentityError, InMemoryAccountStore, NotificationKind,
    NotificationRelay,
};

struct Fixture {
    accounts: Arc<InMemoryAccountStore>,
    doctors: Arc<InMemoryDoctorStore>,
}

impl Fixture {
    async fn new(seed: &[Account]) -> Self {
        let accounts = Arc::new(InMemoryAccountStore::new());
        for account in seed {
            accounts.insert(account.clone()).await.unwrap();
        }
        Self {
            accounts,
            doctors: Arc::new(InMemoryDoctorStore::new()),
        }
    }

    fn workflow(&self) -> ApprovalWorkflow {
        ApprovalWorkflow::new(
            self.doctors.clone(),
            IdentityDirectory::new(self.accounts.clone()),
            NotificationRelay::new(self.accounts.clone()),
        )
    }

    fn directory(&self) -> DoctorDirectory {
        DoctorDirectory::new(self.doctors.clone())
    }
}

fn application() -> ApplyDoctorRequest {
    serde_json::from_value(json!({
        "firstName": "Grace",
        "lastName": "Hopper",
        "email": "grace@example.com",
        "phone": "+15550100",
        "address": "1 Harbour Road",
        "specialization": "Cardiology",
        "experience": "12 years",
        "consultationFee": 150,
        "officeTime": ["09:00", "17:00"]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_application_approval_end_to_end() {
    let admin = Account::new("Admin", "admin@example.com", "h").with_admin(true);
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[admin.clone(), applicant.clone()]).await;
    let workflow = fixture.workflow();

    let applied = workflow.apply(applicant.id, application()).await.unwrap();
    assert_eq!(applied.profile.status, ApprovalStatus::Pending);
    assert_eq!(applied.admins_notified.delivered_to, vec![admin.id]);

    let admin_view = fixture.accounts.get(admin.id).await.unwrap().unwrap();
    assert_eq!(admin_view.notification.len(), 1);
    let record = &admin_view.notification[0];
    assert_eq!(record.kind, NotificationKind::ApplyDoctorRequest);
    assert_eq!(record.data.as_ref().unwrap()["doctorId"], json!(applied.profile.id));
    assert_eq!(record.data.as_ref().unwrap()["name"], "Grace Hopper");

    let approved = workflow.change_status(applied.profile.id, "accepted").await.unwrap();
    assert_eq!(approved.profile.status, ApprovalStatus::Accepted);
    assert!(approved.notification.is_delivered());

    let owner = fixture.accounts.get(applicant.id).await.unwrap().unwrap();
    assert!(owner.is_doctor);
    assert_eq!(owner.notification.len(), 1);
    assert_eq!(owner.notification[0].kind, NotificationKind::DoctorAccountRequestUpdated);
    assert_eq!(owner.notification[0].message, "Your doctor account request has been accepted");
    assert_eq!(owner.notification[0].on_click_path.as_deref(), Some("/notification"));

    let listed = fixture.directory().list_approved().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, applied.profile.id);
}

#[tokio::test]
async fn test_rejection_clears_doctor_flag() {
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[applicant.clone()]).await;
    let workflow = fixture.workflow();

    let applied = workflow.apply(applicant.id, application()).await.unwrap();
    let rejected = workflow.change_status(applied.profile.id, "rejected").await.unwrap();

    assert_eq!(rejected.profile.status, ApprovalStatus::Rejected);
    let owner = fixture.accounts.get(applicant.id).await.unwrap().unwrap();
    assert!(!owner.is_doctor);
    assert_eq!(owner.notification[0].message, "Your doctor account request has been rejected");
    assert!(fixture.directory().list_approved().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_every_admin_is_notified() {
    let first = Account::new("Admin One", "one@example.com", "h").with_admin(true);
    let second = Account::new("Admin Two", "two@example.com", "h").with_admin(true);
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[first.clone(), second.clone(), applicant.clone()]).await;

    let applied = fixture.workflow().apply(applicant.id, application()).await.unwrap();

    assert_eq!(applied.admins_notified.delivered_to.len(), 2);
    for admin in [first, second] {
        let stored = fixture.accounts.get(admin.id).await.unwrap().unwrap();
        assert_eq!(stored.notification.len(), 1);
    }
}

#[tokio::test]
async fn test_application_without_admins_still_succeeds() {
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[applicant.clone()]).await;

    let applied = fixture.workflow().apply(applicant.id, application()).await.unwrap();

    assert!(applied.admins_notified.delivered_to.is_empty());
    assert!(fixture.doctors.get(applied.profile.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_duplicate_and_reapplication() {
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[applicant.clone()]).await;
    let workflow = fixture.workflow();

    let first = workflow.apply(applicant.id, application()).await.unwrap();
    assert_matches!(
        workflow.apply(applicant.id, application()).await,
        Err(DoctorError::DuplicateApplication)
    );

    workflow.change_status(first.profile.id, "rejected").await.unwrap();
    let second = workflow.apply(applicant.id, application()).await.unwrap();
    assert_ne!(second.profile.id, first.profile.id);

    workflow.change_status(second.profile.id, "accepted").await.unwrap();
    assert_matches!(
        workflow.apply(applicant.id, application()).await,
        Err(DoctorError::DuplicateApplication)
    );
}

#[tokio::test]
async fn test_decided_application_is_terminal() {
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[applicant.clone()]).await;
    let workflow = fixture.workflow();

    let applied = workflow.apply(applicant.id, application()).await.unwrap();
    workflow.change_status(applied.profile.id, "accepted").await.unwrap();

    assert_matches!(
        workflow.change_status(applied.profile.id, "rejected").await,
        Err(DoctorError::InvalidTransition { from: ApprovalStatus::Accepted, .. })
    );
    let owner = fixture.accounts.get(applicant.id).await.unwrap().unwrap();
    assert!(owner.is_doctor);
    assert_eq!(owner.notification.len(), 1);
}

#[tokio::test]
async fn test_change_status_input_errors() {
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[applicant.clone()]).await;
    let workflow = fixture.workflow();
    let applied = workflow.apply(applicant.id, application()).await.unwrap();

    assert_matches!(
        workflow.change_status(applied.profile.id, "pending").await,
        Err(DoctorError::Validation(_))
    );
    assert_matches!(
        workflow.change_status(Uuid::new_v4(), "accepted").await,
        Err(DoctorError::NotFound(_))
    );

    let unchanged = fixture.doctors.get(applied.profile.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, ApprovalStatus::Pending);
}

#[tokio::test]
async fn test_missing_owner_commits_and_reports_skip() {
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[applicant.clone()]).await;
    let workflow = fixture.workflow();
    let applied = workflow.apply(applicant.id, application()).await.unwrap();

    fixture.accounts.remove(applicant.id).await.unwrap();
    let outcome = workflow.change_status(applied.profile.id, "accepted").await.unwrap();

    assert_eq!(outcome.profile.status, ApprovalStatus::Accepted);
    assert!(!outcome.notification.is_delivered());
    assert_eq!(outcome.notification.skipped.len(), 1);
}

#[tokio::test]
async fn test_unknown_applicant_is_rejected() {
    let fixture = Fixture::new(&[]).await;

    assert_matches!(
        fixture.workflow().apply(Uuid::new_v4(), application()).await,
        Err(DoctorError::Identity(IdentityError::NotFound(_)))
    );
    assert!(fixture.doctors.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_for_account() {
    let applicant = Account::new("Grace Hopper", "grace@example.com", "h");
    let fixture = Fixture::new(&[applicant.clone()]).await;
    let applied = fixture.workflow().apply(applicant.id, application()).await.unwrap();

    let found = fixture.directory().profile_for_account(applicant.id).await.unwrap();
    assert_eq!(found.id, applied.profile.id);
    assert_matches!(
        fixture.directory().profile_for_account(Uuid::new_v4()).await,
        Err(DoctorError::NoProfile)
    );
}
