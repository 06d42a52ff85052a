//! Behavioural coverage for the in-memory directory.

use std::collections::HashSet;
use std::sync::Arc;

use super::*;
use rstest::{fixture, rstest};

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("test emails are well formed")
}

fn register(directory: &InMemoryUserDirectory, name: &str, mail: &str, secret: &str) -> UserId {
    directory
        .register(DisplayName::new(name), email(mail), Credential::new(secret))
        .expect("registration succeeds")
}

fn user(id: u64, name: &str, mail: &str) -> User {
    User::new(UserId::new(id), DisplayName::new(name), email(mail))
}

#[fixture]
fn directory() -> InMemoryUserDirectory {
    InMemoryUserDirectory::new()
}

/// Directory holding Alice (id 1) and Bob (id 2).
#[fixture]
fn populated() -> InMemoryUserDirectory {
    let directory = InMemoryUserDirectory::new();
    register(&directory, "Alice", "a@x.com", "pw123456");
    register(&directory, "Bob", "b@x.com", "pw223344");
    directory
}

#[rstest]
fn registration_issues_sequential_ids_and_lists_both(directory: InMemoryUserDirectory) {
    assert_eq!(register(&directory, "Alice", "a@x.com", "pw123456"), UserId::new(1));
    assert_eq!(register(&directory, "Bob", "b@x.com", "pw223344"), UserId::new(2));

    let listed: HashSet<_> = directory
        .list_all()
        .into_iter()
        .map(|u| (u.id(), u.name().to_string(), u.email().to_string()))
        .collect();
    let expected: HashSet<_> = [
        (UserId::new(1), "Alice".to_owned(), "a@x.com".to_owned()),
        (UserId::new(2), "Bob".to_owned(), "b@x.com".to_owned()),
    ]
    .into_iter()
    .collect();
    assert_eq!(listed, expected);
}

#[rstest]
fn duplicate_registration_leaves_directory_unchanged(directory: InMemoryUserDirectory) {
    register(&directory, "Alice", "a@x.com", "pw123456");
    let before = directory.list_all();

    let result = directory.register(
        DisplayName::new("Eve"),
        email("a@x.com"),
        Credential::new("other"),
    );

    assert_eq!(result, Err(DirectoryError::DuplicateEmail));
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.list_all(), before);
    // The failed attempt must not have consumed an identifier.
    assert_eq!(register(&directory, "Carol", "c@x.com", "pw332211"), UserId::new(2));
}

#[rstest]
fn email_uniqueness_is_case_sensitive(directory: InMemoryUserDirectory) {
    register(&directory, "Alice", "a@x.com", "pw123456");
    assert_eq!(register(&directory, "Alice2", "A@x.com", "pw123456"), UserId::new(2));
}

#[rstest]
fn authenticate_returns_projection_for_matching_credential(populated: InMemoryUserDirectory) {
    let found = populated
        .authenticate(&email("a@x.com"), &Credential::new("pw123456"))
        .expect("credentials match");
    assert_eq!(found, user(1, "Alice", "a@x.com"));
}

#[rstest]
#[case("a@x.com", "wrong")]
#[case("nobody@x.com", "pw123456")]
#[case("b@x.com", "pw123456")]
fn authenticate_failures_are_indistinguishable(
    populated: InMemoryUserDirectory,
    #[case] mail: &str,
    #[case] secret: &str,
) {
    let err = populated
        .authenticate(&email(mail), &Credential::new(secret))
        .expect_err("authentication must fail");
    assert_eq!(err, DirectoryError::InvalidCredentials);
    assert_eq!(err.to_string(), "invalid credentials");
}

#[rstest]
fn authenticate_does_not_mutate(populated: InMemoryUserDirectory) {
    let before = populated.list_all();
    let _ = populated.authenticate(&email("a@x.com"), &Credential::new("wrong"));
    let _ = populated.authenticate(&email("a@x.com"), &Credential::new("pw123456"));
    assert_eq!(populated.list_all(), before);
}

#[rstest]
fn list_all_on_empty_directory_is_empty(directory: InMemoryUserDirectory) {
    assert!(directory.list_all().is_empty());
    assert!(directory.is_empty());
}

#[rstest]
fn get_by_id_finds_live_records(populated: InMemoryUserDirectory) {
    assert_eq!(
        populated.get_by_id(UserId::new(2)),
        Ok(user(2, "Bob", "b@x.com"))
    );
}

#[rstest]
fn deleted_ids_are_never_reissued(directory: InMemoryUserDirectory) {
    let id = register(&directory, "Alice", "a@x.com", "pw123456");
    assert_eq!(id, UserId::new(1));

    directory.delete(id).expect("delete succeeds");

    assert_eq!(
        directory.get_by_id(id),
        Err(DirectoryError::NotFound { id })
    );
    assert_eq!(register(&directory, "Carol", "c@x.com", "pw332211"), UserId::new(2));
}

#[rstest]
fn deleting_frees_the_email_for_reuse(directory: InMemoryUserDirectory) {
    let id = register(&directory, "Alice", "a@x.com", "pw123456");
    directory.delete(id).expect("delete succeeds");
    assert_eq!(register(&directory, "Alice", "a@x.com", "pw123456"), UserId::new(2));
}

#[rstest]
fn update_rejects_email_owned_by_another_record(populated: InMemoryUserDirectory) {
    let result = populated.update(UserId::new(1), DisplayName::new("A2"), email("b@x.com"));

    assert_eq!(result, Err(DirectoryError::DuplicateEmail));
    assert_eq!(
        populated.get_by_id(UserId::new(1)),
        Ok(user(1, "Alice", "a@x.com"))
    );
}

#[rstest]
fn update_to_own_email_is_permitted(populated: InMemoryUserDirectory) {
    populated
        .update(UserId::new(1), DisplayName::new("Alicia"), email("a@x.com"))
        .expect("self email update succeeds");
    assert_eq!(
        populated.get_by_id(UserId::new(1)),
        Ok(user(1, "Alicia", "a@x.com"))
    );
}

#[rstest]
fn update_keeps_credential(populated: InMemoryUserDirectory) {
    populated
        .update(UserId::new(1), DisplayName::new("Alice"), email("alice@x.com"))
        .expect("update succeeds");

    let found = populated
        .authenticate(&email("alice@x.com"), &Credential::new("pw123456"))
        .expect("old credential still valid");
    assert_eq!(found.id(), UserId::new(1));
    assert_eq!(
        populated.authenticate(&email("a@x.com"), &Credential::new("pw123456")),
        Err(DirectoryError::InvalidCredentials)
    );
}

#[rstest]
fn update_checks_existence_before_uniqueness(populated: InMemoryUserDirectory) {
    let missing = UserId::new(99);
    assert_eq!(
        populated.update(missing, DisplayName::new("Ghost"), email("a@x.com")),
        Err(DirectoryError::NotFound { id: missing })
    );
}

#[rstest]
#[case(UserId::new(0))]
#[case(UserId::new(3))]
#[case(UserId::new(u64::MAX))]
fn never_issued_ids_are_not_found(populated: InMemoryUserDirectory, #[case] id: UserId) {
    let expected = Err(DirectoryError::NotFound { id });
    assert_eq!(populated.get_by_id(id), Err(DirectoryError::NotFound { id }));
    assert_eq!(
        populated.update(id, DisplayName::new("Ghost"), email("ghost@x.com")),
        expected
    );
    assert_eq!(populated.delete(id), expected);
    assert_eq!(populated.len(), 2);
}

#[rstest]
fn already_deleted_ids_stay_not_found(populated: InMemoryUserDirectory) {
    let id = UserId::new(1);
    populated.delete(id).expect("first delete succeeds");

    assert_eq!(populated.delete(id), Err(DirectoryError::NotFound { id }));
    assert_eq!(
        populated.update(id, DisplayName::new("Alice"), email("a@x.com")),
        Err(DirectoryError::NotFound { id })
    );
}

#[rstest]
fn projections_never_carry_credentials(populated: InMemoryUserDirectory) {
    let listed = serde_json::to_string(&populated.list_all()).expect("serialise list");
    let single = serde_json::to_string(&populated.get_by_id(UserId::new(1)).expect("user 1"))
        .expect("serialise user");
    let authed = serde_json::to_string(
        &populated
            .authenticate(&email("b@x.com"), &Credential::new("pw223344"))
            .expect("credentials match"),
    )
    .expect("serialise user");

    for rendered in [listed, single, authed] {
        assert!(!rendered.contains("pw123456"));
        assert!(!rendered.contains("pw223344"));
        assert!(!rendered.contains("credential"));
        assert!(!rendered.contains("password"));
    }
}

#[rstest]
fn concurrent_registrations_of_one_email_admit_exactly_one() {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let outcomes: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let directory = Arc::clone(&directory);
                scope.spawn(move || {
                    directory.register(
                        DisplayName::new(format!("racer {n}")),
                        email("race@x.com"),
                        Credential::new("pw123456"),
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });

    let winners = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(winners, 1);
    assert_eq!(directory.len(), 1);
}

#[rstest]
fn concurrent_registrations_receive_unique_increasing_ids() {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let ids: Vec<UserId> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..32)
            .map(|n| {
                let directory = Arc::clone(&directory);
                scope.spawn(move || {
                    directory
                        .register(
                            DisplayName::new("racer"),
                            email(&format!("racer{n}@x.com")),
                            Credential::new("pw123456"),
                        )
                        .expect("distinct emails register")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });

    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 32);
    assert_eq!(ids.iter().copied().max(), Some(UserId::new(32)));
    assert_eq!(ids.iter().copied().min(), Some(UserId::FIRST));
}
