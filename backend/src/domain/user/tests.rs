//! Tests for the domain user model.

use super::*;
use crate::test_support::FixedClock;
use chrono::{TimeZone, Timelike};
use rstest::{fixture, rstest};

const VALID_ID: &str = "0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a";

#[fixture]
fn clock() -> FixedClock {
    let at = Utc
        .with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
        .with_nanosecond(123_456_789)
        .expect("valid nanoseconds");
    FixedClock::new(at)
}

fn alice(clock: &FixedClock) -> User {
    User::new(
        UserName::new("Alice").expect("valid name"),
        EmailAddress::new("alice@example.com").expect("valid email"),
        clock,
    )
}

#[rstest]
fn parse_accepts_canonical_uuid() {
    let id = UserId::parse(VALID_ID).expect("valid id");
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a", UserValidationError::InvalidId)]
#[case("0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a\n", UserValidationError::InvalidId)]
fn parse_rejects_malformed_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::parse(raw), Err(expected));
}

#[rstest]
fn generated_ids_are_version_seven() {
    let id = UserId::generate();
    assert_eq!(id.as_uuid().get_version_num(), 7);
}

#[rstest]
fn generated_ids_increase_in_generation_order() {
    let ids: Vec<UserId> = (0..256).map(|_| UserId::generate()).collect();
    for pair in ids.windows(2) {
        let [earlier, later] = pair else {
            unreachable!("windows(2) yields pairs");
        };
        assert!(earlier < later, "{earlier} should sort before {later}");
        assert!(earlier.to_string() < later.to_string());
    }
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_names_are_rejected(#[case] raw: &str) {
    assert_eq!(UserName::new(raw), Err(UserValidationError::EmptyName));
}

#[rstest]
#[case("")]
#[case("\t")]
fn blank_emails_are_rejected(#[case] raw: &str) {
    assert_eq!(EmailAddress::new(raw), Err(UserValidationError::EmptyEmail));
}

#[rstest]
fn email_syntax_is_not_checked_by_the_domain() {
    let email = EmailAddress::new("not an email").expect("non-empty email is accepted");
    assert_eq!(email.as_ref(), "not an email");
}

#[rstest]
fn new_user_stamps_equal_timestamps(clock: FixedClock) {
    let user = alice(&clock);

    assert_eq!(user.created_at(), user.updated_at());
    assert_eq!(user.name().as_ref(), "Alice");
    assert_eq!(user.email().as_ref(), "alice@example.com");
}

#[rstest]
fn new_user_truncates_timestamps_to_microseconds(clock: FixedClock) {
    let user = alice(&clock);
    assert_eq!(user.created_at().nanosecond(), 123_456_000);
}

#[rstest]
fn new_users_receive_distinct_ids(clock: FixedClock) {
    let first = alice(&clock);
    let second = alice(&clock);

    assert_ne!(first.id(), second.id());
    assert!(first.id() < second.id());
}

#[rstest]
fn from_parts_round_trips_a_new_user(clock: FixedClock) {
    let user = alice(&clock);
    let rebuilt = User::from_parts(UserParts {
        id: *user.id(),
        name: user.name().clone(),
        email: user.email().clone(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    })
    .expect("valid parts");

    assert_eq!(rebuilt, user);
}

#[rstest]
fn from_parts_rejects_timestamps_out_of_order(clock: FixedClock) {
    let user = alice(&clock);
    let result = User::from_parts(UserParts {
        id: *user.id(),
        name: user.name().clone(),
        email: user.email().clone(),
        created_at: user.updated_at() + chrono::TimeDelta::seconds(1),
        updated_at: user.updated_at(),
    });

    assert_eq!(result, Err(UserValidationError::TimestampsOutOfOrder));
}
