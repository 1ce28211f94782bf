//! Diesel table definitions.
//!
//! Kept in step with `migrations/` by hand; regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Canonical hyphenated UUID string.
        #[max_length = 36]
        id -> Varchar,
        name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
