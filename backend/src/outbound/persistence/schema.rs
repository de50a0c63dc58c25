//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Shelter directory.
    shelter (id) {
        id -> Uuid,
        /// Max 100 characters.
        name -> Varchar,
        /// Max 255 characters.
        address -> Varchar,
        latitude -> Float8,
        longitude -> Float8,
        /// Non-negative; enforced by a check constraint.
        capacity -> Int4,
        /// Column is named `type` in SQL.
        #[sql_name = "type"]
        shelter_type -> Nullable<Varchar>,
        contact -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique index `users_username_key`.
        username -> Varchar,
        /// Argon2id PHC string.
        password -> Varchar,
        age -> Int4,
        /// Symbolic `ResidenceType` name.
        residence_type -> Varchar,
        /// Symbolic `Transport` name.
        transport -> Varchar,
        has_pet -> Bool,
        mobility_impaired -> Bool,
        health_status -> Text,
        roles -> Varchar,
    }
}
