//! Diesel table definitions for the contact and credential stores.

diesel::table! {
    /// Contact records with store-generated identity.
    contacts (id) {
        /// Generated primary key.
        id -> BigInt,
        /// Display name.
        name -> Text,
        /// Email address on record.
        email -> Text,
        /// Phone number on record.
        phone -> Text,
    }
}

diesel::table! {
    /// User accounts keyed by generated identity with unique username/email.
    users (id) {
        /// Generated primary key.
        id -> BigInt,
        /// Unique login name.
        username -> Text,
        /// Unique email address.
        email -> Text,
        /// Argon2 PHC-format password hash.
        password_hash -> Text,
        /// Role tag (`ROLE_USER` / `ROLE_ADMIN`).
        role -> Text,
    }
}
