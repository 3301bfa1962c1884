//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    /// Credential store. `email` is unique and stored lowercased.
    accounts (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Text,
        /// `officer` or `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project records. Coordinates are both null or both set.
    projects (id) {
        id -> Uuid,
        project_name -> Varchar,
        sector -> Varchar,
        /// `Ongoing` or `Completed`.
        status -> Varchar,
        village_name -> Varchar,
        latitude -> Nullable<Float8>,
        longitude -> Nullable<Float8>,
        image_url -> Nullable<Text>,
        created_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> accounts (created_by));
diesel::allow_tables_to_appear_in_same_query!(accounts, projects);
