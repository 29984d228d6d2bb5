//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Daily production records.
    daily_production_stats (id) {
        id -> Uuid,
        /// Insertion order.
        seq -> Int8,
        date -> Text,
        product_type -> Nullable<Text>,
        total_output -> Nullable<Int8>,
        defective_rate -> Nullable<Float8>,
        machine_count -> Nullable<Int8>,
        shift -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Energy consumption records.
    energy_stats (id) {
        id -> Uuid,
        seq -> Int8,
        date -> Text,
        electricity -> Nullable<Float8>,
        water -> Nullable<Float8>,
        gas -> Nullable<Float8>,
        area_output -> Nullable<Float8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Equipment utilisation records.
    equipment_stats (id) {
        id -> Uuid,
        seq -> Int8,
        date -> Text,
        equipment_code -> Nullable<Text>,
        run_time -> Nullable<Float8>,
        downtime -> Nullable<Float8>,
        fault_count -> Nullable<Int8>,
        utilization_rate -> Nullable<Float8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Material consumption records.
    material_usage_stats (id) {
        id -> Uuid,
        seq -> Int8,
        date -> Text,
        material_name -> Nullable<Text>,
        used_amount -> Nullable<Float8>,
        stock_remaining -> Nullable<Float8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Quality sampling records.
    quality_stats (id) {
        id -> Uuid,
        seq -> Int8,
        date -> Text,
        product_type -> Nullable<Text>,
        sample_count -> Nullable<Int8>,
        qualified_count -> Nullable<Int8>,
        avg_thickness -> Nullable<Float8>,
        avg_porosity -> Nullable<Float8>,
        avg_strength -> Nullable<Float8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accounts. `account` carries a unique constraint.
    accounts (id) {
        id -> Uuid,
        seq -> Int8,
        account -> Text,
        /// Argon2 PHC string.
        password_hash -> Text,
        phone -> Nullable<Text>,
        gender -> Nullable<Text>,
        age -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Orders, owned by an account.
    orders (id) {
        id -> Uuid,
        seq -> Int8,
        user_id -> Uuid,
        product -> Text,
        quantity -> Int8,
        price -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(orders -> accounts (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    daily_production_stats,
    energy_stats,
    equipment_stats,
    material_usage_stats,
    orders,
    quality_stats,
);
