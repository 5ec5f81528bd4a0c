//! SQLite schema definition.

/// Complete database schema for calorizer.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Reference Data
-- ============================================================================

CREATE TABLE IF NOT EXISTS lookup_categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name_en TEXT NOT NULL CHECK (length(name_en) <= 200),
    name_ar TEXT NOT NULL CHECK (length(name_ar) <= 200),
    code INTEGER NOT NULL UNIQUE,
    created_by INTEGER NOT NULL,
    created_on TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%S+00:00', 'now'))
);

CREATE TABLE IF NOT EXISTS lookups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name_en TEXT NOT NULL CHECK (length(name_en) <= 200),
    name_ar TEXT NOT NULL CHECK (length(name_ar) <= 200),
    code TEXT CHECK (code IS NULL OR length(code) <= 20),
    category_id INTEGER NOT NULL REFERENCES lookup_categories(id) ON DELETE RESTRICT,
    created_by INTEGER NOT NULL,
    created_on TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%S+00:00', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_lookups_category ON lookups(category_id);

-- Gender options (category code 1)
INSERT OR IGNORE INTO lookup_categories (id, name_en, name_ar, code, created_by)
VALUES (1, 'Gender', 'النوع', 1, 1);

INSERT OR IGNORE INTO lookups (id, name_en, name_ar, code, category_id, created_by)
VALUES (1, 'Male', 'ذكر', 'M', 1, 1);
INSERT OR IGNORE INTO lookups (id, name_en, name_ar, code, category_id, created_by)
VALUES (2, 'Female', 'أنثى', 'F', 1, 1);

-- ============================================================================
-- Clients
-- ============================================================================

CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name_en TEXT NOT NULL,
    full_name_ar TEXT,
    mobile_number TEXT,
    gender_id INTEGER NOT NULL REFERENCES lookups(id) ON DELETE RESTRICT,
    address TEXT,
    date_of_birth TEXT NOT NULL,
    weight REAL,                                 -- latest weight history entry
    height REAL                                  -- latest weight history entry
);

CREATE INDEX IF NOT EXISTS idx_clients_gender ON clients(gender_id);

-- ============================================================================
-- Client Sub-Records (Append-Only)
-- ============================================================================

CREATE TABLE IF NOT EXISTS weight_histories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    weight REAL,
    height REAL,
    created_on TEXT NOT NULL,
    created_by INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_weight_histories_client ON weight_histories(client_id);

CREATE TABLE IF NOT EXISTS biochemical_medical_tests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    medical_data TEXT NOT NULL,
    created_on TEXT NOT NULL,
    created_by INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_biochemical_tests_client ON biochemical_medical_tests(client_id);

CREATE TABLE IF NOT EXISTS drugs_supplements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    drug TEXT NOT NULL,
    created_on TEXT NOT NULL,
    created_by INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_drugs_supplements_client ON drugs_supplements(client_id);

CREATE TABLE IF NOT EXISTS medical_histories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    medical_note TEXT NOT NULL,
    created_on TEXT NOT NULL,
    created_by INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_medical_histories_client ON medical_histories(client_id);
"#;
