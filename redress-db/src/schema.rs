//! SQLite schema definitions for the complaint tracker

/// Complete tracker schema
///
/// Statuses, priorities, and roles are stored as snake_case text; the service
/// layer owns the enum conversions. Timestamps are RFC 3339 UTC text, which
/// compares lexicographically in date order.
pub const REDRESS_SCHEMA: &str = r#"
-- ============================================
-- Profiles (one row per external identity)
-- ============================================
CREATE TABLE IF NOT EXISTS profiles (
    user_id        TEXT PRIMARY KEY,
    full_name      TEXT NOT NULL,
    email          TEXT NOT NULL,
    student_number TEXT,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

-- ============================================
-- Role assignments (student / admin)
-- ============================================
CREATE TABLE IF NOT EXISTS role_assignments (
    user_id    TEXT NOT NULL,
    role       TEXT NOT NULL,
    granted_by TEXT,
    created_at TEXT NOT NULL,
    PRIMARY KEY (user_id, role)
);

-- ============================================
-- Categories (unique names)
-- ============================================
CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    description TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- ============================================
-- Complaints
-- ============================================
CREATE TABLE IF NOT EXISTS complaints (
    id              TEXT PRIMARY KEY,
    owner_id        TEXT NOT NULL,
    category_id     TEXT NOT NULL,
    subject         TEXT NOT NULL,
    description     TEXT NOT NULL,
    status          TEXT NOT NULL,
    priority        TEXT NOT NULL,
    admin_response  TEXT,
    attachment_path TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    resolved_at     TEXT
);
CREATE INDEX IF NOT EXISTS idx_complaints_owner ON complaints (owner_id);
CREATE INDEX IF NOT EXISTS idx_complaints_category ON complaints (category_id);
CREATE INDEX IF NOT EXISTS idx_complaints_status ON complaints (status);

-- ============================================
-- Complaint comments (append-only threads)
-- ============================================
CREATE TABLE IF NOT EXISTS complaint_comments (
    id           TEXT PRIMARY KEY,
    complaint_id TEXT NOT NULL,
    author_id    TEXT NOT NULL,
    content      TEXT NOT NULL,
    is_admin     INTEGER NOT NULL,
    created_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_comments_complaint ON complaint_comments (complaint_id);

-- ============================================
-- Complaint activity log (append-only)
-- ============================================
CREATE TABLE IF NOT EXISTS complaint_logs (
    id           TEXT PRIMARY KEY,
    complaint_id TEXT NOT NULL,
    action       TEXT NOT NULL,
    old_status   TEXT,
    new_status   TEXT,
    notes        TEXT,
    performed_by TEXT NOT NULL,
    created_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_logs_complaint ON complaint_logs (complaint_id);
CREATE INDEX IF NOT EXISTS idx_logs_created ON complaint_logs (created_at);
"#;
