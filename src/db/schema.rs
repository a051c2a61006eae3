//! Catalog schema and migrations for fmngr.
//!
//! Migrations are applied in order when the database is opened; the
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: storage locations and file metadata
    r#"
CREATE TABLE storage (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    path        TEXT NOT NULL,
    is_default  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE file (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    size        INTEGER NOT NULL,
    ext         TEXT NOT NULL,
    storage_id  INTEGER NOT NULL REFERENCES storage(id)
);

CREATE INDEX idx_file_storage_id ON file(storage_id);
"#,
    // v2: at most one default storage, at most one row per physical path
    r#"
CREATE UNIQUE INDEX idx_storage_single_default ON storage(is_default) WHERE is_default = 1;
CREATE UNIQUE INDEX idx_file_storage_name ON file(storage_id, title, ext);
"#,
];
