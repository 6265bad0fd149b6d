use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Business tables, created when absent
const TABLES: &[(&str, &str)] = &[
    (
        "orders",
        r#"
        CREATE TABLE orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            facebook TEXT NOT NULL DEFAULT '',
            chapter TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            color TEXT NOT NULL,
            size TEXT NOT NULL,
            design TEXT NOT NULL,
            note TEXT,
            quantity INTEGER NOT NULL DEFAULT 1,
            price REAL NOT NULL DEFAULT 0,
            payment_status TEXT NOT NULL DEFAULT 'pending',
            is_defective INTEGER NOT NULL DEFAULT 0,
            defective_note TEXT,
            batch TEXT,
            batch_folder TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "trash_orders",
        r#"
        CREATE TABLE trash_orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            original_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            facebook TEXT NOT NULL DEFAULT '',
            chapter TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            color TEXT NOT NULL,
            size TEXT NOT NULL,
            design TEXT NOT NULL,
            note TEXT,
            quantity INTEGER NOT NULL DEFAULT 1,
            price REAL NOT NULL DEFAULT 0,
            payment_status TEXT NOT NULL DEFAULT 'pending',
            batch TEXT,
            batch_folder TEXT,
            deleted_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "colors",
        r#"
        CREATE TABLE colors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "designs",
        r#"
        CREATE TABLE designs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "batch_folders",
        r#"
        CREATE TABLE batch_folders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "system_log",
        r#"
        CREATE TABLE system_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            source TEXT NOT NULL,
            category TEXT NOT NULL,
            message TEXT NOT NULL
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders (name, phone, facebook, address);",
    "CREATE INDEX IF NOT EXISTS idx_orders_batch_folder ON orders (batch_folder);",
    "CREATE INDEX IF NOT EXISTS idx_trash_orders_deleted_at ON trash_orders (deleted_at);",
];

/// Columns added after the first release: (table, column, definition)
const LATE_COLUMNS: &[(&str, &str, &str)] = &[
    ("orders", "batch", "TEXT"),
    ("orders", "batch_folder", "TEXT"),
    ("orders", "defective_note", "TEXT"),
    ("trash_orders", "batch", "TEXT"),
    ("trash_orders", "batch_folder", "TEXT"),
];

/// sqlite:// URL for a file path; forward slashes, leading slash before a drive letter
pub fn sqlite_url(absolute_path: &Path) -> String {
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", absolute_path.display());
    // SQLite has one writer; a read-then-write transaction must not interleave
    // with another connection's write.
    let mut options = ConnectOptions::new(db_url);
    options.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await?;

    for (table, create_sql) in TABLES {
        if !table_exists(&conn, table).await? {
            tracing::info!("Creating {} table", table);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                create_sql.to_string(),
            ))
            .await?;
        }
    }

    for (table, column, definition) in LATE_COLUMNS {
        ensure_column(&conn, table, column, definition).await?;
    }

    for index_sql in INDEXES {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            index_sql.to_string(),
        ))
        .await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, table: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [table.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_column(
    conn: &DatabaseConnection,
    table: &str,
    column: &str,
    definition: &str,
) -> anyhow::Result<()> {
    let pragma = format!("PRAGMA table_info('{}');", table);
    let cols = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await?;
    let exists = cols.iter().any(|row| {
        row.try_get::<String>("", "name")
            .map(|name| name == column)
            .unwrap_or(false)
    });
    if !exists {
        tracing::info!("Adding {} column to {}", column, table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("ALTER TABLE {} ADD COLUMN {} {};", table, column, definition),
        ))
        .await?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url() {
        assert_eq!(
            sqlite_url(Path::new("/srv/db/undergrads.db")),
            "sqlite:///srv/db/undergrads.db?mode=rwc"
        );
        assert_eq!(
            sqlite_url(Path::new("C:\\data\\undergrads.db")),
            "sqlite:///C:/data/undergrads.db?mode=rwc"
        );
    }

    #[test]
    fn test_every_table_has_create_statement() {
        for (table, sql) in TABLES {
            assert!(sql.contains(&format!("CREATE TABLE {} (", table)));
        }
    }
}
