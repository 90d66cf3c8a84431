use anyhow::Context;
use rusqlite::Connection;

// Migrations are embedded rather than read from disk: the default store is
// ":memory:" and must always be able to initialize itself.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_init",
    "CREATE TABLE IF NOT EXISTS vehicles (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        image TEXT NOT NULL DEFAULT '',
        images TEXT NOT NULL DEFAULT '[]',
        description TEXT NOT NULL DEFAULT '',
        price_per_day REAL NOT NULL,
        price_per_km REAL NOT NULL DEFAULT 0,
        price_per_week REAL NOT NULL DEFAULT 0,
        price_per_month REAL NOT NULL DEFAULT 0,
        driver_option INTEGER NOT NULL DEFAULT 0,
        driver_price_per_day REAL NOT NULL DEFAULT 0,
        available INTEGER NOT NULL DEFAULT 1,
        features TEXT NOT NULL DEFAULT '[]',
        seats INTEGER NOT NULL DEFAULT 4,
        transmission TEXT NOT NULL DEFAULT '',
        fuel_type TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS bookings (
        id TEXT PRIMARY KEY,
        vehicle_id TEXT NOT NULL,
        customer_name TEXT NOT NULL,
        phone_number TEXT NOT NULL,
        nic TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        number_of_days INTEGER NOT NULL,
        with_driver INTEGER NOT NULL DEFAULT 0,
        total_price REAL NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        request_key TEXT,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_bookings_vehicle ON bookings(vehicle_id);
    CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_request_key
        ON bookings(request_key) WHERE request_key IS NOT NULL;",
)];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;

        if already_applied {
            continue;
        }

        conn.execute_batch(sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;

        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}
