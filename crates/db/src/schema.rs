use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: [(&str, &str); 6] = [
    (
        "credentials",
        r#"
        CREATE TABLE IF NOT EXISTS credentials (
            user_id UUID PRIMARY KEY,
            email VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "sessions",
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token VARCHAR(128) PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES credentials(user_id) ON DELETE CASCADE,
            email VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "access",
        r#"
        CREATE TABLE IF NOT EXISTS access (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NULL,
            name VARCHAR(255) NULL,
            role VARCHAR(64) NULL,
            phone_number VARCHAR(32) NULL,
            email_id VARCHAR(255) NOT NULL,
            is_active BOOLEAN NULL DEFAULT TRUE,
            is_first_login BOOLEAN NOT NULL DEFAULT FALSE,
            centre_name VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "centres",
        r#"
        CREATE TABLE IF NOT EXISTS centres (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL UNIQUE,
            location VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "schedule",
        r#"
        CREATE TABLE IF NOT EXISTS schedule (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            centre_name VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            subject VARCHAR(255) NOT NULL DEFAULT '',
            topic TEXT NOT NULL,
            custom_module_code VARCHAR(64) NOT NULL,
            start_datetime TIMESTAMP NOT NULL,
            end_datetime TIMESTAMP NOT NULL,
            num_questions INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT non_negative_questions CHECK (num_questions >= 0)
        );
        "#,
    ),
    (
        "schedule_progress",
        r#"
        CREATE TABLE IF NOT EXISTS schedule_progress (
            user_id UUID NOT NULL,
            schedule_id UUID NOT NULL REFERENCES schedule(id) ON DELETE CASCADE,
            is_done BOOLEAN NOT NULL DEFAULT FALSE,
            remarks TEXT NOT NULL DEFAULT '',
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (user_id, schedule_id)
        );
        "#,
    ),
];

const INDEXES: [&str; 5] = [
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_credentials_email ON credentials(LOWER(email))",
    "CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_access_email ON access(LOWER(email_id))",
    "CREATE INDEX IF NOT EXISTS idx_schedule_centre_date ON schedule(centre_name, date)",
    "CREATE INDEX IF NOT EXISTS idx_schedule_progress_user_id ON schedule_progress(user_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for (table, ddl) in TABLES {
        tracing::debug!("Ensuring table {}", table);
        sqlx::query(ddl).execute(pool).await?;
    }

    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
