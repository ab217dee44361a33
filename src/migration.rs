//! Create the `companies` and `employees` tables and insert the sample data.
//! Both steps are idempotent and safe to run on every start-up.

use crate::error::AppError;
use crate::sql::{COMPANIES_TABLE, EMPLOYEES_TABLE};
use sqlx::PgPool;

/// (id, name, introduction, country, industry, product)
const SEED_COMPANIES: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("bbdee09c-089b-4d30-bece-44df5923716c", "Microsoft", "Great Company", "USA", "Software", "Software"),
    ("bbdee09c-089b-4d30-bece-44df59237144", "AOL", "Not Exists?", "USA", "Internet", "Website"),
    ("5efc910b-2f45-43df-afae-620d40542833", "Amazon", "Store", "USA", "ECommerce", "Books"),
    ("6fb600c1-9011-4fd7-9234-881379716433", "NetEase", "Music?", "China", "Internet", "Songs"),
    ("bbdee09c-089b-4d30-bece-44df59237133", "Jingdong", "Brothers", "China", "ECommerce", "Goods"),
    ("5efc910b-2f45-43df-afae-620d40542822", "360", "- -", "China", "Security", "Security Product"),
    ("6fb600c1-9011-4fd7-9234-881379716422", "Youtube", "Blocked", "USA", "Internet", "Videos"),
    ("bbdee09c-089b-4d30-bece-44df59237122", "Twitter", "Blocked", "USA", "Internet", "Tweets"),
    ("5efc910b-2f45-43df-afae-620d40542811", "Suning", "From Jiangsu", "China", "ECommerce", "Goods"),
    ("6fb600c1-9011-4fd7-9234-881379716411", "AC Milan", "Football Club", "Italy", "Football", "Football Match"),
    ("bbdee09c-089b-4d30-bece-44df59237111", "SpaceX", "Wow", "USA", "Technology", "Rocket"),
    ("5efc910b-2f45-43df-afae-620d40542800", "Adobe", "Photoshop?", "USA", "Software", "Software"),
    ("6fb600c1-9011-4fd7-9234-881379716400", "Baidu", "From Beijing", "China", "Internet", "Software"),
    ("bbdee09c-089b-4d30-bece-44df59237100", "Tencent", "From Shenzhen", "China", "ECommerce", "Software"),
    ("5efc910b-2f45-43df-afae-620d40542853", "Alipapa", "Fubao Company", "China", "Internet", "Software"),
    ("6fb600c1-9011-4fd7-9234-881379716440", "Google", "Don't be evil", "USA", "Internet", "Software"),
    ("6fb600c1-9011-4fd7-9234-881379716444", "Yahoo", "Who?", "USA", "Internet", "Mail"),
    ("5efc910b-2f45-43df-afae-620d40542844", "Firefox", "Is it a company?", "USA", "Internet", "Browser"),
];

/// (id, company_id, employee_no, first_name, last_name, gender, date_of_birth)
const SEED_EMPLOYEES: &[(&str, &str, &str, &str, &str, i32, &str)] = &[
    ("4b501cb3-d168-4cc0-b375-48fb33f318a4", "bbdee09c-089b-4d30-bece-44df5923716c", "MSFT231", "Nick", "Carter", 1, "1976-01-02"),
    ("7eaa532c-1be5-472c-a738-94fd26e5fad6", "bbdee09c-089b-4d30-bece-44df5923716c", "MSFT245", "Vince", "Carter", 1, "1981-12-05"),
    ("72457e73-ea34-4e02-b575-8d384e82a481", "6fb600c1-9011-4fd7-9234-881379716440", "G003", "Mary", "King", 0, "1986-11-04"),
    ("7644b71d-d74e-43e2-ac32-8cbadd7b1c3a", "6fb600c1-9011-4fd7-9234-881379716440", "G097", "Kevin", "Richardson", 1, "1977-04-06"),
    ("679dfd33-32e4-4393-b061-f7abb8956f53", "5efc910b-2f45-43df-afae-620d40542853", "A009", "卡", "里", 0, "1967-01-24"),
    ("1861341e-b42b-410c-ae21-cf11f36fc574", "5efc910b-2f45-43df-afae-620d40542853", "A404", "Not", "Man", 1, "1957-03-08"),
];

/// DDL in dependency order: companies, employees, then the foreign-key index.
pub fn schema_statements() -> Vec<String> {
    vec![
        format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
  "id" UUID NOT NULL PRIMARY KEY,
  "name" VARCHAR(100) NOT NULL,
  "introduction" VARCHAR(500),
  "country" TEXT,
  "industry" TEXT,
  "product" TEXT
)"#,
            COMPANIES_TABLE
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
  "id" UUID NOT NULL PRIMARY KEY,
  "company_id" UUID NOT NULL REFERENCES {} ("id") ON DELETE RESTRICT,
  "employee_no" VARCHAR(10) NOT NULL,
  "first_name" VARCHAR(50) NOT NULL,
  "last_name" VARCHAR(50) NOT NULL,
  "gender" INTEGER NOT NULL,
  "date_of_birth" TIMESTAMP NOT NULL
)"#,
            EMPLOYEES_TABLE, COMPANIES_TABLE
        ),
        format!(
            r#"CREATE INDEX IF NOT EXISTS "ix_employees_company_id" ON {} ("company_id")"#,
            EMPLOYEES_TABLE
        ),
    ]
}

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for sql in schema_statements() {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    Ok(())
}

/// Insert the sample rows; existing ids are left untouched.
pub async fn seed(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    let company_sql = format!(
        "INSERT INTO {} (\"id\", \"name\", \"introduction\", \"country\", \"industry\", \"product\") \
         VALUES ($1::uuid, $2, $3, $4, $5, $6) ON CONFLICT (\"id\") DO NOTHING",
        COMPANIES_TABLE
    );
    for (id, name, intro, country, industry, product) in SEED_COMPANIES {
        sqlx::query(&company_sql)
            .bind(*id)
            .bind(*name)
            .bind(*intro)
            .bind(*country)
            .bind(*industry)
            .bind(*product)
            .execute(&mut *tx)
            .await?;
    }
    let employee_sql = format!(
        "INSERT INTO {} (\"id\", \"company_id\", \"employee_no\", \"first_name\", \"last_name\", \"gender\", \"date_of_birth\") \
         VALUES ($1::uuid, $2::uuid, $3, $4, $5, $6, $7::date) ON CONFLICT (\"id\") DO NOTHING",
        EMPLOYEES_TABLE
    );
    for (id, company_id, no, first, last, gender, dob) in SEED_EMPLOYEES {
        sqlx::query(&employee_sql)
            .bind(*id)
            .bind(*company_id)
            .bind(*no)
            .bind(*first)
            .bind(*last)
            .bind(*gender)
            .bind(*dob)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::info!(
        companies = SEED_COMPANIES.len(),
        employees = SEED_EMPLOYEES.len(),
        "seed data applied"
    );
    Ok(())
}
