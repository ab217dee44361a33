//! PostgreSQL-backed repository.

use super::{CompanyRepository, NewCompany};
use crate::error::AppError;
use crate::model::{Company, CompanyQuery, Employee, EmployeeQuery, PagedList};
use crate::sql::{
    count_companies, select_companies, select_companies_by_ids, select_employees, QueryBuf,
    COMPANIES_TABLE, COMPANY_COLUMNS, EMPLOYEES_TABLE, EMPLOYEE_COLUMNS,
};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        PgCompanyRepository { pool }
    }

    async fn fetch_companies(&self, q: &QueryBuf) -> Result<Vec<Company>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Company>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn insert_employee(conn: &mut PgConnection, e: &Employee) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            EMPLOYEES_TABLE, EMPLOYEE_COLUMNS
        );
        tracing::debug!(sql = %sql, id = %e.id, "query (tx)");
        sqlx::query(&sql)
            .bind(e.id)
            .bind(e.company_id)
            .bind(&e.employee_no)
            .bind(&e.first_name)
            .bind(&e.last_name)
            .bind(e.gender)
            .bind(e.date_of_birth)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn list_companies(&self, query: &CompanyQuery) -> Result<PagedList<Company>, AppError> {
        let count = count_companies(query);
        tracing::debug!(sql = %count.sql, params = ?count.params, "query");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count.sql);
        for p in &count.params {
            count_query = count_query.bind(p.clone());
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?;

        let items = self.fetch_companies(&select_companies(query)).await?;
        Ok(PagedList::new(
            items,
            total.max(0) as u64,
            query.page_number,
            query.page_size,
        ))
    }

    async fn get_companies(&self, ids: &[Uuid]) -> Result<Vec<Company>, AppError> {
        self.fetch_companies(&select_companies_by_ids(ids)).await
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE \"id\" = $1", COMPANY_COLUMNS, COMPANIES_TABLE);
        tracing::debug!(sql = %sql, id = %id, "query");
        Ok(sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn company_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE \"id\" = $1)", COMPANIES_TABLE);
        Ok(sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn add_companies(&self, companies: &[NewCompany]) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6)",
            COMPANIES_TABLE, COMPANY_COLUMNS
        );
        let mut tx = self.pool.begin().await?;
        for (company, employees) in companies {
            tracing::debug!(sql = %sql, id = %company.id, "query (tx)");
            sqlx::query(&sql)
                .bind(company.id)
                .bind(&company.name)
                .bind(&company.introduction)
                .bind(&company.country)
                .bind(&company.industry)
                .bind(&company.product)
                .execute(&mut *tx)
                .await?;
            for e in employees {
                Self::insert_employee(&mut *tx, e).await?;
            }
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_company(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("DELETE FROM {} WHERE \"company_id\" = $1", EMPLOYEES_TABLE))
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query(&format!("DELETE FROM {} WHERE \"id\" = $1", COMPANIES_TABLE))
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn list_employees(
        &self,
        company_id: Uuid,
        query: &EmployeeQuery,
    ) -> Result<Vec<Employee>, AppError> {
        let q = select_employees(company_id, query);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut rows = sqlx::query_as::<_, Employee>(&q.sql);
        for p in &q.params {
            rows = rows.bind(p.clone());
        }
        Ok(rows.fetch_all(&self.pool).await?)
    }

    async fn get_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Option<Employee>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE \"company_id\" = $1 AND \"id\" = $2",
            EMPLOYEE_COLUMNS, EMPLOYEES_TABLE
        );
        tracing::debug!(sql = %sql, company_id = %company_id, id = %employee_id, "query");
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .bind(company_id)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn add_employee(&self, employee: &Employee) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_employee(&mut *conn, employee).await
    }

    async fn update_employee(&self, e: &Employee) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET \"employee_no\" = $3, \"first_name\" = $4, \"last_name\" = $5, \
             \"gender\" = $6, \"date_of_birth\" = $7 WHERE \"company_id\" = $1 AND \"id\" = $2",
            EMPLOYEES_TABLE
        );
        tracing::debug!(sql = %sql, id = %e.id, "query");
        let updated = sqlx::query(&sql)
            .bind(e.company_id)
            .bind(e.id)
            .bind(&e.employee_no)
            .bind(&e.first_name)
            .bind(&e.last_name)
            .bind(e.gender)
            .bind(e.date_of_birth)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(updated > 0)
    }

    async fn delete_employee(&self, company_id: Uuid, employee_id: Uuid) -> Result<bool, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE \"company_id\" = $1 AND \"id\" = $2",
            EMPLOYEES_TABLE
        );
        let deleted = sqlx::query(&sql)
            .bind(company_id)
            .bind(employee_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
