//! SQLite-backed company store.
//!
//! Rows are keyed by the canonical (digits-only) CNPJ; uniqueness of the
//! identifier is the database's PRIMARY KEY constraint, so of two
//! concurrent inserts with the same key exactly one commits and the other
//! surfaces as [`StoreError::Duplicate`].

use anyhow::Context;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use thiserror::Error;

use cadastro_core::{Company, CompanyPatch, DomainError};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same canonical CNPJ already exists.
    #[error("company already registered")]
    Duplicate,

    /// No record for the given key.
    #[error("company not found")]
    NotFound,

    /// A stored row no longer passes domain validation.
    #[error("stored record failed domain validation: {0}")]
    Corrupted(#[source] DomainError),

    /// Any other database fault.
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Allow-listed sort columns for [`CompanyStore::list`].
///
/// The sort key arrives as an untrusted query-string value; it is parsed
/// into this closed enum before ever reaching SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Cnpj,
    RazaoSocial,
    NomeFantasia,
    Cnae,
}

impl SortField {
    /// Parse a query-string value. `id` is accepted as an alias for the
    /// primary-key column.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" | "cnpj" => Some(Self::Cnpj),
            "razao_social" => Some(Self::RazaoSocial),
            "nome_fantasia" => Some(Self::NomeFantasia),
            "cnae" => Some(Self::Cnae),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Cnpj => "cnpj",
            Self::RazaoSocial => "razao_social",
            Self::NomeFantasia => "nome_fantasia",
            Self::Cnae => "cnae",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One page of a listing plus the page count for the requested page size.
#[derive(Debug)]
pub struct CompanyPage {
    pub items: Vec<Company>,
    pub total_pages: u32,
}

/// Durable keyed storage for `Company` records.
#[derive(Debug, Clone)]
pub struct CompanyStore {
    pool: SqlitePool,
}

impl CompanyStore {
    /// Wrap an existing pool and ensure the schema exists.
    pub async fn new(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                cnpj          TEXT PRIMARY KEY,
                razao_social  TEXT NOT NULL,
                nome_fantasia TEXT NOT NULL,
                cnae          TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create companies table")?;

        Ok(Self { pool })
    }

    /// Connect to `database_url` and bootstrap the schema.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("failed to open company database at {database_url}"))?;
        Self::new(pool).await
    }

    /// Close the underlying pool. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert a new record; the PRIMARY KEY enforces identifier uniqueness.
    pub async fn insert(&self, company: &Company) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO companies (cnpj, razao_social, nome_fantasia, cnae)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(company.cnpj().as_str())
        .bind(company.legal_name())
        .bind(company.trade_name())
        .bind(company.cnae().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            _ => StoreError::Db(e),
        })?;

        Ok(())
    }

    /// Look up a record by its canonical (digits-only) key.
    pub async fn find(&self, cnpj: &str) -> Result<Company, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT cnpj, razao_social, nome_fantasia, cnae
            FROM companies
            WHERE cnpj = ?1
            "#,
        )
        .bind(cnpj)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_company(&row),
            None => Err(StoreError::NotFound),
        }
    }

    /// Apply a partial update; absent fields keep their stored values.
    ///
    /// The identifier and legal name have no update path.
    pub async fn update(&self, cnpj: &str, patch: &CompanyPatch) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE companies
            SET nome_fantasia = COALESCE(?2, nome_fantasia),
                cnae          = COALESCE(?3, cnae)
            WHERE cnpj = ?1
            "#,
        )
        .bind(cnpj)
        .bind(patch.trade_name.as_deref())
        .bind(patch.cnae.as_ref().map(|c| c.as_str()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Delete a record by key.
    pub async fn delete(&self, cnpj: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM companies WHERE cnpj = ?1")
            .bind(cnpj)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Paginated, sorted listing.
    ///
    /// `page` is 1-indexed; pages past the end come back empty rather than
    /// erroring. `total_pages` is the page count for `per_page`, computed
    /// from the full table.
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
        sort: SortField,
        dir: SortDir,
    ) -> Result<CompanyPage, StoreError> {
        let per_page = per_page.max(1);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await?;
        let total_pages = (count as u32).div_ceil(per_page);

        let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);

        // The ORDER BY column comes from the closed enum above, never from
        // user input directly.
        let sql = format!(
            "SELECT cnpj, razao_social, nome_fantasia, cnae FROM companies \
             ORDER BY {} {} LIMIT ?1 OFFSET ?2",
            sort.column(),
            dir.sql(),
        );

        let rows = sqlx::query(&sql)
            .bind(i64::from(per_page))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .iter()
            .map(row_to_company)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompanyPage { items, total_pages })
    }
}

/// Rehydrate a row through the domain constructor, so the stored-rows-are-
/// valid invariant is re-checked on the way out.
fn row_to_company(row: &SqliteRow) -> Result<Company, StoreError> {
    let cnpj: String = row.try_get("cnpj")?;
    let razao_social: String = row.try_get("razao_social")?;
    let nome_fantasia: String = row.try_get("nome_fantasia")?;
    let cnae: String = row.try_get("cnae")?;

    Company::new(&cnpj, razao_social, nome_fantasia, &cnae).map_err(|e| {
        tracing::error!("stored company {cnpj} failed rehydration: {e}");
        StoreError::Corrupted(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// A single shared in-memory connection: with more than one, each
    /// pooled connection would see its own empty `:memory:` database.
    async fn test_store() -> CompanyStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        CompanyStore::new(pool).await.expect("schema bootstrap")
    }

    /// Valid CNPJ with `n` encoded in the 12-digit base (n >= 1; zero
    /// would produce the rejected all-zeros pattern).
    fn test_cnpj(n: u32) -> String {
        let mut d: Vec<u32> = format!("{n:012}").bytes().map(|b| u32::from(b - b'0')).collect();
        for weights in [
            &[5u32, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2][..],
            &[6u32, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2][..],
        ] {
            let sum: u32 = d.iter().zip(weights).map(|(x, w)| x * w).sum();
            d.push(match sum % 11 {
                0 | 1 => 0,
                r => 11 - r,
            });
        }
        d.into_iter().map(|x| char::from_digit(x, 10).unwrap()).collect()
    }

    fn company(n: u32) -> Company {
        Company::new(
            &test_cnpj(n),
            format!("Empresa {n} Ltda"),
            format!("Empresa {n}"),
            "6201501",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let store = test_store().await;
        let c = company(1);

        store.insert(&c).await.unwrap();
        let found = store.find(c.cnpj().as_str()).await.unwrap();

        assert_eq!(found, c);
    }

    #[tokio::test]
    async fn duplicate_insert_fails_with_duplicate() {
        let store = test_store().await;
        let c = company(1);

        store.insert(&c).await.unwrap();
        let err = store.insert(&c).await.unwrap_err();

        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn find_missing_is_not_found() {
        let store = test_store().await;
        let err = store.find(&test_cnpj(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let store = test_store().await;
        let c = company(1);
        store.insert(&c).await.unwrap();

        let patch = CompanyPatch {
            trade_name: Some("Novo Nome".to_string()),
            cnae: None,
        };
        store.update(c.cnpj().as_str(), &patch).await.unwrap();

        let found = store.find(c.cnpj().as_str()).await.unwrap();
        assert_eq!(found.trade_name(), "Novo Nome");
        assert_eq!(found.cnae(), c.cnae());
        assert_eq!(found.legal_name(), c.legal_name());
        assert_eq!(found.cnpj(), c.cnpj());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = test_store().await;
        let err = store
            .update(&test_cnpj(7), &CompanyPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = test_store().await;
        let c = company(1);
        store.insert(&c).await.unwrap();

        store.delete(c.cnpj().as_str()).await.unwrap();

        let err = store.find(c.cnpj().as_str()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        let err = store.delete(c.cnpj().as_str()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn list_paginates_25_records_into_3_pages() {
        let store = test_store().await;
        for n in 1..=25 {
            store.insert(&company(n)).await.unwrap();
        }

        let page = store
            .list(1, 10, SortField::Cnpj, SortDir::Asc)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_pages, 3);

        let last = store
            .list(3, 10, SortField::Cnpj, SortDir::Asc)
            .await
            .unwrap();
        assert_eq!(last.items.len(), 5);

        let past_end = store
            .list(4, 10, SortField::Cnpj, SortDir::Asc)
            .await
            .unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_pages, 3);
    }

    #[tokio::test]
    async fn list_respects_sort_direction() {
        let store = test_store().await;
        for n in 1..=3 {
            store.insert(&company(n)).await.unwrap();
        }

        let asc = store
            .list(1, 10, SortField::Cnpj, SortDir::Asc)
            .await
            .unwrap();
        let desc = store
            .list(1, 10, SortField::Cnpj, SortDir::Desc)
            .await
            .unwrap();

        let mut reversed = desc.items.clone();
        reversed.reverse();
        assert_eq!(asc.items, reversed);
    }

    #[tokio::test]
    async fn list_sorts_by_trade_name() {
        let store = test_store().await;
        let names = ["Gamma", "Alpha", "Beta"];
        for (i, name) in names.iter().enumerate() {
            let c = Company::new(&test_cnpj(i as u32 + 1), format!("{name} Ltda"), *name, "1")
                .unwrap();
            store.insert(&c).await.unwrap();
        }

        let page = store
            .list(1, 10, SortField::NomeFantasia, SortDir::Asc)
            .await
            .unwrap();
        let listed: Vec<&str> = page.items.iter().map(|c| c.trade_name()).collect();
        assert_eq!(listed, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn sort_field_parse_accepts_the_allow_list_only() {
        assert_eq!(SortField::parse("id"), Some(SortField::Cnpj));
        assert_eq!(SortField::parse("cnpj"), Some(SortField::Cnpj));
        assert_eq!(SortField::parse("razao_social"), Some(SortField::RazaoSocial));
        assert_eq!(SortField::parse("nome_fantasia"), Some(SortField::NomeFantasia));
        assert_eq!(SortField::parse("cnae"), Some(SortField::Cnae));
        assert_eq!(SortField::parse("password"), None);
        assert_eq!(SortField::parse(""), None);
    }

    #[test]
    fn sort_dir_parse_is_strict() {
        assert_eq!(SortDir::parse("asc"), Some(SortDir::Asc));
        assert_eq!(SortDir::parse("desc"), Some(SortDir::Desc));
        assert_eq!(SortDir::parse("ASC"), None);
        assert_eq!(SortDir::parse("up"), None);
    }
}
