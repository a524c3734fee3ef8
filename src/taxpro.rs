//! Tax professional lookup against the relational store.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::types::TaxPro;

// Premier partners have a prior-season volume of at least 250.
const TAXPRO_QUERY: &str = r#"
    SELECT
        E.efin AS efin,
        E.company_name AS company_name,
        D.prior_volume AS product_count,
        CASE WHEN D.prior_volume < 250 THEN 0 ELSE 1 END AS premier_partner
    FROM ero E
    JOIN eroyeardetail D ON E.id = D.ero_id
    WHERE D.systemyear = ?1
        AND D.status IN ('A', 'C', 'D')
        AND D.last_import_date <> ''
        AND E.efin = ?2
    LIMIT 1"#;

/// Looks up the tax professional registered under `efin` for `year`.
///
/// Returns an empty vector when nothing matches; at most one row is read.
pub async fn find_taxpros(pool: &SqlitePool, year: &str, efin: &str) -> Result<Vec<TaxPro>, sqlx::Error> {
    let row = sqlx::query(TAXPRO_QUERY)
        .bind(year)
        .bind(efin)
        .fetch_optional(pool)
        .await?;

    row.map(|r| taxpro_from_row(&r)).transpose().map(|found| found.into_iter().collect())
}

fn taxpro_from_row(row: &SqliteRow) -> Result<TaxPro, sqlx::Error> {
    let premier: i64 = row.try_get("premier_partner")?;
    Ok(TaxPro {
        efin: row.try_get("efin")?,
        company_name: row.try_get("company_name")?,
        product_count: row.try_get("product_count")?,
        premier_partner: premier != 0,
    })
}
