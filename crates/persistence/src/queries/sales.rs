// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{ClientId, Sale};
use tracing::debug;

use crate::data_models::{Page, Paged, SaleFilter};
use crate::diesel_schema::sales;
use crate::error::PersistenceError;

/// Diesel Queryable struct for sale rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sales)]
struct SaleRow {
    sale_id: i64,
    client_id: i64,
    sale_month: String,
    amount: i64,
    notes: Option<String>,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Self {
            sale_id: row.sale_id,
            client_id: ClientId::new(row.client_id),
            month: row.sale_month,
            amount: row.amount,
            notes: row.notes,
        }
    }
}

backend_fn! {
/// Lists sales, newest month first, optionally filtered by client and month.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_sales(
    conn: &mut _,
    filter: &SaleFilter,
    page: Page,
) -> Result<Paged<Sale>, PersistenceError> {
    debug!(?filter, page = page.page, limit = page.limit, "Listing sales");

    let mut count_query = sales::table.into_boxed();
    let mut rows_query = sales::table.into_boxed();
    if let Some(client_id) = filter.client_id {
        count_query = count_query.filter(sales::client_id.eq(client_id.value()));
        rows_query = rows_query.filter(sales::client_id.eq(client_id.value()));
    }
    if let Some(month) = &filter.month {
        count_query = count_query.filter(sales::sale_month.eq(month.clone()));
        rows_query = rows_query.filter(sales::sale_month.eq(month.clone()));
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<SaleRow> = rows_query
        .select(SaleRow::as_select())
        .order((sales::sale_month.desc(), sales::sale_id.asc()))
        .limit(page.sql_limit())
        .offset(page.offset())
        .load(conn)?;

    Ok(Paged {
        items: rows.into_iter().map(Sale::from).collect(),
        total,
        page: page.page,
        limit: page.limit,
    })
}
}

backend_fn! {
/// Retrieves a sale by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the sale is not found.
pub fn get_sale(conn: &mut _, sale_id: i64) -> Result<Option<Sale>, PersistenceError> {
    let row: Option<SaleRow> = sales::table
        .filter(sales::sale_id.eq(sale_id))
        .select(SaleRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Sale::from))
}
}
