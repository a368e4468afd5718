// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::SaleDraft;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::sales;
use crate::error::PersistenceError;

backend_fn! {
/// Records a monthly sale and returns its ID.
///
/// The draft must already be normalized.
///
/// # Errors
///
/// Returns `PersistenceError::ReferentialIntegrity` if the client does not
/// exist, or another error if the insert fails.
pub fn create_sale(conn: &mut _, draft: &SaleDraft) -> Result<i64, PersistenceError> {
    diesel::insert_into(sales::table)
        .values((
            sales::client_id.eq(draft.client_id.value()),
            sales::sale_month.eq(draft.month.as_str()),
            sales::amount.eq(draft.amount),
            sales::notes.eq(draft.notes.as_deref()),
        ))
        .execute(conn)?;

    let sale_id: i64 = conn.get_last_insert_rowid()?;
    info!(sale_id, month = %draft.month, "Sale recorded");
    Ok(sale_id)
}
}

backend_fn! {
/// Overwrites a sale.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the sale does not exist.
pub fn update_sale(conn: &mut _, sale_id: i64, draft: &SaleDraft) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(sales::table)
        .filter(sales::sale_id.eq(sale_id))
        .set((
            sales::client_id.eq(draft.client_id.value()),
            sales::sale_month.eq(draft.month.as_str()),
            sales::amount.eq(draft.amount),
            sales::notes.eq(draft.notes.as_deref()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Sale {sale_id}")));
    }
    info!(sale_id, "Sale updated");
    Ok(())
}
}

backend_fn! {
/// Deletes a sale.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the sale does not exist.
pub fn delete_sale(conn: &mut _, sale_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(sales::table)
        .filter(sales::sale_id.eq(sale_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Sale {sale_id}")));
    }
    info!(sale_id, "Sale deleted");
    Ok(())
}
}
