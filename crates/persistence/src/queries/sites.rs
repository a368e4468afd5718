// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::prelude::*;
use sitecrew_domain::{
    ClientId, Site, SiteId, SiteListing, SiteType, format_date, parse_date, parse_start_time,
};
use std::str::FromStr;
use time::Date;
use tracing::debug;

use crate::data_models::{Page, Paged, SiteFilter};
use crate::diesel_schema::{clients, sites};
use crate::error::PersistenceError;

/// Diesel Queryable struct for site rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sites)]
struct SiteRow {
    site_id: i64,
    client_id: i64,
    work_date: String,
    start_time: String,
    site_type: String,
    is_cancelled: i32,
    address: Option<String>,
    manager_name: Option<String>,
    manager_phone: Option<String>,
    work_content: Option<String>,
    notes: Option<String>,
}

fn into_listing((row, client_name): (SiteRow, String)) -> Result<SiteListing, PersistenceError> {
    Ok(SiteListing {
        site: Site {
            site_id: SiteId::new(row.site_id),
            client_id: ClientId::new(row.client_id),
            date: parse_date(&row.work_date)?,
            start_time: parse_start_time(&row.start_time)?,
            site_type: SiteType::from_str(&row.site_type)?,
            cancelled: row.is_cancelled != 0,
            address: row.address,
            manager_name: row.manager_name,
            manager_phone: row.manager_phone,
            work_content: row.work_content,
            notes: row.notes,
        },
        client_name,
    })
}

backend_fn! {
/// Lists sites with their client names, filtered by date or date range.
///
/// Sites are ordered by date, start time and ID. Cancelled sites are
/// included.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn list_sites(
    conn: &mut _,
    filter: SiteFilter,
    page: Page,
) -> Result<Paged<SiteListing>, PersistenceError> {
    debug!(?filter, page = page.page, limit = page.limit, "Listing sites");

    let mut count_query = sites::table.into_boxed();
    let mut rows_query = sites::table.inner_join(clients::table).into_boxed();
    if let Some(date) = filter.date {
        count_query = count_query.filter(sites::work_date.eq(format_date(date)));
        rows_query = rows_query.filter(sites::work_date.eq(format_date(date)));
    } else {
        if let Some(from) = filter.from {
            count_query = count_query.filter(sites::work_date.ge(format_date(from)));
            rows_query = rows_query.filter(sites::work_date.ge(format_date(from)));
        }
        if let Some(to) = filter.to {
            count_query = count_query.filter(sites::work_date.le(format_date(to)));
            rows_query = rows_query.filter(sites::work_date.le(format_date(to)));
        }
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let rows: Vec<(SiteRow, String)> = rows_query
        .select((SiteRow::as_select(), clients::name))
        .order((
            sites::work_date.asc(),
            sites::start_time.asc(),
            sites::site_id.asc(),
        ))
        .limit(page.sql_limit())
        .offset(page.offset())
        .load(conn)?;

    Ok(Paged {
        items: rows.into_iter().map(into_listing).collect::<Result<_, _>>()?,
        total,
        page: page.page,
        limit: page.limit,
    })
}
}

backend_fn! {
/// Retrieves a site with its client name.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the site is not found.
pub fn get_site(conn: &mut _, site_id: i64) -> Result<Option<SiteListing>, PersistenceError> {
    debug!(site_id, "Looking up site");

    let row: Option<(SiteRow, String)> = sites::table
        .inner_join(clients::table)
        .filter(sites::site_id.eq(site_id))
        .select((SiteRow::as_select(), clients::name))
        .first(conn)
        .optional()?;

    row.map(into_listing).transpose()
}
}

backend_fn! {
/// Lists every site scheduled on `date`, cancelled ones included.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be decoded.
pub fn sites_on(conn: &mut _, date: Date) -> Result<Vec<SiteListing>, PersistenceError> {
    let rows: Vec<(SiteRow, String)> = sites::table
        .inner_join(clients::table)
        .filter(sites::work_date.eq(format_date(date)))
        .select((SiteRow::as_select(), clients::name))
        .load(conn)?;

    rows.into_iter().map(into_listing).collect()
}
}
