// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler validates its input, calls into persistence and translates
//! failures into `ApiError`. Handlers are synchronous and take the
//! persistence adapter by mutable reference; the server serializes access.

use sitecrew_domain::{
    AvailabilityEntry, Client, ClientDraft, ClientId, Coverage, DayAssignments, DayPlan,
    EligibleStaff, ReplaceDayOutcome, Sale, SaleDraft, SiteDraft, SiteListing, Staff, StaffDraft,
    StaffId, parse_date, parse_month,
};
use sitecrew_persistence::{Page, Persistence, SaleFilter, SiteFilter};
use time::Date;
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AvailabilityQuery, AvailabilityResponse, CreatedResponse, DateQuery, EligibleStaffResponse,
    ListQuery, ListResponse, MessageResponse, ReplaceAssignmentsResponse,
    ReplaceAvailabilityRequest, SaleListQuery, SiteInfo, SiteListQuery,
};

// ============================================================================
// Input parsing
// ============================================================================

/// Parses the mandatory `date` query parameter.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the date is absent or malformed.
pub fn parse_required_date(raw: Option<&str>) -> Result<Date, ApiError> {
    let raw: &str = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::invalid_input("date", "A date (YYYY-MM-DD) is required"))?;
    parse_date(raw).map_err(translate_domain_error)
}

fn parse_optional_date(raw: Option<&str>, field: &str) -> Result<Option<Date>, ApiError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| {
            parse_date(value).map_err(|e| ApiError::invalid_input(field, e.to_string()))
        })
        .transpose()
}

fn parse_number<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ApiError::invalid_input(field, format!("'{raw}' is not a valid number")))
}

/// Parses the `page` and `limit` query parameters.
///
/// Both are optional. `page` is 1-based. A `limit` above the maximum is
/// clamped rather than rejected.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if either value is not a positive
/// integer.
pub fn parse_page(page: Option<&str>, limit: Option<&str>) -> Result<Page, ApiError> {
    let page: Option<u32> = page.map(|raw| parse_number(raw, "page")).transpose()?;
    let limit: Option<u32> = limit.map(|raw| parse_number(raw, "limit")).transpose()?;

    if page == Some(0) {
        return Err(ApiError::invalid_input("page", "Page numbers start at 1"));
    }
    if limit == Some(0) {
        return Err(ApiError::invalid_input("limit", "Limit must be at least 1"));
    }

    Ok(Page::new(page, limit))
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

// ============================================================================
// Daily assignment
// ============================================================================

/// Lists the staff eligible for assignment on the queried date.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a missing or malformed date, or
/// `ApiError::Internal` if the records cannot be read.
pub fn get_eligible_staff(
    persistence: &mut Persistence,
    query: &DateQuery,
) -> Result<EligibleStaffResponse, ApiError> {
    let date: Date = parse_required_date(query.date.as_deref())?;
    let staff: Vec<EligibleStaff> = persistence
        .eligible_staff(date)
        .map_err(|e| translate_persistence_error(e, "Staff"))?;
    Ok(EligibleStaffResponse { date, staff })
}

/// Lists the sites needing coverage on the queried date, per slot.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a missing or malformed date, or
/// `ApiError::Internal` if the records cannot be read.
pub fn get_coverage(persistence: &mut Persistence, query: &DateQuery) -> Result<Coverage, ApiError> {
    let date: Date = parse_required_date(query.date.as_deref())?;
    persistence
        .coverage(date)
        .map_err(|e| translate_persistence_error(e, "Site"))
}

/// Reads the assignments recorded for the queried date.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a missing or malformed date, or
/// `ApiError::Internal` if the ledger cannot be read.
pub fn get_assignments(
    persistence: &mut Persistence,
    query: &DateQuery,
) -> Result<DayAssignments, ApiError> {
    let date: Date = parse_required_date(query.date.as_deref())?;
    persistence
        .read_assignments(date)
        .map_err(|e| translate_persistence_error(e, "Assignment"))
}

/// Replaces every assignment of `plan.date` with the plan.
///
/// # Errors
///
/// Returns:
/// - `ApiError::InvalidInput` for a blank support company or a headcount
///   below one
/// - `ApiError::DomainRuleViolation` if an assignee is listed twice for the
///   same site and slot
/// - `ApiError::ReferentialIntegrity` if the plan references a missing site
///   or an inactive staff member
pub fn replace_assignments(
    persistence: &mut Persistence,
    plan: &DayPlan,
) -> Result<ReplaceAssignmentsResponse, ApiError> {
    plan.validate().map_err(translate_domain_error)?;

    let outcome: ReplaceDayOutcome = persistence.replace_day(plan).map_err(|e| {
        warn!(date = %plan.date, error = %e, "Assignment replace rejected");
        translate_persistence_error(e, "Assignment")
    })?;

    Ok(ReplaceAssignmentsResponse {
        date: outcome.date,
        assignment_count: outcome.assignment_count,
        support_assignment_count: outcome.support_assignment_count,
        message: format!(
            "Saved {} assignments and {} support assignments",
            outcome.assignment_count, outcome.support_assignment_count
        ),
    })
}

// ============================================================================
// Clients
// ============================================================================

/// Lists clients.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for malformed paging.
pub fn list_clients(
    persistence: &mut Persistence,
    query: &ListQuery,
) -> Result<ListResponse<Client>, ApiError> {
    let page: Page = parse_page(query.page.as_deref(), query.limit.as_deref())?;
    let paged = persistence
        .list_clients(non_blank(query.q.as_deref()), page)
        .map_err(|e| translate_persistence_error(e, "Client"))?;
    Ok(ListResponse::from_paged(paged, |client| client))
}

/// Retrieves one client.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the client does not exist.
pub fn get_client(persistence: &mut Persistence, client_id: i64) -> Result<Client, ApiError> {
    persistence
        .get_client(client_id)
        .map_err(|e| translate_persistence_error(e, "Client"))?
        .ok_or_else(|| ApiError::not_found("Client", format!("Client {client_id} does not exist")))
}

/// Creates a client.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is blank.
pub fn create_client(
    persistence: &mut Persistence,
    draft: &ClientDraft,
) -> Result<CreatedResponse, ApiError> {
    draft.validate().map_err(translate_domain_error)?;
    let client_id: i64 = persistence
        .create_client(draft)
        .map_err(|e| translate_persistence_error(e, "Client"))?;
    info!(client_id, "Created client");
    Ok(CreatedResponse {
        id: client_id,
        message: format!("Created client '{}'", draft.name.trim()),
    })
}

/// Overwrites a client.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is blank or
/// `ApiError::ResourceNotFound` if the client does not exist.
pub fn update_client(
    persistence: &mut Persistence,
    client_id: i64,
    draft: &ClientDraft,
) -> Result<MessageResponse, ApiError> {
    draft.validate().map_err(translate_domain_error)?;
    persistence
        .update_client(client_id, draft)
        .map_err(|e| translate_persistence_error(e, "Client"))?;
    Ok(MessageResponse {
        message: format!("Updated client {client_id}"),
    })
}

/// Deletes a client.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the client does not exist or
/// `ApiError::ReferentialIntegrity` while sites or sales still refer to it.
pub fn delete_client(
    persistence: &mut Persistence,
    client_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence
        .delete_client(client_id)
        .map_err(|e| translate_persistence_error(e, "Client"))?;
    info!(client_id, "Deleted client");
    Ok(MessageResponse {
        message: format!("Deleted client {client_id}"),
    })
}

// ============================================================================
// Staff
// ============================================================================

/// Lists staff that have not been deleted.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for malformed paging.
pub fn list_staff(
    persistence: &mut Persistence,
    query: &ListQuery,
) -> Result<ListResponse<Staff>, ApiError> {
    let page: Page = parse_page(query.page.as_deref(), query.limit.as_deref())?;
    let paged = persistence
        .list_staff(non_blank(query.q.as_deref()), page)
        .map_err(|e| translate_persistence_error(e, "Staff"))?;
    Ok(ListResponse::from_paged(paged, |staff| staff))
}

/// Retrieves one staff member.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the staff member does not exist
/// or has been deleted.
pub fn get_staff(persistence: &mut Persistence, staff_id: i64) -> Result<Staff, ApiError> {
    persistence
        .get_staff(staff_id)
        .map_err(|e| translate_persistence_error(e, "Staff"))?
        .ok_or_else(|| ApiError::not_found("Staff", format!("Staff {staff_id} does not exist")))
}

/// Creates a staff member.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is blank.
pub fn create_staff(
    persistence: &mut Persistence,
    draft: &StaffDraft,
) -> Result<CreatedResponse, ApiError> {
    draft.validate().map_err(translate_domain_error)?;
    let staff_id: i64 = persistence
        .create_staff(draft)
        .map_err(|e| translate_persistence_error(e, "Staff"))?;
    info!(staff_id, category = %draft.employment_category, "Created staff");
    Ok(CreatedResponse {
        id: staff_id,
        message: format!("Created staff '{}'", draft.name.trim()),
    })
}

/// Overwrites a staff member.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is blank or
/// `ApiError::ResourceNotFound` if the staff member does not exist.
pub fn update_staff(
    persistence: &mut Persistence,
    staff_id: i64,
    draft: &StaffDraft,
) -> Result<MessageResponse, ApiError> {
    draft.validate().map_err(translate_domain_error)?;
    persistence
        .update_staff(staff_id, draft)
        .map_err(|e| translate_persistence_error(e, "Staff"))?;
    Ok(MessageResponse {
        message: format!("Updated staff {staff_id}"),
    })
}

/// Soft-deletes a staff member.
///
/// Existing assignments keep pointing at the record; the staff member is no
/// longer listed, eligible or assignable.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the staff member does not exist
/// or has already been deleted.
pub fn delete_staff(
    persistence: &mut Persistence,
    staff_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence
        .delete_staff(staff_id)
        .map_err(|e| translate_persistence_error(e, "Staff"))?;
    info!(staff_id, "Deleted staff");
    Ok(MessageResponse {
        message: format!("Deleted staff {staff_id}"),
    })
}

/// Lists one staff member's availability.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed range bound or
/// `ApiError::ResourceNotFound` if the staff member does not exist.
pub fn list_availability(
    persistence: &mut Persistence,
    staff_id: i64,
    query: &AvailabilityQuery,
) -> Result<AvailabilityResponse, ApiError> {
    let from: Option<Date> = parse_optional_date(query.from.as_deref(), "from")?;
    let to: Option<Date> = parse_optional_date(query.to.as_deref(), "to")?;
    get_staff(persistence, staff_id)?;

    let entries: Vec<AvailabilityEntry> = persistence
        .list_availability(staff_id, from, to)
        .map_err(|e| translate_persistence_error(e, "Availability"))?;
    Ok(AvailabilityResponse {
        staff_id: StaffId::new(staff_id),
        entries,
    })
}

/// Replaces all of one staff member's availability.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the staff member does not exist
/// or has been deleted.
pub fn replace_availability(
    persistence: &mut Persistence,
    staff_id: i64,
    request: &ReplaceAvailabilityRequest,
) -> Result<AvailabilityResponse, ApiError> {
    let written: usize = persistence
        .replace_availability(staff_id, &request.entries)
        .map_err(|e| translate_persistence_error(e, "Staff"))?;
    debug!(staff_id, written, "Replaced availability");

    let entries: Vec<AvailabilityEntry> = persistence
        .list_availability(staff_id, None, None)
        .map_err(|e| translate_persistence_error(e, "Availability"))?;
    Ok(AvailabilityResponse {
        staff_id: StaffId::new(staff_id),
        entries,
    })
}

// ============================================================================
// Sites
// ============================================================================

/// Lists sites with their client names.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for malformed paging or dates.
pub fn list_sites(
    persistence: &mut Persistence,
    query: &SiteListQuery,
) -> Result<ListResponse<SiteInfo>, ApiError> {
    let page: Page = parse_page(query.page.as_deref(), query.limit.as_deref())?;
    let filter = SiteFilter {
        date: parse_optional_date(query.date.as_deref(), "date")?,
        from: parse_optional_date(query.from.as_deref(), "from")?,
        to: parse_optional_date(query.to.as_deref(), "to")?,
    };
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(ApiError::invalid_input(
            "from",
            format!("Range start {from} is after range end {to}"),
        ));
    }

    let paged = persistence
        .list_sites(filter, page)
        .map_err(|e| translate_persistence_error(e, "Site"))?;
    Ok(ListResponse::from_paged(paged, SiteInfo::from))
}

/// Retrieves one site with its client's name.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the site does not exist.
pub fn get_site(persistence: &mut Persistence, site_id: i64) -> Result<SiteInfo, ApiError> {
    let listing: SiteListing = persistence
        .get_site(site_id)
        .map_err(|e| translate_persistence_error(e, "Site"))?
        .ok_or_else(|| ApiError::not_found("Site", format!("Site {site_id} does not exist")))?;
    Ok(SiteInfo::from(listing))
}

/// Creates a site.
///
/// # Errors
///
/// Returns `ApiError::ReferentialIntegrity` if the client does not exist.
pub fn create_site(
    persistence: &mut Persistence,
    draft: &SiteDraft,
) -> Result<CreatedResponse, ApiError> {
    let site_id: i64 = persistence
        .create_site(draft)
        .map_err(|e| translate_persistence_error(e, "Site"))?;
    info!(site_id, date = %draft.date, site_type = %draft.site_type, "Created site");
    Ok(CreatedResponse {
        id: site_id,
        message: format!("Created site for {}", draft.date),
    })
}

/// Overwrites a site. Cancelling a site is an update with `cancelled` set.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the site does not exist or
/// `ApiError::ReferentialIntegrity` if the new client does not exist.
pub fn update_site(
    persistence: &mut Persistence,
    site_id: i64,
    draft: &SiteDraft,
) -> Result<MessageResponse, ApiError> {
    persistence
        .update_site(site_id, draft)
        .map_err(|e| translate_persistence_error(e, "Site"))?;
    Ok(MessageResponse {
        message: format!("Updated site {site_id}"),
    })
}

/// Deletes a site and every assignment made to it.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the site does not exist.
pub fn delete_site(persistence: &mut Persistence, site_id: i64) -> Result<MessageResponse, ApiError> {
    persistence
        .delete_site(site_id)
        .map_err(|e| translate_persistence_error(e, "Site"))?;
    info!(site_id, "Deleted site");
    Ok(MessageResponse {
        message: format!("Deleted site {site_id}"),
    })
}

// ============================================================================
// Sales
// ============================================================================

/// Lists monthly sales.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for malformed paging, client or month.
pub fn list_sales(
    persistence: &mut Persistence,
    query: &SaleListQuery,
) -> Result<ListResponse<Sale>, ApiError> {
    let page: Page = parse_page(query.page.as_deref(), query.limit.as_deref())?;
    let filter = SaleFilter {
        client_id: non_blank(query.client_id.as_deref())
            .map(|raw| parse_number::<i64>(raw, "client_id").map(ClientId::new))
            .transpose()?,
        month: non_blank(query.month.as_deref())
            .map(|raw| parse_month(raw).map_err(translate_domain_error))
            .transpose()?,
    };

    let paged = persistence
        .list_sales(&filter, page)
        .map_err(|e| translate_persistence_error(e, "Sale"))?;
    Ok(ListResponse::from_paged(paged, |sale| sale))
}

/// Records a sale.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed month or negative
/// amount, or `ApiError::ReferentialIntegrity` if the client does not exist.
pub fn create_sale(
    persistence: &mut Persistence,
    draft: SaleDraft,
) -> Result<CreatedResponse, ApiError> {
    let draft: SaleDraft = draft.normalized().map_err(translate_domain_error)?;
    let sale_id: i64 = persistence
        .create_sale(&draft)
        .map_err(|e| translate_persistence_error(e, "Sale"))?;
    info!(sale_id, client_id = %draft.client_id, month = %draft.month, "Recorded sale");
    Ok(CreatedResponse {
        id: sale_id,
        message: format!("Recorded sale for {}", draft.month),
    })
}

/// Overwrites a sale.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed month or negative
/// amount, or `ApiError::ResourceNotFound` if the sale does not exist.
pub fn update_sale(
    persistence: &mut Persistence,
    sale_id: i64,
    draft: SaleDraft,
) -> Result<MessageResponse, ApiError> {
    let draft: SaleDraft = draft.normalized().map_err(translate_domain_error)?;
    persistence
        .update_sale(sale_id, &draft)
        .map_err(|e| translate_persistence_error(e, "Sale"))?;
    Ok(MessageResponse {
        message: format!("Updated sale {sale_id}"),
    })
}

/// Deletes a sale.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the sale does not exist.
pub fn delete_sale(persistence: &mut Persistence, sale_id: i64) -> Result<MessageResponse, ApiError> {
    persistence
        .delete_sale(sale_id)
        .map_err(|e| translate_persistence_error(e, "Sale"))?;
    Ok(MessageResponse {
        message: format!("Deleted sale {sale_id}"),
    })
}
