// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::ClientConfig;
use crate::error::GatewayError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sitecrew_domain::{
    Coverage, DayAssignments, DayPlan, EligibleStaff, ReplaceDayOutcome, format_date,
};
use std::future::Future;
use time::Date;
use tracing::{debug, warn};

/// The server operations the assignment screen needs.
pub trait AssignmentGateway {
    /// Fetches staff eligible on `date`.
    fn fetch_eligible_staff(
        &self,
        date: Date,
    ) -> impl Future<Output = Result<Vec<EligibleStaff>, GatewayError>> + Send;

    /// Fetches the sites needing coverage on `date`.
    fn fetch_coverage(
        &self,
        date: Date,
    ) -> impl Future<Output = Result<Coverage, GatewayError>> + Send;

    /// Fetches the persisted assignments for `date`.
    fn fetch_assignments(
        &self,
        date: Date,
    ) -> impl Future<Output = Result<DayAssignments, GatewayError>> + Send;

    /// Replaces every assignment on the plan's date.
    fn replace_day(
        &self,
        plan: &DayPlan,
    ) -> impl Future<Output = Result<ReplaceDayOutcome, GatewayError>> + Send;
}

#[derive(Deserialize)]
struct EligibleStaffBody {
    staff: Vec<EligibleStaff>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gateway speaking JSON to a SiteCrew server.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpGateway {
    /// Creates a gateway for the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_for_date<T: DeserializeOwned>(
        &self,
        path: &str,
        date: Date,
    ) -> Result<T, GatewayError> {
        let url: String = self.config.url(path);
        debug!(%url, %date, "GET");
        let response: reqwest::Response = self
            .client
            .get(url)
            .query(&[("date", format_date(date))])
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status: reqwest::StatusCode = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message: String = serde_json::from_slice::<ErrorBody>(&body).map_or_else(
            |_| String::from_utf8_lossy(&body).into_owned(),
            |b| b.message,
        );
        warn!(status = status.as_u16(), %message, "Server rejected request");
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

impl AssignmentGateway for HttpGateway {
    async fn fetch_eligible_staff(&self, date: Date) -> Result<Vec<EligibleStaff>, GatewayError> {
        let body: EligibleStaffBody = self
            .get_for_date("/assignments/eligible-staff", date)
            .await?;
        Ok(body.staff)
    }

    async fn fetch_coverage(&self, date: Date) -> Result<Coverage, GatewayError> {
        self.get_for_date("/assignments/coverage", date).await
    }

    async fn fetch_assignments(&self, date: Date) -> Result<DayAssignments, GatewayError> {
        self.get_for_date("/assignments", date).await
    }

    async fn replace_day(&self, plan: &DayPlan) -> Result<ReplaceDayOutcome, GatewayError> {
        let url: String = self.config.url("/assignments");
        debug!(%url, date = %plan.date, "PUT");
        let response: reqwest::Response = self.client.put(url).json(plan).send().await?;
        decode(response).await
    }
}
