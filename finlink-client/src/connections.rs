//! Connection-related API endpoints
//!
//! Creating or refreshing a connection does not complete synchronously: the API
//! answers with the id of a job that works through credential verification and
//! data retrieval. Those endpoints therefore resolve to a [`Job`].

use crate::AggregatorClient;
use crate::error::{ClientError, Result};
use finlink_core::domain::connection::Connection;
use finlink_core::domain::job::Job;
use finlink_core::dto::connection::{InstitutionRef, JobRef, NewConnection, UpdateConnection};
use reqwest::Method;
use tracing::debug;

fn require(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidRequest(format!("No {} provided", what)));
    }
    Ok(trimmed.to_string())
}

fn optional_code(security_code: Option<&str>) -> Option<String> {
    security_code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

impl AggregatorClient {
    // =============================================================================
    // Connection Lifecycle
    // =============================================================================

    /// Connect a user to an institution with the given credentials
    ///
    /// Credentials are trimmed before sending; an empty login, password,
    /// institution id, or user id is rejected locally. The security code is
    /// only included in the payload when non-empty.
    ///
    /// # Returns
    /// The job the API spawned to validate the credentials and sync data.
    /// Pass it to [`wait_for_credentials`](Self::wait_for_credentials) to await
    /// the verification outcome.
    ///
    /// # Example
    /// ```no_run
    /// # use finlink_client::AggregatorClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = AggregatorClient::new("https://au-api.example.com", "token");
    /// let job = client
    ///     .create_connection("user-1", "AU00000", "gavinBelson", "hooli2016", None)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_connection(
        &self,
        user_id: &str,
        institution_id: &str,
        login_id: &str,
        password: &str,
        security_code: Option<&str>,
    ) -> Result<Job> {
        let user_id = require(user_id, "user id")?;
        let payload = NewConnection {
            login_id: require(login_id, "login id")?,
            password: require(password, "password")?,
            security_code: optional_code(security_code),
            institution: InstitutionRef {
                id: require(institution_id, "institution id")?,
            },
        };

        debug!(%user_id, institution_id, "creating connection");

        let response = self
            .request(Method::POST, &format!("users/{}/connections", user_id))
            .json(&payload)
            .send()
            .await?;

        let job_ref: JobRef = self.handle_response(response).await?;
        self.get_job(&job_ref.id).await
    }

    /// Get a connection by id
    pub async fn get_connection(&self, user_id: &str, connection_id: &str) -> Result<Connection> {
        let user_id = require(user_id, "user id")?;
        let connection_id = require(connection_id, "connection id")?;

        let response = self
            .request(
                Method::GET,
                &format!("users/{}/connections/{}", user_id, connection_id),
            )
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Update the stored credentials of an existing connection
    ///
    /// # Arguments
    /// * `connection` - The connection to update; supplies its id and the
    ///   institution the new credentials belong to
    /// * `password` - The new password (must be non-empty)
    /// * `security_code` - Optional new security code
    ///
    /// # Returns
    /// The updated connection.
    pub async fn update_connection(
        &self,
        user_id: &str,
        connection: &Connection,
        password: &str,
        security_code: Option<&str>,
    ) -> Result<Connection> {
        let user_id = require(user_id, "user id")?;
        let payload = UpdateConnection {
            password: require(password, "password")?,
            security_code: optional_code(security_code),
            institution: InstitutionRef {
                id: require(&connection.institution.id, "institution id")?,
            },
        };

        debug!(%user_id, connection_id = %connection.id, "updating connection credentials");

        let response = self
            .request(
                Method::POST,
                &format!("users/{}/connections/{}", user_id, connection.id),
            )
            .json(&payload)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a connection
    pub async fn delete_connection(&self, user_id: &str, connection_id: &str) -> Result<()> {
        let user_id = require(user_id, "user id")?;
        let connection_id = require(connection_id, "connection id")?;

        let response = self
            .request(
                Method::DELETE,
                &format!("users/{}/connections/{}", user_id, connection_id),
            )
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Trigger a fresh sync of an existing connection
    ///
    /// # Returns
    /// The job the API spawned for the refresh, starting again from credential
    /// verification.
    pub async fn refresh_connection(&self, user_id: &str, connection_id: &str) -> Result<Job> {
        let user_id = require(user_id, "user id")?;
        let connection_id = require(connection_id, "connection id")?;

        debug!(%user_id, %connection_id, "refreshing connection");

        let response = self
            .request(
                Method::POST,
                &format!("users/{}/connections/{}/refresh", user_id, connection_id),
            )
            .send()
            .await?;

        let job_ref: JobRef = self.handle_response(response).await?;
        self.get_job(&job_ref.id).await
    }
}
