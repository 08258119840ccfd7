use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::RestError;

/// Client for the hosted database's REST layer.
///
/// Every request carries the service-role key both as `apikey` and as a
/// bearer token, so row-level security does not apply.
///
/// ```ignore
/// let client = RestClient::new("https://project.supabase.co", key)?;
/// let roles: Vec<StaffRole> = client
///     .table("staff_roles")
///     .select("*")
///     .order("created_at", true)
///     .fetch()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, RestError> {
        let client = Client::builder().build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Start a query against `table`.
    pub fn table(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, RestError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RestError::from_response(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// A query under construction: filters, ordering and the column selection.
pub struct TableQuery<'a> {
    client: &'a RestClient,
    table: String,
    params: Vec<(String, String)>,
}

impl TableQuery<'_> {
    /// Columns to return, including embedded relations such as
    /// `*, role:staff_roles(*)`.
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Keep rows where `column` equals `value` exactly.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".into(), format!("{column}.{direction}")));
        self
    }

    /// Query string parameters accumulated so far.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Fetch every matching row.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, RestError> {
        debug!(table = %self.table, params = ?self.params, "Querying data service");
        let response = self
            .client
            .request(Method::GET, &self.table)
            .query(&self.params)
            .send()
            .await?;
        RestClient::read_rows(response).await
    }

    /// Fetch zero or one row. More than one matching row is an error.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>, RestError> {
        let mut rows = self.fetch::<T>().await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            n => Err(RestError::MultipleRows(n)),
        }
    }

    /// Insert `body` and return the stored rows.
    pub async fn insert<T, B>(self, body: &B) -> Result<Vec<T>, RestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(table = %self.table, "Inserting into data service");
        let response = self
            .client
            .request(Method::POST, &self.table)
            .query(&self.params)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        RestClient::read_rows(response).await
    }

    /// Apply `body` to every row matching the filters and return the updated
    /// rows.
    pub async fn update<T, B>(self, body: &B) -> Result<Vec<T>, RestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(table = %self.table, params = ?self.params, "Updating data service rows");
        let response = self
            .client
            .request(Method::PATCH, &self.table)
            .query(&self.params)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        RestClient::read_rows(response).await
    }
}
