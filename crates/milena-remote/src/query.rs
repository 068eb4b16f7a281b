//! # Table Queries
//!
//! A small builder over the REST table API.
//!
//! ## Request Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  builder call                          HTTP request                     │
//! │  ────────────────────────────────────  ───────────────────────────────  │
//! │  from("products")                      /rest/v1/products                │
//! │    .select("*, categories(id, name)")    ?select=*,categories(id,name)  │
//! │    .order("created_at", false)           &order=created_at.desc         │
//! │    .fetch::<Product>()                 GET                              │
//! │                                                                         │
//! │  from("categories").eq("id", 3)          ?id=eq.3                       │
//! │    .update(&patch)                     PATCH  Prefer: return=minimal    │
//! │    .delete()                           DELETE Prefer: return=minimal    │
//! │                                                                         │
//! │  from("categories")                                                     │
//! │    .insert_returning(&rows)            POST Prefer: return=representation│
//! │    .insert(&rows)                      POST Prefer: return=minimal      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Update and delete refuse to run without at least one `eq` filter.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{RemoteError, RemoteResult};

const PREFER_MINIMAL: &str = "return=minimal";
const PREFER_REPRESENTATION: &str = "return=representation";

/// One request against one table.
#[derive(Debug, Clone)]
pub struct TableQuery {
    http: Client,
    rest_url: String,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
}

impl TableQuery {
    pub(crate) fn new(http: Client, rest_url: String, table: impl Into<String>) -> Self {
        TableQuery {
            http,
            rest_url,
            table: table.into(),
            select: None,
            filters: Vec::new(),
            order: None,
        }
    }

    /// Columns to return. Whitespace is dropped, as the API expects.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.chars().filter(|c| !c.is_whitespace()).collect());
        self
    }

    /// Keeps rows where `column = value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Orders rows by one column.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Full request URL with every query parameter applied.
    pub fn url(&self) -> RemoteResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.rest_url, self.table))?;

        // query_pairs_mut() leaves a bare `?` behind even when nothing is appended
        if self.select.is_some() || !self.filters.is_empty() || self.order.is_some() {
            let mut pairs = url.query_pairs_mut();
            if let Some(select) = &self.select {
                pairs.append_pair("select", select);
            }
            for (column, filter) in &self.filters {
                pairs.append_pair(column, filter);
            }
            if let Some(order) = &self.order {
                pairs.append_pair("order", order);
            }
        }
        Ok(url)
    }

    // -------------------------------------------------------------------------
    // Execution
    // -------------------------------------------------------------------------

    /// Runs a GET and decodes every row.
    pub async fn fetch<T: DeserializeOwned>(&self) -> RemoteResult<Vec<T>> {
        let response = self.request(Method::GET)?.send().await?;
        let body = checked_body(response).await?;

        let rows: Vec<T> = serde_json::from_str(&body)?;
        debug!(table = %self.table, count = rows.len(), "Fetched rows");
        Ok(rows)
    }

    /// Inserts rows without reading them back.
    pub async fn insert<T: Serialize + ?Sized>(&self, rows: &T) -> RemoteResult<()> {
        let response = self
            .request(Method::POST)?
            .header("Prefer", PREFER_MINIMAL)
            .json(rows)
            .send()
            .await?;
        checked_body(response).await?;

        debug!(table = %self.table, "Inserted rows");
        Ok(())
    }

    /// Inserts rows and returns them as stored.
    pub async fn insert_returning<T, R>(&self, rows: &T) -> RemoteResult<Vec<R>>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .request(Method::POST)?
            .header("Prefer", PREFER_REPRESENTATION)
            .json(rows)
            .send()
            .await?;
        let body = checked_body(response).await?;

        let created: Vec<R> = serde_json::from_str(&body)?;
        debug!(table = %self.table, count = created.len(), "Inserted rows");
        Ok(created)
    }

    /// Patches every row matching the filters.
    pub async fn update<T: Serialize + ?Sized>(&self, patch: &T) -> RemoteResult<()> {
        self.require_filter("update")?;

        let response = self
            .request(Method::PATCH)?
            .header("Prefer", PREFER_MINIMAL)
            .json(patch)
            .send()
            .await?;
        checked_body(response).await?;

        debug!(table = %self.table, filters = ?self.filters, "Updated rows");
        Ok(())
    }

    /// Deletes every row matching the filters.
    pub async fn delete(&self) -> RemoteResult<()> {
        self.require_filter("delete")?;

        let response = self
            .request(Method::DELETE)?
            .header("Prefer", PREFER_MINIMAL)
            .send()
            .await?;
        checked_body(response).await?;

        debug!(table = %self.table, filters = ?self.filters, "Deleted rows");
        Ok(())
    }

    fn request(&self, method: Method) -> RemoteResult<RequestBuilder> {
        let url = self.url()?;
        debug!(method = %method, url = %url, "Table request");
        Ok(self.http.request(method, url))
    }

    fn require_filter(&self, operation: &'static str) -> RemoteResult<()> {
        if self.filters.is_empty() {
            return Err(RemoteError::MissingFilter {
                table: self.table.clone(),
                operation,
            });
        }
        Ok(())
    }
}

/// Reads the body, turning a non-2xx status into a [`RemoteError`].
pub(crate) async fn checked_body(response: Response) -> RemoteResult<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(RemoteError::from_response(status.as_u16(), &body));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(table: &str) -> TableQuery {
        TableQuery::new(Client::new(), "https://shop.supabase.co/rest/v1".to_string(), table)
    }

    #[test]
    fn test_url_with_select_and_order() {
        let url = query("products")
            .select("*, categories(id, name)")
            .order("created_at", false)
            .url()
            .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.path(), "/rest/v1/products");
        assert_eq!(
            pairs,
            vec![
                ("select".to_string(), "*,categories(id,name)".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_eq_filter() {
        let url = query("categories").eq("id", 7).url().unwrap();
        assert_eq!(url.query(), Some("id=eq.7"));
    }

    #[test]
    fn test_plain_url_has_no_query() {
        let url = query("categories").url().unwrap();
        assert_eq!(url.as_str(), "https://shop.supabase.co/rest/v1/categories");
    }

    #[tokio::test]
    async fn test_delete_without_filter_is_refused() {
        let err = query("products").delete().await.unwrap_err();
        assert!(matches!(
            err,
            RemoteError::MissingFilter {
                operation: "delete",
                ..
            }
        ));

        let err = query("products")
            .update(&serde_json::json!({ "name": "x" }))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::MissingFilter { .. }));
    }
}
