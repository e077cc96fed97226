//! Row operations on a single Baserow table

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::query::{ListParams, ListQuery};
use crate::record::{Page, Record};
use crate::transport::{HttpRequest, HttpResponse, Method};
use crate::types::Fields;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Accessor for the rows of one table
///
/// Every method issues exactly one request, except [`Table::list_all`]
/// which issues one per page. Nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct Table {
    connection: Connection,
    table_id: u64,
}

impl Table {
    pub(crate) fn new(connection: Connection, table_id: u64) -> Self {
        Self {
            connection,
            table_id,
        }
    }

    pub fn id(&self) -> u64 {
        self.table_id
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Start a fluent list query
    pub fn query(&self) -> ListQuery<'_> {
        ListQuery::new(self)
    }

    /// List one page of rows in server order
    pub async fn list(&self, params: ListParams) -> Result<Vec<Record>> {
        Ok(self.list_page(params).await?.records)
    }

    /// List one page of rows together with `count`, `next` and `previous`
    pub async fn list_page(&self, params: ListParams) -> Result<Page> {
        let url = format!(
            "{}?{}",
            self.table_url(),
            params.to_query_string(self.connection.use_field_names())
        );
        let page: Page = self.send(Method::GET, url, None).await?;
        debug!(
            "Table {} page {}: {} of {} rows",
            self.table_id,
            params.page,
            page.records.len(),
            page.count
        );
        Ok(page)
    }

    /// List every row from `params.page` onwards, one request per page
    pub async fn list_all(&self, params: ListParams) -> Result<Vec<Record>> {
        let mut params = params;
        let mut records = Vec::new();
        loop {
            let page = self.list_page(params.clone()).await?;
            let done = !page.has_next() || page.records.is_empty();
            records.extend(page.records);
            if done {
                break;
            }
            params.page += 1;
        }
        Ok(records)
    }

    /// Fetch a single row
    pub async fn get(&self, id: i64) -> Result<Record> {
        let url = format!("{}?{}", self.row_url(id), self.field_names_param());
        self.send(Method::GET, url, None).await
    }

    /// Create a row; absent fields are left out of the body
    pub async fn create(&self, fields: &Fields) -> Result<Record> {
        self.create_item(fields).await
    }

    /// Create a row from any serializable value
    pub async fn create_item<T: Serialize + ?Sized>(&self, item: &T) -> Result<Record> {
        let url = format!("{}?{}", self.table_url(), self.field_names_param());
        let body = serde_json::to_vec(item).map_err(Error::Mapping)?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// Partially update a row; only the supplied fields change
    pub async fn update(&self, id: i64, fields: &Fields) -> Result<Record> {
        self.update_item(id, fields).await
    }

    /// Partially update a row from any serializable value
    pub async fn update_item<T: Serialize + ?Sized>(&self, id: i64, item: &T) -> Result<Record> {
        let url = format!("{}?{}", self.row_url(id), self.field_names_param());
        let body = serde_json::to_vec(item).map_err(Error::Mapping)?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    /// Move a row so it sits right before `before_id`
    pub async fn move_row(&self, id: i64, before_id: i64) -> Result<Record> {
        let url = format!(
            "{}move/?{}&before_id={}",
            self.row_url(id),
            self.field_names_param(),
            before_id
        );
        self.send(Method::PATCH, url, None).await
    }

    /// Delete a row, returning it as echoed by the server
    pub async fn delete(&self, id: i64) -> Result<Record> {
        let url = format!("{}{}/{}", self.connection.rows_url(), self.table_id, id);
        self.send(Method::DELETE, url, None).await
    }

    fn table_url(&self) -> String {
        format!("{}{}/", self.connection.rows_url(), self.table_id)
    }

    fn row_url(&self, id: i64) -> String {
        format!("{}{}/{}/", self.connection.rows_url(), self.table_id, id)
    }

    fn field_names_param(&self) -> String {
        format!("user_field_names={}", self.connection.use_field_names())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        debug!("{} {}", method, url);

        let mut request = HttpRequest::new(method, url).header(
            "Authorization",
            format!("Token {}", self.connection.access_token()),
        );
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = self.connection.transport().send(request).await?;
        decode_response(response)
    }
}

fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    if !response.is_success() {
        let body = serde_json::from_slice(&response.body).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&response.body).into_owned())
        });
        debug!("Request failed with status {}: {}", response.status, body);
        return Err(Error::Api {
            status: response.status,
            body,
        });
    }
    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls() {
        let baserow = Connection::builder("api-key")
            .use_field_names(false)
            .build()
            .unwrap();
        let table = baserow.table(123);

        assert_eq!(
            table.table_url(),
            "https://api.baserow.io/api/database/rows/table/123/"
        );
        assert_eq!(
            table.row_url(7),
            "https://api.baserow.io/api/database/rows/table/123/7/"
        );
        assert_eq!(table.field_names_param(), "user_field_names=false");
    }

    #[test]
    fn test_decode_success() {
        let record: Record =
            decode_response(HttpResponse::new(200, r#"{"id": 5, "Name": "X"}"#)).unwrap();
        assert_eq!(record.id(), 5);
    }

    #[test]
    fn test_decode_api_error_keeps_body() {
        let err = decode_response::<Record>(HttpResponse::new(
            404,
            r#"{"error": "ERROR_ROW_DOES_NOT_EXIST", "detail": "The row 9 does not exist."}"#,
        ))
        .unwrap_err();

        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body["error"], json!("ERROR_ROW_DOES_NOT_EXIST"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_non_json_error_body() {
        let err = decode_response::<Record>(HttpResponse::new(502, "Bad Gateway")).unwrap_err();
        assert!(matches!(
            err,
            Error::Api { status: 502, ref body } if body == &json!("Bad Gateway")
        ));
    }

    #[test]
    fn test_decode_invalid_json_is_transport() {
        let err = decode_response::<Record>(HttpResponse::new(200, "<html>")).unwrap_err();
        assert!(err.is_transport());
    }
}
