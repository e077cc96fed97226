//! Baserow connection: credentials, field-names mode and table factory

use crate::error::{Error, Result};
use crate::table::Table;
use crate::transport::{HttpTransport, Transport};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Hosted Baserow instance
pub const DEFAULT_BASE_URL: &str = "https://api.baserow.io";

const ROWS_PATH: &str = "/api/database/rows/table/";

/// Connection settings, loadable from any serde format
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Database token; required and non-empty
    #[serde(default)]
    pub access_token: String,

    /// Key rows by field name instead of `field_<id>`
    #[serde(default = "default_use_field_names")]
    pub use_field_names: bool,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_use_field_names() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            use_field_names: default_use_field_names(),
            base_url: default_base_url(),
        }
    }
}

struct Inner {
    access_token: String,
    use_field_names: bool,
    rows_url: String,
    transport: Arc<dyn Transport>,
}

/// A Baserow session shared by every [`Table`] it creates
///
/// Immutable once built. Cloning is cheap and clones share the same
/// credentials and transport, so a connection can be handed to many tasks.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<Inner>,
}

impl Connection {
    /// Connect to the hosted API with field names enabled
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use baserow_client::Connection;
    /// # fn main() -> baserow_client::Result<()> {
    /// let baserow = Connection::new("my-database-token")?;
    /// assert!(baserow.use_field_names());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::builder(access_token).build()
    }

    /// Start configuring a connection
    pub fn builder(access_token: impl Into<String>) -> ConnectionBuilder {
        ConnectionBuilder::new(access_token)
    }

    /// Build a connection from loaded settings
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::builder(config.access_token)
            .use_field_names(config.use_field_names)
            .base_url(config.base_url)
            .build()
    }

    pub fn access_token(&self) -> &str {
        &self.inner.access_token
    }

    pub fn use_field_names(&self) -> bool {
        self.inner.use_field_names
    }

    /// Rows endpoint prefix, ending in `/`
    pub fn rows_url(&self) -> &str {
        &self.inner.rows_url
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    /// Accessor for the table with id `table_id`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use baserow_client::Connection;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let baserow = Connection::new("my-database-token")?;
    /// let people = baserow.table(123);
    /// for record in people.list(Default::default()).await? {
    ///     println!("{} {}", record.id(), record.string_value("Name")?);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn table(&self, table_id: u64) -> Table {
        Table::new(self.clone(), table_id)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("access_token", &"<redacted>")
            .field("use_field_names", &self.inner.use_field_names)
            .field("rows_url", &self.inner.rows_url)
            .finish()
    }
}

/// Builder for [`Connection`]
pub struct ConnectionBuilder {
    access_token: String,
    use_field_names: bool,
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
}

impl ConnectionBuilder {
    fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            use_field_names: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: None,
        }
    }

    pub fn use_field_names(mut self, enabled: bool) -> Self {
        self.use_field_names = enabled;
        self
    }

    /// Point at a self-hosted instance, e.g. `https://baserow.example.com`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the default reqwest transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<Connection> {
        if self.access_token.trim().is_empty() {
            return Err(Error::Configuration(
                "cannot create a Baserow connection without an access token".to_string(),
            ));
        }

        let base = self.base_url.trim_end_matches('/');
        Url::parse(base)
            .map_err(|e| Error::Configuration(format!("invalid base URL '{}': {}", base, e)))?;
        let rows_url = format!("{}{}", base, ROWS_PATH);

        info!(
            "Created Baserow connection to {} (user_field_names={})",
            base, self.use_field_names
        );

        Ok(Connection {
            inner: Arc::new(Inner {
                access_token: self.access_token,
                use_field_names: self.use_field_names,
                rows_url,
                transport: self
                    .transport
                    .unwrap_or_else(|| Arc::new(HttpTransport::new())),
            }),
        })
    }
}
