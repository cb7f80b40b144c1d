//! Error types for hubtags
//!
//! Every fallible operation in the library returns [`HubTagsError`]. The
//! variants are grouped by how the runner treats them: fetch-side failures
//! (`FetchFailed`, `MalformedPage`, `Network`) abort a single repository,
//! while template and output failures abort the whole run.

use thiserror::Error;


/// Main error type for hubtags operations
#[derive(Error, Debug)]
pub enum HubTagsError {
    /// The registry answered with a status outside 200-299
    #[error("HTTP {status} from {url}: {body}")]
    FetchFailed {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body is not a tags page
    #[error("Malformed page: {message}")]
    MalformedPage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport errors (connection, timeout, DNS)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The template text could not be compiled
    #[error("Bad template: {message}")]
    BadTemplate { message: String },

    /// A template referenced a name outside its variable table
    #[error("Template references unknown name '{name}'")]
    TemplateName { name: String },

    /// Configuration errors (invalid config file, bad values)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Writing the report or the side channel failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for hubtags operations
pub type Result<T> = std::result::Result<T, HubTagsError>;

impl HubTagsError {
    /// Creates a new fetch failure from a non-success response.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubtags::error::HubTagsError;
    ///
    /// let err = HubTagsError::fetch_failed("http://hub/v2/", 404, "not found");
    /// assert!(matches!(err, HubTagsError::FetchFailed { status: 404, .. }));
    /// ```
    pub fn fetch_failed<U, B>(url: U, status: u16, body: B) -> Self
    where
        U: Into<String>,
        B: Into<String>,
    {
        Self::FetchFailed {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a new malformed page error.
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedPage {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new malformed page error with the decoder error attached.
    pub fn malformed_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::MalformedPage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubtags::error::HubTagsError;
    ///
    /// let err = HubTagsError::network("connection refused");
    /// assert!(matches!(err, HubTagsError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new template compilation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubtags::error::HubTagsError;
    ///
    /// let err = HubTagsError::bad_template("unknown scope 'X'");
    /// assert!(err.to_string().contains("unknown scope"));
    /// ```
    pub fn bad_template<S: Into<String>>(message: S) -> Self {
        Self::BadTemplate {
            message: message.into(),
        }
    }

    /// Creates a new unknown-name error for template rendering.
    pub fn template_name<S: Into<String>>(name: S) -> Self {
        Self::TemplateName { name: name.into() }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new I/O error for a failed write.
    pub fn io<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Returns true when the error only invalidates the repository being
    /// fetched, so the run can move on to the next one.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubtags::error::HubTagsError;
    ///
    /// assert!(HubTagsError::malformed("not json").is_repository_scoped());
    /// assert!(!HubTagsError::template_name("bogus").is_repository_scoped());
    /// ```
    pub fn is_repository_scoped(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::MalformedPage { .. } | Self::Network { .. }
        )
    }
}

impl From<config::ConfigError> for HubTagsError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_with_source("Failed to build configuration", None, err)
    }
}
