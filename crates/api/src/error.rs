//! Netmet error types.

use std::sync::Arc;

/// A clonable trait-object inner error.
#[derive(Clone, Default)]
pub struct DynInnerError(
    pub Option<Arc<dyn std::error::Error + 'static + Send + Sync>>,
);

impl std::fmt::Debug for DynInnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for DynInnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_ref() {
            None => f.write_str("None"),
            Some(s) => s.fmt(f),
        }
    }
}

impl std::error::Error for DynInnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.as_ref().map(|s| {
            let out: &(dyn std::error::Error + 'static) = &**s;
            out
        })
    }
}

impl DynInnerError {
    /// Construct a new DynInnerError from a source error.
    pub fn new<E: std::error::Error + 'static + Send + Sync>(e: E) -> Self {
        Self(Some(Arc::new(e)))
    }
}

/// The netmet error type, used across all netmet crates.
///
/// The variants are the failure taxonomy of the tool: transport-level
/// failures, empty platform responses, absent JSON fields, empty probe
/// datasets, missing credentials, and dataset file IO. There is no retry
/// policy anywhere; callers propagate these to the CLI which logs the
/// error and exits nonzero.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NmError {
    /// A request, network, or decode failure talking to the platform.
    #[error("{ctx} (src: {src})")]
    Transport {
        /// Any context associated with this error.
        ctx: Arc<str>,

        /// The inner error (if any).
        #[source]
        src: DynInnerError,
    },

    /// The platform returned no body or an empty result list.
    #[error("empty response: {ctx}")]
    EmptyResponse {
        /// What was being fetched.
        ctx: Arc<str>,
    },

    /// An expected key was absent from a JSON document.
    #[error("missing field: {field}")]
    MissingField {
        /// The absent field.
        field: Arc<str>,
    },

    /// A probe dataset contained zero usable entries.
    #[error("empty dataset: {ctx}")]
    EmptyDataset {
        /// Which dataset was empty.
        ctx: Arc<str>,
    },

    /// Credentials could not be loaded from the environment.
    #[error(
        "missing credentials: set NETMET_USERNAME and NETMET_SECRET_KEY \
         in the environment"
    )]
    MissingCredentials,

    /// A dataset file read or write failure.
    #[error("{ctx} (src: {src})")]
    Io {
        /// Any context associated with this error.
        ctx: Arc<str>,

        /// The inner error (if any).
        #[source]
        src: DynInnerError,
    },
}

impl NmError {
    /// Construct a transport error with an inner source error.
    pub fn transport_src<
        C: std::fmt::Display,
        S: std::error::Error + 'static + Send + Sync,
    >(
        ctx: C,
        src: S,
    ) -> Self {
        Self::Transport {
            ctx: ctx.to_string().into_boxed_str().into(),
            src: DynInnerError::new(src),
        }
    }

    /// Construct an empty-response error.
    pub fn empty_response<C: std::fmt::Display>(ctx: C) -> Self {
        Self::EmptyResponse {
            ctx: ctx.to_string().into_boxed_str().into(),
        }
    }

    /// Construct a missing-field error.
    pub fn missing_field<C: std::fmt::Display>(field: C) -> Self {
        Self::MissingField {
            field: field.to_string().into_boxed_str().into(),
        }
    }

    /// Construct an empty-dataset error.
    pub fn empty_dataset<C: std::fmt::Display>(ctx: C) -> Self {
        Self::EmptyDataset {
            ctx: ctx.to_string().into_boxed_str().into(),
        }
    }

    /// Construct an io error with an inner source error.
    pub fn io_src<
        C: std::fmt::Display,
        S: std::error::Error + 'static + Send + Sync,
    >(
        ctx: C,
        src: S,
    ) -> Self {
        Self::Io {
            ctx: ctx.to_string().into_boxed_str().into(),
            src: DynInnerError::new(src),
        }
    }

    /// True if this is an io error caused by a file that does not exist.
    ///
    /// The probe selector uses this to fall back wholesale from the
    /// primary datasets to the correction datasets.
    pub fn is_absent(&self) -> bool {
        match self {
            NmError::Io { src, .. } => src
                .0
                .as_ref()
                .and_then(|s| (**s).downcast_ref::<std::io::Error>())
                .map(|e| e.kind() == std::io::ErrorKind::NotFound)
                .unwrap_or(false),
            _ => false,
        }
    }
}

/// The netmet result type.
pub type NmResult<T> = Result<T, NmError>;
