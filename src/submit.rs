//! The submission path: serializing a harvest result and handing it off.
//!
//! The harvesting core never touches the host tree or any dispatch
//! primitive. Everything transmission-shaped lives here, behind two
//! capability traits:
//! - [`Submitter`] turns a harvested object into a [`SubmitOutcome`]
//! - [`Transport`] carries a constructed [`TransportPayload`] to its
//!   destination
//!
//! [`JsonSubmitter`] is the provided [`Submitter`]: it serializes the
//! result into one opaque hidden field and either dispatches a fresh
//! payload through its transport or returns the field for the caller's
//! own dispatch path, depending on [`SubmitMode`].

use crate::node::Node;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Default name of the hidden field carrying the serialized object.
pub const DEFAULT_FIELD_NAME: &str = "data";

/// Errors surfaced on the submission path.
///
/// The harvesting core raises no errors; every failure a caller can see
/// originates here or in a [`Transport`] implementation.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// An explicitly requested form identifier did not resolve.
    #[error("form '{0}' not found in the tree")]
    FormNotFound(String),

    /// Serializing the harvested object to JSON text failed.
    #[error("failed to encode harvest payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The transport rejected or failed to deliver the payload.
    #[error("transport dispatch failed: {0}")]
    Dispatch(String),

    /// The run guard was torn down while a trigger was waiting.
    #[error("harvest run interrupted: {0}")]
    Interrupted(String),
}

/// A single name/value field of a transport payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// A freshly constructed payload ready for dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportPayload {
    /// Identifier of the form the payload was harvested from, if any.
    pub form_id: Option<String>,

    /// Transport method; always `"POST"` for constructed payloads.
    pub method: String,

    /// Payload fields. A [`JsonSubmitter`] payload carries exactly one,
    /// holding the serialized harvest result.
    pub fields: Vec<HiddenField>,
}

/// How a submitter hands off the serialized result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    /// Construct a [`TransportPayload`] and dispatch it through the
    /// transport.
    #[default]
    Dispatch,

    /// Return the serialized field to the caller, which attaches it to
    /// its own tree and controls dispatch itself.
    Attach,
}

/// What became of one submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A payload was constructed and handed to the transport.
    Dispatched,

    /// The serialized field was returned for caller-controlled dispatch.
    Attached(HiddenField),
}

/// Capability that carries a constructed payload to its destination.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers the payload.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Dispatch`] (or any other variant the
    /// implementation maps to) when delivery fails. Such failures are the
    /// transport's to surface; the harvester never produces them.
    async fn dispatch(&self, payload: TransportPayload) -> Result<(), SubmitError>;
}

/// Capability consuming one harvested form.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submits the harvest result of `form`.
    ///
    /// `data` is always a JSON object, by construction of the harvester.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when encoding or dispatch fails.
    async fn submit(&self, form: &Node, data: &Value) -> Result<SubmitOutcome, SubmitError>;
}

/// Submitter that serializes the harvest result into one hidden field.
///
/// Mode selection is plain configuration, mirroring the two delivery
/// styles of the host: dispatch a new payload, or hand the field back for
/// an in-place submission the caller controls.
pub struct JsonSubmitter<T: Transport> {
    transport: T,
    mode: SubmitMode,
    field_name: String,
}

impl<T: Transport> JsonSubmitter<T> {
    /// Creates a submitter in [`SubmitMode::Dispatch`] with the default
    /// field name.
    pub fn new(transport: T) -> Self {
        JsonSubmitter {
            transport,
            mode: SubmitMode::default(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }

    /// Sets the submit mode.
    pub fn with_mode(mut self, mode: SubmitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the name of the hidden field carrying the serialized object.
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }
}

#[async_trait]
impl<T: Transport> Submitter for JsonSubmitter<T> {
    async fn submit(&self, form: &Node, data: &Value) -> Result<SubmitOutcome, SubmitError> {
        let json = serde_json::to_string(data)?;
        let field = HiddenField {
            name: self.field_name.clone(),
            value: json,
        };

        match self.mode {
            SubmitMode::Dispatch => {
                let payload = TransportPayload {
                    form_id: form.id.clone(),
                    method: "POST".to_string(),
                    fields: vec![field],
                };
                self.transport.dispatch(payload).await?;
                info!(form_id = ?form.id, "payload dispatched");
                Ok(SubmitOutcome::Dispatched)
            }
            SubmitMode::Attach => {
                info!(form_id = ?form.id, "field returned for inline attachment");
                Ok(SubmitOutcome::Attached(field))
            }
        }
    }
}
