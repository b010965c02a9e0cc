//! Send requests and their wire payloads

use crate::error::{EmailApiError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Decoded JSON object returned by the API on success
pub type ApiResponse = Map<String, Value>;

/// Template variable substitutions.
///
/// The API takes `template_variables` as a string. A structured map is
/// serialized to compact JSON (key order preserved); a raw string is sent
/// verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateVariables {
    /// Key/value substitutions, JSON-encoded before sending
    Structured(Map<String, Value>),
    /// Pre-encoded string, sent unmodified
    Raw(String),
}

impl TemplateVariables {
    /// String form placed in the `template_variables` field
    ///
    /// # Errors
    ///
    /// Returns `EmailApiError::InvalidInput` if the map cannot be encoded
    pub fn to_wire(&self) -> Result<String> {
        match self {
            Self::Structured(map) => serde_json::to_string(map).map_err(|e| {
                EmailApiError::InvalidInput(format!("template variables are not encodable: {e}"))
            }),
            Self::Raw(raw) => Ok(raw.clone()),
        }
    }
}

impl From<Map<String, Value>> for TemplateVariables {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(map)
    }
}

impl From<String> for TemplateVariables {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for TemplateVariables {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// Email rendered from a server-side template
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateEmail {
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Server-side template key
    pub template_key: String,
    /// Substitutions for the template
    pub template_variables: TemplateVariables,
    /// Subject override (optional)
    pub subject: Option<String>,
    /// Preheader text (optional)
    pub preheader_text: Option<String>,
    /// Application identifier; falls back to the configured app id
    pub uuid: Option<String>,
}

impl TemplateEmail {
    /// Create a template send with no optional fields set
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        template_key: impl Into<String>,
        template_variables: impl Into<TemplateVariables>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            template_key: template_key.into(),
            template_variables: template_variables.into(),
            subject: None,
            preheader_text: None,
            uuid: None,
        }
    }

    /// Builder: Set subject
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Builder: Set preheader text
    #[must_use]
    pub fn with_preheader_text(mut self, preheader_text: impl Into<String>) -> Self {
        self.preheader_text = Some(preheader_text.into());
        self
    }

    /// Builder: Set application identifier
    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }
}

/// Email with caller-supplied content
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectEmail {
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Preheader (optional)
    pub preheader: Option<String>,
    /// Plain-text body, empty by default
    pub body: String,
    /// HTML body (optional)
    pub html_body: Option<String>,
}

impl DirectEmail {
    /// Create a direct send with an empty body
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Builder: Set plain-text body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Builder: Set HTML body
    #[must_use]
    pub fn with_html_body(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    /// Builder: Set preheader
    #[must_use]
    pub fn with_preheader(mut self, preheader: impl Into<String>) -> Self {
        self.preheader = Some(preheader.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TemplatePayload<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub template_key: &'a str,
    pub template_variables: String,
    pub uuid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preheader_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<&'a str>,
}

impl<'a> TemplatePayload<'a> {
    pub(crate) fn new(email: &'a TemplateEmail, uuid: &'a str) -> Result<Self> {
        Ok(Self {
            from: &email.from,
            to: &email.to,
            template_key: &email.template_key,
            template_variables: email.template_variables.to_wire()?,
            uuid,
            preheader_text: email.preheader_text.as_deref(),
            subject: email.subject.as_deref(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DirectPayload<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preheader: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<&'a str>,
}

impl<'a> From<&'a DirectEmail> for DirectPayload<'a> {
    fn from(email: &'a DirectEmail) -> Self {
        Self {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            body: &email.body,
            preheader: email.preheader.as_deref(),
            html_body: email.html_body.as_deref(),
        }
    }
}
