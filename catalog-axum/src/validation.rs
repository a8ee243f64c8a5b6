//! Declarative request validation.
//!
//! A route declares an ordered list of [`Chain`]s, one per field. Each chain
//! holds checks with their own message. The [`Validated`] extractor runs every
//! check of every chain against the request's path parameters and JSON body,
//! collects one [`FieldError`] per failing check, and rejects the request with
//! `400 {"errors": [...]}` if anything failed. Nothing short-circuits: the
//! errors of independent chains are concatenated in declaration order.
//!
//! The built-in checks operate on a text rendering of the raw value (absent and
//! `null` become the empty string), so a chain can report a field as both
//! malformed and empty at once.
//!
//! Only a body declared as JSON by its `content-type` is parsed; any other body
//! is read as `{}`.

use aide::{OperationInput, generate::GenContext, openapi::Operation};
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use regex::Regex;
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{Level, event};

use crate::response::{ErrorBody, ErrorsBody};

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric pattern"));

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").expect("valid integer pattern"));

/// Message used when a body is present but is not JSON.
pub const MALFORMED_JSON: &str = "JSON no valido";

/// Where in the request a field is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// A path parameter
    Params,
    /// A top-level key of the JSON body
    Body,
}

/// One failed check.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct FieldError {
    /// Always `"field"`
    #[serde(rename = "type")]
    pub kind: String,
    /// The raw value that was checked, omitted when the field was absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// The message attached to the failing check
    pub msg: String,
    /// The name of the field
    pub path: String,
    /// Where the field was read from
    pub location: Location,
}

impl FieldError {
    /// An error for `field` at `location`, recording the value that failed.
    pub fn new(location: Location, field: &str, value: Option<&Value>, msg: &str) -> Self {
        Self {
            kind: "field".to_string(),
            value: value.cloned(),
            msg: msg.to_string(),
            path: field.to_string(),
            location,
        }
    }
}

/// A single predicate over a field's raw value.
#[derive(Clone, Copy)]
pub enum Check {
    /// The text rendering is not empty
    NotEmpty,
    /// The text rendering is a plain decimal number
    IsNumeric,
    /// The text rendering is an integer without leading zeros
    IsInt,
    /// The text rendering is one of `true`, `false`, `1`, `0`
    IsBoolean,
    /// An arbitrary predicate, evaluated even when the field is absent
    Custom(fn(Option<&Value>) -> bool),
}

impl Check {
    fn passes(&self, value: Option<&Value>) -> bool {
        match self {
            Self::NotEmpty => !text(value).is_empty(),
            Self::IsNumeric => NUMERIC.is_match(&text(value)),
            Self::IsInt => INTEGER.is_match(&text(value)),
            Self::IsBoolean => matches!(text(value).as_str(), "true" | "false" | "1" | "0"),
            Self::Custom(predicate) => predicate(value),
        }
    }
}

/// The ordered checks applied to one field.
pub struct Chain {
    location: Location,
    field: &'static str,
    checks: Vec<(Check, &'static str)>,
}

impl Chain {
    /// Start a chain over a path parameter.
    pub fn param(field: &'static str) -> Self {
        Self {
            location: Location::Params,
            field,
            checks: Vec::new(),
        }
    }

    /// Start a chain over a key of the JSON body.
    pub fn body(field: &'static str) -> Self {
        Self {
            location: Location::Body,
            field,
            checks: Vec::new(),
        }
    }

    /// Append a check reported with `msg` when it fails.
    pub fn check(mut self, check: Check, msg: &'static str) -> Self {
        self.checks.push((check, msg));
        self
    }

    /// Append [`Check::NotEmpty`].
    pub fn not_empty(self, msg: &'static str) -> Self {
        self.check(Check::NotEmpty, msg)
    }

    /// Append [`Check::IsNumeric`].
    pub fn is_numeric(self, msg: &'static str) -> Self {
        self.check(Check::IsNumeric, msg)
    }

    /// Append [`Check::IsInt`].
    pub fn is_int(self, msg: &'static str) -> Self {
        self.check(Check::IsInt, msg)
    }

    /// Append [`Check::IsBoolean`].
    pub fn is_boolean(self, msg: &'static str) -> Self {
        self.check(Check::IsBoolean, msg)
    }

    /// Append [`Check::Custom`].
    pub fn custom(self, predicate: fn(Option<&Value>) -> bool, msg: &'static str) -> Self {
        self.check(Check::Custom(predicate), msg)
    }

    fn run(&self, input: &Input, errors: &mut Vec<FieldError>) {
        let value = input.get(self.location, self.field);
        for (check, msg) in &self.checks {
            if !check.passes(value) {
                errors.push(FieldError::new(self.location, self.field, value, msg));
            }
        }
    }
}

/// The parts of a request that rules can look at.
#[derive(Debug, Default)]
pub struct Input {
    params: Map<String, Value>,
    body: Value,
}

impl Input {
    /// Assemble an input from already-decoded parts.
    pub fn new(params: impl IntoIterator<Item = (String, String)>, body: Value) -> Self {
        Self {
            params: params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
            body,
        }
    }

    /// Look up a field. A body that is not an object has no fields.
    pub fn get(&self, location: Location, field: &str) -> Option<&Value> {
        match location {
            Location::Params => self.params.get(field),
            Location::Body => self.body.as_object().and_then(|body| body.get(field)),
        }
    }
}

/// Evaluate every check of every chain, in order.
pub fn validate(chains: &[Chain], input: &Input) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for chain in chains {
        chain.run(input, &mut errors);
    }
    errors
}

/// The text rendering the built-in checks operate on.
pub fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(float) if n.is_f64() => float_text(float),
            _ => n.to_string(),
        },
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip decimal, switching to exponent form only outside
/// `1e-7 <= |x| < 1e21`.
fn float_text(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }
    if (1e-7..1e21).contains(&float.abs()) {
        // `Display` for f64 never uses an exponent
        return float.to_string();
    }
    let exponential = format!("{float:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

/// The numeric value of a field that passed [`Check::IsNumeric`].
pub fn number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        other => {
            let text = text(other);
            NUMERIC
                .is_match(&text)
                .then(|| text.parse().ok())
                .flatten()
        }
    }
}

/// Loose numeric coercion, as used by comparisons against a number.
///
/// Absent values are NaN, `null` is 0, booleans are 0 or 1, strings are parsed
/// after trimming (the empty string is 0, anything unparsable is NaN).
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_) | Value::Object(_)) => f64::NAN,
    }
}

/// The boolean value of a field that passed [`Check::IsBoolean`].
pub fn boolean(value: Option<&Value>) -> Option<bool> {
    match text(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// A typed request input guarded by validation rules.
pub trait Validate: Sized {
    /// The rule chains, evaluated in order.
    fn chains() -> Vec<Chain>;

    /// Convert the raw input once every chain has passed.
    fn build(input: &Input) -> Result<Self, FieldError>;

    /// Describe the expected parameters and body in the OpenAPI document.
    fn document(_ctx: &mut GenContext, _operation: &mut Operation) {}
}

/// Extractor that validates the request and yields the typed input.
///
/// Consumes the body, so it must be the last extractor of a handler.
pub struct Validated<T>(pub T);

/// Why a request never reached its handler.
#[derive(Debug, Error)]
pub enum Rejection {
    /// One or more checks failed
    #[error("{} validation error(s)", .0.len())]
    Invalid(Vec<FieldError>),
    /// A body declared as JSON could not be parsed
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),
    /// The body could not be read
    #[error(transparent)]
    Body(#[from] BytesRejection),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
            }
            Self::MalformedJson(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: MALFORMED_JSON.to_string(),
                }),
            )
                .into_response(),
            Self::Body(rejection) => rejection.into_response(),
        }
    }
}

/// Whether the request declares a JSON body (`application/json` or `*/*+json`).
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S: Send + Sync, T: Validate> FromRequest<S> for Validated<T> {
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without parameters still resolve to an empty set.
        let params = RawPathParams::from_request_parts(&mut parts, state)
            .await
            .map(|params| {
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let json = is_json(&parts.headers);
        let bytes = Bytes::from_request(Request::from_parts(parts, body), state).await?;
        let body = if !json || bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes)?
        };

        let input = Input::new(params, body);
        let errors = validate(&T::chains(), &input);
        if !errors.is_empty() {
            event!(Level::DEBUG, errors = errors.len(), "request failed validation");
            return Err(Rejection::Invalid(errors));
        }

        T::build(&input)
            .map(Validated)
            .map_err(|err| Rejection::Invalid(vec![err]))
    }
}

impl<T: Validate> OperationInput for Validated<T> {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        T::document(ctx, operation);
    }
}
