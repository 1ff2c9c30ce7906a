//! Inbound request variants and their field rules.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::validation::{FieldErrors, Rule};

const PASSWORD_RULES: [Rule; 2] = [Rule::Required, Rule::Length { min: 16, max: 128 }];

/// Body of a document creation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Every request shape that carries validated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Create(CreateRequest),
    Signin(SigninRequest),
    Signup(SignupRequest),
}

impl Request {
    /// Check every field of the request, reporting all violations at once.
    ///
    /// `max_size` bounds `CreateRequest::content` (in characters).
    pub fn validate(&self, max_size: usize) -> DomainResult<()> {
        let errors = match self {
            Request::Create(r) => validate_create(r, max_size),
            Request::Signin(r) => validate_credentials(&r.username, &r.password),
            Request::Signup(r) => validate_credentials(&r.username, &r.password),
        };
        errors.into_result().map_err(Into::into)
    }
}

impl From<CreateRequest> for Request {
    fn from(value: CreateRequest) -> Self {
        Request::Create(value)
    }
}

impl From<SigninRequest> for Request {
    fn from(value: SigninRequest) -> Self {
        Request::Signin(value)
    }
}

impl From<SignupRequest> for Request {
    fn from(value: SignupRequest) -> Self {
        Request::Signup(value)
    }
}

fn validate_create(req: &CreateRequest, max_size: usize) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(
        "content",
        &req.content,
        &[Rule::Required, Rule::Length { min: 2, max: max_size }],
    );
    errors
}

fn validate_credentials(username: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check("username", username, &[Rule::Required]);
    errors.check("password", password, &PASSWORD_RULES);
    errors
}
