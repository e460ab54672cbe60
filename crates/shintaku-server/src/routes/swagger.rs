//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{CardPayload, ErrorBody, GenerateMessageBody, GenerateMessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(super::generate::generate_message),
    components(schemas(
        GenerateMessageBody,
        CardPayload,
        GenerateMessageResponse,
        ErrorBody,
    )),
    tags(
        (name = "Generate", description = "Oracle message generation")
    ),
    info(
        title = "Shintaku API",
        description = "Gateway for goddess oracle readings",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
