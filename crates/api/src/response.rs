//! The `{ "data": ... }` envelope every successful response is wrapped in.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wrap `data` as a `200 OK` JSON body.
    pub fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }

    /// Wrap `data` as a `201 Created` JSON body.
    pub fn created(data: T) -> Created<T> {
        (StatusCode::CREATED, Json(Self { data }))
    }
}

/// Handler output for endpoints that create a resource.
pub type Created<T> = (StatusCode, Json<DataResponse<T>>);
