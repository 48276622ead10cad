//! Envelope unwrapping shared by every list and detail endpoint.
//!
//! List endpoints answer `{payload: [...], meta_data: {total_pages_count,
//! limit, total_items_count}}`; detail endpoints answer `{payload: {...}}`.

use dashboard_logging::dashboard_debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::backend::Backend;
use crate::{ApiError, ApiListResponse, ApiResult, ApiSingleResponse, FailureKind, ListQuery};

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    payload: Option<Vec<T>>,
    meta_data: Option<MetaData>,
}

#[derive(Debug, Deserialize, Default)]
struct MetaData {
    total_pages_count: Option<u64>,
    #[allow(dead_code)]
    limit: Option<u64>,
    total_items_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SingleEnvelope<T> {
    payload: Option<T>,
}

pub async fn fetch_list_data<T>(
    backend: &dyn Backend,
    url: &str,
    query: &ListQuery,
) -> ApiResult<ApiListResponse<T>>
where
    T: DeserializeOwned,
{
    let body = backend.get(url, query.pairs()).await?;
    unwrap_list(body)
}

pub async fn fetch_single_data<T>(
    backend: &dyn Backend,
    url: &str,
) -> ApiResult<ApiSingleResponse<T>>
where
    T: DeserializeOwned,
{
    let body = backend.get(url, &[]).await?;
    unwrap_single(body)
}

/// Mutation counterpart of `fetch_single_data`.
pub async fn send_single_data<T>(
    backend: &dyn Backend,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> ApiResult<ApiSingleResponse<T>>
where
    T: DeserializeOwned,
{
    let body = backend.send(method, url, body).await?;
    unwrap_single(body)
}

pub(crate) fn unwrap_list<T: DeserializeOwned>(body: Value) -> ApiResult<ApiListResponse<T>> {
    if body.is_null() {
        return Ok(ApiListResponse::empty());
    }
    let envelope: ListEnvelope<T> = serde_json::from_value(body).map_err(decode_error)?;
    let meta = envelope.meta_data.unwrap_or_default();
    Ok(ApiListResponse {
        data: envelope.payload.unwrap_or_default(),
        page_count: meta.total_pages_count.unwrap_or(0),
        total_items_count: meta.total_items_count.unwrap_or(0),
        error: None,
    })
}

pub(crate) fn unwrap_single<T: DeserializeOwned>(body: Value) -> ApiResult<ApiSingleResponse<T>> {
    if body.is_null() {
        return Ok(ApiSingleResponse {
            data: None,
            error: None,
        });
    }
    let envelope: SingleEnvelope<T> = serde_json::from_value(body).map_err(decode_error)?;
    Ok(ApiSingleResponse {
        data: envelope.payload,
        error: None,
    })
}

fn decode_error(err: serde_json::Error) -> ApiError {
    dashboard_debug!("Envelope did not match the expected shape: {}", err);
    ApiError::from_kind(FailureKind::Decode)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn list_envelope_with_metadata() {
        let body = json!({
            "payload": [1, 2],
            "meta_data": {"total_pages_count": 3, "limit": 10, "total_items_count": 21}
        });
        let list: ApiListResponse<u32> = unwrap_list(body).unwrap();
        assert_eq!(list.data, vec![1, 2]);
        assert_eq!(list.page_count, 3);
        assert_eq!(list.total_items_count, 21);
        assert_eq!(list.error, None);
    }

    #[test]
    fn null_payload_and_empty_metadata_default_to_zero() {
        let list: ApiListResponse<u32> =
            unwrap_list(json!({"payload": null, "meta_data": {}})).unwrap();
        assert_eq!(list, ApiListResponse::empty());

        let list: ApiListResponse<u32> = unwrap_list(json!({})).unwrap();
        assert_eq!(list, ApiListResponse::empty());
    }

    #[test]
    fn mismatched_payload_is_a_decode_failure() {
        let err = unwrap_list::<u32>(json!({"payload": ["x"]})).unwrap_err();
        assert_eq!(err.kind, FailureKind::Decode);
    }

    #[test]
    fn single_envelope_unwraps_payload() {
        let single: ApiSingleResponse<String> =
            unwrap_single(json!({"payload": "cake"})).unwrap();
        assert_eq!(single.data.as_deref(), Some("cake"));

        let single: ApiSingleResponse<String> = unwrap_single(json!({"payload": null})).unwrap();
        assert_eq!(single.data, None);
    }
}
