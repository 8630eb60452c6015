//! Domain operations for the site API client.
//!
//! Request envelopes and response extraction live in `sitekit_core`;
//! this module wires them to the HTTP helpers on `ApiClient`.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::ApiClient;
use sitekit_core::models::{
    data_id, upload_url, ItemPayload, RegisteredUpload, StoredObject, UploadPayload,
    UploadPermission, UploadRequestPayload,
};
use sitekit_core::ClientError;

impl ApiClient {
    /// List the records of one model, including nested records.
    ///
    /// Returns the parsed response body as-is: no pagination handling,
    /// the caller gets whatever page size the server default returns.
    pub async fn list_records(&self, model_id: &str) -> Result<Value, ClientError> {
        let query = vec![
            ("filter[type]", model_id.to_string()),
            ("nested", "true".to_string()),
        ];
        self.get("/items", &query).await
    }

    /// Create a record under the given model. Returns the new record id.
    pub async fn create_record(
        &self,
        model_id: &str,
        attributes: Map<String, Value>,
    ) -> Result<String, ClientError> {
        let payload = ItemPayload::new(model_id, attributes);
        let body = self.post_json("/items", &payload).await?;
        let id = data_id(&body)?;
        debug!(record_id = %id, "created record");
        Ok(id)
    }

    /// Step 1 of an upload: ask the CMS for permission to write one
    /// object. The response pairs the storage key with a presigned URL.
    pub async fn request_upload(&self, remote_name: &str) -> Result<UploadPermission, ClientError> {
        if remote_name.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "remote file name cannot be empty".to_string(),
            ));
        }

        let payload = UploadRequestPayload::new(remote_name);
        let body = self.post_json("/upload-requests", &payload).await?;

        Ok(UploadPermission {
            path: data_id(&body)?,
            url: upload_url(&body)?,
        })
    }

    /// Step 2: write the bytes to the presigned URL, consuming the
    /// permission. The storage host is its own auth domain, so no CMS
    /// headers are sent.
    pub async fn store_bytes(
        &self,
        permission: UploadPermission,
        bytes: Vec<u8>,
    ) -> Result<StoredObject, ClientError> {
        self.put_raw(&permission.url, bytes).await?;
        Ok(StoredObject {
            path: permission.path,
        })
    }

    /// Step 3: register the stored object as an upload. Asset processing
    /// (e.g. transcoding) continues asynchronously on the server after
    /// this returns.
    pub async fn register_upload(
        &self,
        stored: StoredObject,
    ) -> Result<RegisteredUpload, ClientError> {
        let payload = UploadPayload::new(&stored.path);
        let body = self.post_json("/uploads", &payload).await?;
        Ok(RegisteredUpload {
            id: data_id(&body)?,
        })
    }

    /// Upload a local file: request permission, write the bytes, register
    /// the upload, in that strict order.
    ///
    /// The file is read up front so a missing path fails before any
    /// network call. If step 2 or 3 fails, the step-1 permission is left
    /// orphaned; there is no cleanup call, and an expired presigned URL
    /// means starting over from step 1.
    pub async fn upload_asset(
        &self,
        local_path: impl AsRef<Path>,
        remote_name: &str,
    ) -> Result<RegisteredUpload, ClientError> {
        let local_path = local_path.as_ref();
        let bytes = tokio::fs::read(local_path).await?;
        debug!(
            path = %local_path.display(),
            size = bytes.len(),
            "read local file for upload"
        );

        let permission = self.request_upload(remote_name).await?;
        let stored = self.store_bytes(permission, bytes).await?;
        self.register_upload(stored).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Auth;
    use mockito::Matcher;
    use serde_json::json;
    use std::io::Write;

    const TOKEN: &str = "test-token";

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(server.url(), Auth::Bearer(TOKEN.to_string())).unwrap()
    }

    #[tokio::test]
    async fn list_records_returns_body_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "data": [
                { "id": "r1", "type": "item", "attributes": { "title": "first" } },
                { "id": "r2", "type": "item", "attributes": { "title": "second" } }
            ]
        });

        let mock = server
            .mock("GET", "/items")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filter[type]".into(), "123456".into()),
                Matcher::UrlEncoded("nested".into(), "true".into()),
            ]))
            .match_header("authorization", "Bearer test-token")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.list_records("123456").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn list_records_surfaces_api_error_with_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/items")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"data":[{"id":"INVALID_AUTHORIZATION_HEADER"}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.list_records("123456").await.unwrap_err();

        mock.assert_async().await;
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("INVALID_AUTHORIZATION_HEADER"));
            }
            other => panic!("expected Api error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_record_posts_envelope_and_returns_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/items")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::Json(json!({
                "data": {
                    "type": "item",
                    "attributes": { "title": "test" },
                    "relationships": {
                        "item_type": {
                            "data": { "type": "item_type", "id": "123456" }
                        }
                    }
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"id":"new-record","type":"item"}}"#)
            .create_async()
            .await;

        let mut attributes = Map::new();
        attributes.insert("title".to_string(), json!("test"));

        let client = client_for(&server);
        let id = client.create_record("123456", attributes).await.unwrap();

        mock.assert_async().await;
        assert_eq!(id, "new-record");
    }

    #[tokio::test]
    async fn create_record_without_data_id_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/items")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"type":"item"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.create_record("123456", Map::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn upload_asset_runs_the_three_steps_in_order() {
        let mut server = mockito::Server::new_async().await;
        let file_bytes = "sample image bytes";

        // Step 1: permission names the storage path and the presigned URL.
        let request_mock = server
            .mock("POST", "/upload-requests")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::Json(json!({
                "data": {
                    "type": "upload_request",
                    "attributes": { "filename": "filename.jpg" }
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": {
                        "id": "path/abc",
                        "attributes": { "url": format!("{}/signed", server.url()) }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        // Step 2: raw bytes land on the presigned URL with no CMS auth.
        let put_mock = server
            .mock("PUT", "/signed")
            .match_header("authorization", Matcher::Missing)
            .match_body(file_bytes)
            .with_status(200)
            .create_async()
            .await;

        // Step 3: the storage path from step 1 is registered.
        let register_mock = server
            .mock("POST", "/uploads")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::Json(json!({
                "data": {
                    "type": "upload",
                    "attributes": { "path": "path/abc" }
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"id":"upload-1"}}"#)
            .create_async()
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(file_bytes.as_bytes()).unwrap();

        let client = client_for(&server);
        let upload = client
            .upload_asset(file.path(), "filename.jpg")
            .await
            .unwrap();

        // The PUT target and the registered path both come only from the
        // step-1 response, so a satisfied mock chain implies the order.
        request_mock.assert_async().await;
        put_mock.assert_async().await;
        register_mock.assert_async().await;
        assert_eq!(upload.id, "upload-1");
    }

    #[tokio::test]
    async fn upload_asset_stops_before_register_when_put_fails() {
        let mut server = mockito::Server::new_async().await;

        let _request_mock = server
            .mock("POST", "/upload-requests")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": {
                        "id": "path/abc",
                        "attributes": { "url": format!("{}/signed", server.url()) }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let _put_mock = server
            .mock("PUT", "/signed")
            .with_status(403)
            .with_body("expired")
            .create_async()
            .await;

        // Step 3 must never run when step 2 fails.
        let register_mock = server
            .mock("POST", "/uploads")
            .expect(0)
            .create_async()
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bytes").unwrap();

        let client = client_for(&server);
        let err = client
            .upload_asset(file.path(), "filename.jpg")
            .await
            .unwrap_err();

        register_mock.assert_async().await;
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "expired");
            }
            other => panic!("expected Api error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn upload_asset_fails_fast_on_missing_file() {
        let mut server = mockito::Server::new_async().await;

        // No network call may happen for a missing local file.
        let request_mock = server
            .mock("POST", "/upload-requests")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .upload_asset("does-not-exist.jpg", "filename.jpg")
            .await
            .unwrap_err();

        request_mock.assert_async().await;
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[tokio::test]
    async fn request_upload_rejects_empty_name() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let err = client.request_upload("  ").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }
}
