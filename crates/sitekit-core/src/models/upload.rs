use serde::Serialize;

/// Permission to write one object into the storage bucket.
///
/// Step 1 of the upload sequence returns this pair: the storage key the
/// object will live under, and a time-limited, write-only presigned URL
/// on the storage host. The URL is single-use; an expired or failed PUT
/// means requesting a fresh permission, not retrying this one. Step 2
/// consumes the value, so reuse is a compile error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPermission {
    pub path: String,
    pub url: String,
}

/// Proof that the object's bytes were written to the bucket. Step 3
/// consumes this to register the upload with the CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
}

/// Registered upload. Asset processing (transcoding and the like)
/// continues asynchronously on the server after this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUpload {
    pub id: String,
}

/// `POST /upload-requests` body: asks for permission to upload a file
/// under the given remote name.
#[derive(Debug, Clone, Serialize)]
pub struct UploadRequestPayload {
    data: UploadRequestData,
}

#[derive(Debug, Clone, Serialize)]
struct UploadRequestData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: UploadRequestAttributes,
}

#[derive(Debug, Clone, Serialize)]
struct UploadRequestAttributes {
    filename: String,
}

impl UploadRequestPayload {
    pub fn new(filename: impl Into<String>) -> Self {
        UploadRequestPayload {
            data: UploadRequestData {
                kind: "upload_request",
                attributes: UploadRequestAttributes {
                    filename: filename.into(),
                },
            },
        }
    }
}

/// `POST /uploads` body: registers a stored object as an upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadPayload {
    data: UploadData,
}

#[derive(Debug, Clone, Serialize)]
struct UploadData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: UploadAttributes,
}

#[derive(Debug, Clone, Serialize)]
struct UploadAttributes {
    path: String,
}

impl UploadPayload {
    pub fn new(path: impl Into<String>) -> Self {
        UploadPayload {
            data: UploadData {
                kind: "upload",
                attributes: UploadAttributes { path: path.into() },
            },
        }
    }
}
