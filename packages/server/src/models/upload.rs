use serde::Serialize;

/// Response to a successful media upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Public URL of the stored file.
    #[schema(example = "http://localhost:3000/media/3a7bd3e2360a3d29eea436fcfb7e44c735d117c42d1c1835420b6b9942dd4f1b.png")]
    pub url: String,
}
