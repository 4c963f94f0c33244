// src/handlers/multipart.rs
// DOCUMENTATION: multipart/form-data decoding for image uploads
// PURPOSE: Collect every file part sent under the `image` field

use crate::errors::TravelError;
use crate::services::ImageUpload;
use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::HttpRequest;
use futures_util::stream;

pub const IMAGE_FIELD: &str = "image";

/// Content-Type header of the request, required for multipart boundaries
pub fn content_type(req: &HttpRequest) -> Result<&str, TravelError> {
    req.headers()
        .get(header::CONTENT_TYPE)
        .ok_or_else(|| TravelError::InvalidInput("missing Content-Type header".into()))?
        .to_str()
        .map_err(|e| TravelError::InvalidInput(e.to_string()))
}

/// Parse a buffered multipart body into image uploads
/// DOCUMENTATION: Parts without a file name or under other field names are
/// ignored; having no `image` file part at all is an input error
pub async fn read_images(content_type: &str, body: Bytes) -> Result<Vec<ImageUpload>, TravelError> {
    let boundary = multer::parse_boundary(content_type)?;
    let body = stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(body, boundary);

    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let data = field.bytes().await?;
        uploads.push(ImageUpload { file_name, data });
    }

    if uploads.is_empty() {
        return Err(TravelError::InvalidInput(format!(
            "no files found under the '{}' key",
            IMAGE_FIELD
        )));
    }

    Ok(uploads)
}
