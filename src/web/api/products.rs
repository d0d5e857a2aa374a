//! Product endpoints
//!
//! Create and update take `multipart/form-data` with the text parts `title`,
//! `status` and `stock` and an optional image part `file`. The image is
//! written to the asset directory under a generated name before the product
//! manager runs; the manager owns its cleanup from then on.

use axum::{
    extract::{Multipart, Path, State},
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{ProductInput, UploadedFile};
use crate::web::AppState;
use crate::web::responses::{handle_created, handle_error, handle_result};

/// An image part held in memory until the whole form has been read
#[derive(Debug)]
struct ImagePart {
    content_type: String,
    data: axum::body::Bytes,
}

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> Response {
    handle_result(state.products.get_all().await)
}

/// GET /api/products/{id}
pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    handle_result(state.products.get_one_by_id(&id).await)
}

/// POST /api/products
pub async fn create_product(State(state): State<AppState>, multipart: Multipart) -> Response {
    let (input, upload) = match read_product_form(&state, multipart).await {
        Ok(form) => form,
        Err(e) => return handle_error(e),
    };
    handle_created(state.products.insert_one(input, upload).await)
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let (input, upload) = match read_product_form(&state, multipart).await {
        Ok(form) => form,
        Err(e) => return handle_error(e),
    };
    handle_result(state.products.update_one_by_id(&id, input, upload).await)
}

/// DELETE /api/products/{id}
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    handle_result(state.products.delete_one_by_id(&id).await)
}

/// Read every part of the form, then write the image if one was sent.
///
/// The image is only persisted after the last part parsed cleanly, so a
/// malformed form never leaves a file behind.
async fn read_product_form(
    state: &AppState,
    mut multipart: Multipart,
) -> AppResult<(ProductInput, Option<UploadedFile>)> {
    let mut input = ProductInput::default();
    let mut image: Option<ImagePart> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let has_file_name = field.file_name().is_some_and(|n| !n.trim().is_empty());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file part: {e}")))?;

                // Browsers send an empty part when no file was chosen
                if !has_file_name && data.is_empty() {
                    continue;
                }
                if !content_type.starts_with("image/") {
                    return Err(AppError::validation(format!(
                        "Thumbnail must be an image, got {content_type}"
                    )));
                }
                image = Some(ImagePart { content_type, data });
            }
            Some(part @ ("title" | "status" | "stock")) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read {part}: {e}")))?;
                match part {
                    "title" => input.title = Some(text),
                    "status" => input.status = Some(text.into()),
                    _ => input.stock = Some(text.into()),
                }
            }
            _ => {}
        }
    }

    let upload = match image {
        Some(image) => Some(save_image(state, image).await?),
        None => None,
    };
    Ok((input, upload))
}

async fn save_image(state: &AppState, image: ImagePart) -> AppResult<UploadedFile> {
    let filename = format!(
        "{}.{}",
        Uuid::new_v4(),
        extension_for(&image.content_type)
    );
    state.store.save_asset(&filename, &image.data).await?;
    debug!("Stored upload {} ({} bytes)", filename, image.data.len());
    Ok(UploadedFile::new(filename))
}

/// File extension derived from an `image/*` content type
fn extension_for(content_type: &str) -> String {
    let subtype = content_type
        .split('/')
        .nth(1)
        .and_then(|s| s.split(['+', ';']).next())
        .map(str::trim)
        .unwrap_or_default();

    match subtype {
        "jpeg" | "pjpeg" => "jpg".to_string(),
        s if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()) => {
            s.to_ascii_lowercase()
        }
        _ => "img".to_string(),
    }
}
