//! Turns uploaded image bytes into the inline payload the provider expects.

use axum::{body::Bytes, extract::multipart::Field};
use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Declared when neither the upload nor the magic bytes reveal a type.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// An image as received from the client, owned by a single request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn encode(&self) -> EncodedImage {
        encode(&self.bytes, &self.mime_type)
    }
}

/// Base64 image data paired with its MIME type.
///
/// Serializes as `{"mimeType": ..., "data": ...}`, the shape of an inline
/// data part in a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    /// `data:` URL suitable for an `<img src>` preview.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Encodes `bytes` as standard base64. The MIME type is carried as given.
pub fn encode(bytes: &[u8], mime_type: &str) -> EncodedImage {
    EncodedImage {
        mime_type: mime_type.to_string(),
        data: general_purpose::STANDARD.encode(bytes),
    }
}

/// Guesses an image MIME type from the leading magic bytes.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    let mime = match image::guess_format(bytes).ok()? {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        ImageFormat::Ico => "image/x-icon",
        ImageFormat::Avif => "image/avif",
        _ => return None,
    };
    Some(mime)
}

/// Drains a multipart field into an [`UploadedImage`].
///
/// A missing or generic content type is replaced by the sniffed one.
pub async fn read_field(field: Field<'_>) -> Result<UploadedImage> {
    let file_name = field.file_name().map(str::to_owned);
    let declared = field
        .content_type()
        .map(str::to_owned)
        .filter(|m| !m.is_empty() && m != FALLBACK_MIME_TYPE);

    let bytes = field.bytes().await?;

    let mime_type = declared.unwrap_or_else(|| {
        sniff_mime_type(&bytes)
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string()
    });

    Ok(UploadedImage {
        file_name,
        mime_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_encode_round_trips() {
        let samples: [&[u8]; 4] = [b"x", PNG_MAGIC, JPEG_MAGIC, &[0u8, 255, 128, 7, 3]];
        for bytes in samples {
            let encoded = encode(bytes, "image/png");
            let decoded = general_purpose::STANDARD.decode(&encoded.data).unwrap();
            assert_eq!(decoded, bytes);
            assert_eq!(encoded.mime_type, "image/png");
        }
    }

    #[test]
    fn test_encode_does_not_validate_mime() {
        let encoded = encode(b"hello", "text/plain");
        assert_eq!(encoded.mime_type, "text/plain");
        assert_eq!(encoded.data, "aGVsbG8=");
    }

    #[test]
    fn test_serializes_as_inline_data() {
        let json = serde_json::to_value(encode(b"hi", "image/jpeg")).unwrap();
        assert_eq!(json["mimeType"], "image/jpeg");
        assert_eq!(json["data"], "aGk=");
    }

    #[test]
    fn test_data_url() {
        let encoded = encode(b"hi", "image/gif");
        assert_eq!(encoded.data_url(), "data:image/gif;base64,aGk=");
    }

    #[test]
    fn test_sniff_known_formats() {
        assert_eq!(sniff_mime_type(PNG_MAGIC), Some("image/png"));
        assert_eq!(sniff_mime_type(JPEG_MAGIC), Some("image/jpeg"));
        assert_eq!(sniff_mime_type(b"GIF89a......"), Some("image/gif"));
    }

    #[test]
    fn test_sniff_rejects_text() {
        assert_eq!(sniff_mime_type(b"just some text"), None);
        assert_eq!(sniff_mime_type(b""), None);
    }

    #[test]
    fn test_uploaded_image_size() {
        let image = UploadedImage {
            file_name: Some("a.png".into()),
            mime_type: "image/png".into(),
            bytes: Bytes::from_static(PNG_MAGIC),
        };
        assert_eq!(image.size(), PNG_MAGIC.len());
        assert_eq!(image.encode().mime_type, "image/png");
    }
}
