//! Embedding hymn sheet images as self-contained `data:` text

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::bulletin::Bulletin;
use super::edit::Edit;
use super::error::ImageError;

/// Encode image bytes into a `data:<mime>;base64,...` string
pub fn embed(bytes: &[u8], mime: &str) -> Result<String, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::UnsupportedImage("empty file".to_string()));
    }
    let mime = mime.trim().to_ascii_lowercase();
    match mime.split_once('/') {
        Some(("image", subtype)) if !subtype.is_empty() && !subtype.contains([';', ',', ' ']) => {}
        _ => return Err(ImageError::UnsupportedImage(format!("not an image type: {mime:?}"))),
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Guess the MIME type of an image from its file extension
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// Split an embedded image back into its MIME type and raw bytes
pub fn decode_data_url(text: &str) -> Option<(String, Vec<u8>)> {
    let rest = text.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

/// Return `bulletin` with `bytes` attached as the hymn sheet.
///
/// On failure the caller keeps its current bulletin; nothing is overwritten.
pub fn embed_into(bulletin: &Bulletin, bytes: &[u8], mime: &str) -> Result<Bulletin, ImageError> {
    let sheet = embed(bytes, mime)?;
    Edit::SheetMusic(Some(sheet))
        .apply(bulletin)
        .map_err(|e| ImageError::UnsupportedImage(e.to_string()))
}

/// Read an image file picked by the user, with its MIME type
pub fn read_image(path: &Path) -> anyhow::Result<(Vec<u8>, &'static str)> {
    let mime = mime_for_path(path)
        .ok_or_else(|| ImageError::UnsupportedImage(format!("unknown image extension: {}", path.display())))?;
    let bytes = std::fs::read(path)?;
    tracing::info!("Read {} ({} bytes, {})", path.display(), bytes.len(), mime);
    Ok((bytes, mime))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_embed_is_deterministic() {
        let first = embed(PNG_HEADER, "image/png").unwrap();
        let second = embed(PNG_HEADER, "image/png").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_embed_rejects_empty() {
        assert!(matches!(embed(&[], "image/png"), Err(ImageError::UnsupportedImage(_))));
    }

    #[test]
    fn test_embed_rejects_other_types() {
        for mime in ["text/plain", "application/pdf", "image/", "image", "", "image/png;charset=x"] {
            assert!(embed(PNG_HEADER, mime).is_err(), "{mime:?} should be rejected");
        }
    }

    #[test]
    fn test_embed_into_keeps_existing_sheet_on_failure() {
        let with_sheet = embed_into(&Bulletin::default(), PNG_HEADER, "image/png").unwrap();
        let existing = with_sheet.hymn.music_sheet.clone();
        assert!(existing.is_some());

        let result = embed_into(&with_sheet, &[], "image/png");
        assert!(matches!(result, Err(ImageError::UnsupportedImage(_))));
        assert_eq!(with_sheet.hymn.music_sheet, existing);
    }

    #[test]
    fn test_decode_data_url() {
        let sheet = embed(PNG_HEADER, "image/png").unwrap();
        let (mime, bytes) = decode_data_url(&sheet).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, PNG_HEADER);

        assert!(decode_data_url("https://example.com/sheet.png").is_none());
        assert!(decode_data_url("data:image/png,plain").is_none());
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("sheet.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("a/b/sheet.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_for_path(Path::new("no_extension")), None);
    }
}
