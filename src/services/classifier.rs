pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".webp", ".bmp", ".tiff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
    Unsupported,
}

/// Decides the extraction path from the filename extension alone (case-insensitive).
pub fn classify(filename: &str) -> DocumentKind {
    let name = filename.to_lowercase();

    if name.ends_with(".pdf") {
        DocumentKind::Pdf
    } else if ALLOWED_IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        DocumentKind::Image
    } else {
        DocumentKind::Unsupported
    }
}
