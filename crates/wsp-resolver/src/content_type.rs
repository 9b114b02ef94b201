use wsp_types::ResourcePath;

pub const HTML: &str = "text/html; charset=utf-8";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type for a well-known file extension.
pub fn for_extension(ext: &str) -> Option<&'static str> {
    let ct = match ext {
        "html" => HTML,
        "js" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "ico" => "image/x-icon",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        _ => return None,
    };
    Some(ct)
}

/// Content type to serve when the record does not set one.
pub fn infer(path: &ResourcePath, accepts_html: bool) -> &'static str {
    match path.extension().as_deref().and_then(for_extension) {
        Some(ct) => ct,
        None if accepts_html => HTML,
        None => OCTET_STREAM,
    }
}
