use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

/// Browser features the page never uses; all disabled.
const DISABLED_FEATURES: &[&str] = &[
    "accelerometer",
    "autoplay",
    "camera",
    "cross-origin-isolated",
    "display-capture",
    "document-domain",
    "encrypted-media",
    "fullscreen",
    "geolocation",
    "gyroscope",
    "keyboard-map",
    "magnetometer",
    "microphone",
    "midi",
    "payment",
    "picture-in-picture",
    "publickey-credentials-get",
    "screen-wake-lock",
    "sync-xhr",
    "usb",
    "web-share",
    "xr-spatial-tracking",
];

/// Content-Security-Policy allow-list, one directive per resource type.
const CSP_DIRECTIVES: &[(&str, &str)] = &[
    ("default-src", "'unsafe-inline' 'self'"),
    ("img-src", "'self' data: https://avatars.githubusercontent.com https://gravatar.com"),
    ("script-src", "'self' 'unsafe-inline'"),
    ("manifest-src", "'self'"),
    ("connect-src", "'self'"),
    ("style-src-elem", "'self' 'unsafe-inline'"),
    ("worker-src", "'self' blob:"),
];

pub fn permissions_policy() -> String {
    DISABLED_FEATURES
        .iter()
        .map(|feature| format!("{}=()", feature))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn content_security_policy() -> String {
    CSP_DIRECTIVES
        .iter()
        .map(|(directive, sources)| format!("{} {}", directive, sources))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The full set of security headers sent with every response
pub fn security_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("origin-when-cross-origin"),
    );
    // Both values are built from the ASCII constants above.
    if let Ok(value) = HeaderValue::from_str(&permissions_policy()) {
        headers.insert(PERMISSIONS_POLICY, value);
    }
    if let Ok(value) = HeaderValue::from_str(&content_security_policy()) {
        headers.insert(header::CONTENT_SECURITY_POLICY, value);
    }
    headers
}

/// Middleware adding the security headers to every response
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    response.headers_mut().extend(security_headers());
    response
}
