use http::Uri;

use crate::error::NetworkError;

/// Turns a configured gRPC address into a URI tonic can dial. Bare `host:port` inputs are
/// assumed to be TLS endpoints.
pub(crate) fn normalize_grpc_endpoint(input: &str) -> Result<String, NetworkError> {
    let invalid = |reason: &str| NetworkError::InvalidEndpoint(format!("{}: {}", input, reason));
    let mut uri = input
        .trim()
        .parse::<Uri>()
        .map_err(|e| invalid(&e.to_string()))?;

    if uri.host().is_none() {
        return Err(invalid("missing host"));
    }

    if uri.scheme().is_none() {
        uri = Uri::builder()
            .scheme("https")
            .authority(input.trim())
            .path_and_query("/")
            .build()
            .map_err(|e| invalid(&e.to_string()))?;
    }

    Ok(uri.to_string())
}
