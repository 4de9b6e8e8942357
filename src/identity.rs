/// Header a client-side integration sets with the device's client id.
pub const CLIENT_ID_HEADER: &str = "X-Castle-Client-ID";

/// Cookie the browser integration stores the client id in.
pub const CLIENT_ID_COOKIE: &str = "__cid";

/// Computes the stable client identifier of a request.
///
/// The client-id header wins over the cookie; an empty string is returned
/// when neither is present. Empty values count as absent.
///
/// # Examples
///
/// ```
/// use castle_sdk::resolve_client_id;
///
/// let id = resolve_client_id(|_| None, |name| (name == "__cid").then(|| "cid-1".to_string()));
/// assert_eq!(id, "cid-1");
///
/// assert_eq!(resolve_client_id(|_| None, |_| None), "");
/// ```
pub fn resolve_client_id<H, C>(header: H, cookie: C) -> String
where
    H: Fn(&str) -> Option<String>,
    C: Fn(&str) -> Option<String>,
{
    header(CLIENT_ID_HEADER)
        .filter(|v| !v.is_empty())
        .or_else(|| cookie(CLIENT_ID_COOKIE).filter(|v| !v.is_empty()))
        .unwrap_or_default()
}
