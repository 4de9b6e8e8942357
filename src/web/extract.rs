//! Extraction boundary trait for web integration.

/// Raw request data supplied by a framework integration.
///
/// Implementations must be side-effect-free and return the same value when
/// called twice for the same request. Header lookups are case-insensitive.
///
/// # Examples
///
/// ```
/// use castle_sdk::web::RequestSource;
///
/// struct MyFrameworkRequest {
///     remote_addr: String,
///     user_agent: Option<String>,
/// }
///
/// impl RequestSource for MyFrameworkRequest {
///     fn header(&self, name: &str) -> Option<String> {
///         name.eq_ignore_ascii_case("User-Agent")
///             .then(|| self.user_agent.clone())
///             .flatten()
///     }
///
///     fn cookie(&self, _name: &str) -> Option<String> {
///         None
///     }
///
///     fn peer_address(&self) -> String {
///         self.remote_addr.clone()
///     }
/// }
/// ```
pub trait RequestSource {
    /// Value of the header `name`, if present.
    fn header(&self, name: &str) -> Option<String>;

    /// Value of the cookie `name`, if present.
    fn cookie(&self, name: &str) -> Option<String>;

    /// Address of the direct transport peer.
    fn peer_address(&self) -> String;

    /// All headers in arrival order, for the outbound header payload.
    ///
    /// Defaults to none.
    fn header_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
