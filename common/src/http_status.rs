//! HTTP status classification for the RPC exchange loop.

/// How the session loop must react to a daemon status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200: body carries a response envelope.
    Success,
    /// 409: daemon issued a fresh session token; retry with it.
    SessionConflict,
    /// 401: credentials missing or wrong.
    Unauthorized,
    /// 403 / 421: wrong endpoint or client not on the daemon's whitelist.
    Misdirected,
    /// Anything else.
    Unexpected,
}

/// HTTP status code for error categorization.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const OK: HttpStatusCode = HttpStatusCode(200);
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);
    pub const FORBIDDEN: HttpStatusCode = HttpStatusCode(403);
    pub const CONFLICT: HttpStatusCode = HttpStatusCode(409);
    pub const MISDIRECTED_REQUEST: HttpStatusCode = HttpStatusCode(421);

    pub fn classify(&self) -> StatusClass {
        match self.0 {
            200 => StatusClass::Success,
            409 => StatusClass::SessionConflict,
            401 => StatusClass::Unauthorized,
            403 | 421 => StatusClass::Misdirected,
            _ => StatusClass::Unexpected,
        }
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
