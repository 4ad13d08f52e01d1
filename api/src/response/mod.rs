use serde::Serialize;

/// Envelope for every outgoing JSON response:
///
/// ```json
/// { "success": true, "data": { ... }, "message": "..." }
/// ```
///
/// Error responses additionally carry a stable machine-readable `kind`
/// (and its coarse `category`) so clients never have to parse messages:
///
/// ```json
/// { "success": false, "data": {}, "message": "...", "kind": "weekend_date", "category": "calendar_conflict" }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            kind: None,
            category: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
            kind: None,
            category: None,
        }
    }

    pub fn error_kind(
        kind: &'static str,
        category: &'static str,
        message: impl Into<String>,
    ) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
            kind: Some(kind),
            category: Some(category),
        }
    }
}

/// Placeholder payload for responses with no useful data.
#[derive(Serialize, Default)]
pub struct Empty {}
