use serde::Deserialize;

/// POST /wishlist/purchases
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub code: String,
    pub url: String,
}

/// POST /tasks/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /tasks
///
/// The id is optional; the handler assigns the creation timestamp when the
/// client omits it.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
}
