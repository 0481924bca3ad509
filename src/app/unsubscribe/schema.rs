use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct UnsubscribeParams {
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct UnsubscribeResponseBody {
    pub status: &'static str,
    pub name: String,
    pub email: String,
}
