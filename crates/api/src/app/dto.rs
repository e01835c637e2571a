use serde::{Deserialize, Serialize};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RecognizeRequest {
    /// Base64 image, bare or as a `data:` URL.
    pub image: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    /// `null` when the image was understood but no item was recognized.
    pub item: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub item: String,
    pub quantity: u64,
}

impl From<pantry_infra::IntakeReceipt> for IntakeResponse {
    fn from(receipt: pantry_infra::IntakeReceipt) -> Self {
        Self {
            item: receipt.item,
            quantity: receipt.quantity,
        }
    }
}
