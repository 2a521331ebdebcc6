use serde::{Deserialize, Serialize};

/// Claims carried by the bearer tokens issued by the ShareFood identity provider.
///
/// `sub` holds the numeric user ID as a string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}
