//! Response DTOs for service outputs

use serde::Serialize;

use modchat_core::Message;

/// Where a write ultimately landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Delivery {
    /// The primary store acknowledged the write
    Confirmed,
    /// The primary store was unreachable; the write landed in the local
    /// fallback and the UI should show a "saved locally" notice
    SavedLocally,
}

impl Delivery {
    #[inline]
    pub fn is_degraded(self) -> bool {
        self == Self::SavedLocally
    }
}

/// A sent message together with its delivery outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub message: Message,
    pub delivery: Delivery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_degraded_flag() {
        assert!(Delivery::SavedLocally.is_degraded());
        assert!(!Delivery::Confirmed.is_degraded());
    }
}
