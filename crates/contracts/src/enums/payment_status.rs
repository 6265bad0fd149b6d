use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Payment state of an order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    PartiallyPaid,
    FullyPaid,
}

impl PaymentStatus {
    /// Label used on the wire and in exports
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::PartiallyPaid => "partially paid",
            PaymentStatus::FullyPaid => "fully paid",
        }
    }

    pub fn all() -> Vec<PaymentStatus> {
        vec![
            PaymentStatus::Pending,
            PaymentStatus::PartiallyPaid,
            PaymentStatus::FullyPaid,
        ]
    }

    /// Parse a label; accepts "partially paid", "partially_paid", "Partially-Paid"...
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();
        match normalized.as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "partially paid" => Some(PaymentStatus::PartiallyPaid),
            "fully paid" => Some(PaymentStatus::FullyPaid),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PaymentStatus::from_label(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown payment status: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_label_variants() {
        assert_eq!(PaymentStatus::from_label("pending"), Some(PaymentStatus::Pending));
        assert_eq!(
            PaymentStatus::from_label("Partially Paid"),
            Some(PaymentStatus::PartiallyPaid)
        );
        assert_eq!(
            PaymentStatus::from_label("fully_paid"),
            Some(PaymentStatus::FullyPaid)
        );
        assert_eq!(PaymentStatus::from_label("refunded"), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&PaymentStatus::PartiallyPaid).unwrap();
        assert_eq!(json, "\"partially paid\"");
        let parsed: PaymentStatus = serde_json::from_str("\"FULLY-PAID\"").unwrap();
        assert_eq!(parsed, PaymentStatus::FullyPaid);
        assert!(serde_json::from_str::<PaymentStatus>("\"nope\"").is_err());
    }

    #[test]
    fn test_ordering_reflects_progress() {
        assert!(PaymentStatus::Pending < PaymentStatus::PartiallyPaid);
        assert!(PaymentStatus::PartiallyPaid < PaymentStatus::FullyPaid);
    }
}
