use {
    super::error::ReconcileError,
    super::id::ProviderRef,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    /// Lifecycle rank — higher means further along. A webhook that moves an
    /// order to a lower rank (refunded → paid) is suspicious and gets logged,
    /// but is still applied: the reconciler is last-write-wins.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Paid | Self::Cancelled => 1,
            Self::Refunded => 2,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = ReconcileError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ReconcileError::Validation(format!(
                "unknown payment status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Stripe,
    Paystack,
    Flutterwave,
    Crypto,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Paystack => "paystack",
            Self::Flutterwave => "flutterwave",
            Self::Crypto => "crypto",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = ReconcileError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "stripe" => Ok(Self::Stripe),
            "paystack" => Ok(Self::Paystack),
            "flutterwave" => Ok(Self::Flutterwave),
            "crypto" => Ok(Self::Crypto),
            other => Err(ReconcileError::Validation(format!(
                "unknown payment method: {other}"
            ))),
        }
    }
}

/// One entry of the order's append-only audit trail. Event metadata is
/// spread into the entry itself (`providerEvent` and friends), matching the
/// stored document shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub status: PaymentStatus,
    pub at: DateTime<Utc>,
    pub via: PaymentMethod,
    #[serde(flatten)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

/// Order record as held by the store. Owned by the surrounding marketplace;
/// this core only mutates `payment_status`, the two append-only sequences,
/// and `updated_at`.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub payment_ref: ProviderRef,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub total_amount: i64,
    pub currency: String,
    pub payment_meta: Vec<serde_json::Value>,
    pub timeline: Vec<TimelineEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For INSERT at checkout time — id generated in Rust via Uuid::now_v7().
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub payment_ref: ProviderRef,
    pub payment_method: PaymentMethod,
    pub total_amount: i64,
    pub currency: String,
}

impl NewOrder {
    /// Materialize the pending order, seeding the timeline so the
    /// "payment_status equals the last timeline entry" invariant holds from
    /// the first write.
    pub fn into_order(self) -> Order {
        let now = Utc::now();
        Order {
            id: self.id,
            payment_ref: self.payment_ref,
            payment_method: self.payment_method,
            payment_status: PaymentStatus::Pending,
            total_amount: self.total_amount,
            currency: self.currency,
            payment_meta: Vec::new(),
            timeline: vec![TimelineEntry {
                status: PaymentStatus::Pending,
                at: now,
                via: self.payment_method,
                meta: serde_json::Map::new(),
            }],
            created_at: now,
            updated_at: now,
        }
    }
}

/// What the Status Transition Applier hands the store: the new status, the
/// timeline entry to append, and the provider-event blob for `payment_meta`
/// (absent when the event carried no metadata).
#[derive(Debug, Clone)]
pub struct StatusTransition {
    pub status: PaymentStatus,
    pub entry: TimelineEntry,
    pub provider_meta: Option<serde_json::Value>,
}

impl StatusTransition {
    /// `at` is the processing time, not the provider's event time.
    pub fn new(
        status: PaymentStatus,
        via: PaymentMethod,
        meta: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let provider_meta = if meta.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(meta.clone()))
        };
        Self {
            entry: TimelineEntry {
                status: status.clone(),
                at: Utc::now(),
                via,
                meta,
            },
            status,
            provider_meta,
        }
    }
}
