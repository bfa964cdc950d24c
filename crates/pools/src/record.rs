//! Pool Records
//!
//! Raw pool data in the subgraph shape, structural validation, and ingestion
//! of a whole pool universe into typed views.

use std::collections::HashSet;
use std::fmt;

use router_core::constants::PLACEHOLDER_DECIMALS;
use router_core::{PoolError, PoolFilter, PoolId, TokenAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::view::PoolView;

/// Curve family of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolKind {
    /// Weighted constant-product curve
    Weighted,
    /// Amplified stable-swap invariant
    Stable,
}

impl PoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::Stable => "stable",
        }
    }

    /// Whether a pool of this kind passes the ingestion filter
    pub fn passes(&self, filter: PoolFilter) -> bool {
        match filter {
            PoolFilter::All => true,
            PoolFilter::Weighted => *self == Self::Weighted,
            PoolFilter::Stable => *self == Self::Stable,
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-token state of a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub address: TokenAddress,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub balance: Decimal,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Denormalized weight (weighted pools only)
    #[serde(
        default,
        deserialize_with = "amount::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<Decimal>,
}

fn default_decimals() -> u8 {
    PLACEHOLDER_DECIMALS
}

/// Raw pool record as supplied by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    #[serde(default)]
    pub id: PoolId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub swap_fee: Decimal,
    #[serde(
        default,
        deserialize_with = "amount::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_weight: Option<Decimal>,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub total_shares: Decimal,
    /// Amplification parameter; absent or zero means a weighted pool
    #[serde(
        default,
        deserialize_with = "amount::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub amp: Option<Decimal>,
    #[serde(default)]
    pub tokens: Vec<TokenRecord>,
    #[serde(default)]
    pub tokens_list: Vec<TokenAddress>,
}

impl PoolRecord {
    pub fn kind(&self) -> PoolKind {
        match self.amp {
            Some(amp) if !amp.is_zero() => PoolKind::Stable,
            _ => PoolKind::Weighted,
        }
    }

    /// Look up a token record by address, ignoring case
    pub fn find_token(&self, token: &TokenAddress) -> Option<(usize, &TokenRecord)> {
        self.tokens
            .iter()
            .enumerate()
            .find(|(_, t)| t.address.matches(token))
    }

    /// Whether `token` refers to this pool's own share token
    pub fn is_share_token(&self, token: &TokenAddress) -> bool {
        token.as_str().eq_ignore_ascii_case(self.id.as_str())
    }

    /// Sum of the listed tokens' weights, or the explicit total if present
    pub fn effective_total_weight(&self) -> Decimal {
        self.total_weight.unwrap_or_else(|| {
            self.tokens_list
                .iter()
                .filter_map(|t| self.find_token(t))
                .filter_map(|(_, r)| r.weight)
                .sum()
        })
    }

    /// Structural checks; `index` is the record's position in the universe
    pub fn validate(&self, index: usize) -> Result<(), PoolError> {
        if self.id.is_empty() {
            return Err(PoolError::MissingId { index });
        }
        let pool_id = self.id.to_string();

        if self.tokens_list.is_empty() {
            return Err(PoolError::MissingTokens { pool_id });
        }

        if self.total_shares < Decimal::ZERO {
            return Err(PoolError::NegativeBalance {
                pool_id,
                token: self.id.to_string(),
            });
        }

        if matches!(self.amp, Some(amp) if amp < Decimal::ZERO) {
            return Err(PoolError::NegativeAmp { pool_id });
        }

        let kind = self.kind();
        for listed in &self.tokens_list {
            let (_, token) = self
                .find_token(listed)
                .ok_or_else(|| PoolError::MissingTokenRecord {
                    pool_id: pool_id.clone(),
                    token: listed.to_string(),
                })?;

            if token.balance < Decimal::ZERO {
                return Err(PoolError::NegativeBalance {
                    pool_id,
                    token: listed.to_string(),
                });
            }

            match token.weight {
                Some(weight) if weight < Decimal::ZERO => {
                    return Err(PoolError::NegativeWeight {
                        pool_id,
                        token: listed.to_string(),
                    });
                }
                None if kind == PoolKind::Weighted => {
                    return Err(PoolError::MissingWeight {
                        pool_id,
                        token: listed.to_string(),
                    });
                }
                _ => {}
            }
        }

        if kind == PoolKind::Weighted && self.effective_total_weight() <= Decimal::ZERO {
            return Err(PoolError::ZeroTotalWeight { pool_id });
        }

        Ok(())
    }
}

/// Parse pool records from JSON, either a bare array or `{ "pools": [...] }`.
///
/// Records are decoded one at a time so a failure names the offending pool.
pub fn parse_records(json: &str) -> Result<Vec<PoolRecord>, PoolError> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| PoolError::Parse(e.to_string()))?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("pools") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(PoolError::Parse("\"pools\" is not an array".to_string())),
            None => return Err(PoolError::Parse("missing \"pools\" array".to_string())),
        },
        _ => {
            return Err(PoolError::Parse(
                "expected an array of pools or { \"pools\": [...] }".to_string(),
            ))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let id = entry
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<no id>")
                .to_string();
            serde_json::from_value(entry)
                .map_err(|e| PoolError::Parse(format!("pool {} at index {}: {}", id, index, e)))
        })
        .collect()
}

/// Validate a pool universe and build one view per record.
///
/// Every record is checked before any view is built, so a single corrupt
/// record rejects the whole universe. Pools excluded by `filter` are dropped
/// after validation.
pub fn ingest(records: Vec<PoolRecord>, filter: PoolFilter) -> Result<Vec<PoolView>, PoolError> {
    let mut seen: HashSet<&PoolId> = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        record.validate(index)?;
        if !seen.insert(&record.id) {
            return Err(PoolError::DuplicateId {
                pool_id: record.id.to_string(),
            });
        }
    }

    let total = records.len();
    let views: Vec<PoolView> = records
        .into_iter()
        .filter(|r| r.kind().passes(filter))
        .map(PoolView::from_validated)
        .collect();

    if views.len() < total {
        tracing::debug!(
            "Pool filter {:?} dropped {} of {} pools",
            filter,
            total - views.len(),
            total
        );
    }
    tracing::info!("Ingested {} pools", views.len());

    Ok(views)
}

/// Decimal amounts from the data source.
///
/// Accepts strings or JSON numbers. Plain numerals beyond `Decimal`'s range
/// saturate to `Decimal::MAX` (or `MIN` when negative) instead of failing.
mod amount {
    use std::fmt;
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::de::{self, Deserializer, Visitor};
    use serde::Deserialize;

    struct Amount(Decimal);

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal amount as a string or number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
            Ok(Amount(Decimal::from(v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
            Ok(Amount(Decimal::from(v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
            if !v.is_finite() {
                return Err(E::custom(format!("invalid amount {}", v)));
            }
            Ok(Amount(Decimal::try_from(v).unwrap_or(saturated(v < 0.0))))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
            parse_amount(v).map(Amount).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for Amount {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(AmountVisitor)
        }
    }

    fn saturated(negative: bool) -> Decimal {
        if negative {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    }

    fn is_plain_numeral(digits: &str) -> bool {
        let mut parts = digits.splitn(2, '.');
        let whole = parts.next().unwrap_or("");
        let fraction = parts.next().unwrap_or("");
        (!whole.is_empty() || !fraction.is_empty())
            && whole.chars().all(|c| c.is_ascii_digit())
            && fraction.chars().all(|c| c.is_ascii_digit())
    }

    pub(super) fn parse_amount(raw: &str) -> Result<Decimal, String> {
        let s = raw.trim();
        if let Ok(v) = Decimal::from_str(s) {
            return Ok(v);
        }
        if let Ok(v) = Decimal::from_scientific(s) {
            return Ok(v);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if is_plain_numeral(digits) {
            return Ok(saturated(negative));
        }
        Err(format!("invalid amount {:?}", raw))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        Amount::deserialize(deserializer).map(|a| a.0)
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        Option::<Amount>::deserialize(deserializer).map(|a| a.map(|a| a.0))
    }
}
