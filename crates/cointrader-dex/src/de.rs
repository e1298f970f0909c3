use crate::schema::PricePoint;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Upstream is inconsistent about quoting numbers; `"0.0123"`, `0.0123` and
/// `null` all turn up for the same field. Keep whatever arrives as an opaque
/// string, e.g.,
///
/// ```text
/// "1.52"  -> Some("1.52")
/// 1.52    -> Some("1.52")
/// null    -> None
/// ```
pub fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Deserialize::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

/// Price changes come either as a scalar, or as an object keyed by window:
///
/// ```text
/// "priceChange": 12.5
/// "priceChange": { "m5": 0.1, "h1": 1.2, "h6": 3.4, "h24": 12.5 }
/// ```
///
/// The object form is kept whole here; [`window`] picks a key out of it.
pub fn de_change<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Deserialize::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()))
}

/// Nested objects (`baseToken`, `info`) are optional extras on a pair; anything
/// other than a well-formed object reads as `None` instead of failing the row.
pub fn de_opt_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value: Option<serde_json::Value> = Deserialize::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ serde_json::Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// Pull a window (`"h24"`, `"d7"`, ...) out of a price change value.
pub fn window(value: &serde_json::Value, key: &str) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => map.get(key).cloned().and_then(scalar_to_string),
        other => scalar_to_string(other.clone()),
    }
}

fn scalar_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// [
//   1718000000000,     // epoch milliseconds
//   1.52               // price; sometimes quoted, "1.52"
// ]
impl<'de> Deserialize<'de> for PricePoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(PricePointVisitor)
    }
}

struct PricePointVisitor;

impl<'de> Visitor<'de> for PricePointVisitor {
    type Value = PricePoint;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a [timestamp, price] pair")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let timestamp: serde_json::Value = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let price: serde_json::Value = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;

        // drain anything trailing, e.g., a volume column
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}

        let timestamp = match timestamp {
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| de::Error::custom("timestamp out of range"))?,
            serde_json::Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| de::Error::custom(format!("timestamp {s:?}: {e}")))?,
            other => return Err(de::Error::custom(format!("invalid timestamp: {other}"))),
        };

        let price = match price {
            serde_json::Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| de::Error::custom("price out of range"))?,
            serde_json::Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("price {s:?}: {e}")))?,
            other => return Err(de::Error::custom(format!("invalid price: {other}"))),
        };

        Ok(PricePoint { timestamp, price })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "de_opt_string")]
        field: Option<String>,
    }

    #[test]
    fn opt_string_accepts_numbers_strings_and_null() {
        let h: Holder = serde_json::from_value(json!({ "field": 1.5 })).unwrap();
        assert_eq!(h.field.as_deref(), Some("1.5"));

        let h: Holder = serde_json::from_value(json!({ "field": "0.0001" })).unwrap();
        assert_eq!(h.field.as_deref(), Some("0.0001"));

        let h: Holder = serde_json::from_value(json!({ "field": null })).unwrap();
        assert_eq!(h.field, None);

        let h: Holder = serde_json::from_value(json!({})).unwrap();
        assert_eq!(h.field, None);
    }

    #[test]
    fn window_reads_objects_and_scalars() {
        let obj = json!({ "h1": 0.5, "h24": -3.2 });
        assert_eq!(window(&obj, "h24").as_deref(), Some("-3.2"));
        assert_eq!(window(&obj, "d7"), None);
        assert_eq!(window(&json!("7.1"), "h24").as_deref(), Some("7.1"));
    }

    #[test]
    fn price_point_from_mixed_pair() {
        let points: Vec<PricePoint> =
            serde_json::from_str(r#"[[1000, 1.5], ["2000", "1.6"], [3000, 2, 99]]"#).unwrap();
        assert_eq!(
            points,
            vec![
                PricePoint::new(1000, 1.5),
                PricePoint::new(2000, 1.6),
                PricePoint::new(3000, 2.0),
            ]
        );
    }

    #[test]
    fn price_point_rejects_garbage() {
        assert!(serde_json::from_str::<Vec<PricePoint>>(r#"[[1000, "abc"]]"#).is_err());
        assert!(serde_json::from_str::<Vec<PricePoint>>(r#"[[1000]]"#).is_err());
    }
}
