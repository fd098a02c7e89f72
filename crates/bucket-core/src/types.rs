use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Bucket
// ---------------------------------------------------------------------------

/// A workflow rule as returned by the upstream bucket API.
///
/// Every field is optional on the wire and nothing is validated. Scalars
/// that the upstream is not consistent about (`id`, `priority`, `track`,
/// `sortFunction`) are kept as raw JSON and rendered through
/// [`display_text`]. Text fields accept any scalar; a field of the wrong
/// shape reads as missing rather than failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_function: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub condition_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub conditions: Vec<Condition>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub actions: Option<Actions>,
}

impl Bucket {
    /// First condition matching `field` and `operator` exactly.
    pub fn find_condition(&self, field: &str, operator: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|c| c.field.as_deref() == Some(field) && c.operator.as_deref() == Some(operator))
    }

    /// Name for display, or `None` when missing or blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// A single `field operator value` predicate.
///
/// `value` stays raw so the string `"null"` and JSON `null` remain distinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient_text")]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub operator: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(field: &str, operator: &str, value: impl Into<Value>) -> Self {
        Self {
            field: Some(field.to_string()),
            operator: Some(operator.to_string()),
            value: value.into(),
        }
    }

    /// The value as it appears in text: strings verbatim, everything else as
    /// its JSON form.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// True when the value is the literal string `"null"`.
    pub fn value_is_null_string(&self) -> bool {
        matches!(&self.value, Value::String(s) if s == "null")
    }

    /// Leading integer of the value, read the way a lenient `parseInt` does:
    /// optional whitespace, optional sign, then digits; trailing text ignored.
    pub fn leading_integer(&self) -> Option<i64> {
        match &self.value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => parse_leading_integer(s),
            _ => None,
        }
    }
}

fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The four action categories a bucket can instruct.
///
/// Absent, `null`, empty and non-list categories are all the same thing.
/// Entries that are not objects are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actions {
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ace: Vec<AceAction>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub my_page: Vec<MyPageAction>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ortto: Vec<OrttoAction>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub s2: Vec<Value>,
}

impl Actions {
    pub fn is_empty(&self) -> bool {
        self.ace.is_empty() && self.my_page.is_empty() && self.ortto.is_empty() && self.s2.is_empty()
    }

    /// Categories with at least one entry, in display order.
    pub fn categories(&self) -> Vec<ActionCategory> {
        ActionCategory::all()
            .iter()
            .copied()
            .filter(|c| match c {
                ActionCategory::Ace => !self.ace.is_empty(),
                ActionCategory::MyPage => !self.my_page.is_empty(),
                ActionCategory::Ortto => !self.ortto.is_empty(),
                ActionCategory::S2 => !self.s2.is_empty(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AceAction {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub ace_action_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub client_role: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AceAction {
    pub fn new(action_type: &str) -> Self {
        Self {
            ace_action_type: Some(action_type.to_string()),
            ..Self::default()
        }
    }

    pub fn is_type(&self, action_type: &str) -> bool {
        self.ace_action_type.as_deref() == Some(action_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPageAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrttoAction {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub ortto_action_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OrttoAction {
    pub fn new(action_type: &str) -> Self {
        Self {
            ortto_action_type: Some(action_type.to_string()),
            ..Self::default()
        }
    }

    pub fn is_type(&self, action_type: &str) -> bool {
        self.ortto_action_type.as_deref() == Some(action_type)
    }
}

// ---------------------------------------------------------------------------
// ActionCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    #[serde(rename = "ACE")]
    Ace,
    MyPage,
    Ortto,
    S2,
}

impl ActionCategory {
    pub fn all() -> &'static [ActionCategory] {
        &[
            ActionCategory::Ace,
            ActionCategory::MyPage,
            ActionCategory::Ortto,
            ActionCategory::S2,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionCategory::Ace => "ACE",
            ActionCategory::MyPage => "MyPage",
            ActionCategory::Ortto => "Ortto",
            ActionCategory::S2 => "S2",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ItemId
// ---------------------------------------------------------------------------

/// Identifier of a timeline item: the bucket's own id when it has a usable
/// one, otherwise its position in the fetched list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl ItemId {
    /// Usable id from a raw bucket id. Missing and falsy values (`null`,
    /// `0`, `""`, `false`) yield `None`.
    pub fn from_value(value: Option<&Value>) -> Option<ItemId> {
        match value? {
            Value::Number(n) => match n.as_i64() {
                Some(0) => None,
                Some(i) => Some(ItemId::Number(i)),
                None => Some(ItemId::Text(n.to_string())),
            },
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(ItemId::Text(s.clone())),
            Value::Bool(false) | Value::Null => None,
            other => Some(ItemId::Text(other.to_string())),
        }
    }

    /// True when `raw` names this id, whether it was typed as a number or
    /// as text. `"7"` matches both `7` and `"7"`.
    pub fn matches(&self, raw: &str) -> bool {
        let raw = raw.trim();
        match self {
            ItemId::Number(n) => raw.parse::<i64>() == Ok(*n),
            ItemId::Text(s) => s == raw,
        }
    }
}

impl From<usize> for ItemId {
    fn from(index: usize) -> Self {
        ItemId::Number(index as i64)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Display text of a loosely-typed scalar. Falsy values (`null`, `""`, `0`,
/// `false`) have no text.
pub fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Non-empty string or `None`.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Strings verbatim, numbers and booleans as their text, anything else
/// missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Entries of a JSON array that decode as `T`. Anything other than an array
/// is an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// `T` when the value decodes as one, otherwise missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}
