use crate::{foundation::core::Value, fx::args::FxArgs};

/// One `name(args)` token of an effect spec.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FxItem {
    /// Lower-cased effect name.
    pub name: String,
    pub args: FxArgs,
}

impl FxItem {
    pub fn new(name: impl Into<String>, args: FxArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Parse an effect spec such as `"bounce(s=0.8)|ripple|fly(cart)"`.
///
/// Never fails: empty input yields an empty list and malformed tokens are dropped one by one.
pub fn parse_fx(spec: Option<&str>) -> Vec<FxItem> {
    spec.map(parse_fx_str).unwrap_or_default()
}

pub fn parse_fx_str(spec: &str) -> Vec<FxItem> {
    spec.split('|')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .filter_map(parse_token)
        .collect()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn parse_token(tok: &str) -> Option<FxItem> {
    let name_len = tok.find(|c: char| !is_name_char(c)).unwrap_or(tok.len());
    if name_len == 0 {
        return None;
    }
    let (name, rest) = tok.split_at(name_len);

    let mut args = FxArgs::new();
    if !rest.is_empty() {
        let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
        for part in inner.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                None => args.insert(part, Value::Bool(true)),
                Some((k, v)) => args.insert(k.trim(), parse_value(v.trim())),
            }
        }
    }

    Some(FxItem::new(name.to_ascii_lowercase(), args))
}

fn parse_value(raw: &str) -> Value {
    let v = strip_quotes(raw);
    if is_plain_number(v) {
        if let Ok(n) = v.parse::<f64>() {
            return Value::Number(n);
        }
    }
    Value::Text(v.to_string())
}

/// Remove exactly one layer of matching `'` or `"`.
fn strip_quotes(v: &str) -> &str {
    for q in ['\'', '"'] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}

/// `-?digits(.digits)?`, nothing else.
fn is_plain_number(v: &str) -> bool {
    let digits = v.strip_prefix('-').unwrap_or(v);
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

#[cfg(test)]
#[path = "../../tests/unit/fx/parse.rs"]
mod tests;
