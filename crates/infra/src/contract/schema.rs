//! # JSON Schema サブセット検証器
//!
//! OpenAPI の `components/schemas` で一般的に使われるキーワードを評価する。
//!
//! ## 対応キーワード
//!
//! | 分類 | キーワード |
//! |------|-----------|
//! | 参照 | `$ref`（ドキュメント内の `#/...` のみ） |
//! | 型 | `type`（配列形式・`integer` 含む）, `nullable`, `enum` |
//! | 文字列 | `minLength`, `maxLength`, `pattern`, `format: uuid` |
//! | 数値 | `minimum`, `maximum`, `exclusiveMinimum`, `exclusiveMaximum` |
//! | 配列 | `items`, `minItems`, `maxItems` |
//! | オブジェクト | `required`, `properties`, `additionalProperties` |
//! | 合成 | `allOf`, `anyOf`, `oneOf` |
//!
//! 未対応のキーワードは無視する。
//!
//! ## エラーの順序
//!
//! 違反はスキーマの記述順に決定的に並ぶ（`required` → `properties` の順、
//! `properties` はスキーマ内の定義順）。型が一致しない場合はそれ以降のキーワードを評価しない。
//!
//! ## メッセージ
//!
//! 広く使われている JSON Schema 検証器と同じ文言にそろえる
//! （例: `must have required property 'customerId'`）。

use std::fmt;

use regex::Regex;
use serde_json::{Map, Value};

/// `$ref` の循環を打ち切る入れ子の上限
const MAX_DEPTH: usize = 64;

/// スキーマ違反 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// 違反箇所の JSON Pointer（ルートは空文字列）
    pub instance_path: String,
    /// 違反内容
    pub message:       String,
}

impl SchemaIssue {
    fn new(instance_path: &str, message: impl Into<String>) -> Self {
        Self {
            instance_path: instance_path.to_string(),
            message:       message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} {}", self.instance_path, self.message)
        }
    }
}

/// スキーマを評価して違反を列挙する
///
/// `root` は `$ref` の解決に使うドキュメント全体。
/// 違反がなければ空の `Vec` を返す。不正なスキーマや解決できない参照も
/// パニックせず [`SchemaIssue`] として報告する。
pub fn validate(schema: &Value, instance: &Value, root: &Value) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();
    Evaluator { root }.check(schema, instance, "", 0, &mut issues);
    issues
}

struct Evaluator<'a> {
    root: &'a Value,
}

impl Evaluator<'_> {
    fn check(
        &self,
        schema: &Value,
        instance: &Value,
        path: &str,
        depth: usize,
        issues: &mut Vec<SchemaIssue>,
    ) {
        if depth > MAX_DEPTH {
            issues.push(SchemaIssue::new(
                path,
                format!("schema nesting exceeds {MAX_DEPTH} levels"),
            ));
            return;
        }

        let schema = match schema {
            Value::Bool(true) => return,
            Value::Bool(false) => {
                issues.push(SchemaIssue::new(path, "boolean schema is false"));
                return;
            }
            Value::Object(schema) => schema,
            _ => {
                issues.push(SchemaIssue::new(path, "schema must be an object or boolean"));
                return;
            }
        };

        if let Some(reference) = schema.get("$ref") {
            match reference.as_str().and_then(|r| self.resolve(r)) {
                Some(target) => self.check(target, instance, path, depth + 1, issues),
                None => issues.push(SchemaIssue::new(
                    path,
                    format!("can't resolve reference {reference}"),
                )),
            }
            return;
        }

        if instance.is_null() && schema.get("nullable") == Some(&Value::Bool(true)) {
            return;
        }

        if let Some(expected) = schema
            .get("type")
            .filter(|expected| !matches_type(expected, instance))
        {
            issues.push(SchemaIssue::new(
                path,
                format!("must be {}", type_names(expected)),
            ));
            return;
        }

        let outside_enum = schema
            .get("enum")
            .and_then(Value::as_array)
            .is_some_and(|allowed| !allowed.contains(instance));
        if outside_enum {
            issues.push(SchemaIssue::new(
                path,
                "must be equal to one of the allowed values",
            ));
        }

        match instance {
            Value::String(s) => check_string(schema, s, path, issues),
            Value::Number(n) => {
                if let Some(n) = n.as_f64() {
                    check_number(schema, n, path, issues);
                }
            }
            Value::Array(items) => self.check_array(schema, items, path, depth, issues),
            Value::Object(object) => self.check_object(schema, object, path, depth, issues),
            Value::Null | Value::Bool(_) => {}
        }

        self.check_combinators(schema, instance, path, depth, issues);
    }

    fn resolve(&self, reference: &str) -> Option<&Value> {
        reference
            .strip_prefix('#')
            .and_then(|pointer| self.root.pointer(pointer))
    }

    fn check_array(
        &self,
        schema: &Map<String, Value>,
        items: &[Value],
        path: &str,
        depth: usize,
        issues: &mut Vec<SchemaIssue>,
    ) {
        let count = items.len() as u64;

        if let Some(min) = schema
            .get("minItems")
            .and_then(Value::as_u64)
            .filter(|&min| count < min)
        {
            issues.push(SchemaIssue::new(
                path,
                format!("must NOT have fewer than {min} items"),
            ));
        }
        if let Some(max) = schema
            .get("maxItems")
            .and_then(Value::as_u64)
            .filter(|&max| count > max)
        {
            issues.push(SchemaIssue::new(
                path,
                format!("must NOT have more than {max} items"),
            ));
        }

        if let Some(item_schema) = schema.get("items") {
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}/{index}");
                self.check(item_schema, item, &item_path, depth + 1, issues);
            }
        }
    }

    fn check_object(
        &self,
        schema: &Map<String, Value>,
        object: &Map<String, Value>,
        path: &str,
        depth: usize,
        issues: &mut Vec<SchemaIssue>,
    ) {
        if let Some(Value::Array(required)) = schema.get("required") {
            for name in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(name) {
                    issues.push(SchemaIssue::new(
                        path,
                        format!("must have required property '{name}'"),
                    ));
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        if let Some(properties) = properties {
            for (name, property_schema) in properties {
                if let Some(value) = object.get(name) {
                    let property_path = format!("{path}/{}", escape_pointer(name));
                    self.check(property_schema, value, &property_path, depth + 1, issues);
                }
            }
        }

        let Some(additional) = schema.get("additionalProperties") else {
            return;
        };
        let extras = object
            .iter()
            .filter(|(name, _)| properties.is_none_or(|p| !p.contains_key(name.as_str())));

        match additional {
            Value::Bool(true) => {}
            Value::Bool(false) => {
                for (name, _) in extras {
                    issues.push(SchemaIssue::new(
                        path,
                        format!("must NOT have additional properties ('{name}')"),
                    ));
                }
            }
            extra_schema => {
                for (name, value) in extras {
                    let property_path = format!("{path}/{}", escape_pointer(name));
                    self.check(extra_schema, value, &property_path, depth + 1, issues);
                }
            }
        }
    }

    fn check_combinators(
        &self,
        schema: &Map<String, Value>,
        instance: &Value,
        path: &str,
        depth: usize,
        issues: &mut Vec<SchemaIssue>,
    ) {
        if let Some(Value::Array(all)) = schema.get("allOf") {
            for sub in all {
                self.check(sub, instance, path, depth + 1, issues);
            }
        }

        if let Some(Value::Array(any)) = schema.get("anyOf") {
            let matched = any.iter().any(|sub| self.passes(sub, instance, path, depth));
            if !matched {
                issues.push(SchemaIssue::new(path, "must match a schema in anyOf"));
            }
        }

        if let Some(Value::Array(one)) = schema.get("oneOf") {
            let matched = one
                .iter()
                .filter(|sub| self.passes(sub, instance, path, depth))
                .count();
            if matched != 1 {
                issues.push(SchemaIssue::new(
                    path,
                    "must match exactly one schema in oneOf",
                ));
            }
        }
    }

    fn passes(&self, schema: &Value, instance: &Value, path: &str, depth: usize) -> bool {
        let mut scratch = Vec::new();
        self.check(schema, instance, path, depth + 1, &mut scratch);
        scratch.is_empty()
    }
}

fn check_string(
    schema: &Map<String, Value>,
    s: &str,
    path: &str,
    issues: &mut Vec<SchemaIssue>,
) {
    let length = s.chars().count() as u64;

    if let Some(min) = schema
        .get("minLength")
        .and_then(Value::as_u64)
        .filter(|&min| length < min)
    {
        issues.push(SchemaIssue::new(
            path,
            format!("must NOT have fewer than {min} characters"),
        ));
    }
    if let Some(max) = schema
        .get("maxLength")
        .and_then(Value::as_u64)
        .filter(|&max| length > max)
    {
        issues.push(SchemaIssue::new(
            path,
            format!("must NOT have more than {max} characters"),
        ));
    }

    if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(s) => {}
            Ok(_) => issues.push(SchemaIssue::new(
                path,
                format!("must match pattern \"{pattern}\""),
            )),
            Err(_) => issues.push(SchemaIssue::new(
                path,
                format!("invalid pattern \"{pattern}\""),
            )),
        }
    }

    if let Some(format) = schema
        .get("format")
        .and_then(Value::as_str)
        .filter(|format| !matches_format(format, s))
    {
        issues.push(SchemaIssue::new(
            path,
            format!("must match format \"{format}\""),
        ));
    }
}

fn check_number(schema: &Map<String, Value>, n: f64, path: &str, issues: &mut Vec<SchemaIssue>) {
    // OpenAPI 3.0 の exclusiveMinimum / exclusiveMaximum は minimum / maximum を修飾する真偽値
    let exclusive_min = schema.get("exclusiveMinimum") == Some(&Value::Bool(true));
    let exclusive_max = schema.get("exclusiveMaximum") == Some(&Value::Bool(true));

    if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
        if exclusive_min && n <= min {
            issues.push(SchemaIssue::new(path, format!("must be > {min}")));
        } else if n < min {
            issues.push(SchemaIssue::new(path, format!("must be >= {min}")));
        }
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
        if exclusive_max && n >= max {
            issues.push(SchemaIssue::new(path, format!("must be < {max}")));
        } else if n > max {
            issues.push(SchemaIssue::new(path, format!("must be <= {max}")));
        }
    }
    if let Some(limit) = schema
        .get("exclusiveMinimum")
        .and_then(Value::as_f64)
        .filter(|&limit| n <= limit)
    {
        issues.push(SchemaIssue::new(path, format!("must be > {limit}")));
    }
    if let Some(limit) = schema
        .get("exclusiveMaximum")
        .and_then(Value::as_f64)
        .filter(|&limit| n >= limit)
    {
        issues.push(SchemaIssue::new(path, format!("must be < {limit}")));
    }
}

fn matches_type(expected: &Value, instance: &Value) -> bool {
    match expected {
        Value::String(name) => matches_type_name(name, instance),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| matches_type_name(name, instance)),
        _ => true,
    }
}

fn matches_type_name(name: &str, instance: &Value) -> bool {
    match name {
        "null" => instance.is_null(),
        "boolean" => instance.is_boolean(),
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "number" => instance.is_number(),
        "integer" => match instance {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            _ => false,
        },
        _ => false,
    }
}

fn type_names(expected: &Value) -> String {
    match expected {
        Value::String(name) => name.clone(),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// 未知の format は検証しない
fn matches_format(format: &str, s: &str) -> bool {
    match format {
        "uuid" => is_uuid(s),
        _ => true,
    }
}

/// 8-4-4-4-12 のハイフン区切り表記のみ受け入れる（simple / URN 形式は不可）
fn is_uuid(s: &str) -> bool {
    s.len() == uuid::fmt::Hyphenated::LENGTH && uuid::Uuid::try_parse(s).is_ok()
}

/// JSON Pointer のトークンをエスケープする（RFC 6901）
fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
