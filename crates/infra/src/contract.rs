//! # API 契約（OpenAPI ドキュメント）
//!
//! 外部で作成された OpenAPI 3 ドキュメントを読み込み、`operationId` ごとに
//! リクエスト / レスポンスのスキーマを引けるようにする。
//!
//! ## 構成
//!
//! - [`OpenApiContract`]: 解析済みドキュメントと operation 一覧
//! - [`schema`]: JSON Schema サブセットの検証器
//! - [`validator`]: operation 単位でリクエスト / レスポンスを検証する [`ContractValidator`]
//!
//! ## 対応形式
//!
//! 拡張子で判別する。`.yaml` / `.yml` は serde_yaml、`.json` は serde_json で解析する。
//! YAML のマップキーは文字列に正規化する（`201:` のような数値キーを許容するため）。

pub mod schema;
pub mod validator;

use std::{collections::BTreeMap, path::Path};

use serde_json::{Map, Value};

pub use self::{
    schema::SchemaIssue,
    validator::{ContractValidator, ValidationResult},
};
use crate::error::ContractError;

/// JSON ボディのメディアタイプ
const JSON_MEDIA_TYPE: &str = "application/json";

/// OpenAPI で operation を持ちうる HTTP メソッド
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// 1 つの operation に紐づくスキーマ
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSchemas {
    /// HTTP メソッド（小文字）
    pub method:           String,
    /// パステンプレート（例: `/orders`）
    pub path:             String,
    /// `requestBody.content["application/json"].schema`
    pub request_schema:   Option<Value>,
    /// ステータスコード（`"201"`, `"2XX"`, `"default"` 等）ごとのレスポンススキーマ
    pub response_schemas: BTreeMap<String, Value>,
}

impl OperationSchemas {
    /// ステータスコードに対応するレスポンススキーマを返す
    ///
    /// 完全一致 → `"2XX"` 形式の範囲指定 → `"default"` の順に探す。
    pub fn response_schema(&self, status_code: u16) -> Option<&Value> {
        let exact = status_code.to_string();
        let range = format!("{}XX", status_code / 100);

        self.response_schemas
            .get(&exact)
            .or_else(|| self.response_schemas.get(&range))
            .or_else(|| self.response_schemas.get("default"))
    }
}

/// 解析済みの OpenAPI ドキュメント
///
/// `$ref` 解決のためにドキュメント全体を保持する。
#[derive(Debug, Clone)]
pub struct OpenApiContract {
    document:   Value,
    operations: BTreeMap<String, OperationSchemas>,
}

impl OpenApiContract {
    /// ファイルから契約を読み込む
    ///
    /// # エラー
    ///
    /// - 拡張子が `yaml` / `yml` / `json` 以外: `UnsupportedFormat`
    /// - 読み込み失敗: `Io`
    /// - 構文エラー: `Yaml` / `Json`
    /// - OpenAPI として不正: `InvalidDocument`
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let contract = match extension.as_deref() {
            Some("yaml" | "yml") => {
                let text =
                    std::fs::read_to_string(path).map_err(|e| ContractError::io(path, e))?;
                Self::from_yaml_str(&text)?
            }
            Some("json") => {
                let text =
                    std::fs::read_to_string(path).map_err(|e| ContractError::io(path, e))?;
                Self::from_json_str(&text)?
            }
            _ => return Err(ContractError::unsupported_format(path)),
        };

        tracing::info!(
            operation_count = contract.operations.len(),
            "契約ドキュメントを読み込みました"
        );
        Ok(contract)
    }

    /// YAML 文字列から契約を構築する
    pub fn from_yaml_str(text: &str) -> Result<Self, ContractError> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
        Self::from_value(yaml_to_json(yaml)?)
    }

    /// JSON 文字列から契約を構築する
    pub fn from_json_str(text: &str) -> Result<Self, ContractError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// 解析済みの JSON 値から契約を構築する
    ///
    /// `paths` 配下の各 operation から `operationId` とスキーマを抽出する。
    /// `operationId` を持たない operation は検証対象外として読み飛ばす。
    pub fn from_value(document: Value) -> Result<Self, ContractError> {
        let root = document
            .as_object()
            .ok_or_else(|| ContractError::invalid_document("ルートがオブジェクトではありません"))?;

        match root.get("openapi") {
            Some(Value::String(version)) if version.starts_with('3') => {}
            Some(Value::String(version)) => {
                return Err(ContractError::invalid_document(format!(
                    "OpenAPI 3 系のみ対応しています: {version}"
                )));
            }
            _ => return Err(ContractError::invalid_document("openapi がありません")),
        }

        let paths = root
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| ContractError::invalid_document("paths がありません"))?;

        let mut operations = BTreeMap::new();
        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                return Err(ContractError::invalid_document(format!(
                    "パス {path} がオブジェクトではありません"
                )));
            };

            for method in HTTP_METHODS {
                let Some(operation) = item.get(method).and_then(Value::as_object) else {
                    continue;
                };
                let Some(operation_id) = operation.get("operationId").and_then(Value::as_str)
                else {
                    tracing::debug!(path, method, "operationId がないため検証対象外");
                    continue;
                };

                let schemas = OperationSchemas {
                    method:           method.to_string(),
                    path:             path.clone(),
                    request_schema:   request_schema(&document, operation)?,
                    response_schemas: response_schemas(&document, operation)?,
                };

                if operations.insert(operation_id.to_string(), schemas).is_some() {
                    return Err(ContractError::invalid_document(format!(
                        "operationId が重複しています: {operation_id}"
                    )));
                }
            }
        }

        Ok(Self {
            document,
            operations,
        })
    }

    /// ドキュメント全体（`$ref` 解決用）
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// `operationId` から operation を引く
    pub fn operation(&self, operation_id: &str) -> Option<&OperationSchemas> {
        self.operations.get(operation_id)
    }

    /// 定義済みの `operationId` 一覧（昇順）
    pub fn operation_ids(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

/// `requestBody`（`$ref` 可）から JSON スキーマを取り出す
fn request_schema(
    document: &Value,
    operation: &Map<String, Value>,
) -> Result<Option<Value>, ContractError> {
    let Some(body) = operation.get("requestBody") else {
        return Ok(None);
    };
    let body = resolve_component(document, body)?;
    Ok(json_content_schema(body))
}

/// `responses`（各レスポンスは `$ref` 可）から JSON スキーマを取り出す
fn response_schemas(
    document: &Value,
    operation: &Map<String, Value>,
) -> Result<BTreeMap<String, Value>, ContractError> {
    let mut schemas = BTreeMap::new();
    let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
        return Ok(schemas);
    };

    for (status, response) in responses {
        let response = resolve_component(document, response)?;
        if let Some(schema) = json_content_schema(response) {
            schemas.insert(status.clone(), schema);
        }
    }
    Ok(schemas)
}

fn json_content_schema(container: &Value) -> Option<Value> {
    container
        .get("content")
        .and_then(|content| content.get(JSON_MEDIA_TYPE))
        .and_then(|media| media.get("schema"))
        .cloned()
}

/// `components/requestBodies` 等を指す `$ref` を 1 段解決する
///
/// スキーマ内部の `$ref` は検証時に解決するため、ここでは扱わない。
fn resolve_component<'a>(document: &'a Value, value: &'a Value) -> Result<&'a Value, ContractError> {
    match value.get("$ref").and_then(Value::as_str) {
        Some(reference) => reference
            .strip_prefix('#')
            .and_then(|pointer| document.pointer(pointer))
            .ok_or_else(|| {
                ContractError::invalid_document(format!("$ref を解決できません: {reference}"))
            }),
        None => Ok(value),
    }
}

/// YAML 値を JSON 値に変換する
///
/// マップキーは文字列化する。タグ付き値はタグを捨てて中身を使う。
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, ContractError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| {
                        ContractError::invalid_document(format!("数値として表現できません: {n}"))
                    })?
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        return Err(ContractError::invalid_document(format!(
                            "マップキーに使用できない値です: {other:?}"
                        )));
                    }
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::error::ContractErrorKind;

    const MINIMAL: &str = r#"
openapi: 3.0.3
info:
  title: orders
  version: "1.0"
paths:
  /orders:
    post:
      operationId: createOrder
      requestBody:
        $ref: '#/components/requestBodies/CreateOrder'
      responses:
        201:
          description: created
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Order'
        4XX:
          $ref: '#/components/responses/Problem'
    get:
      responses:
        200:
          description: no operationId
components:
  requestBodies:
    CreateOrder:
      required: true
      content:
        application/json:
          schema:
            $ref: '#/components/schemas/CreateOrderRequest'
  responses:
    Problem:
      description: problem
      content:
        application/json:
          schema:
            type: object
  schemas:
    CreateOrderRequest:
      type: object
    Order:
      type: object
"#;

    fn shipped_contract_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../contracts/openapi.yaml")
    }

    #[test]
    fn test_from_yaml_str_でoperationとスキーマを抽出する() {
        let contract = OpenApiContract::from_yaml_str(MINIMAL).unwrap();

        let operation = contract.operation("createOrder").unwrap();
        assert_eq!(operation.method, "post");
        assert_eq!(operation.path, "/orders");
        assert_eq!(
            operation.request_schema,
            Some(json!({"$ref": "#/components/schemas/CreateOrderRequest"}))
        );
        assert_eq!(
            operation.response_schemas.keys().collect::<Vec<_>>(),
            vec!["201", "4XX"]
        );
    }

    #[test]
    fn test_from_yaml_str_operation_idのないoperationは読み飛ばす() {
        let contract = OpenApiContract::from_yaml_str(MINIMAL).unwrap();

        assert_eq!(contract.operation_ids().collect::<Vec<_>>(), vec!["createOrder"]);
    }

    #[test]
    fn test_response_schema_完全一致と範囲指定とdefaultの順に探す() {
        let operation = OperationSchemas {
            method:           "post".to_string(),
            path:             "/orders".to_string(),
            request_schema:   None,
            response_schemas: BTreeMap::from([
                ("201".to_string(), json!({"title": "exact"})),
                ("4XX".to_string(), json!({"title": "range"})),
                ("default".to_string(), json!({"title": "default"})),
            ]),
        };

        assert_eq!(operation.response_schema(201), Some(&json!({"title": "exact"})));
        assert_eq!(operation.response_schema(422), Some(&json!({"title": "range"})));
        assert_eq!(operation.response_schema(500), Some(&json!({"title": "default"})));
    }

    #[test]
    fn test_from_json_str_でも構築できる() {
        let text = json!({
            "openapi": "3.1.0",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/customers": {
                    "post": {
                        "operationId": "createCustomer",
                        "requestBody": {
                            "content": {"application/json": {"schema": {"type": "object"}}}
                        }
                    }
                }
            }
        })
        .to_string();

        let contract = OpenApiContract::from_json_str(&text).unwrap();

        assert!(contract.operation("createCustomer").is_some());
    }

    #[test]
    fn test_from_value_pathsがなければエラー() {
        let result = OpenApiContract::from_value(json!({"openapi": "3.0.0"}));

        assert!(matches!(
            result.unwrap_err().kind(),
            ContractErrorKind::InvalidDocument(_)
        ));
    }

    #[test]
    fn test_from_value_openapi_2系はエラー() {
        let result = OpenApiContract::from_value(json!({"openapi": "2.0", "paths": {}}));

        assert!(result.is_err());
    }

    #[test]
    fn test_from_value_operation_idの重複はエラー() {
        let op = json!({"operationId": "dup"});
        let result = OpenApiContract::from_value(json!({
            "openapi": "3.0.0",
            "paths": {"/a": {"post": op.clone()}, "/b": {"post": op}}
        }));

        assert!(format!("{}", result.unwrap_err()).contains("dup"));
    }

    #[test]
    fn test_from_value_解決できないrequest_body参照はエラー() {
        let result = OpenApiContract::from_value(json!({
            "openapi": "3.0.0",
            "paths": {"/a": {"post": {
                "operationId": "a",
                "requestBody": {"$ref": "#/components/requestBodies/Missing"}
            }}}
        }));

        assert!(matches!(
            result.unwrap_err().kind(),
            ContractErrorKind::InvalidDocument(_)
        ));
    }

    #[test]
    fn test_load_同梱の契約ファイルを読み込める() {
        let contract = OpenApiContract::load(shipped_contract_path()).unwrap();

        assert!(contract.operation("createOrder").is_some());
        assert!(contract.operation("createCustomer").is_some());
    }

    #[test]
    fn test_load_存在しないファイルはioエラー() {
        let result = OpenApiContract::load("contracts/does-not-exist.yaml");

        assert!(matches!(result.unwrap_err().kind(), ContractErrorKind::Io { .. }));
    }

    #[test]
    fn test_load_未対応の拡張子はエラー() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");

        let result = OpenApiContract::load(path);

        assert!(matches!(
            result.unwrap_err().kind(),
            ContractErrorKind::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_from_yaml_str_構文エラーはyamlエラー() {
        let result = OpenApiContract::from_yaml_str("openapi: [");

        assert!(matches!(result.unwrap_err().kind(), ContractErrorKind::Yaml(_)));
    }
}
