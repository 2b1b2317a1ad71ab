use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    cli::Args,
    core::{
        pager,
        types::{Control, DescriptorInput, Intent, PagerConfig},
    },
    error::{AppError, AppResult},
};

/// MCP server (JSON-RPC 2.0 over stdio).
///
/// Exposes the pager as tools:
/// - initialize
/// - tools/list
/// - tools/call: render_pager, click_pager
pub async fn run(args: Args) -> AppResult<()> {
    let cfg = args.pager_config();
    serve(io::BufReader::new(io::stdin()), io::BufWriter::new(io::stdout()), &cfg).await
}

async fn serve<R, W>(mut input: R, mut output: W, cfg: &PagerConfig) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let n = input.read_line(&mut line).await?;
        if n == 0 {
            break;
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let msg: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                let resp = jsonrpc_error(Value::Null, -32700, format!("parse error: {e}"));
                write_line(&mut output, &resp).await?;
                continue;
            }
        };

        // Notifications (no id) are ignored.
        let id = msg.get("id").cloned().unwrap_or(Value::Null);
        if id.is_null() {
            continue;
        }

        let Some(method) = msg.get("method").and_then(|m| m.as_str()) else {
            let resp = jsonrpc_error(id, -32600, "invalid request: missing method".into());
            write_line(&mut output, &resp).await?;
            continue;
        };

        let params = msg.get("params").cloned().unwrap_or(Value::Null);

        let resp = match method {
            "initialize" => handle_initialize(id),
            "tools/list" => handle_tools_list(id),
            "tools/call" => handle_tools_call(id, params, cfg),
            _ => jsonrpc_error(id, -32601, format!("method not found: {method}")),
        };

        write_line(&mut output, &resp).await?;
    }

    Ok(())
}

fn handle_initialize(id: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "serverInfo": {
                "name": "blog-pager",
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": { "listChanged": false }
            }
        }
    })
}

fn descriptor_schema() -> Value {
    serde_json::json!({
        "currentPage": { "type": "integer", "minimum": 1 },
        "pageCount": { "type": "integer", "minimum": 1 },
        "pageLength": { "type": "integer", "minimum": 1 },
        "currentLimit": { "type": "integer", "minimum": 1 },
        "limitOptions": { "type": "array", "items": { "type": "integer", "minimum": 1 } }
    })
}

fn handle_tools_list(id: Value) -> Value {
    let mut click_props = descriptor_schema();
    if let Some(obj) = click_props.as_object_mut() {
        obj.insert(
            "control".to_string(),
            serde_json::json!({
                "type": "object",
                "properties": {
                    "kind": {
                        "type": "string",
                        "enum": ["first", "ellipsis_back", "previous", "page", "next", "ellipsis_forward", "last"]
                    },
                    "page": { "type": "integer", "minimum": 1 }
                },
                "required": ["kind"]
            }),
        );
    }

    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "tools": [
                {
                    "name": "render_pager",
                    "description": "Compute visible page links, shortcuts and the limit selector for a result page.",
                    "inputSchema": {
                        "type": "object",
                        "properties": descriptor_schema()
                    }
                },
                {
                    "name": "click_pager",
                    "description": "Resolve the page a pager control leads to.",
                    "inputSchema": {
                        "type": "object",
                        "properties": click_props,
                        "required": ["control"]
                    }
                }
            ]
        }
    })
}

fn handle_tools_call(id: Value, params: Value, cfg: &PagerConfig) -> Value {
    let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
        return jsonrpc_error(id, -32602, "invalid params: missing name".into());
    };
    let arguments = match params.get("arguments").cloned() {
        Some(Value::Null) | None => Value::Object(Default::default()),
        Some(v) => v,
    };

    let res = match name {
        "render_pager" => tool_render_pager(arguments, cfg),
        "click_pager" => tool_click_pager(arguments, cfg),
        other => Err(AppError::InvalidRequest(format!("unknown tool: {other}"))),
    };

    match res {
        Ok((text, structured)) => serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "content": [{ "type": "text", "text": text }],
                "structuredContent": structured,
                "isError": false
            }
        }),
        Err(e) => serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "content": [{ "type": "text", "text": format!("{}: {}", e.code(), e) }],
                "isError": true
            }
        }),
    }
}

fn tool_render_pager(arguments: Value, cfg: &PagerConfig) -> AppResult<(String, Value)> {
    let input: DescriptorInput = serde_json::from_value(arguments)
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    let view = pager::render(&input.resolve(cfg))?;
    structured(&view)
}

fn tool_click_pager(mut arguments: Value, cfg: &PagerConfig) -> AppResult<(String, Value)> {
    let control = arguments
        .as_object_mut()
        .and_then(|o| o.remove("control"))
        .ok_or_else(|| AppError::InvalidRequest("missing or invalid field: control".into()))?;
    let control: Control =
        serde_json::from_value(control).map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    let input: DescriptorInput = serde_json::from_value(arguments)
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    let mut intents: Vec<Intent> = Vec::with_capacity(1);
    let page = pager::click(&input.resolve(cfg), control, &mut intents)?;
    structured(&serde_json::json!({ "page": page, "intent": intents.first() }))
}

fn structured<T: serde::Serialize>(v: &T) -> AppResult<(String, Value)> {
    let structured = serde_json::to_value(v)?;
    let text = serde_json::to_string_pretty(&structured).unwrap_or_else(|_| "<result>".into());
    Ok((text, structured))
}

async fn write_line<W: AsyncWrite + Unpin>(w: &mut W, v: &Value) -> AppResult<()> {
    let mut buf = serde_json::to_vec(v)?;
    buf.push(b'\n');
    w.write_all(&buf).await?;
    w.flush().await?;
    Ok(())
}

fn jsonrpc_error(id: Value, code: i64, message: String) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
}
