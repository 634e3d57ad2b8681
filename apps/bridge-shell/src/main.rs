//! Shroud Bridge Shell
//!
//! Headless driver for the security guard bridge: seeds an in-memory host
//! with the package identifiers given on the command line, then serves one
//! JSON request per stdin line and writes one JSON reply per stdout line.
//!
//! Request forms:
//! - `{"channel": "secure", "name": "hideContent", "args": {}}`
//! - `{"lifecycle": "foreground"}` or `{"lifecycle": "background"}`
//! - `{"inspect": true}` - dumps the in-memory window state

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use bridge_protocol::{ArgValue, OperationCall, OperationReply};
use platform_host::{LifecycleEvent, MemoryRegistry, MemoryWindow, Visibility};
use secure_bridge::{BridgeHandle, SecurityBridge};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Request {
    Call {
        channel: String,
        name: String,
        #[serde(default)]
        args: BTreeMap<String, Value>,
    },
    Lifecycle {
        lifecycle: String,
    },
    Inspect {
        inspect: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only reply JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bridge_shell=debug".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let window = MemoryWindow::new();
    let registry = MemoryRegistry::new();
    for identifier in std::env::args().skip(1) {
        registry.install(identifier);
    }

    info!("Starting Shroud bridge shell");

    let bridge = SecurityBridge::new(Box::new(window.clone()), Box::new(registry.clone()));
    let handle = BridgeHandle::spawn(bridge);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Request>(line) {
            Ok(request) => serve(&handle, &window, request)?,
            Err(err) => json!({"status": "bad_request", "message": err.to_string()}),
        };

        serde_json::to_writer(&mut stdout, &reply)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }

    handle.shutdown();
    info!("Bridge shell ended");
    Ok(())
}

fn serve(handle: &BridgeHandle, window: &MemoryWindow, request: Request) -> anyhow::Result<Value> {
    match request {
        Request::Call {
            channel,
            name,
            args,
        } => {
            let mut call = OperationCall::new(channel, name);
            for (key, value) in args {
                call = call.with_arg(key, json_to_arg(value));
            }
            Ok(reply_to_json(handle.invoke(call)?))
        }
        Request::Lifecycle { lifecycle } => {
            let event = match lifecycle.as_str() {
                "foreground" => LifecycleEvent::Foreground,
                "background" => LifecycleEvent::Background,
                other => {
                    return Ok(json!({
                        "status": "bad_request",
                        "message": format!("unknown lifecycle event: {other}"),
                    }));
                }
            };
            handle.lifecycle(event)?;
            Ok(json!({"status": "ok"}))
        }
        Request::Inspect { .. } => {
            let state = window.snapshot();
            Ok(json!({
                "secure": state.secure,
                "keep_awake": state.keep_awake,
                "visibility": match state.visibility {
                    Visibility::Visible => "visible",
                    Visibility::Invisible => "invisible",
                },
                "visibility_writes": state.visibility_writes,
            }))
        }
    }
}

fn json_to_arg(value: Value) -> ArgValue {
    match value {
        Value::Null => ArgValue::Null,
        Value::Bool(flag) => ArgValue::Bool(flag),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                ArgValue::Int(int)
            } else if let Some(float) = number.as_f64() {
                ArgValue::Double(float)
            } else {
                ArgValue::Null
            }
        }
        Value::String(text) => ArgValue::Str(text),
        Value::Array(items) => ArgValue::List(items.into_iter().map(json_to_arg).collect()),
        Value::Object(entries) => ArgValue::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, json_to_arg(value)))
                .collect(),
        ),
    }
}

fn arg_to_json(value: &ArgValue) -> Value {
    match value {
        ArgValue::Null => Value::Null,
        ArgValue::Bool(flag) => json!(flag),
        ArgValue::Int(int) => json!(int),
        ArgValue::Double(float) => json!(float),
        ArgValue::Str(text) => json!(text),
        ArgValue::List(items) => Value::Array(items.iter().map(arg_to_json).collect()),
        ArgValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), arg_to_json(value)))
                .collect(),
        ),
    }
}

fn reply_to_json(reply: OperationReply) -> Value {
    match reply {
        OperationReply::Success(value) => json!({
            "status": "success",
            "value": arg_to_json(&value),
        }),
        OperationReply::Failure { code, message } => json!({
            "status": "failure",
            "code": code.as_str(),
            "message": message,
        }),
        OperationReply::NotImplemented => json!({"status": "not_implemented"}),
    }
}
