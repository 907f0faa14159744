//! Command-evaluation channel.
//!
//! The panel sends text such as `analyzeSilence("{\"threshold\":\"-40\"}")`
//! and expects a JSON string back. [`Bridge`] parses the call, looks the
//! function up in its method table and runs the typed handler.

use std::collections::HashMap;
use std::time::Instant;

use scut_media::{Analyzer, DetectionConfig};
use scut_models::ErrorResponse;

use crate::error::{PanelError, PanelResult};
use crate::handlers::{encode, run_analyze, run_cut};
use crate::host::HostEditor;
use crate::logging::RequestLogger;
use crate::metrics;

/// Something that evaluates a script and returns its string result.
pub trait EvalChannel {
    fn eval_script(&mut self, script: &str) -> String;
}

/// A parsed `function(argument)` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCall {
    pub function: String,
    /// The decoded argument: the JSON payload the handler parses.
    pub argument: String,
}

/// Parse `name("<json string literal>")`.
///
/// A bare JSON object argument (`name({...})`) is accepted as-is. A trailing
/// semicolon is ignored.
pub fn parse_call(expression: &str) -> PanelResult<ScriptCall> {
    let expr = expression.trim().trim_end_matches(';').trim_end();

    let open = expr
        .find('(')
        .ok_or_else(|| PanelError::input_parse("expected a function call"))?;
    if !expr.ends_with(')') {
        return Err(PanelError::input_parse("unterminated function call"));
    }

    let function = expr[..open].trim();
    let valid_name = !function.is_empty()
        && !function.starts_with(|c: char| c.is_ascii_digit())
        && function
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !valid_name {
        return Err(PanelError::input_parse(format!(
            "invalid function name: {:?}",
            function
        )));
    }

    let inner = expr[open + 1..expr.len() - 1].trim();
    let argument = if inner.starts_with('{') {
        inner.to_string()
    } else {
        serde_json::from_str::<String>(inner).map_err(|_| {
            PanelError::input_parse("Invalid parameters format: expected a JSON string argument")
        })?
    };

    Ok(ScriptCall {
        function: function.to_string(),
        argument,
    })
}

type Handler<H> = fn(&mut Bridge<H>, &str) -> PanelResult<String>;

/// Typed method table in front of a host.
pub struct Bridge<H: HostEditor> {
    host: H,
    analyzer: Analyzer,
    methods: HashMap<&'static str, Handler<H>>,
}

impl<H: HostEditor> Bridge<H> {
    pub fn new(host: H, config: DetectionConfig) -> Self {
        let mut methods: HashMap<&'static str, Handler<H>> = HashMap::new();
        methods.insert("analyzeSilence", Self::handle_analyze);
        methods.insert("cutSilence", Self::handle_cut);

        Self {
            host,
            analyzer: Analyzer::new(config),
            methods,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Names in the method table, sorted.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn handle_analyze(&mut self, params_json: &str) -> PanelResult<String> {
        let result = run_analyze(&self.host, &mut self.analyzer, params_json)?;
        encode(&result)
    }

    fn handle_cut(&mut self, params_json: &str) -> PanelResult<String> {
        let result = run_cut(&mut self.host, params_json)?;
        encode(&result)
    }

    /// Call `method` with a JSON payload and return the JSON reply.
    pub fn call(&mut self, method: &str, params_json: &str) -> String {
        let logger = RequestLogger::new(method);
        let _span = logger.create_span().entered();
        logger.log_start(params_json);

        let Some(handler) = self.methods.get(method).copied() else {
            logger.log_error("unknown function");
            metrics::record_request_error(method, "unknown_function");
            return ErrorResponse::new(format!("Unknown function: {}", method)).to_json();
        };

        let started = Instant::now();
        let result = handler(self, params_json);
        let elapsed = started.elapsed().as_secs_f64();

        match result {
            Ok(body) => {
                metrics::record_request(method, "ok", elapsed);
                logger.log_completion(&body);
                body
            }
            Err(e) => {
                metrics::record_request(method, "error", elapsed);
                metrics::record_request_error(method, e.kind());
                logger.log_error(&e.to_string());
                ErrorResponse::new(e.to_string()).to_json()
            }
        }
    }

    /// Evaluate a `function("<json>")` expression.
    pub fn evaluate(&mut self, expression: &str) -> String {
        match parse_call(expression) {
            Ok(call) => self.call(&call.function, &call.argument),
            Err(e) => {
                metrics::record_request_error("<unparsed>", e.kind());
                ErrorResponse::new(e.to_string()).to_json()
            }
        }
    }
}

impl<H: HostEditor> EvalChannel for Bridge<H> {
    fn eval_script(&mut self, script: &str) -> String {
        self.evaluate(script)
    }
}
