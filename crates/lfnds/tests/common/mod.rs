//! Shared test doubles for the SDK integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lfnds::{codes, ElefundsError, ElefundsResult, HttpMethod, Transport, View};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// In-memory view substituting `{{name}}` placeholders
#[derive(Debug, Default)]
pub struct TemplateView {
    templates: HashMap<String, String>,
    variables: HashMap<String, Value>,
    css: Vec<String>,
    javascript: Vec<String>,
}

impl TemplateView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: &str, body: &str) -> Self {
        self.templates.insert(name.to_string(), body.to_string());
        self
    }

    pub fn with_css(mut self, tag: &str) -> Self {
        self.css.push(tag.to_string());
        self
    }

    pub fn with_javascript(mut self, tag: &str) -> Self {
        self.javascript.push(tag.to_string());
        self
    }
}

impl View for TemplateView {
    fn assign(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    fn render_template(&self, name: &str) -> ElefundsResult<String> {
        let template = self.templates.get(name).ok_or_else(|| {
            ElefundsError::view(
                codes::TEMPLATE_NOT_FOUND,
                format!("Template {} not found", name),
            )
        })?;

        let mut output = String::new();
        let mut rest = template.as_str();
        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                ElefundsError::view(codes::TEMPLATE_NOT_FOUND, "Unclosed placeholder")
            })?;
            let variable = after[..end].trim();
            match self.variables.get(variable) {
                Some(Value::String(s)) => output.push_str(s),
                Some(value) => output.push_str(&value.to_string()),
                None => {
                    return Err(ElefundsError::view(
                        codes::TEMPLATE_VARIABLE_MISSING,
                        format!("Variable {} was not assigned", variable),
                    ))
                }
            }
            rest = &after[end + 2..];
        }
        output.push_str(rest);
        Ok(output)
    }

    fn css_tag_strings(&self) -> Vec<String> {
        self.css.clone()
    }

    fn javascript_tag_strings(&self) -> Vec<String> {
        self.javascript.clone()
    }
}

/// A call seen by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub hashed_key: String,
    pub payload: Option<Value>,
}

pub type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// Transport answering from a queue and recording every call
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ElefundsResult<Value>>>,
    calls: CallLog,
    user_agent: String,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: ElefundsError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform_call(
        &self,
        method: HttpMethod,
        url: &str,
        hashed_key: &str,
        payload: Option<&Value>,
    ) -> ElefundsResult<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            hashed_key: hashed_key.to_string(),
            payload: payload.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }

    fn set_user_agent(&mut self, user_agent: String) {
        self.user_agent = user_agent;
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
